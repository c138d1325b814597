//! Magnetometer Service
//!
//! The magnetic field is a [`Vector3`] in micro teslas.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub use super::Vector3;

pub const UUID: Uuid = adafruit_service_uuid(0x0500);

/// UUID of the magnetic field characteristic
pub const MAGNETIC_FIELD: Uuid = adafruit_service_uuid(0x0501);

pub static SERVICE: Service = Service {
    name: "magnetometer",
    uuid: UUID,
    characteristics: &[sensor_value(0x0501, ValueFormat::Vector3), measurement_period(1000)],
};
