//! Accelerometer Service
//!
//! The acceleration is a [`Vector3`] in meters per second squared.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub use super::Vector3;

pub const UUID: Uuid = adafruit_service_uuid(0x0200);

/// UUID of the acceleration characteristic
pub const ACCELERATION: Uuid = adafruit_service_uuid(0x0201);

pub static SERVICE: Service = Service {
    name: "accelerometer",
    uuid: UUID,
    characteristics: &[sensor_value(0x0201, ValueFormat::Vector3), measurement_period(1000)],
};
