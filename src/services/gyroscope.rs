//! Gyroscope Service
//!
//! The rotation rate is a [`Vector3`] in radians per second.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub use super::Vector3;

pub const UUID: Uuid = adafruit_service_uuid(0x0400);

/// UUID of the rotation rate characteristic
pub const ROTATION_RATE: Uuid = adafruit_service_uuid(0x0401);

pub static SERVICE: Service = Service {
    name: "gyroscope",
    uuid: UUID,
    characteristics: &[sensor_value(0x0401, ValueFormat::Vector3), measurement_period(1000)],
};
