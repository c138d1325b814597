//! Light Sensor Service
//!
//! The light level is a `f32` of non-calibrated units from 0 to 1023.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0300);

/// UUID of the light level characteristic
pub const LIGHT_LEVEL: Uuid = adafruit_service_uuid(0x0301);

pub static SERVICE: Service = Service {
    name: "light sensor",
    uuid: UUID,
    characteristics: &[sensor_value(0x0301, ValueFormat::Float32), measurement_period(1000)],
};
