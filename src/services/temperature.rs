//! Temperature Service
//!
//! The temperature is a `f32` in degrees Celsius.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0100);

/// UUID of the temperature characteristic
pub const TEMPERATURE: Uuid = adafruit_service_uuid(0x0101);

pub static SERVICE: Service = Service {
    name: "temperature",
    uuid: UUID,
    characteristics: &[sensor_value(0x0101, ValueFormat::Float32), measurement_period(1000)],
};
