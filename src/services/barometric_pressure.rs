//! Barometric Pressure Service

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0800);

/// UUID of the pressure characteristic (`f32` hectopascals)
pub const PRESSURE: Uuid = adafruit_service_uuid(0x0801);

pub static SERVICE: Service = Service {
    name: "barometric pressure",
    uuid: UUID,
    characteristics: &[sensor_value(0x0801, ValueFormat::Float32), measurement_period(1000)],
};
