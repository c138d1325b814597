//! Humidity Service

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0700);

/// UUID of the relative humidity characteristic (`f32` percent)
pub const HUMIDITY: Uuid = adafruit_service_uuid(0x0701);

pub static SERVICE: Service = Service {
    name: "humidity",
    uuid: UUID,
    characteristics: &[sensor_value(0x0701, ValueFormat::Float32), measurement_period(1000)],
};
