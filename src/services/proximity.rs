//! Proximity Service
//!
//! The proximity is a `u16` of non-calibrated units, larger values are closer.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0E00);

/// UUID of the proximity characteristic
pub const PROXIMITY: Uuid = adafruit_service_uuid(0x0E01);

pub static SERVICE: Service = Service {
    name: "proximity",
    uuid: UUID,
    characteristics: &[sensor_value(0x0E01, ValueFormat::Uint16), measurement_period(1000)],
};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn proximity_value_size() {
        let characteristic = SERVICE.find_characteristic(PROXIMITY).unwrap();

        assert!(characteristic.check_value(&[0x10, 0x00]).is_ok());

        assert!(characteristic.check_value(&[0x10, 0x00, 0x00, 0x00]).is_err());
    }
}
