//! Quaternion Service
//!
//! The orientation of the board computed by sensor fusion of the accelerometer, gyroscope, and
//! magnetometer.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::transfer::{read_at, TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0D00);

/// UUID of the quaternion characteristic
pub const QUATERNION: Uuid = adafruit_service_uuid(0x0D01);

pub static SERVICE: Service = Service {
    name: "quaternion",
    uuid: UUID,
    characteristics: &[sensor_value(0x0D01, ValueFormat::Quaternion), measurement_period(1000)],
};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Quaternion {
    const SIZE: usize = 16;

    pub const IDENTITY: Quaternion = Quaternion {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

impl TransferFormatTryFrom for Quaternion {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        if raw.len() != Self::SIZE {
            return Err(TransferFormatError::bad_size("quaternion", Self::SIZE, raw.len()));
        }

        Ok(Quaternion {
            w: read_at(raw, 0)?,
            x: read_at(raw, 4)?,
            y: read_at(raw, 8)?,
            z: read_at(raw, 12)?,
        })
    }
}

impl TransferFormatInto for Quaternion {
    fn len_of_into(&self) -> usize {
        Self::SIZE
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        [self.w, self.x, self.y, self.z]
            .iter()
            .zip(into_ret.chunks_exact_mut(4))
            .for_each(|(v, into)| into.copy_from_slice(&v.to_le_bytes()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity() {
        let raw = TransferFormatInto::into(&Quaternion::IDENTITY);

        assert_eq!(raw[..4], [0x00, 0x00, 0x80, 0x3F]);

        assert_eq!(raw[4..], [0; 12]);

        assert_eq!(
            Ok(Quaternion::IDENTITY),
            <Quaternion as TransferFormatTryFrom>::try_from(&raw)
        );
    }
}
