//! Color Sensor Service

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::transfer::{read_at, TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0A00);

/// UUID of the color characteristic
pub const COLOR: Uuid = adafruit_service_uuid(0x0A01);

pub static SERVICE: Service = Service {
    name: "color sensor",
    uuid: UUID,
    characteristics: &[sensor_value(0x0A01, ValueFormat::Color), measurement_period(1000)],
};

/// Raw color channel readings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub clear: u16,
}

impl Color {
    const SIZE: usize = 8;
}

impl TransferFormatTryFrom for Color {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        if raw.len() != Self::SIZE {
            return Err(TransferFormatError::bad_size("color", Self::SIZE, raw.len()));
        }

        Ok(Color {
            red: read_at(raw, 0)?,
            green: read_at(raw, 2)?,
            blue: read_at(raw, 4)?,
            clear: read_at(raw, 6)?,
        })
    }
}

impl TransferFormatInto for Color {
    fn len_of_into(&self) -> usize {
        Self::SIZE
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        [self.red, self.green, self.blue, self.clear]
            .iter()
            .zip(into_ret.chunks_exact_mut(2))
            .for_each(|(channel, into)| into.copy_from_slice(&channel.to_le_bytes()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn color_layout() {
        let color = Color {
            red: 0x0102,
            green: 3,
            blue: 0,
            clear: 0xFFFF,
        };

        let raw = TransferFormatInto::into(&color);

        assert_eq!(raw, [0x02, 0x01, 3, 0, 0, 0, 0xFF, 0xFF]);

        assert_eq!(Ok(color), <Color as TransferFormatTryFrom>::try_from(&raw));
    }
}
