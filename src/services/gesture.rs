//! Gesture Service
//!
//! Swipe gestures detected by a proximity sensor. The measurement period starts at zero, so a
//! gesture is only notified when it changes.

use super::Service;
use crate::characteristic::{measurement_period, Access, Characteristic, Properties, ValueFormat};
use crate::transfer::{TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0F00);

/// UUID of the gesture characteristic
pub const GESTURE: Uuid = adafruit_service_uuid(0x0F01);

pub static SERVICE: Service = Service {
    name: "gesture",
    uuid: UUID,
    characteristics: &[
        Characteristic::new(GESTURE, &[Properties::Read, Properties::Notify], ValueFormat::Uint8)
            .set_read_access(Access::Open)
            .set_write_access(Access::NoAccess),
        measurement_period(0),
    ],
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gesture {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

impl Gesture {
    pub fn val(&self) -> u8 {
        match self {
            Gesture::None => 0,
            Gesture::Up => 1,
            Gesture::Down => 2,
            Gesture::Left => 3,
            Gesture::Right => 4,
        }
    }

    pub fn try_from_val(val: u8) -> Result<Self, TransferFormatError> {
        match val {
            0 => Ok(Gesture::None),
            1 => Ok(Gesture::Up),
            2 => Ok(Gesture::Down),
            3 => Ok(Gesture::Left),
            4 => Ok(Gesture::Right),
            _ => Err(TransferFormatError::InvalidValue { name: "gesture" }),
        }
    }
}

impl core::fmt::Display for Gesture {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Gesture::None => f.write_str("no gesture"),
            Gesture::Up => f.write_str("swipe up"),
            Gesture::Down => f.write_str("swipe down"),
            Gesture::Left => f.write_str("swipe left"),
            Gesture::Right => f.write_str("swipe right"),
        }
    }
}

impl TransferFormatTryFrom for Gesture {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        <u8 as TransferFormatTryFrom>::try_from(raw).and_then(Gesture::try_from_val)
    }
}

impl TransferFormatInto for Gesture {
    fn len_of_into(&self) -> usize {
        1
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[0] = self.val()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::characteristic::InitialValue;

    #[test]
    fn gesture_values() {
        for val in 0..=4u8 {
            assert_eq!(Ok(val), Gesture::try_from_val(val).map(|g| g.val()));
        }

        assert_eq!(Ok(Gesture::Left), <Gesture as TransferFormatTryFrom>::try_from(&[3]));

        assert!(<Gesture as TransferFormatTryFrom>::try_from(&[5]).is_err());

        assert!(<Gesture as TransferFormatTryFrom>::try_from(&[1, 0]).is_err());
    }

    #[test]
    fn notify_on_change() {
        let period = SERVICE.characteristics[1];

        assert_eq!(Some(InitialValue::Int32(0)), period.initial_value);

        let gesture = SERVICE.find_characteristic(GESTURE).unwrap();

        assert_eq!(0x12, gesture.properties_bit_field());

        assert!(!gesture.is_writable());
    }
}
