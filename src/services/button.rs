//! Button Service
//!
//! The state of the slide switch and the two push buttons of a Circuit Playground Bluefruit. The
//! value is notified whenever a button changes.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, ValueFormat};
use crate::transfer::{TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0600);

/// UUID of the pressed buttons characteristic
pub const PRESSED: Uuid = adafruit_service_uuid(0x0601);

pub static SERVICE: Service = Service {
    name: "button",
    uuid: UUID,
    characteristics: &[sensor_value(0x0601, ValueFormat::Uint32), measurement_period(0)],
};

/// A button of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// The slide switch
    Switch,
    A,
    B,
}

impl Button {
    const fn bit(&self) -> u32 {
        match *self {
            Button::Switch => 1 << 0,
            Button::A => 1 << 1,
            Button::B => 1 << 2,
        }
    }
}

/// Bit field of the buttons that are pressed
///
/// Bits other than those for a [`Button`] are reserved and are kept as is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buttons(u32);

impl Buttons {
    pub fn new() -> Self {
        Buttons(0)
    }

    pub fn press(&mut self, button: Button) -> &mut Self {
        self.0 |= button.bit();
        self
    }

    pub fn release(&mut self, button: Button) -> &mut Self {
        self.0 &= !button.bit();
        self
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn to_val(&self) -> u32 {
        self.0
    }
}

impl TransferFormatTryFrom for Buttons {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        <u32 as TransferFormatTryFrom>::try_from(raw).map(Buttons)
    }
}

impl TransferFormatInto for Buttons {
    fn len_of_into(&self) -> usize {
        4
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        self.0.build_into_ret(into_ret)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn button_bits() {
        let mut buttons = Buttons::new();

        buttons.press(Button::A).press(Button::Switch);

        assert_eq!(TransferFormatInto::into(&buttons), [0b011, 0, 0, 0]);

        buttons.release(Button::Switch);

        let buttons = <Buttons as TransferFormatTryFrom>::try_from(&TransferFormatInto::into(&buttons)).unwrap();

        assert!(buttons.is_pressed(Button::A));

        assert!(!buttons.is_pressed(Button::Switch));

        assert!(!buttons.is_pressed(Button::B));
    }
}
