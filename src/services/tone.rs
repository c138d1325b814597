//! Tone Service
//!
//! A client writes a [`Tone`] to play it on the speaker of the board.

use super::Service;
use crate::characteristic::{Access, Characteristic, Properties, ValueFormat};
use crate::transfer::{read_at, TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub const UUID: Uuid = adafruit_service_uuid(0x0C00);

/// UUID of the tone characteristic
pub const TONE: Uuid = adafruit_service_uuid(0x0C01);

pub static SERVICE: Service = Service {
    name: "tone",
    uuid: UUID,
    characteristics: &[
        Characteristic::new(TONE, &[Properties::Write], ValueFormat::Tone).set_read_access(Access::NoAccess),
    ],
};

/// A tone to play
///
/// A frequency of zero stops the current tone. A duration of zero plays the tone until another
/// tone is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tone {
    /// Frequency in hertz
    pub frequency: u16,
    /// Duration in milliseconds
    pub duration: u32,
}

impl Tone {
    const SIZE: usize = 6;

    pub fn is_stop(&self) -> bool {
        self.frequency == 0
    }

    pub fn is_continuous(&self) -> bool {
        self.duration == 0
    }
}

impl TransferFormatTryFrom for Tone {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        if raw.len() != Self::SIZE {
            return Err(TransferFormatError::bad_size("tone", Self::SIZE, raw.len()));
        }

        Ok(Tone {
            frequency: read_at(raw, 0)?,
            duration: read_at(raw, 2)?,
        })
    }
}

impl TransferFormatInto for Tone {
    fn len_of_into(&self) -> usize {
        Self::SIZE
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[..2].copy_from_slice(&self.frequency.to_le_bytes());
        into_ret[2..].copy_from_slice(&self.duration.to_le_bytes());
    }
}
