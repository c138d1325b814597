//! Microphone Service
//!
//! Sound samples from the digital microphone of the board. Samples are signed 16 bit values, and
//! if there are two channels the samples alternate between the left and right channels.

use super::{sensor_value, Service};
use crate::characteristic::{measurement_period, Access, Characteristic, Properties, ValueFormat};
use crate::transfer::{TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};
use alloc::vec::Vec;

pub const UUID: Uuid = adafruit_service_uuid(0x0B00);

/// UUID of the sound samples characteristic
pub const SOUND_SAMPLES: Uuid = adafruit_service_uuid(0x0B01);

/// UUID of the number of channels characteristic
pub const NUMBER_OF_CHANNELS: Uuid = adafruit_service_uuid(0x0B02);

/// The maximum size of the sound samples value
pub const MAX_SAMPLES_SIZE: usize = 512;

pub static SERVICE: Service = Service {
    name: "microphone",
    uuid: UUID,
    characteristics: &[
        sensor_value(
            0x0B01,
            ValueFormat::Bytes {
                max_len: MAX_SAMPLES_SIZE,
            },
        ),
        Characteristic::new(NUMBER_OF_CHANNELS, &[Properties::Read], ValueFormat::Uint8)
            .set_write_access(Access::NoAccess),
        measurement_period(1000),
    ],
};

/// The number of microphone channels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channels {
    Mono,
    Stereo,
}

impl Channels {
    pub fn val(&self) -> u8 {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }
}

impl TransferFormatTryFrom for Channels {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        match <u8 as TransferFormatTryFrom>::try_from(raw)? {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            _ => Err(TransferFormatError::InvalidValue { name: "number of channels" }),
        }
    }
}

impl TransferFormatInto for Channels {
    fn len_of_into(&self) -> usize {
        1
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[0] = self.val()
    }
}

/// A block of sound samples
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SoundSamples {
    samples: Vec<i16>,
}

impl SoundSamples {
    /// The maximum number of samples within a sound samples value
    pub const MAX_SAMPLES: usize = MAX_SAMPLES_SIZE / 2;

    /// Create a new `SoundSamples`
    ///
    /// # Error
    /// An error is returned if there are more than `MAX_SAMPLES` samples.
    pub fn new(samples: Vec<i16>) -> Result<Self, TransferFormatError> {
        if samples.len() > Self::MAX_SAMPLES {
            Err(TransferFormatError::invalid_length(
                "sound samples",
                MAX_SAMPLES_SIZE,
                samples.len() * 2,
            ))
        } else {
            Ok(SoundSamples { samples })
        }
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    /// Iterate over the samples of one channel
    ///
    /// For stereo, `left` selects the left channel, otherwise the right channel. The input `left`
    /// is ignored for mono.
    pub fn channel(&self, channels: Channels, left: bool) -> impl Iterator<Item = i16> + '_ {
        let (skip, step) = match channels {
            Channels::Mono => (0, 1),
            Channels::Stereo if left => (0, 2),
            Channels::Stereo => (1, 2),
        };

        self.samples.iter().copied().skip(skip).step_by(step)
    }
}

impl TransferFormatTryFrom for SoundSamples {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        if raw.len() > MAX_SAMPLES_SIZE {
            return Err(TransferFormatError::invalid_length("sound samples", MAX_SAMPLES_SIZE, raw.len()));
        }

        if raw.len() % 2 != 0 {
            return Err(TransferFormatError::InvalidValue { name: "sound samples" });
        }

        let samples = raw
            .chunks_exact(2)
            .map(|chunk| <i16>::from_le_bytes([chunk[0], chunk[1]]))
            .collect();

        Ok(SoundSamples { samples })
    }
}

impl TransferFormatInto for SoundSamples {
    fn len_of_into(&self) -> usize {
        self.samples.len() * 2
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        self.samples
            .iter()
            .zip(into_ret.chunks_exact_mut(2))
            .for_each(|(sample, into)| into.copy_from_slice(&sample.to_le_bytes()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn samples_layout() {
        let raw = [0x01, 0x00, 0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F];

        let samples = <SoundSamples as TransferFormatTryFrom>::try_from(&raw).unwrap();

        assert_eq!(samples.as_slice(), [1, -1, i16::MIN, i16::MAX]);

        assert_eq!(TransferFormatInto::into(&samples), raw);

        assert_eq!(
            samples.channel(Channels::Stereo, false).collect::<Vec<_>>(),
            [-1, i16::MAX]
        );

        assert_eq!(samples.channel(Channels::Mono, false).count(), 4);
    }

    #[test]
    fn samples_size_limits() {
        assert!(<SoundSamples as TransferFormatTryFrom>::try_from(&[0; 512]).is_ok());

        assert!(<SoundSamples as TransferFormatTryFrom>::try_from(&[0; 514]).is_err());

        assert!(<SoundSamples as TransferFormatTryFrom>::try_from(&[0; 3]).is_err());

        assert!(SoundSamples::new(alloc::vec![0; 257]).is_err());
    }

    #[test]
    fn channels_characteristic() {
        let channels = SERVICE.find_characteristic(NUMBER_OF_CHANNELS).unwrap();

        assert!(channels.is_readable());

        assert!(!channels.is_writable());

        assert_eq!(Ok(Channels::Stereo), <Channels as TransferFormatTryFrom>::try_from(&[2]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_samples() {
        let samples = SoundSamples::new(alloc::vec![1, -1, i16::MAX]).unwrap();

        let serialized = bincode::serialize(&samples).unwrap();

        assert_eq!(serialized, [3, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0xFF, 0xFF, 0xFF, 0x7F]);

        assert_eq!(samples, bincode::deserialize::<SoundSamples>(&serialized).unwrap());
    }
}
