//! Addressable Pixel Service
//!
//! Control of NeoPixels, DotStars, and other addressable pixel strips. A client selects the pin and
//! the type of pixels and then writes [`PixelPacket`]s to fill the pixel buffer of the peripheral.
//! There is no measurement period for this service.

use super::Service;
use crate::characteristic::{Access, Characteristic, Properties, ValueFormat};
use crate::pixel::{BufferError, PixelBuffer, MAX_PACKET_SIZE};
use crate::transfer::{TransferFormatError, TransferFormatTryFrom};
use crate::uuid::{adafruit_service_uuid, Uuid};

pub use crate::pixel::{PixelPacket, PixelPinType};

pub const UUID: Uuid = adafruit_service_uuid(0x0900);

/// UUID of the pin characteristic
pub const PIXEL_PIN: Uuid = adafruit_service_uuid(0x0901);

/// UUID of the pixel pin type characteristic
pub const PIXEL_PIN_TYPE: Uuid = adafruit_service_uuid(0x0902);

/// UUID of the pixel packet characteristic
pub const PIXEL_PACKET: Uuid = adafruit_service_uuid(0x0903);

pub static SERVICE: Service = Service {
    name: "addressable pixel",
    uuid: UUID,
    characteristics: &[
        Characteristic::new(PIXEL_PIN, &[Properties::Read, Properties::Write], ValueFormat::Uint8),
        Characteristic::new(PIXEL_PIN_TYPE, &[Properties::Read, Properties::Write], ValueFormat::Uint8),
        Characteristic::new(PIXEL_PACKET, &[Properties::Write], ValueFormat::Bytes {
            max_len: MAX_PACKET_SIZE,
        })
        .set_read_access(Access::NoAccess),
    ],
};

/// Error for a client write to the addressable pixel service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteError {
    /// The UUID is not a writable characteristic of this service
    UnknownCharacteristic(Uuid),
    TransferFormat(TransferFormatError),
    Buffer(BufferError),
}

impl core::fmt::Display for WriteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            WriteError::UnknownCharacteristic(uuid) => {
                write!(f, "{} is not a writable addressable pixel characteristic", uuid)
            }
            WriteError::TransferFormat(e) => core::fmt::Display::fmt(e, f),
            WriteError::Buffer(e) => core::fmt::Display::fmt(e, f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WriteError {}

impl From<TransferFormatError> for WriteError {
    fn from(e: TransferFormatError) -> Self {
        WriteError::TransferFormat(e)
    }
}

impl From<BufferError> for WriteError {
    fn from(e: BufferError) -> Self {
        WriteError::Buffer(e)
    }
}

/// The peripheral side state of the addressable pixel service
///
/// ```
/// # use bo_tie_adafruit::services::addressable_pixel::{AddressablePixels, PixelPacket, PIXEL_PACKET};
/// let mut pixels = AddressablePixels::new(8, 3);
///
/// let packet = PixelPacket::encode(0, true, &[0xFF, 0x00, 0x00]).unwrap();
///
/// assert!(pixels.write(PIXEL_PACKET, &packet).unwrap());
/// assert_eq!(pixels.buffer().as_slice(), [0xFF, 0x00, 0x00]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressablePixels {
    pin: u8,
    pin_type: PixelPinType,
    buffer: PixelBuffer,
}

impl AddressablePixels {
    /// Create the state with a pixel buffer of `buffer_len` bytes
    pub fn new(pin: u8, buffer_len: usize) -> Self {
        AddressablePixels {
            pin,
            pin_type: PixelPinType::Ws2812,
            buffer: PixelBuffer::new(buffer_len),
        }
    }

    pub fn pin(&self) -> u8 {
        self.pin
    }

    pub fn pin_type(&self) -> PixelPinType {
        self.pin_type
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Process a client write
    ///
    /// The return is true when the pixel buffer should be written out to the pixels. Changing the
    /// pin or the pin type clears the pixel buffer.
    pub fn write(&mut self, uuid: Uuid, raw: &[u8]) -> Result<bool, WriteError> {
        match uuid {
            PIXEL_PIN => {
                self.pin = <u8 as TransferFormatTryFrom>::try_from(raw)?;
                self.buffer.clear();
                Ok(false)
            }
            PIXEL_PIN_TYPE => {
                self.pin_type = <PixelPinType as TransferFormatTryFrom>::try_from(raw)?;
                self.buffer.clear();
                Ok(false)
            }
            PIXEL_PACKET => {
                let packet = PixelPacket::decode(raw)?;

                Ok(self.buffer.apply(&packet)?)
            }
            _ => Err(WriteError::UnknownCharacteristic(uuid)),
        }
    }

    /// Process a client read
    ///
    /// `None` is returned if the characteristic cannot be read.
    pub fn read(&self, uuid: Uuid) -> Option<u8> {
        match uuid {
            PIXEL_PIN => Some(self.pin),
            PIXEL_PIN_TYPE => Some(self.pin_type.val()),
            _ => None,
        }
    }
}
