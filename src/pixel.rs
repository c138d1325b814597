//! Addressable pixel control
//!
//! The addressable pixel service is used by a client to set the colors of a strip of NeoPixels or
//! DotStars. The client writes pixel packets to the pixel packet characteristic.
//!
//! ```text
//! offset  size  field
//! 0       2     start, byte offset into the pixel buffer (little endian)
//! 2       1     flags, bit 0 set means write the pixel buffer to the pixels now
//! 3       N     raw pixel bytes in the color order of the pixel type
//! ```
//!
//! `start` is a byte offset, not a pixel index. A client can set a strip larger than a single
//! packet by writing successive packets at increasing offsets with only the last one having the
//! *write now* flag.

use crate::transfer::{TransferFormatError, TransferFormatInto};
use alloc::vec::Vec;

/// The maximum size of a pixel packet
pub const MAX_PACKET_SIZE: usize = 512;

/// The size of the `start` and `flags` fields of a pixel packet
pub const HEADER_SIZE: usize = 3;

/// Flag bit for writing the buffer to the pixels
const WRITE_NOW: u8 = 1 << 0;

/// A pixel packet
///
/// The data of a decoded packet borrows from the bytes it was decoded from.
///
/// ```
/// # use bo_tie_adafruit::pixel::PixelPacket;
/// let packet = PixelPacket::decode(&[0x00, 0x00, 0x01, 0xFF, 0x00, 0x00]).unwrap();
///
/// assert_eq!(0, packet.start);
/// assert!(packet.write_now);
/// assert_eq!([0xFF, 0x00, 0x00], packet.data);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PixelPacket<'a> {
    /// The byte offset within the pixel buffer to write `data` to
    pub start: u16,
    /// Write the entire pixel buffer to the pixels after applying this packet
    pub write_now: bool,
    /// Raw pixel bytes
    pub data: &'a [u8],
}

impl<'a> PixelPacket<'a> {
    pub fn new(start: u16, write_now: bool, data: &'a [u8]) -> Self {
        PixelPacket { start, write_now, data }
    }

    /// Encode a pixel packet
    ///
    /// # Error
    /// An `InvalidLength` error is returned if the encoded packet would be larger than
    /// [`MAX_PACKET_SIZE`].
    ///
    /// ```
    /// # use bo_tie_adafruit::pixel::PixelPacket;
    /// let raw = PixelPacket::encode(0, true, &[0xFF, 0x00, 0x00]).unwrap();
    ///
    /// assert_eq!(raw, [0x00, 0x00, 0x01, 0xFF, 0x00, 0x00]);
    /// ```
    pub fn encode(start: u16, write_now: bool, data: &[u8]) -> Result<Vec<u8>, TransferFormatError> {
        let packet = PixelPacket::new(start, write_now, data);

        packet.check_len()?;

        Ok(TransferFormatInto::into(&packet))
    }

    /// Encode into a buffer
    ///
    /// The packet is encoded to the front of `buffer` and the number of bytes written is returned.
    ///
    /// # Error
    /// An `InvalidLength` error is returned if the packet is larger than [`MAX_PACKET_SIZE`] or
    /// `buffer` is too small for the packet.
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, TransferFormatError> {
        self.check_len()?;

        let len = self.len_of_into();

        let available = buffer.len();

        let into = buffer
            .get_mut(..len)
            .ok_or(TransferFormatError::invalid_length("pixel packet", available, len))?;

        self.build_into_ret(into);

        Ok(len)
    }

    /// Decode a pixel packet
    ///
    /// # Error
    /// A `TooShort` error is returned if `raw` is smaller than the `start` and `flags` fields.
    /// Packets larger than [`MAX_PACKET_SIZE`] are accepted; enforcing the size is left to the
    /// characteristic.
    pub fn decode(raw: &'a [u8]) -> Result<Self, TransferFormatError> {
        match raw {
            [start_lo, start_hi, flags, data @ ..] => Ok(PixelPacket {
                start: <u16>::from_le_bytes([*start_lo, *start_hi]),
                write_now: flags & WRITE_NOW != 0,
                data,
            }),
            _ => Err(TransferFormatError::too_short("pixel packet", HEADER_SIZE, raw.len())),
        }
    }

    /// The byte index one past the last byte written by this packet
    pub fn end(&self) -> usize {
        self.start as usize + self.data.len()
    }

    fn check_len(&self) -> Result<(), TransferFormatError> {
        let len = self.len_of_into();

        if len > MAX_PACKET_SIZE {
            Err(TransferFormatError::invalid_length("pixel packet", MAX_PACKET_SIZE, len))
        } else {
            Ok(())
        }
    }
}

impl TransferFormatInto for PixelPacket<'_> {
    fn len_of_into(&self) -> usize {
        HEADER_SIZE + self.data.len()
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[..2].copy_from_slice(&self.start.to_le_bytes());

        // reserved bits are zero
        into_ret[2] = if self.write_now { WRITE_NOW } else { 0 };

        into_ret[HEADER_SIZE..].copy_from_slice(self.data);
    }
}

/// A streaming packet transport
///
/// This is implemented by the characteristic (or packet buffer) that pixel packets are received
/// through.
pub trait PacketRead {
    /// Read the next packet into `buffer`
    ///
    /// The return is the number of bytes of the packet. Zero is returned when no new packet is
    /// available.
    fn read_into(&mut self, buffer: &mut [u8]) -> usize;
}

/// Read the next pixel packet from `reader`
///
/// `Ok(None)` is returned when the reader has no new packet. This is different from receiving a
/// packet without any pixel data, which is returned as a packet with an empty `data`.
///
/// ```
/// # use bo_tie_adafruit::pixel::{read_packet, PacketRead, MAX_PACKET_SIZE};
/// struct Empty;
///
/// impl PacketRead for Empty {
///     fn read_into(&mut self, _: &mut [u8]) -> usize {
///         0
///     }
/// }
///
/// let mut buffer = [0u8; MAX_PACKET_SIZE];
///
/// assert_eq!(Ok(None), read_packet(&mut Empty, &mut buffer));
/// ```
pub fn read_packet<'a, R>(reader: &mut R, buffer: &'a mut [u8]) -> Result<Option<PixelPacket<'a>>, TransferFormatError>
where
    R: PacketRead + ?Sized,
{
    let len = reader.read_into(buffer);

    if len == 0 {
        return Ok(None);
    }

    // a reader claiming more than the buffer is treated as a full buffer
    let len = core::cmp::min(len, buffer.len());

    let buffer: &'a [u8] = buffer;

    PixelPacket::decode(&buffer[..len]).map(Some)
}

/// The type of pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PixelPinType {
    /// WS2812 (NeoPixel) at 800kHz
    Ws2812,
    /// SPI (APA102, DotStar)
    Spi,
}

impl PixelPinType {
    pub fn val(&self) -> u8 {
        match self {
            PixelPinType::Ws2812 => 0,
            PixelPinType::Spi => 1,
        }
    }
}

impl crate::transfer::TransferFormatTryFrom for PixelPinType {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        match <u8 as crate::transfer::TransferFormatTryFrom>::try_from(raw)? {
            0 => Ok(PixelPinType::Ws2812),
            1 => Ok(PixelPinType::Spi),
            _ => Err(TransferFormatError::InvalidValue { name: "pixel pin type" }),
        }
    }
}

impl TransferFormatInto for PixelPinType {
    fn len_of_into(&self) -> usize {
        1
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[0] = self.val()
    }
}

/// Error for applying a pixel packet to a [`PixelBuffer`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// The packet writes past the end of the pixel buffer
    OutOfBounds { end: usize, buffer_len: usize },
}

impl core::fmt::Display for BufferError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            BufferError::OutOfBounds { end, buffer_len } => write!(
                f,
                "pixel packet writes up to byte {} but the pixel buffer is {} bytes",
                end, buffer_len
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BufferError {}

/// The pixel buffer of a peripheral
///
/// This is the bytes for every pixel of a strip. Pixel packets are applied to the buffer as they
/// are received, and the buffer is written to the pixels whenever a packet has the *write now*
/// flag.
///
/// ```
/// # use bo_tie_adafruit::pixel::{PixelBuffer, PixelPacket};
/// // two RGB pixels
/// let mut buffer = PixelBuffer::new(6);
///
/// let flush = buffer.apply(&PixelPacket::new(3, true, &[0, 0, 0xFF])).unwrap();
///
/// assert!(flush);
/// assert_eq!(buffer.as_slice(), [0, 0, 0, 0, 0, 0xFF]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new `PixelBuffer` of `len` bytes set to zero
    pub fn new(len: usize) -> Self {
        PixelBuffer {
            bytes: alloc::vec![0; len],
        }
    }

    /// Apply a pixel packet
    ///
    /// The data of the packet is copied into the buffer starting at the packet's `start` byte. The
    /// return is true if the buffer should now be written to the pixels.
    ///
    /// # Error
    /// The buffer is unchanged and an error is returned if the data of the packet does not fit.
    pub fn apply(&mut self, packet: &PixelPacket<'_>) -> Result<bool, BufferError> {
        let buffer_len = self.bytes.len();

        let end = packet.end();

        let into = self
            .bytes
            .get_mut(packet.start as usize..end)
            .ok_or(BufferError::OutOfBounds { end, buffer_len })?;

        into.copy_from_slice(packet.data);

        log::trace!("applied {} pixel bytes at offset {}", packet.data.len(), packet.start);

        if packet.write_now {
            log::debug!("pixel buffer flush requested");
        }

        Ok(packet.write_now)
    }

    /// Resize the buffer
    ///
    /// New bytes are set to zero.
    pub fn resize(&mut self, len: usize) {
        self.bytes.resize(len, 0)
    }

    /// Set every byte to zero
    pub fn clear(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn encode_concrete() {
        assert_eq!(
            PixelPacket::encode(0, true, &[0xFF, 0x00, 0x00]),
            Ok(alloc::vec![0x00, 0x00, 0x01, 0xFF, 0x00, 0x00])
        );

        assert_eq!(
            PixelPacket::encode(0x0102, false, &[]),
            Ok(alloc::vec![0x02, 0x01, 0x00])
        );
    }

    #[test]
    fn encode_max_size() {
        let data = [0xAAu8; MAX_PACKET_SIZE - HEADER_SIZE];

        assert_eq!(Ok(MAX_PACKET_SIZE), PixelPacket::encode(0, false, &data).map(|v| v.len()));

        let data = [0xAAu8; MAX_PACKET_SIZE - HEADER_SIZE + 1];

        assert_eq!(
            Err(TransferFormatError::invalid_length("pixel packet", MAX_PACKET_SIZE, MAX_PACKET_SIZE + 1)),
            PixelPacket::encode(0, false, &data)
        );
    }

    #[test]
    fn encode_into_small_buffer() {
        let mut buffer = [0u8; 4];

        let packet = PixelPacket::new(9, true, &[1, 2]);

        assert!(packet.encode_into(&mut buffer).is_err());

        let mut buffer = [0u8; 8];

        assert_eq!(Ok(5), packet.encode_into(&mut buffer));

        assert_eq!(buffer[..5], [9, 0, 1, 1, 2]);
    }

    #[test]
    fn decode_boundaries() {
        assert_eq!(
            Err(TransferFormatError::too_short("pixel packet", 3, 2)),
            PixelPacket::decode(&[0, 0])
        );

        assert!(PixelPacket::decode(&[]).is_err());

        assert_eq!(Ok(PixelPacket::new(0, false, &[])), PixelPacket::decode(&[0, 0, 0]));
    }

    #[test]
    fn decode_ignores_reserved_flags() {
        let packet = PixelPacket::decode(&[0x10, 0x00, 0b1111_1110, 7]).unwrap();

        assert!(!packet.write_now);

        assert_eq!(16, packet.start);

        let packet = PixelPacket::decode(&[0x10, 0x00, 0b1000_0001]).unwrap();

        assert!(packet.write_now);
    }

    struct Queue(Vec<Vec<u8>>);

    impl PacketRead for Queue {
        fn read_into(&mut self, buffer: &mut [u8]) -> usize {
            match self.0.pop() {
                Some(packet) => {
                    buffer[..packet.len()].copy_from_slice(&packet);
                    packet.len()
                }
                None => 0,
            }
        }
    }

    #[test]
    fn read_packets() {
        let mut queue = Queue(alloc::vec![alloc::vec![4, 0, 1], alloc::vec![0, 0]]);

        let mut buffer = [0u8; MAX_PACKET_SIZE];

        assert!(read_packet(&mut queue, &mut buffer).is_err());

        assert_eq!(
            Ok(Some(PixelPacket::new(4, true, &[]))),
            read_packet(&mut queue, &mut buffer)
        );

        assert_eq!(Ok(None), read_packet(&mut queue, &mut buffer));
    }

    #[test]
    fn buffer_apply() {
        let mut buffer = PixelBuffer::new(9);

        assert_eq!(Ok(false), buffer.apply(&PixelPacket::new(0, false, &[1, 2, 3])));

        assert_eq!(Ok(true), buffer.apply(&PixelPacket::new(6, true, &[7, 8, 9])));

        assert_eq!(buffer.as_slice(), [1, 2, 3, 0, 0, 0, 7, 8, 9]);
    }

    #[test]
    fn buffer_out_of_bounds() {
        let mut buffer = PixelBuffer::new(6);

        assert_eq!(
            Err(BufferError::OutOfBounds { end: 7, buffer_len: 6 }),
            buffer.apply(&PixelPacket::new(4, true, &[1, 2, 3]))
        );

        assert_eq!(buffer.as_slice(), [0; 6]);

        // the start alone is past the end
        assert!(buffer.apply(&PixelPacket::new(100, false, &[])).is_err());
    }

    #[test]
    fn pin_type() {
        use crate::transfer::TransferFormatTryFrom;

        assert_eq!(Ok(PixelPinType::Spi), <PixelPinType as TransferFormatTryFrom>::try_from(&[1]));

        assert!(<PixelPinType as TransferFormatTryFrom>::try_from(&[2]).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_packet() {
        let packet = PixelPacket::new(3, true, &[0xFF, 0x00, 0x00]);

        let serialized = bincode::serialize(&packet).unwrap();

        assert_eq!(serialized, [3, 0, 1, 3, 0, 0, 0, 0, 0, 0, 0, 0xFF, 0x00, 0x00]);

        let pin_type = bincode::serialize(&PixelPinType::Spi).unwrap();

        assert_eq!(Ok(PixelPinType::Spi), bincode::deserialize(&pin_type).map_err(|_| ()));
    }
}
