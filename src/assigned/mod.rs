//! Assigned numbers and the associated data formats
//!
//! Advertising data is a series of *AD structures*. Each structure is one byte for the length of
//! the rest of the structure, one byte for the assigned number of the data type, and zero or more
//! bytes for the data. The assigned numbers come from the Bluetooth SIG and can be found on the
//! official [Bluetooth](https://www.bluetooth.com/specifications/assigned-numbers/) webpage.
//!
//! Only the data types used by a Bluefruit Playground advertisement are implemented here, the
//! [`flags`] and the [`manufacturer_data`].

pub mod flags;
pub mod manufacturer_data;

/// The size of the header for an AD structure
///
/// The full size of an AD structure is this plus the size of the data.
pub const HEADER_SIZE: usize = 2;

/// The maximum number of bytes within the data portion of an AD structure
pub const DATA_MAX_LEN: usize = u8::MAX as usize - 1;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AssignedTypes {
    Flags,
    ManufacturerSpecificData,
}

impl AssignedTypes {
    pub const fn val(&self) -> u8 {
        match *self {
            AssignedTypes::Flags => 0x01,
            AssignedTypes::ManufacturerSpecificData => 0xFF,
        }
    }

    pub fn try_from_val(val: u8) -> Option<Self> {
        match val {
            0x01 => Some(AssignedTypes::Flags),
            0xFF => Some(AssignedTypes::ManufacturerSpecificData),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The assigned type within the structure is different from the expected type
    IncorrectAssignedType,
    /// The length byte contains an invalid value
    IncorrectLength,
    /// The buffer is too small for the structure
    RawTooSmall,
    /// The company identifier of manufacturer data is not the expected identifier
    IncorrectCompanyId(u16),
    /// Invalid format of a value within the structure
    TransferFormat(crate::transfer::TransferFormatError),
}

impl From<crate::transfer::TransferFormatError> for Error {
    fn from(e: crate::transfer::TransferFormatError) -> Self {
        Error::TransferFormat(e)
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            Error::IncorrectAssignedType => write!(f, "Incorrect Assigned Type Field"),
            Error::IncorrectLength => write!(
                f,
                "The length of this type is larger than the remaining bytes in the packet"
            ),
            Error::RawTooSmall => write!(f, "Raw data length is too small"),
            Error::IncorrectCompanyId(id) => write!(f, "Unexpected company identifier {:#06x}", id),
            Error::TransferFormat(ref e) => core::fmt::Display::fmt(e, f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// An intermediary for help creating an AD Structure from a local type
///
/// The common format of an AD Structure is one byte for the length of the data, one byte for the
/// AD type, and zero or more bytes for the AD data.
struct StructIntermediate<'a> {
    len: usize,
    assigned_type: u8,
    buffer: &'a mut [u8],
}

impl<'a> StructIntermediate<'a> {
    /// Create an new `StructIntermediate`
    ///
    /// Input `b` is the buffer to put the structure. Input `assigned_type` is the assigned number
    /// for the data structure.
    fn new(b: &'a mut [u8], assigned_type: u8) -> Result<Self, ConvertError> {
        // The length field of a structure is a byte so
        // the maximum size of a structure is one plus
        // the maximum of a `u8`.
        const MAXIMUM_SIZE: usize = <u8>::MAX as usize + 1;

        let buffer = match b.len() {
            0..=1 => {
                return Err(ConvertError {
                    required: HEADER_SIZE,
                    remaining: b.len(),
                })
            }
            HEADER_SIZE..=MAXIMUM_SIZE => b,
            _ => &mut b[..MAXIMUM_SIZE],
        };

        Ok(Self {
            len: HEADER_SIZE,
            assigned_type,
            buffer,
        })
    }

    /// Get the length of the remaining bytes of the buffer
    fn remaining_len(&self) -> usize {
        self.buffer.len() - self.len
    }

    /// Extend by transfer formatted `T`
    ///
    /// This will try to extend the AD data by the transfer formatted data of `t`. If there are not
    /// enough bytes available then none of the bytes are added.
    fn try_extend_by<T>(&mut self, t: &T) -> Result<(), ConvertError>
    where
        T: crate::transfer::TransferFormatInto + ?Sized,
    {
        let to_add_len = t.len_of_into();

        if self.remaining_len() >= to_add_len {
            let start = self.len;

            self.len += to_add_len;

            t.build_into_ret(&mut self.buffer[start..self.len]);

            Ok(())
        } else {
            Err(ConvertError {
                required: to_add_len,
                remaining: self.remaining_len(),
            })
        }
    }

    /// Fill-out the header
    ///
    /// This is intended to be called at the end of an implementation of
    /// [`convert_into`](IntoStruct::convert_into).
    fn finish(self) -> AdStruct<'a> {
        let len = self.len;

        // `new` limits the buffer so the length always fits
        self.buffer[0] = (len - 1) as u8;
        self.buffer[1] = self.assigned_type;

        let buffer: &'a [u8] = self.buffer;

        AdStruct(&buffer[..len])
    }
}

/// A trait for converting a local type into an Advertising Data (AD) Structure
pub trait IntoStruct {
    /// The required data length of the AD struct
    ///
    /// This is the length of the data portion of the structure, it does not include the header.
    fn data_len(&self) -> usize;

    /// Covert into its structure
    ///
    /// Input `b` is the buffer to contain the Structure. The implementor needs to create a
    /// structure and place it at the beginning of the buffer.
    fn convert_into<'a>(&self, b: &'a mut [u8]) -> Result<AdStruct<'a>, ConvertError>;
}

/// A trait for attempting to convert an Advertising Data (AD) Structure to a local type
pub trait TryFromStruct<'a> {
    /// Attempt to convert an AD struct into this type
    fn try_from_struct(st: AdStruct<'a>) -> Result<Self, Error>
    where
        Self: Sized;
}

/// Error returned by [`IntoStruct::convert_into`]
///
/// This error is returned whenever converting a data type into an AD structure fails because
/// there is not enough room in the buffer. `ConvertError` contains the number of bytes `required`
/// for creating the structure along with the number of bytes `remaining` in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertError {
    /// The required number of bytes that need to be available for the struct
    pub required: usize,
    /// The remaining number of bytes within the buffer
    pub remaining: usize,
}

impl core::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Not enough space in buffer to add item. It requires {} bytes but only {} bytes are \
            available within the buffer",
            self.required, self.remaining
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvertError {}

/// A wrapper around an AD structure
///
/// The wrapped slice always contains a complete structure, the length byte never claims more bytes
/// than are within the slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdStruct<'a>(&'a [u8]);

impl<'a> AdStruct<'a> {
    /// Try to create a new `AdStruct`
    ///
    /// This will return a new `AdStruct` if the bytes starts with and contains a complete AD
    /// struct. A slice to the rest of `bytes` is returned with the new `AdStruct`.
    ///
    /// `None` is returned if the length in the structure is zero. This is used to indicate an
    /// early termination of the entire data sequence, so any bytes that come after it are to be
    /// ignored.
    ///
    /// # Errors
    /// The length field of the first structure extended past the end of `bytes`. An error also
    /// occurs if `bytes` is empty.
    pub fn try_new(bytes: &'a [u8]) -> Result<Option<(Self, &'a [u8])>, Error> {
        let len = *bytes.first().ok_or(Error::RawTooSmall)? as usize;

        match len {
            0 => Ok(None),
            len if len < bytes.len() => Ok(Some((Self(&bytes[..1 + len]), &bytes[1 + len..]))),
            _ => Err(Error::IncorrectLength),
        }
    }

    /// Return the type
    pub fn get_type(&self) -> u8 {
        self.0[1]
    }

    /// Get the data bytes
    pub fn get_data(&self) -> &'a [u8] {
        &self.0[HEADER_SIZE..]
    }

    /// Get the structure without the length byte
    ///
    /// This is the type followed by the data. It is the form compared against by a scan filter
    /// prefix.
    ///
    /// ```
    /// # use bo_tie_adafruit::assigned::AdStruct;
    /// let ad = AdStruct::try_new(&[3, 0xFF, 0x22, 0x08]).unwrap().unwrap().0;
    ///
    /// assert_eq!(ad.get_typed_data(), [0xFF, 0x22, 0x08]);
    /// ```
    pub fn get_typed_data(&self) -> &'a [u8] {
        &self.0[1..]
    }

    /// Get the full size of the structure
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Try to convert this struct into the type `T`
    pub fn try_into<T>(self) -> Result<T, Error>
    where
        T: TryFromStruct<'a>,
    {
        T::try_from_struct(self)
    }

    /// Convert into the inner struct data
    pub fn into_inner(self) -> &'a [u8] {
        self.0
    }
}

/// An iterator over AD structs
///
/// This is used to iterate over a contiguous series of AD structures, such as the advertising data
/// of a scanned advertiser.
///
/// The iterator will stop if there is no more data or a length field is zero (which is used to
/// indicate an early termination).
#[derive(Clone, Copy, Debug)]
pub struct AdStructIterator<'a>(&'a [u8]);

impl<'a> AdStructIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        AdStructIterator(data)
    }

    /// Create a iterator that doesn't report an error
    ///
    /// In general it is not the fault of the recipient when they receive incorrectly formatted AD
    /// structures, so instead of reporting an error this will just end the iteration.
    pub fn silent(self) -> impl Iterator<Item = AdStruct<'a>> + 'a {
        struct Silent<'a>(&'a [u8]);

        impl<'a> Iterator for Silent<'a> {
            type Item = AdStruct<'a>;

            fn next(&mut self) -> Option<Self::Item> {
                if self.0.is_empty() {
                    return None;
                }

                match AdStruct::try_new(self.0) {
                    Ok(Some((ad, rest))) => {
                        self.0 = rest;

                        Some(ad)
                    }
                    Ok(None) => None,
                    Err(e) => {
                        log::trace!("ending iteration of advertising data: {}", e);

                        self.0 = &[];

                        None
                    }
                }
            }
        }

        Silent(self.0)
    }
}

impl<'a> From<&'a [u8]> for AdStructIterator<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self::new(data)
    }
}

impl<'a> Iterator for AdStructIterator<'a> {
    type Item = Result<AdStruct<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            return None;
        }

        match AdStruct::try_new(self.0) {
            Ok(None) => {
                self.0 = &[];

                None
            }
            Ok(Some((ad, rest))) => {
                self.0 = rest;

                Some(Ok(ad))
            }
            Err(e) => {
                self.0 = &[];

                Some(Err(e))
            }
        }
    }
}

/// An collector of AD structures
///
/// This is used to place multiple different types that implement [`IntoStruct`] into a sequence of
/// AD structures.
///
/// ```
/// # use bo_tie_adafruit::assigned::{flags::Flags, Sequence};
/// let buffer = &mut [0u8; 31];
///
/// let mut sequence = Sequence::new(buffer);
///
/// sequence.try_add(&Flags::le_general_discoverable()).unwrap();
///
/// assert_eq!(sequence.into_inner(), [2, 1, 0b110]);
/// ```
#[derive(Debug)]
pub struct Sequence<'a> {
    len: usize,
    buffer: &'a mut [u8],
}

impl<'a> Sequence<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        let len = 0;

        Sequence { len, buffer }
    }

    /// Try to add a local type to the sequence
    ///
    /// The type is converted into a struct and added to the sequence.
    ///
    /// # Error
    /// An error is returned if there is not enough space left within the buffer
    pub fn try_add<T: IntoStruct + ?Sized>(&mut self, t: &T) -> Result<(), ConvertError> {
        let struct_len = t.data_len() + HEADER_SIZE;

        let remaining = self.buffer.len() - self.len;

        if struct_len > remaining {
            Err(ConvertError {
                required: struct_len,
                remaining,
            })
        } else {
            let end = self.len + struct_len;

            t.convert_into(&mut self.buffer[self.len..end])?;

            self.len = end;

            Ok(())
        }
    }

    /// Return the sequenced data
    ///
    /// The returned slice is truncated to only contain the sequenced data.
    pub fn into_inner(self) -> &'a mut [u8] {
        &mut self.buffer[..self.len]
    }
}

impl core::ops::Deref for Sequence<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.buffer[..self.len]
    }
}

/// Sequence within a vector
///
/// The advantage of this over [`Sequence`] is that it can grow to add structures to the sequence.
/// The downside is that it must allocate the buffered space.
///
/// ```
/// # use bo_tie_adafruit::assigned::{flags::Flags, SequenceVec};
/// let buffer = SequenceVec::new().add(Flags::le_general_discoverable()).unwrap().take_inner();
///
/// assert_eq!(buffer, [2, 1, 0b110]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct SequenceVec(alloc::vec::Vec<u8>);

impl SequenceVec {
    /// Create a new `SequenceVec`
    pub fn new() -> Self {
        SequenceVec(alloc::vec::Vec::new())
    }

    /// Add an item to the sequence
    ///
    /// # Error
    /// An error is only returned when the data of `t` is larger than can fit within a single AD
    /// structure.
    pub fn add<T: IntoStruct>(&mut self, t: T) -> Result<&mut Self, ConvertError> {
        let start = self.0.len();

        self.0.resize(start + t.data_len() + HEADER_SIZE, 0);

        if let Err(e) = t.convert_into(&mut self.0[start..]) {
            self.0.truncate(start);

            return Err(e);
        }

        Ok(self)
    }

    /// Take the inner vector
    ///
    /// This will take the inner buffer, replacing it with an new vector
    pub fn take_inner(&mut self) -> alloc::vec::Vec<u8> {
        core::mem::take(&mut self.0)
    }

    /// Get the inner vector
    pub fn into_inner(self) -> alloc::vec::Vec<u8> {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn struct_try_new() {
        let raw = [3, 0xFF, 1, 2, 1, 0x01];

        let (ad, rest) = AdStruct::try_new(&raw).unwrap().unwrap();

        assert_eq!(0xFF, ad.get_type());

        assert_eq!([1, 2], ad.get_data());

        assert_eq!(4, ad.size());

        assert_eq!([1, 0x01], rest);
    }

    #[test]
    fn struct_length_overruns() {
        assert_eq!(Err(Error::IncorrectLength), AdStruct::try_new(&[5, 0xFF, 1, 2]));

        assert_eq!(Err(Error::RawTooSmall), AdStruct::try_new(&[]));

        assert_eq!(Ok(None), AdStruct::try_new(&[0, 1, 2]));
    }

    #[test]
    fn iterator_stops_on_error() {
        let raw = [2, 0x01, 0x06, 9, 0xFF, 0x22];

        let mut iter = AdStructIterator::new(&raw);

        assert_eq!(Some(0x01), iter.next().map(|r| r.unwrap().get_type()));

        assert_eq!(Some(Err(Error::IncorrectLength)), iter.next());

        assert_eq!(None, iter.next());

        assert_eq!(1, AdStructIterator::new(&raw).silent().count());
    }

    #[test]
    fn iterator_early_termination() {
        let raw = [2, 0x01, 0x06, 0, 2, 0x01, 0x06];

        assert_eq!(1, AdStructIterator::new(&raw).count());
    }

    #[test]
    fn sequence_out_of_space() {
        let buffer = &mut [0u8; 2];

        let mut sequence = Sequence::new(buffer);

        assert_eq!(
            Err(ConvertError {
                required: 3,
                remaining: 2
            }),
            sequence.try_add(&flags::Flags::le_general_discoverable())
        );

        assert!(sequence.is_empty());
    }
}
