//! Transfer formats of characteristic values
//!
//! Every characteristic value of a Bluefruit Playground service has a fixed little endian byte
//! layout. The traits [`TransferFormatTryFrom`] and [`TransferFormatInto`] convert between those
//! layouts and the types used by this library. They are also used for the keyed fields within
//! [`ManufacturerData`](crate::assigned::manufacturer_data::ManufacturerData).

use alloc::vec::Vec;

/// Error for converting to or from a transfer format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferFormatError {
    /// The data is smaller than the minimum size of the format
    TooShort {
        name: &'static str,
        min_size: usize,
        len: usize,
    },
    /// The data is larger than the maximum size of the format
    InvalidLength {
        name: &'static str,
        max_size: usize,
        len: usize,
    },
    /// The data is not the exact size of the format
    BadSize {
        name: &'static str,
        expected: usize,
        len: usize,
    },
    /// The data is the right size but contains a value not valid for the format
    InvalidValue { name: &'static str },
}

impl TransferFormatError {
    /// Create a `TransferFormatError` for incorrect size
    pub fn bad_size(name: &'static str, expected: usize, len: usize) -> Self {
        TransferFormatError::BadSize { name, expected, len }
    }

    /// Create a `TransferFormatError` when the size is smaller than the minimum
    pub fn too_short(name: &'static str, min_size: usize, len: usize) -> Self {
        TransferFormatError::TooShort { name, min_size, len }
    }

    /// Create a `TransferFormatError` when the size is larger than the maximum
    pub fn invalid_length(name: &'static str, max_size: usize, len: usize) -> Self {
        TransferFormatError::InvalidLength { name, max_size, len }
    }
}

impl core::fmt::Display for TransferFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            TransferFormatError::TooShort { name, min_size, len } => write!(
                f,
                "Expected a minimum size of {} bytes for {}, data length is {}",
                min_size, name, len
            ),
            TransferFormatError::InvalidLength { name, max_size, len } => write!(
                f,
                "The maximum size of {} is {} bytes, data length is {}",
                name, max_size, len
            ),
            TransferFormatError::BadSize { name, expected, len } => write!(
                f,
                "Expected a size of {} bytes for {}, data length is {}",
                expected, name, len
            ),
            TransferFormatError::InvalidValue { name } => write!(f, "Invalid value for {}", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransferFormatError {}

/// Try from transmission format
///
/// Types that implement `TransferFormatTryFrom` can be constructed from the raw bytes of a
/// characteristic value.
pub trait TransferFormatTryFrom {
    /// Make Self from the raw value
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError>
    where
        Self: Sized;
}

/// Into transmission format
///
/// Types that implement `TransferFormatInto` can be converted into the raw bytes of a
/// characteristic value.
///
/// The functions `len_of_into`, and `build_into_ret` must be implemented. The default
/// implementation of function `into` uses `len_of_into` and `build_into_ret` to generate the bytes.
pub trait TransferFormatInto {
    /// Get the length of the return of function `into`
    fn len_of_into(&self) -> usize;

    /// Build the return of into
    ///
    /// # Panic
    /// This should panic if the size of slice referenced by `into_ret` is not the same as
    /// the return of `len_of_into`.
    fn build_into_ret(&self, into_ret: &mut [u8]);

    /// Convert Self into the transferred bytes
    fn into(&self) -> Vec<u8> {
        let mut buff = alloc::vec![0; self.len_of_into()];

        self.build_into_ret(&mut buff);

        buff
    }
}

macro_rules! impl_transfer_format_for_number {
    ( $num: ty ) => {
        impl TransferFormatTryFrom for $num {
            fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
                <[u8; core::mem::size_of::<$num>()]>::try_from(raw)
                    .map(<$num>::from_le_bytes)
                    .map_err(|_| {
                        TransferFormatError::bad_size(stringify!($num), core::mem::size_of::<$num>(), raw.len())
                    })
            }
        }

        impl TransferFormatInto for $num {
            fn len_of_into(&self) -> usize {
                core::mem::size_of::<$num>()
            }

            fn build_into_ret(&self, into_ret: &mut [u8]) {
                into_ret.copy_from_slice(&self.to_le_bytes())
            }
        }
    };
}

impl_transfer_format_for_number! {u8}
impl_transfer_format_for_number! {u16}
impl_transfer_format_for_number! {u32}
impl_transfer_format_for_number! {i8}
impl_transfer_format_for_number! {i16}
impl_transfer_format_for_number! {i32}
impl_transfer_format_for_number! {f32}

impl TransferFormatTryFrom for bool {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        match <u8 as TransferFormatTryFrom>::try_from(raw)? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(TransferFormatError::InvalidValue { name: "bool" }),
        }
    }
}

impl TransferFormatInto for bool {
    fn len_of_into(&self) -> usize {
        1
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret[0] = u8::from(*self)
    }
}

impl TransferFormatTryFrom for Vec<u8> {
    fn try_from(raw: &[u8]) -> Result<Self, TransferFormatError> {
        Ok(raw.to_vec())
    }
}

impl TransferFormatInto for Vec<u8> {
    fn len_of_into(&self) -> usize {
        self.len()
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret.copy_from_slice(self)
    }
}

impl TransferFormatInto for [u8] {
    fn len_of_into(&self) -> usize {
        self.len()
    }

    fn build_into_ret(&self, into_ret: &mut [u8]) {
        into_ret.copy_from_slice(self)
    }
}

/// Read a little endian value of type `T` starting at `offset` of `raw`
///
/// This is a helper for the fixed layout structures within this library. The caller must have
/// already validated that `raw` is large enough.
pub(crate) fn read_at<T>(raw: &[u8], offset: usize) -> Result<T, TransferFormatError>
where
    T: TransferFormatTryFrom,
{
    let size = core::mem::size_of::<T>();

    raw.get(offset..offset + size)
        .ok_or(TransferFormatError::too_short(
            core::any::type_name::<T>(),
            offset + size,
            raw.len(),
        ))
        .and_then(<T as TransferFormatTryFrom>::try_from)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numbers_are_little_endian() {
        assert_eq!(TransferFormatInto::into(&0x0822u16), [0x22, 0x08]);

        assert_eq!(TransferFormatInto::into(&-1i32), [0xFF; 4]);

        assert_eq!(TransferFormatInto::into(&1.0f32), [0x00, 0x00, 0x80, 0x3F]);

        assert_eq!(Ok(0x8046u16), <u16 as TransferFormatTryFrom>::try_from(&[0x46, 0x80]));
    }

    #[test]
    fn numbers_wrong_size() {
        assert_eq!(
            Err(TransferFormatError::bad_size("u32", 4, 3)),
            <u32 as TransferFormatTryFrom>::try_from(&[1, 2, 3])
        );
    }

    #[test]
    fn bool_values() {
        assert_eq!(Ok(true), <bool as TransferFormatTryFrom>::try_from(&[1]));

        assert_eq!(
            Err(TransferFormatError::InvalidValue { name: "bool" }),
            <bool as TransferFormatTryFrom>::try_from(&[2])
        );
    }

    #[test]
    fn read_at_offsets() {
        let raw = [0, 0, 0x80, 0x3F, 0, 0, 0, 0xC0];

        assert_eq!(Ok(1.0f32), read_at::<f32>(&raw, 0));

        assert_eq!(Ok(-2.0f32), read_at::<f32>(&raw, 4));

        assert!(read_at::<f32>(&raw, 6).is_err());
    }
}
