//! Universally Unique Identifiers
//!
//! Every service and characteristic of the Bluefruit Playground protocol uses a vendor UUID built
//! from the Adafruit template `ADAFnnnn-C332-42A8-93BD-25E905756CB8`, where `nnnn` is a 16 bit sub
//! identifier. The function [`adafruit_service_uuid`] fills in that sub identifier.

/// Universally Unique Identifier
///
/// This is a full 128 bit UUID. A 16 bit UUID assigned by the Bluetooth SIG is a shortened form
/// over the Bluetooth base UUID, but the Adafruit services only ever use vendor UUIDs.
///
/// ```
/// # use bo_tie_adafruit::Uuid;
/// let uuid_16 = Uuid::from(0x2902u16);
///
/// assert!(uuid_16.can_be_16_bit());
///
/// let vendor = bo_tie_adafruit::adafruit_service_uuid(0x0900);
///
/// assert!(!vendor.can_be_16_bit());
/// ```
///
/// ## Conversion
/// A UUID can be converted to a [uuid::Uuid](https://github.com/uuid-rs/uuid) if the feature
/// `uuid-crate` is enabled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uuid {
    base_uuid: u128,
}

impl Uuid {
    /// The Bluetooth Base UUID (`00000000-0000-1000-8000-00805F9B34FB`)
    const BLUETOOTH_BASE_UUID: u128 = 0x0000000000001000800000805F9B34FB;

    /// Mask of the 16 bit field of a shortened UUID
    const SHORT_MASK: u128 = 0xFFFF << 96;

    pub const fn from_u16(v: u16) -> Self {
        Uuid {
            base_uuid: ((v as u128) << 96) | Self::BLUETOOTH_BASE_UUID,
        }
    }

    pub const fn from_u128(v: u128) -> Self {
        Uuid { base_uuid: v }
    }

    /// Returns true if the UUID can be a 16 bit shortened UUID
    pub fn can_be_16_bit(&self) -> bool {
        self.base_uuid & !Self::SHORT_MASK == Self::BLUETOOTH_BASE_UUID
    }

    /// Get the little endian byte order of the UUID
    ///
    /// This is the order used for a UUID within an attribute PDU or advertising data.
    pub const fn to_le_bytes(&self) -> [u8; 16] {
        self.base_uuid.to_le_bytes()
    }
}

/// The Adafruit vendor UUID with the sub identifier field zeroed
///
/// This is `ADAF0000-C332-42A8-93BD-25E905756CB8`.
const ADAFRUIT_BASE_UUID: u128 = 0xADAF0000_C332_42A8_93BD_25E905756CB8;

/// Create an Adafruit vendor UUID
///
/// The returned UUID is the standard Adafruit service UUID `ADAFnnnn-C332-42A8-93BD-25E905756CB8`
/// with `n` filled in as the `nnnn` field. The field is exactly 16 bits wide so no two values of
/// `n` produce the same UUID.
///
/// ```
/// # use bo_tie_adafruit::adafruit_service_uuid;
/// let pixel_service = adafruit_service_uuid(0x0900);
///
/// assert_eq!("ADAF0900-C332-42A8-93BD-25E905756CB8", pixel_service.to_string());
/// ```
pub const fn adafruit_service_uuid(n: u16) -> Uuid {
    Uuid::from_u128(ADAFRUIT_BASE_UUID | ((n as u128) << 96))
}

/// Shortened UUIDs are shown by their 16 bit value, everything else in the canonical form
impl core::fmt::Debug for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match <u16>::try_from(*self) {
            Ok(short) => write!(f, "Uuid({:#06x})", short),
            Err(_) => write!(f, "Uuid({})", self),
        }
    }
}

/// The canonical `8-4-4-4-12` form of the full 128 bit UUID in upper case
impl core::fmt::Display for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let v = self.base_uuid;

        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:04X}-{:012X}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xFFFF_FFFF_FFFF,
        )
    }
}

impl From<u128> for Uuid {
    fn from(v: u128) -> Uuid {
        Self::from_u128(v)
    }
}

impl From<u16> for Uuid {
    fn from(v: u16) -> Uuid {
        Self::from_u16(v)
    }
}

#[cfg(feature = "uuid-crate")]
impl From<::uuid::Uuid> for Uuid {
    fn from(uuid: ::uuid::Uuid) -> Uuid {
        Self::from_u128(uuid.as_u128())
    }
}

#[cfg(feature = "uuid-crate")]
impl From<Uuid> for ::uuid::Uuid {
    fn from(uuid: Uuid) -> ::uuid::Uuid {
        ::uuid::Uuid::from_u128(uuid.base_uuid)
    }
}

/// Create a UUID from a *little endian* ordered array
impl From<[u8; 16]> for Uuid {
    fn from(v: [u8; 16]) -> Uuid {
        Self::from_u128(<u128>::from_le_bytes(v))
    }
}

/// Error for parsing the text form of a UUID
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UuidFormatError {
    /// The text is not 36 characters long
    Length(usize),
    /// A hyphen is missing at this character position
    MissingHyphen(usize),
    /// The character at this position is not a hexadecimal digit
    NotHex(usize),
}

impl core::fmt::Display for UuidFormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            UuidFormatError::Length(len) => write!(f, "a UUID is 36 characters, not {}", len),
            UuidFormatError::MissingHyphen(pos) => write!(f, "expected '-' at character {}", pos),
            UuidFormatError::NotHex(pos) => write!(f, "character {} is not a hexadecimal digit", pos),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UuidFormatError {}

/// Parse the `8-4-4-4-12` text form of a UUID
///
/// Hexadecimal digits may be either case.
impl TryFrom<&str> for Uuid {
    type Error = UuidFormatError;

    fn try_from(v: &str) -> Result<Self, Self::Error> {
        const HYPHENS: [usize; 4] = [8, 13, 18, 23];

        if v.len() != 36 {
            return Err(UuidFormatError::Length(v.len()));
        }

        v.bytes().enumerate().try_fold(Uuid::default(), |uuid, (pos, c)| {
            if HYPHENS.contains(&pos) {
                return (c == b'-').then_some(uuid).ok_or(UuidFormatError::MissingHyphen(pos));
            }

            let nibble = (c as char).to_digit(16).ok_or(UuidFormatError::NotHex(pos))?;

            Ok(Uuid::from_u128(uuid.base_uuid << 4 | nibble as u128))
        })
    }
}

impl From<Uuid> for u128 {
    fn from(uuid: Uuid) -> u128 {
        uuid.base_uuid
    }
}

impl TryFrom<Uuid> for u16 {
    type Error = ();

    /// Try to convert a UUID into its 16 bit shortened form. This doesn't check that the value is
    /// pre-allocated (a.k.a. assigned number) from the Bluetooth SIG.
    fn try_from(uuid: Uuid) -> Result<u16, ()> {
        if uuid.can_be_16_bit() {
            Ok((uuid.base_uuid >> 96) as u16)
        } else {
            Err(())
        }
    }
}
