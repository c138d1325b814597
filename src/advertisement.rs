//! The Adafruit advertisement
//!
//! A peripheral running the Bluefruit Playground services identifies itself within its advertising
//! data by a manufacturer specific data structure containing the Adafruit company identifier and
//! a single keyed field with the USB product ID of the board.
//!
//! ```text
//! offset  size  field
//! 0       1     AD type (0xFF, manufacturer specific data)
//! 1       2     company ID (0x0822, little endian)
//! 3       1     field length (4)
//! 4       2     field key (0x0001, little endian)
//! 6       2     product ID (little endian)
//! ```
//!
//! Everything but the product ID is fixed, so a scanner can identify a compatible peripheral by
//! comparing the first six bytes against [`MATCH_PREFIX`] before doing any other parsing.

use crate::assigned::flags::Flags;
use crate::assigned::manufacturer_data::ManufacturerData;
use crate::assigned::{AdStruct, AdStructIterator, AssignedTypes, ConvertError, Error, Sequence, HEADER_SIZE};

/// The company identifier assigned to Adafruit by the Bluetooth SIG
pub const ADAFRUIT_COMPANY_ID: u16 = 0x0822;

/// The manufacturer data key of the product ID field
pub const PRODUCT_ID_KEY: u16 = 0x0001;

/// The length byte of the product ID field (the key size plus the value size)
const PRODUCT_ID_FIELD_LEN: u8 = 4;

/// The bytes that every Adafruit advertisement's manufacturer data starts with
///
/// This is the AD type, the company identifier, and the length and key of the product ID field. It
/// is the form expected by a scan filter that matches on the AD structure without its length byte.
pub const MATCH_PREFIX: [u8; 6] = {
    let company = ADAFRUIT_COMPANY_ID.to_le_bytes();
    let key = PRODUCT_ID_KEY.to_le_bytes();

    [
        AssignedTypes::ManufacturerSpecificData.val(),
        company[0],
        company[1],
        PRODUCT_ID_FIELD_LEN,
        key[0],
        key[1],
    ]
};

/// The size of the manufacturer data block (without the AD length byte)
pub const BLOCK_SIZE: usize = MATCH_PREFIX.len() + core::mem::size_of::<u16>();

/// USB product IDs of boards supported by the Bluefruit Playground app
pub mod product_id {
    /// Circuit Playground Bluefruit running Arduino
    pub const CPB_ARDUINO: u16 = 0x8045;

    /// Circuit Playground Bluefruit running CircuitPython
    pub const CPB_CIRCUIT_PYTHON: u16 = 0x8046;

    /// CLUE nRF52840 Express
    pub const CLUE: u16 = 0x8072;
}

/// Encode the manufacturer data block for `product_id`
///
/// The returned block starts with the AD type. It does not contain the AD length byte, which is
/// added by whatever assembles the full advertising data (see [`AdafruitServerAdvertisement`]).
///
/// ```
/// # use bo_tie_adafruit::advertisement::encode;
/// assert_eq!(encode(0x8046), [0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x46, 0x80]);
/// ```
pub const fn encode(product_id: u16) -> [u8; BLOCK_SIZE] {
    let pid = product_id.to_le_bytes();

    [
        MATCH_PREFIX[0],
        MATCH_PREFIX[1],
        MATCH_PREFIX[2],
        MATCH_PREFIX[3],
        MATCH_PREFIX[4],
        MATCH_PREFIX[5],
        pid[0],
        pid[1],
    ]
}

/// Match a manufacturer data block
///
/// The product ID is returned if `bytes` starts with [`MATCH_PREFIX`] and is followed by the two
/// bytes of the product ID. `bytes` is the AD structure without the length byte. Any bytes after
/// the product ID are ignored.
///
/// ```
/// # use bo_tie_adafruit::advertisement::matches;
/// assert_eq!(Some(0x8046), matches(&[0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x46, 0x80]));
///
/// assert_eq!(None, matches(&[0xFF, 0x22, 0x08, 0x04, 0x01, 0x00]));
/// ```
pub fn matches(bytes: &[u8]) -> Option<u16> {
    let block = bytes.get(..BLOCK_SIZE)?;

    (block[..MATCH_PREFIX.len()] == MATCH_PREFIX).then(|| <u16>::from_le_bytes([block[6], block[7]]))
}

/// Find the product ID within received advertising data
///
/// This iterates over the AD structures of `advertising_data`, skipping everything that is not
/// manufacturer specific data for the Adafruit company identifier. Advertising data can contain
/// manufacturer data of other companies, so those structures are passed over. A length byte that
/// claims more bytes than are left ends the search.
pub fn find_product_id(advertising_data: &[u8]) -> Option<u16> {
    let found = AdStructIterator::new(advertising_data)
        .silent()
        .filter(|ad| ad.get_type() == AssignedTypes::ManufacturerSpecificData.val())
        .find_map(|ad| matches(ad.get_typed_data()));

    if let Some(pid) = found {
        log::debug!("found Adafruit advertisement with product ID {:#06x}", pid);
    }

    found
}

/// The advertisement of a Bluefruit Playground server
///
/// This is the advertising data sent by a peripheral. It is a flags structure for a connectable LE
/// only device followed by the Adafruit manufacturer data.
///
/// ```
/// # use bo_tie_adafruit::advertisement::{AdafruitServerAdvertisement, product_id};
/// let advertisement = AdafruitServerAdvertisement::new(product_id::CLUE);
///
/// let mut buffer = [0u8; 31];
///
/// let data = advertisement.build(&mut buffer).unwrap();
///
/// assert_eq!(data, [2, 0x01, 0x06, 8, 0xFF, 0x22, 0x08, 4, 0x01, 0x00, 0x72, 0x80]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdafruitServerAdvertisement {
    flags: Flags,
    product_id: u16,
}

impl AdafruitServerAdvertisement {
    /// The size of the advertising data
    pub const SIZE: usize = HEADER_SIZE + 1 + 1 + BLOCK_SIZE;

    pub fn new(product_id: u16) -> Self {
        AdafruitServerAdvertisement {
            flags: Flags::le_general_discoverable(),
            product_id,
        }
    }

    pub fn get_product_id(&self) -> u16 {
        self.product_id
    }

    pub fn get_flags(&self) -> Flags {
        self.flags
    }

    /// Get the manufacturer data of this advertisement
    pub fn manufacturer_data(&self) -> ManufacturerData {
        let mut data = ManufacturerData::new(ADAFRUIT_COMPANY_ID);

        data.set(PRODUCT_ID_KEY, &self.product_id);

        data
    }

    /// Build the advertising data into `buffer`
    ///
    /// The returned slice is the part of `buffer` containing the advertising data.
    pub fn build<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a [u8], ConvertError> {
        let mut sequence = Sequence::new(buffer);

        sequence.try_add(&self.flags)?;

        sequence.try_add(&self.manufacturer_data())?;

        Ok(sequence.into_inner())
    }

    /// Try to create an `AdafruitServerAdvertisement` from received advertising data
    ///
    /// Unlike [`find_product_id`], this is a full parse of the advertising data. Any error within
    /// the AD structures is returned.
    ///
    /// # Errors
    /// * An AD structure is malformed
    /// * There is no manufacturer data with the Adafruit company ID and product ID field
    pub fn try_from_advertising_data(advertising_data: &[u8]) -> Result<Self, Error> {
        let mut flags = Flags::new();

        let mut product_id = None;

        for ad in AdStructIterator::new(advertising_data) {
            let ad: AdStruct = ad?;

            match AssignedTypes::try_from_val(ad.get_type()) {
                Some(AssignedTypes::Flags) => flags = ad.try_into()?,
                // the data of other companies is not in the keyed field format
                Some(AssignedTypes::ManufacturerSpecificData)
                    if ad.get_data().starts_with(&ADAFRUIT_COMPANY_ID.to_le_bytes()) =>
                {
                    let data: ManufacturerData = ad.try_into()?;

                    if let Some(pid) = data.get::<u16>(PRODUCT_ID_KEY) {
                        product_id = Some(pid?);
                    }
                }
                _ => (),
            }
        }

        product_id
            .map(|product_id| AdafruitServerAdvertisement { flags, product_id })
            .ok_or(Error::IncorrectCompanyId(ADAFRUIT_COMPANY_ID))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn prefix_is_fixed() {
        assert_eq!(MATCH_PREFIX, [0xFF, 0x22, 0x08, 0x04, 0x01, 0x00]);
    }

    #[test]
    fn match_concrete() {
        assert_eq!(Some(0x8046), matches(&[0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x46, 0x80]));
    }

    #[test]
    fn match_too_short() {
        assert_eq!(None, matches(&[]));

        assert_eq!(None, matches(&MATCH_PREFIX));

        assert_eq!(None, matches(&[0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x46]));
    }

    #[test]
    fn match_trailing_bytes() {
        assert_eq!(
            Some(0x8072),
            matches(&[0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x72, 0x80, 0xAA])
        );
    }

    #[test]
    fn match_wrong_prefix() {
        // different company
        assert_eq!(None, matches(&[0xFF, 0x4C, 0x00, 0x04, 0x01, 0x00, 0x46, 0x80]));

        // different key
        assert_eq!(None, matches(&[0xFF, 0x22, 0x08, 0x04, 0x02, 0x00, 0x46, 0x80]));

        // different field length
        assert_eq!(None, matches(&[0xFF, 0x22, 0x08, 0x02, 0x01, 0x00, 0x46, 0x80]));

        // not manufacturer data
        assert_eq!(None, matches(&[0x16, 0x22, 0x08, 0x04, 0x01, 0x00, 0x46, 0x80]));
    }

    #[test]
    fn find_among_other_companies() {
        let raw = [
            2, 0x01, 0x06, // flags
            5, 0xFF, 0x4C, 0x00, 0x02, 0x15, // another company's data
            8, 0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x45, 0x80,
        ];

        assert_eq!(Some(product_id::CPB_ARDUINO), find_product_id(&raw));
    }

    #[test]
    fn find_with_lying_length() {
        // the length of the manufacturer data claims more bytes than there are
        let raw = [2, 0x01, 0x06, 12, 0xFF, 0x22, 0x08, 0x04, 0x01, 0x00, 0x45, 0x80];

        assert_eq!(None, find_product_id(&raw));

        assert!(AdafruitServerAdvertisement::try_from_advertising_data(&raw).is_err());
    }

    #[test]
    fn find_truncated_block() {
        // a correctly sized AD structure that is too short for a product ID
        let raw = [6, 0xFF, 0x22, 0x08, 0x04, 0x01, 0x00];

        assert_eq!(None, find_product_id(&raw));
    }

    #[test]
    fn server_advertisement_round_trip() {
        let advertisement = AdafruitServerAdvertisement::new(product_id::CPB_CIRCUIT_PYTHON);

        let mut buffer = [0u8; 31];

        let data = advertisement.build(&mut buffer).unwrap();

        assert_eq!(AdafruitServerAdvertisement::SIZE, data.len());

        assert_eq!(Some(product_id::CPB_CIRCUIT_PYTHON), find_product_id(data));

        assert_eq!(
            Ok(advertisement),
            AdafruitServerAdvertisement::try_from_advertising_data(data)
        );
    }

    #[test]
    fn server_advertisement_small_buffer() {
        let mut buffer = [0u8; 8];

        assert!(AdafruitServerAdvertisement::new(0).build(&mut buffer).is_err());
    }

    #[test]
    fn no_adafruit_data() {
        let raw = [2, 0x01, 0x06, 5, 0xFF, 0x4C, 0x00, 0x02, 0x15];

        assert_eq!(
            Err(Error::IncorrectCompanyId(ADAFRUIT_COMPANY_ID)),
            AdafruitServerAdvertisement::try_from_advertising_data(&raw)
        );
    }
}
