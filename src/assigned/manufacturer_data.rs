//! Manufacturer Specific Data Type
//!
//! The data portion of a manufacturer specific data structure starts with the two byte company
//! identifier assigned by the Bluetooth SIG. The rest of the data is defined by the company. The
//! format implemented here is a series of keyed fields, where each field is one byte for the length
//! of the rest of the field, a two byte little endian key, and the value.
//!
//! ```
//! # use bo_tie_adafruit::assigned::{manufacturer_data::ManufacturerData, IntoStruct};
//! let mut data = ManufacturerData::new(0x0822);
//!
//! data.set(0x0001, &0x8046u16);
//!
//! let buffer = &mut [0u8; 9];
//!
//! let ad = data.convert_into(buffer).unwrap();
//!
//! assert_eq!(ad.into_inner(), [8, 0xFF, 0x22, 0x08, 4, 0x01, 0x00, 0x46, 0x80]);
//! ```

use super::*;
use crate::transfer::{TransferFormatError, TransferFormatInto, TransferFormatTryFrom};
use alloc::vec::Vec;

/// The size of the company identifier
const COMPANY_ID_SIZE: usize = 2;

/// The size of the length and key of a field
const FIELD_HEADER_SIZE: usize = 3;

/// A keyed field within manufacturer data
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    key: u16,
    value: Vec<u8>,
}

impl Field {
    pub fn get_key(&self) -> u16 {
        self.key
    }

    pub fn get_value(&self) -> &[u8] {
        &self.value
    }

    fn len(&self) -> usize {
        FIELD_HEADER_SIZE + self.value.len()
    }
}

/// Manufacturer Specific Data
///
/// A company identifier along with its keyed fields. Fields are kept in the order they were first
/// set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManufacturerData {
    company_id: u16,
    fields: Vec<Field>,
}

impl ManufacturerData {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::ManufacturerSpecificData;

    /// Create a new `ManufacturerData` without any fields
    pub fn new(company_id: u16) -> Self {
        ManufacturerData {
            company_id,
            fields: Vec::new(),
        }
    }

    pub fn get_company_id(&self) -> u16 {
        self.company_id
    }

    /// Set the value of a field
    ///
    /// The value of the field is replaced if a field with `key` already exists.
    pub fn set<T>(&mut self, key: u16, value: &T) -> &mut Self
    where
        T: TransferFormatInto + ?Sized,
    {
        let value = TransferFormatInto::into(value);

        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { key, value }),
        }

        self
    }

    /// Get the value of a field
    ///
    /// `None` is returned if there is no field with `key`, otherwise the result of converting the
    /// field value into `T` is returned.
    pub fn get<T>(&self, key: u16) -> Option<Result<T, TransferFormatError>>
    where
        T: TransferFormatTryFrom,
    {
        self.fields
            .iter()
            .find(|field| field.key == key)
            .map(|field| <T as TransferFormatTryFrom>::try_from(&field.value))
    }

    /// Iterate over the fields
    pub fn iter(&self) -> core::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Try to parse the data portion of a manufacturer specific data structure
    ///
    /// This is the company identifier followed by the keyed fields.
    pub fn try_from_data(data: &[u8]) -> Result<Self, Error> {
        if data.len() < COMPANY_ID_SIZE {
            return Err(Error::RawTooSmall);
        }

        let company_id = <u16>::from_le_bytes([data[0], data[1]]);

        let mut fields = Vec::new();

        let mut rest = &data[COMPANY_ID_SIZE..];

        while let Some(len) = rest.first().map(|len| *len as usize) {
            // the length covers the key and the value
            if len < FIELD_HEADER_SIZE - 1 || len >= rest.len() {
                return Err(Error::IncorrectLength);
            }

            let key = <u16>::from_le_bytes([rest[1], rest[2]]);

            let value = rest[FIELD_HEADER_SIZE..=len].to_vec();

            fields.push(Field { key, value });

            rest = &rest[len + 1..];
        }

        Ok(ManufacturerData { company_id, fields })
    }
}

impl IntoStruct for ManufacturerData {
    fn data_len(&self) -> usize {
        COMPANY_ID_SIZE + self.fields.iter().map(|field| field.len()).sum::<usize>()
    }

    fn convert_into<'a>(&self, b: &'a mut [u8]) -> Result<AdStruct<'a>, ConvertError> {
        if self.data_len() > DATA_MAX_LEN {
            return Err(ConvertError {
                required: self.data_len() + HEADER_SIZE,
                remaining: DATA_MAX_LEN + HEADER_SIZE,
            });
        }

        let mut interim = StructIntermediate::new(b, Self::ASSIGNED_TYPE.val())?;

        interim.try_extend_by(&self.company_id)?;

        for field in self.fields.iter() {
            // a field can never be larger than DATA_MAX_LEN
            let len = (field.len() - 1) as u8;

            interim.try_extend_by(&len)?;
            interim.try_extend_by(&field.key)?;
            interim.try_extend_by(field.value.as_slice())?;
        }

        Ok(interim.finish())
    }
}

impl TryFromStruct<'_> for ManufacturerData {
    fn try_from_struct(st: AdStruct<'_>) -> Result<Self, Error> {
        if st.get_type() == Self::ASSIGNED_TYPE.val() {
            Self::try_from_data(st.get_data())
        } else {
            Err(Error::IncorrectAssignedType)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn into_raw_multiple_fields() {
        let mut data = ManufacturerData::new(0x0822);

        data.set(0x0001, &0x8046u16).set(0x0002, &7u8).set(0x0001, &0x8072u16);

        assert_eq!(2 + 5 + 4, data.data_len());

        let mut buffer = [0u8; 13];

        let ad = data.convert_into(&mut buffer).unwrap();

        assert_eq!(
            ad.into_inner(),
            [12, 0xFF, 0x22, 0x08, 4, 0x01, 0x00, 0x72, 0x80, 3, 0x02, 0x00, 7]
        );
    }

    #[test]
    fn from_raw_test() {
        let raw = [11, 0xFF, 0x22, 0x08, 2, 0x05, 0x00, 4, 0x01, 0x00, 0x46, 0x80];

        let ad = AdStruct::try_new(&raw).unwrap().unwrap().0;

        let data: ManufacturerData = ad.try_into().unwrap();

        assert_eq!(0x0822, data.get_company_id());

        assert_eq!(Some(Ok(0x8046u16)), data.get(0x0001));

        assert_eq!(Some(&[][..]), data.iter().next().map(|f| f.get_value()));

        assert_eq!(None, data.get::<u16>(0x0003));
    }

    #[test]
    fn field_length_lies() {
        assert_eq!(
            Err(Error::IncorrectLength),
            ManufacturerData::try_from_data(&[0x22, 0x08, 6, 0x01, 0x00, 0x46])
        );

        assert_eq!(
            Err(Error::IncorrectLength),
            ManufacturerData::try_from_data(&[0x22, 0x08, 1, 0x01])
        );

        assert_eq!(Err(Error::RawTooSmall), ManufacturerData::try_from_data(&[0x22]));
    }

    #[test]
    fn wrong_type() {
        let raw = [3, 0x01, 0x22, 0x08];

        let ad = AdStruct::try_new(&raw).unwrap().unwrap().0;

        assert_eq!(Err(Error::IncorrectAssignedType), ManufacturerData::try_from_struct(ad));
    }
}
