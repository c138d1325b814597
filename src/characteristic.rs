//! Characteristic schema
//!
//! A [`Characteristic`] is the static description of a characteristic within a service table. It
//! contains everything a GATT server needs to create the characteristic, but none of the live
//! value storage. Attaching storage and notification behavior is done by the Bluetooth stack when
//! the service is bound (see [`ServiceBinder`](crate::services::ServiceBinder)).

use crate::uuid::{adafruit_service_uuid, Uuid};

/// Characteristic Properties
///
/// These are the properties that are part of the Characteristic Declaration
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug)]
pub enum Properties {
    Broadcast,
    Read,
    WriteWithoutResponse,
    Write,
    Notify,
    Indicate,
}

impl Properties {
    pub const fn to_val(&self) -> u8 {
        match *self {
            Properties::Broadcast => 1 << 0,
            Properties::Read => 1 << 1,
            Properties::WriteWithoutResponse => 1 << 2,
            Properties::Write => 1 << 3,
            Properties::Notify => 1 << 4,
            Properties::Indicate => 1 << 5,
        }
    }

    /// Convert a list of properties into the bit field of a characteristic declaration
    pub const fn slice_to_bit_field(properties: &[Self]) -> u8 {
        let mut field = 0;
        let mut index = 0;

        while index < properties.len() {
            field |= properties[index].to_val();
            index += 1;
        }

        field
    }
}

/// Access permission of a characteristic value
///
/// The protocol only uses open access or no access, there are no encrypted characteristics.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Access {
    /// Cannot be accessed by a client
    NoAccess,
    /// Can be accessed by any client
    Open,
}

/// The format of a characteristic value
///
/// All multi-byte values are little endian.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ValueFormat {
    Uint8,
    Uint16,
    Uint32,
    Int32,
    Float32,
    /// Three `f32` values (x, y, z)
    Vector3,
    /// Four `f32` values (w, x, y, z)
    Quaternion,
    /// Four `u16` values (red, green, blue, clear)
    Color,
    /// A `u16` frequency followed by a `u32` duration
    Tone,
    /// Variable length bytes
    Bytes { max_len: usize },
}

impl ValueFormat {
    /// Get the size of a fixed sized format
    ///
    /// `None` is returned for a variable length format.
    pub const fn fixed_len(&self) -> Option<usize> {
        match *self {
            ValueFormat::Uint8 => Some(1),
            ValueFormat::Uint16 => Some(2),
            ValueFormat::Uint32 | ValueFormat::Int32 | ValueFormat::Float32 => Some(4),
            ValueFormat::Vector3 => Some(12),
            ValueFormat::Quaternion => Some(16),
            ValueFormat::Color => Some(8),
            ValueFormat::Tone => Some(6),
            ValueFormat::Bytes { .. } => None,
        }
    }

    /// Get the maximum size of the value
    pub const fn max_len(&self) -> usize {
        match *self {
            ValueFormat::Bytes { max_len } => max_len,
            _ => match self.fixed_len() {
                Some(len) => len,
                None => 0,
            },
        }
    }
}

/// The initial value of a characteristic
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InitialValue {
    Int32(i32),
    Uint32(u32),
}

impl InitialValue {
    /// Get the transfer format of the initial value
    pub fn to_le_bytes(&self) -> [u8; 4] {
        match *self {
            InitialValue::Int32(v) => v.to_le_bytes(),
            InitialValue::Uint32(v) => v.to_le_bytes(),
        }
    }
}

/// A characteristic of a service table
///
/// ```
/// # use bo_tie_adafruit::characteristic::{Access, Characteristic, Properties, ValueFormat};
/// # use bo_tie_adafruit::adafruit_service_uuid;
/// const GESTURE: Characteristic = Characteristic::new(
///     adafruit_service_uuid(0x0F01),
///     &[Properties::Read, Properties::Notify],
///     ValueFormat::Uint8,
/// )
/// .set_write_access(Access::NoAccess);
///
/// assert_eq!(0x12, GESTURE.properties_bit_field());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Characteristic {
    pub uuid: Uuid,
    pub properties: &'static [Properties],
    pub read_access: Access,
    pub write_access: Access,
    pub format: ValueFormat,
    pub initial_value: Option<InitialValue>,
}

impl Characteristic {
    /// Create a new `Characteristic`
    ///
    /// Both read and write access default to open and there is no initial value.
    pub const fn new(uuid: Uuid, properties: &'static [Properties], format: ValueFormat) -> Self {
        Characteristic {
            uuid,
            properties,
            read_access: Access::Open,
            write_access: Access::Open,
            format,
            initial_value: None,
        }
    }

    pub const fn set_read_access(mut self, access: Access) -> Self {
        self.read_access = access;
        self
    }

    pub const fn set_write_access(mut self, access: Access) -> Self {
        self.write_access = access;
        self
    }

    pub const fn set_initial_value(mut self, value: InitialValue) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// Get the properties as the bit field of the characteristic declaration
    pub const fn properties_bit_field(&self) -> u8 {
        Properties::slice_to_bit_field(self.properties)
    }

    pub fn has_property(&self, property: Properties) -> bool {
        self.properties.contains(&property)
    }

    /// Check if a client can read the value
    pub fn is_readable(&self) -> bool {
        self.read_access == Access::Open && self.has_property(Properties::Read)
    }

    /// Check if a client can write the value
    pub fn is_writable(&self) -> bool {
        self.write_access == Access::Open
            && (self.has_property(Properties::Write) || self.has_property(Properties::WriteWithoutResponse))
    }

    /// Check that `value` fits the format of this characteristic
    pub fn check_value(&self, value: &[u8]) -> Result<(), crate::transfer::TransferFormatError> {
        use crate::transfer::TransferFormatError;

        match self.format.fixed_len() {
            Some(len) if len != value.len() => Err(TransferFormatError::bad_size(
                "characteristic value",
                len,
                value.len(),
            )),
            None if value.len() > self.format.max_len() => Err(TransferFormatError::invalid_length(
                "characteristic value",
                self.format.max_len(),
                value.len(),
            )),
            _ => Ok(()),
        }
    }
}

/// The sub identifier of the measurement period characteristic
pub const MEASUREMENT_PERIOD_ID: u16 = 0x0001;

/// The sub identifier of the service version characteristic
pub const SERVICE_VERSION_ID: u16 = 0x0002;

/// Create a measurement period characteristic
///
/// The measurement period is the number of milliseconds between updates of a sensor value. Zero
/// means the value is only notified when it changes and `-1` means measurements are stopped. A
/// client can both read and write the period.
pub const fn measurement_period(msecs: i32) -> Characteristic {
    Characteristic::new(
        adafruit_service_uuid(MEASUREMENT_PERIOD_ID),
        &[Properties::Read, Properties::Write],
        ValueFormat::Int32,
    )
    .set_initial_value(InitialValue::Int32(msecs))
}

/// Create a service version characteristic
///
/// This is a read only characteristic containing the version of the service.
pub const fn service_version(version: u32) -> Characteristic {
    Characteristic::new(
        adafruit_service_uuid(SERVICE_VERSION_ID),
        &[Properties::Read],
        ValueFormat::Uint32,
    )
    .set_write_access(Access::NoAccess)
    .set_initial_value(InitialValue::Uint32(version))
}
