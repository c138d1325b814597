//! Advertising Data: Flags
//!

use super::*;

/// The list of Flags defined in the Core Specification Supplement
///
/// These are the labels for the flags in the Flag data type within the Core Specification
/// Supplement.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum FlagLabel {
    /// LE limited discoverable mode
    LeLimitedDiscoverableMode,
    /// LE general discoverable mode
    LeGeneralDiscoverableMode,
    /// BR/EDR not supported
    BrEdrNotSupported,
    /// The controller supports simultaneous BR/EDR and LE to the same device
    ControllerSupportsSimultaneousLeAndBrEdr,
}

impl core::fmt::Display for FlagLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            FlagLabel::LeLimitedDiscoverableMode => f.write_str("le limited discoverable mode"),
            FlagLabel::LeGeneralDiscoverableMode => f.write_str("le general discoverable mode"),
            FlagLabel::BrEdrNotSupported => f.write_str("BR/EDR not supported"),
            FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr => {
                f.write_str("this controller is capable of simultaneous LE and BR/EDR to the same device")
            }
        }
    }
}

impl FlagLabel {
    const fn bit(&self) -> u8 {
        match *self {
            FlagLabel::LeLimitedDiscoverableMode => 1 << 0,
            FlagLabel::LeGeneralDiscoverableMode => 1 << 1,
            FlagLabel::BrEdrNotSupported => 1 << 2,
            FlagLabel::ControllerSupportsSimultaneousLeAndBrEdr => 1 << 3,
        }
    }
}

/// AD flags type
///
/// Only the first octet of the flags data is used by LE, so the flags are kept as a single byte.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags(u8);

impl Flags {
    const ASSIGNED_TYPE: AssignedTypes = AssignedTypes::Flags;

    /// Creates a flags object with no enabled flag
    pub const fn new() -> Self {
        Flags(0)
    }

    /// Flags of a connectable peripheral that only supports LE
    ///
    /// This enables *LE general discoverable mode* and *BR/EDR not supported*.
    pub const fn le_general_discoverable() -> Self {
        Flags(FlagLabel::LeGeneralDiscoverableMode.bit() | FlagLabel::BrEdrNotSupported.bit())
    }

    /// Enable a flag
    pub fn enable(&mut self, label: FlagLabel) -> &mut Self {
        self.0 |= label.bit();
        self
    }

    /// Disable a flag
    pub fn disable(&mut self, label: FlagLabel) -> &mut Self {
        self.0 &= !label.bit();
        self
    }

    /// Check if a flag is enabled
    pub fn is_enabled(&self, label: FlagLabel) -> bool {
        self.0 & label.bit() != 0
    }

    /// Get the raw flags octet
    pub fn to_val(&self) -> u8 {
        self.0
    }
}

impl IntoStruct for Flags {
    fn data_len(&self) -> usize {
        1
    }

    fn convert_into<'a>(&self, b: &'a mut [u8]) -> Result<AdStruct<'a>, ConvertError> {
        let mut interim = StructIntermediate::new(b, Self::ASSIGNED_TYPE.val())?;

        interim.try_extend_by(&self.0)?;

        Ok(interim.finish())
    }
}

impl TryFromStruct<'_> for Flags {
    fn try_from_struct(st: AdStruct<'_>) -> Result<Self, Error> {
        if st.get_type() != Self::ASSIGNED_TYPE.val() {
            return Err(Error::IncorrectAssignedType);
        }

        // Any octets after the first are reserved
        st.get_data().first().map(|v| Flags(*v)).ok_or(Error::IncorrectLength)
    }
}
