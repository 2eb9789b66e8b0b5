//! Enumerations shared with libnfc
//!
//! Every value here is passed across the FFI boundary as a raw integer, so the discriminants
//! follow the numbering of libnfc's `nfc-types.h` exactly. Reordering a variant silently
//! selects the wrong property or modulation on the native side.

use crate::error::NfcError;

/// Maximum length for an NFC connection string, including the NUL terminator
pub const BUFSIZE_CONNSTRING: usize = 1024;

macro_rules! raw_enum {
    ($name:ident { $($variant:ident),+ $(,)? }) => {
        impl $name {
            /// All values in libnfc declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The raw value passed to libnfc
            pub const fn as_raw(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = NfcError;

            fn try_from(raw: i32) -> Result<Self, Self::Error> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_raw() == raw)
                    .ok_or(NfcError::InvalidArgument)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.as_raw()
            }
        }
    };
}

/// Device properties for `set_property_int` / `set_property_bool`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Property {
    /// Default command processing timeout in ms, 0 means no timeout. Default set by the driver.
    TimeoutCommand = 0,
    /// Timeout between ATR_REQ and ATR_RES in ms (103 ms on PN53x based devices)
    TimeoutAtr,
    /// Timeout to give up reception from the target in ms (52 ms by default)
    TimeoutCom,
    /// Let the chip append and verify CRC bytes
    HandleCrc,
    /// Let the chip generate and validate ISO14443-A parity bits
    HandleParity,
    /// Enable or disable the electronic field
    ActivateField,
    /// Enable the CRYPTO1 co-processor (set automatically after MIFARE Classic authentication)
    ActivateCrypto1,
    /// Keep inviting targets forever when selecting (blocking select)
    InfiniteSelect,
    /// Accept frames carrying less than 4 bits
    AcceptInvalidFrames,
    /// Gather multiple received frames in the chip FIFO
    AcceptMultipleFrames,
    /// Automatically switch to ISO14443-4 when the target is compliant
    AutoIso14443_4,
    /// Automatic frame encapsulation and chaining
    EasyFraming,
    /// Force the chip to switch to ISO14443-A
    ForceIso14443A,
    /// Force the chip to switch to ISO14443-B
    ForceIso14443B,
    /// Force the chip to run at 106 kbps
    ForceSpeed106,
}

raw_enum!(Property {
    TimeoutCommand,
    TimeoutAtr,
    TimeoutCom,
    HandleCrc,
    HandleParity,
    ActivateField,
    ActivateCrypto1,
    InfiniteSelect,
    AcceptInvalidFrames,
    AcceptMultipleFrames,
    AutoIso14443_4,
    EasyFraming,
    ForceIso14443A,
    ForceIso14443B,
    ForceSpeed106,
});

/// Value kind a property expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Integer valued (timeouts in ms)
    Int,
    /// Boolean switch
    Bool,
}

impl Property {
    /// Which setter the property is meant for
    pub const fn kind(self) -> PropertyKind {
        match self {
            Self::TimeoutCommand | Self::TimeoutAtr | Self::TimeoutCom => PropertyKind::Int,
            _ => PropertyKind::Bool,
        }
    }
}

/// NFC modulation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ModulationType {
    /// ISO/IEC 14443-A
    Iso14443A = 1,
    /// Innovision Jewel
    Jewel,
    /// ISO/IEC 14443-B
    Iso14443B,
    /// Pre-ISO14443B aka ISO/IEC 14443 B' or Type B'
    Iso14443BI,
    /// ISO14443-2B ST SRx
    Iso14443B2SR,
    /// ISO14443-2B ASK CTx
    Iso14443B2CT,
    /// FeliCa
    Felica,
    /// D.E.P.
    Dep,
}

raw_enum!(ModulationType {
    Iso14443A,
    Jewel,
    Iso14443B,
    Iso14443BI,
    Iso14443B2SR,
    Iso14443B2CT,
    Felica,
    Dep,
});

impl ModulationType {
    /// Display name, as printed by libnfc's `str_nfc_modulation_type`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iso14443A => "ISO/IEC 14443A",
            Self::Jewel => "Innovision Jewel",
            Self::Iso14443B => "ISO/IEC 14443-4B",
            Self::Iso14443BI => "ISO/IEC 14443-4B'",
            Self::Iso14443B2SR => "ISO/IEC 14443-2B ST SRx",
            Self::Iso14443B2CT => "ISO/IEC 14443-2B ASK CTx",
            Self::Felica => "FeliCa",
            Self::Dep => "D.E.P.",
        }
    }
}

/// NFC baud rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BaudRate {
    /// Undefined baud rate
    Undefined = 0,
    /// 106 kbps
    Nbr106,
    /// 212 kbps
    Nbr212,
    /// 424 kbps
    Nbr424,
    /// 847 kbps
    Nbr847,
}

raw_enum!(BaudRate {
    Undefined,
    Nbr106,
    Nbr212,
    Nbr424,
    Nbr847,
});

impl BaudRate {
    /// Display name, as printed by libnfc's `str_nfc_baud_rate`
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undefined => "undefined baud rate",
            Self::Nbr106 => "106 kbps",
            Self::Nbr212 => "212 kbps",
            Self::Nbr424 => "424 kbps",
            Self::Nbr847 => "847 kbps",
        }
    }
}

/// NFC device mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Mode {
    /// Emulate a target
    Target = 0,
    /// Act as initiator
    Initiator,
}

raw_enum!(Mode { Target, Initiator });
