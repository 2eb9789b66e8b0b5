//! Error codes reported by libnfc
//!
//! libnfc reports failures as small negative integers. This module turns every such code into an
//! [`NfcError`] value. Known codes map to a dedicated variant carrying the canonical libnfc
//! description; anything else is kept verbatim in [`NfcError::Unknown`] and described as
//! `"Error <code>"`.

use std::{borrow::Cow, fmt};

use tracing::Level;

/// Raw libnfc error codes
///
/// These values cross the FFI boundary unchanged and must stay in lock-step with `nfc-types.h`.
pub mod code {
    /// Success (no error)
    pub const SUCCESS: i32 = 0;
    /// Input / output error, device may not be usable anymore without re-opening it
    pub const EIO: i32 = -1;
    /// Invalid argument(s)
    pub const EINVARG: i32 = -2;
    /// Operation not supported by device
    pub const EDEVNOTSUPP: i32 = -3;
    /// No such device
    pub const ENOTSUCHDEV: i32 = -4;
    /// Buffer overflow
    pub const EOVFLOW: i32 = -5;
    /// Operation timed out
    pub const ETIMEOUT: i32 = -6;
    /// Operation aborted (by user)
    pub const EOPABORTED: i32 = -7;
    /// Not (yet) implemented
    pub const ENOTIMPL: i32 = -8;
    /// Target released
    pub const ETGRELEASED: i32 = -10;
    /// Error while RF transmission
    pub const ERFTRANS: i32 = -20;
    /// MIFARE Classic: authentication failed
    pub const EMFCAUTHFAIL: i32 = -30;
    /// Software error (allocation, file/pipe creation, etc.)
    pub const ESOFT: i32 = -80;
    /// Device's internal chip error
    pub const ECHIP: i32 = -90;
}

/// A raw code outside the known error table
///
/// Only [`NfcError::from_code`] builds one, so a known code never ends up in
/// [`NfcError::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownCode(i32);

impl UnknownCode {
    /// The raw code
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Result type used by every fallible NFC operation
pub type Result<T> = core::result::Result<T, NfcError>;

/// Error reported by libnfc (or by the binding on its behalf)
///
/// `Success` is representable so that APIs returning codes uniformly can still produce an
/// `NfcError`; use [`NfcError::is_success`] before treating a value as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NfcError {
    /// Success (no error)
    #[error("Success")]
    Success,

    /// Input / output error
    #[error("Input / Output Error")]
    Io,

    /// Invalid argument(s)
    #[error("Invalid argument(s)")]
    InvalidArgument,

    /// Operation not supported by device
    #[error("Not Supported by Device")]
    DeviceNotSupported,

    /// No such device
    #[error("No Such Device")]
    NoSuchDevice,

    /// Buffer overflow
    #[error("Buffer Overflow")]
    Overflow,

    /// Operation timed out
    #[error("Timeout")]
    Timeout,

    /// Operation aborted by the user
    #[error("Operation Aborted")]
    OperationAborted,

    /// Not (yet) implemented
    #[error("Not (yet) Implemented")]
    NotImplemented,

    /// Target released
    #[error("Target Released")]
    TargetReleased,

    /// Error during RF transmission
    #[error("RF Transmission Error")]
    RfTransmission,

    /// MIFARE Classic authentication failed
    #[error("Mifare Authentication Failed")]
    MifareAuthFailed,

    /// Software error (allocation, file/pipe creation, etc.)
    ///
    /// Described with libnfc's own `nfc_strerror` text.
    #[error("Software Error")]
    Soft,

    /// Device's internal chip error
    #[error("Device's Internal Chip Error")]
    Chip,

    /// Code outside the known table
    #[error("Error {0}")]
    Unknown(UnknownCode),
}

impl NfcError {
    /// Decode a raw libnfc return code
    ///
    /// Total over `i32`: codes without a dedicated variant become [`NfcError::Unknown`].
    pub const fn from_code(code: i32) -> Self {
        match code {
            code::SUCCESS => Self::Success,
            code::EIO => Self::Io,
            code::EINVARG => Self::InvalidArgument,
            code::EDEVNOTSUPP => Self::DeviceNotSupported,
            code::ENOTSUCHDEV => Self::NoSuchDevice,
            code::EOVFLOW => Self::Overflow,
            code::ETIMEOUT => Self::Timeout,
            code::EOPABORTED => Self::OperationAborted,
            code::ENOTIMPL => Self::NotImplemented,
            code::ETGRELEASED => Self::TargetReleased,
            code::ERFTRANS => Self::RfTransmission,
            code::EMFCAUTHFAIL => Self::MifareAuthFailed,
            code::ESOFT => Self::Soft,
            code::ECHIP => Self::Chip,
            other => Self::Unknown(UnknownCode(other)),
        }
    }

    /// The raw libnfc code for this error
    pub const fn code(&self) -> i32 {
        match self {
            Self::Success => code::SUCCESS,
            Self::Io => code::EIO,
            Self::InvalidArgument => code::EINVARG,
            Self::DeviceNotSupported => code::EDEVNOTSUPP,
            Self::NoSuchDevice => code::ENOTSUCHDEV,
            Self::Overflow => code::EOVFLOW,
            Self::Timeout => code::ETIMEOUT,
            Self::OperationAborted => code::EOPABORTED,
            Self::NotImplemented => code::ENOTIMPL,
            Self::TargetReleased => code::ETGRELEASED,
            Self::RfTransmission => code::ERFTRANS,
            Self::MifareAuthFailed => code::EMFCAUTHFAIL,
            Self::Soft => code::ESOFT,
            Self::Chip => code::ECHIP,
            Self::Unknown(code) => code.get(),
        }
    }

    /// The canonical description from the error table, if this code has one
    pub const fn canonical_description(&self) -> Option<&'static str> {
        match self {
            Self::Success => Some("Success"),
            Self::Io => Some("Input / Output Error"),
            Self::InvalidArgument => Some("Invalid argument(s)"),
            Self::DeviceNotSupported => Some("Not Supported by Device"),
            Self::NoSuchDevice => Some("No Such Device"),
            Self::Overflow => Some("Buffer Overflow"),
            Self::Timeout => Some("Timeout"),
            Self::OperationAborted => Some("Operation Aborted"),
            Self::NotImplemented => Some("Not (yet) Implemented"),
            Self::TargetReleased => Some("Target Released"),
            Self::RfTransmission => Some("RF Transmission Error"),
            Self::MifareAuthFailed => Some("Mifare Authentication Failed"),
            Self::Soft => Some("Software Error"),
            Self::Chip => Some("Device's Internal Chip Error"),
            Self::Unknown(_) => None,
        }
    }

    /// Human-readable description, falling back to `"Error <code>"` for unknown codes
    pub fn description(&self) -> Cow<'static, str> {
        match self.canonical_description() {
            Some(description) => Cow::Borrowed(description),
            None => Cow::Owned(format!("Error {}", self.code())),
        }
    }

    /// Whether this value denotes success (code 0)
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether the code is part of the known error table
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Get the appropriate tracing level for this error
    pub const fn tracing_level(&self) -> Level {
        match self {
            Self::Success | Self::Timeout | Self::OperationAborted => Level::DEBUG,
            _ => Level::WARN,
        }
    }
}

impl From<i32> for NfcError {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<NfcError> for i32 {
    fn from(error: NfcError) -> Self {
        error.code()
    }
}

/// Interpret a libnfc return value
///
/// Negative values are errors; zero and positive values (byte or target counts) are returned
/// as-is.
pub fn check(ret: i32) -> Result<usize> {
    usize::try_from(ret).map_err(|_| NfcError::from_code(ret))
}
