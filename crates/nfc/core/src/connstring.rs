//! Connection strings identifying a reader (e.g. `pn532_uart:/dev/ttyUSB0`)

use std::{fmt, str::FromStr};

use crate::{
    constants::BUFSIZE_CONNSTRING,
    error::{NfcError, Result},
};

/// A validated libnfc connection string
///
/// Always fits, NUL terminator included, into the fixed `nfc_connstring` buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnString(String);

impl ConnString {
    /// Validate and wrap a connection string
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.len() >= BUFSIZE_CONNSTRING || value.contains('\0') {
            return Err(NfcError::InvalidArgument);
        }
        Ok(Self(value))
    }

    /// Read a NUL-terminated connection string out of a C buffer
    ///
    /// Reads up to the first NUL (or the end of the buffer) and replaces invalid UTF-8.
    pub fn from_c_buffer(buffer: &[u8]) -> Self {
        let len = buffer
            .iter()
            .take(BUFSIZE_CONNSTRING - 1)
            .position(|&b| b == 0)
            .unwrap_or_else(|| buffer.len().min(BUFSIZE_CONNSTRING - 1));
        Self(String::from_utf8_lossy(&buffer[..len]).into_owned())
    }

    /// Render as the fixed, NUL-terminated `nfc_connstring` buffer
    pub fn to_c_buffer(&self) -> [u8; BUFSIZE_CONNSTRING] {
        let mut buffer = [0u8; BUFSIZE_CONNSTRING];
        buffer[..self.0.len()].copy_from_slice(self.0.as_bytes());
        buffer
    }

    /// The connection string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ConnString {
    type Err = NfcError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl AsRef<str> for ConnString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
