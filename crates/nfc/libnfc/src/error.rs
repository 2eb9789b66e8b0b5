//! Error types for loading libnfc

use nexum_nfc_core::NfcError;

/// Errors raised while loading or initializing libnfc
#[derive(Debug, thiserror::Error)]
pub enum LibnfcError {
    /// The shared library or one of its symbols could not be loaded
    #[error("Failed to load libnfc: {0}")]
    Loading(#[from] libloading::Error),

    /// None of the default library names could be loaded
    #[error("libnfc not found (tried {})", .0.join(", "))]
    LibraryNotFound(Vec<String>),

    /// libnfc reported an error
    #[error("libnfc error: {0}")]
    Nfc(#[from] NfcError),
}
