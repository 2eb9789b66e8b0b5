//! libnfc binding
//!
//! Implements [`NfcDriver`] over the libnfc C API. The shared library is loaded at runtime
//! (from `LIBNFC_PATH` or the platform's default names), so nothing links against libnfc at
//! build time.
//!
//! ## Example
//!
//! ```no_run
//! use nexum_nfc_libnfc::{Modulation, NfcDriver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let context = nexum_nfc_libnfc::context()?;
//! println!("libnfc {}", context.version());
//!
//! let mut device = context.open_default()?;
//! device.initiator_init()?;
//! if let Some(target) = device.poll(&[Modulation::ISO14443A_106], 20, 2)? {
//!     println!("{target}");
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

mod config;
mod driver;
mod error;
mod ffi;

pub use config::LibnfcConfig;
pub use driver::{LibnfcDevice, LibnfcDriver};
pub use error::LibnfcError;
pub use nexum_nfc_core::{self, prelude::*};

use nexum_nfc_core::ContextCell;

static CONTEXT: ContextCell<LibnfcDriver> = ContextCell::new();

/// Process-wide libnfc context, configured from the environment
///
/// libnfc is initialized on the first successful call; later calls return the same context.
pub fn context() -> core::result::Result<&'static Context<LibnfcDriver>, LibnfcError> {
    context_with(&LibnfcConfig::from_env())
}

/// Process-wide libnfc context, loading the library as described by `config`
///
/// `config` only matters for the call that initializes the library. A failed initialization
/// leaves the cell empty so a later call can retry.
pub fn context_with(
    config: &LibnfcConfig,
) -> core::result::Result<&'static Context<LibnfcDriver>, LibnfcError> {
    CONTEXT.get_or_try_init(|| LibnfcDriver::load(config))
}
