//! Core types for NFC reader bindings
//!
//! This crate holds the parts of the libnfc binding that do not touch the native library:
//!
//! - [`NfcError`]: every libnfc error code as a Rust error, with canonical descriptions and an
//!   `"Error <code>"` fallback for codes outside the table
//! - The constant namespaces ([`Property`], [`ModulationType`], [`BaudRate`], [`Mode`]) with
//!   their exact libnfc numbering
//! - [`Context`] / [`ContextCell`]: the initialized library, created once per process
//! - [`Device`]: an open reader whose handle is invalidated on close
//! - [`NfcDriver`]: the native surface, implemented by `nexum-nfc-libnfc`
//!
//! ## Example
//!
//! ```no_run
//! use nexum_nfc_core::{Context, DeviceConfig, Modulation, NfcDriver, Result};
//!
//! fn read_uid<D: NfcDriver>(context: &Context<D>) -> Result<Option<Vec<u8>>> {
//!     let config = DeviceConfig::new()
//!         .with_initiator(true)
//!         .with_infinite_select(false);
//!     let mut device = context.open_with_config(&config)?;
//!
//!     let target = device.poll(&[Modulation::ISO14443A_106], 20, 2)?;
//!     device.close();
//!
//!     Ok(target.and_then(|t| t.uid().map(<[u8]>::to_vec)))
//! }
//! ```
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub use bytes::Bytes;

pub mod config;
pub mod connstring;
pub mod constants;
pub mod context;
pub mod device;
pub mod driver;
pub mod error;
pub mod modulation;
pub mod target;

#[cfg(test)]
mod testing;

pub use config::{DeviceConfig, PropertyValue};
pub use connstring::ConnString;
pub use constants::{BUFSIZE_CONNSTRING, BaudRate, Mode, ModulationType, Property, PropertyKind};
pub use context::{Context, ContextCell};
pub use device::Device;
pub use driver::NfcDriver;
pub use error::{NfcError, Result, UnknownCode, check};
pub use modulation::Modulation;
pub use target::{FelicaInfo, Iso14443aInfo, Iso14443bInfo, JewelInfo, Target, TargetInfo};

/// Prelude module containing commonly used traits and types
pub mod prelude {
    pub use crate::{
        BaudRate, ConnString, Context, Device, DeviceConfig, Modulation, ModulationType, NfcDriver,
        NfcError, Property, PropertyValue, Result, Target, TargetInfo,
    };
}
