//! Library context
//!
//! A [`Context`] stands for the initialized native library. It is created explicitly and passed
//! by reference to whatever needs to open devices. [`ContextCell`] guarantees the library is
//! initialized at most once per process when placed in a `static`.

use std::{fmt, sync::Arc};

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::{
    config::DeviceConfig,
    connstring::ConnString,
    device::Device,
    driver::NfcDriver,
    error::Result,
};

/// Initialized native library
///
/// Cloning is cheap and yields a handle to the same underlying state. The context holds no
/// per-call state, so devices may be opened from several threads at once.
pub struct Context<D: NfcDriver> {
    driver: Arc<D>,
}

impl<D: NfcDriver> Clone for Context<D> {
    fn clone(&self) -> Self {
        Self {
            driver: Arc::clone(&self.driver),
        }
    }
}

impl<D: NfcDriver> fmt::Debug for Context<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("driver", &self.driver)
            .finish()
    }
}

impl<D: NfcDriver> Context<D> {
    /// Wrap an initialized driver
    pub fn new(driver: D) -> Self {
        Self {
            driver: Arc::new(driver),
        }
    }

    /// The underlying driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether two contexts share the same underlying state
    pub fn same_context(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.driver, &b.driver)
    }

    /// Version of the native library
    pub fn version(&self) -> String {
        self.driver.version()
    }

    /// Connection strings of up to `max` detected devices
    pub fn list_devices(&self, max: usize) -> Result<Vec<ConnString>> {
        let devices = self.driver.list_devices(max)?;
        debug!(count = devices.len(), "Listed NFC devices");
        Ok(devices)
    }

    /// Open the device identified by `connstring`
    pub fn open(&self, connstring: &ConnString) -> Result<Device<D>> {
        self.open_raw(Some(connstring))
    }

    /// Open the first available device
    pub fn open_default(&self) -> Result<Device<D>> {
        self.open_raw(None)
    }

    /// Open a device and apply `config` to it
    ///
    /// If any step fails the device is closed again and the error returned.
    pub fn open_with_config(&self, config: &DeviceConfig) -> Result<Device<D>> {
        let mut device = self.open_raw(config.connstring.as_ref())?;

        if let Err(e) = Self::apply_config(&mut device, config) {
            warn!(error = %e, "Failed to configure device, closing it");
            device.close();
            return Err(e);
        }

        Ok(device)
    }

    fn apply_config(device: &mut Device<D>, config: &DeviceConfig) -> Result<()> {
        if config.initiator {
            device.initiator_init()?;
        }
        for &(property, value) in &config.properties {
            device.set_property(property, value)?;
        }
        Ok(())
    }

    fn open_raw(&self, connstring: Option<&ConnString>) -> Result<Device<D>> {
        let handle = self.driver.open(connstring).inspect_err(|e| {
            debug!(connstring = ?connstring.map(ConnString::as_str), error = %e, "Open failed");
        })?;
        let device = Device::new(self.clone(), handle);
        debug!(device = ?device, "Opened NFC device");
        Ok(device)
    }
}

/// One-time initializer for a process-wide [`Context`]
///
/// Meant to live in a `static`; the driver factory passed to
/// [`ContextCell::get_or_try_init`] runs at most once successfully per cell.
pub struct ContextCell<D: NfcDriver> {
    context: OnceCell<Context<D>>,
}

impl<D: NfcDriver> fmt::Debug for ContextCell<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextCell")
            .field("initialized", &self.context.get().is_some())
            .finish()
    }
}

impl<D: NfcDriver> Default for ContextCell<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: NfcDriver> ContextCell<D> {
    /// Create an empty cell
    pub const fn new() -> Self {
        Self {
            context: OnceCell::new(),
        }
    }

    /// The context, if it has been initialized
    pub fn get(&self) -> Option<&Context<D>> {
        self.context.get()
    }

    /// Get the context, initializing the driver with `init` on first use
    ///
    /// `init` runs at most once successfully, even with concurrent callers. When it fails the
    /// cell stays empty and the error is returned, so a later call may try again.
    pub fn get_or_try_init<E>(
        &self,
        init: impl FnOnce() -> core::result::Result<D, E>,
    ) -> core::result::Result<&Context<D>, E> {
        self.context.get_or_try_init(|| {
            let driver = init()?;
            debug!(driver = ?driver, "Initialized NFC library context");
            Ok(Context::new(driver))
        })
    }
}
