//! Open device handle

use std::fmt;

use bytes::Bytes;
use tracing::{Level, debug, warn};

use crate::{
    config::PropertyValue,
    connstring::ConnString,
    constants::{Property, PropertyKind},
    context::Context,
    driver::NfcDriver,
    error::{NfcError, Result},
    modulation::Modulation,
    target::Target,
};

/// A device opened through a [`Context`]
///
/// The caller owns the device exclusively. Operations take `&mut self`, so a device shared
/// between threads must be put behind the caller's own lock. After [`Device::close`] every
/// operation fails with [`NfcError::NoSuchDevice`]. Dropping an open device closes it.
pub struct Device<D: NfcDriver> {
    context: Context<D>,
    handle: Option<D::Handle>,
}

impl<D: NfcDriver> fmt::Debug for Device<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("handle", &self.handle)
            .field("open", &self.handle.is_some())
            .finish()
    }
}

impl<D: NfcDriver> Device<D> {
    pub(crate) const fn new(context: Context<D>, handle: D::Handle) -> Self {
        Self {
            context,
            handle: Some(handle),
        }
    }

    /// The context this device was opened from
    pub const fn context(&self) -> &Context<D> {
        &self.context
    }

    /// Whether the device is still open
    pub const fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn handle(&self) -> Result<&D::Handle> {
        self.handle.as_ref().ok_or(NfcError::NoSuchDevice)
    }

    /// Run `op` against the open handle, logging native failures
    fn with_handle<T>(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&D, &mut D::Handle) -> Result<T>,
    ) -> Result<T> {
        let handle = self.handle.as_mut().ok_or(NfcError::NoSuchDevice)?;
        f(self.context.driver(), handle).inspect_err(|e| {
            if e.tracing_level() == Level::DEBUG {
                debug!(op, error = %e, code = e.code(), "NFC operation failed");
            } else {
                warn!(
                    op,
                    error = %e,
                    code = e.code(),
                    known = e.is_known(),
                    "NFC operation failed"
                );
            }
        })
    }

    /// Device name
    pub fn name(&self) -> Result<String> {
        Ok(self.context.driver().name(self.handle()?))
    }

    /// Connection string of the device
    pub fn connstring(&self) -> Result<ConnString> {
        Ok(self.context.driver().connstring(self.handle()?))
    }

    /// Last error the native library recorded for this device
    pub fn last_error(&self) -> Result<NfcError> {
        Ok(self.context.driver().last_error(self.handle()?))
    }

    /// Set an integer property
    pub fn set_property_int(&mut self, property: Property, value: i32) -> Result<()> {
        debug!(?property, value, "Setting integer property");
        if property.kind() != PropertyKind::Int {
            debug!(?property, "Integer value for a boolean property, forwarding as-is");
        }
        self.with_handle("set_property_int", |driver, handle| {
            driver.set_property_int(handle, property, value)
        })
    }

    /// Set a boolean property
    pub fn set_property_bool(&mut self, property: Property, value: bool) -> Result<()> {
        debug!(?property, value, "Setting boolean property");
        if property.kind() != PropertyKind::Bool {
            debug!(?property, "Boolean value for an integer property, forwarding as-is");
        }
        self.with_handle("set_property_bool", |driver, handle| {
            driver.set_property_bool(handle, property, value)
        })
    }

    /// Set a property with the setter matching `value`
    pub fn set_property(&mut self, property: Property, value: PropertyValue) -> Result<()> {
        match value {
            PropertyValue::Int(value) => self.set_property_int(property, value),
            PropertyValue::Bool(value) => self.set_property_bool(property, value),
        }
    }

    /// Put the device in initiator mode
    pub fn initiator_init(&mut self) -> Result<()> {
        self.with_handle("initiator_init", |driver, handle| driver.initiator_init(handle))
    }

    /// Send a frame to the selected target and receive the answer
    ///
    /// At most `rx_capacity` bytes are received. `timeout` is in ms: 0 waits forever, -1 uses
    /// the device default.
    pub fn transceive(&mut self, tx: &[u8], rx_capacity: usize, timeout: i32) -> Result<Bytes> {
        self.with_handle("transceive", |driver, handle| {
            driver.transceive_bytes(handle, tx, rx_capacity, timeout)
        })
    }

    /// Poll for a target
    pub fn poll(
        &mut self,
        modulations: &[Modulation],
        poll_nr: u8,
        period: u8,
    ) -> Result<Option<Target>> {
        self.with_handle("poll", |driver, handle| {
            driver.poll_target(handle, modulations, poll_nr, period)
        })
    }

    /// Select a passive target
    pub fn select_passive_target(
        &mut self,
        modulation: Modulation,
        init_data: &[u8],
    ) -> Result<Option<Target>> {
        self.with_handle("select_passive_target", |driver, handle| {
            driver.select_passive_target(handle, modulation, init_data)
        })
    }

    /// Deselect the current target
    pub fn deselect_target(&mut self) -> Result<()> {
        self.with_handle("deselect_target", |driver, handle| {
            driver.deselect_target(handle)
        })
    }

    /// Turn the device off
    pub fn idle(&mut self) -> Result<()> {
        self.with_handle("idle", |driver, handle| driver.idle(handle))
    }

    /// Abort the current command
    pub fn abort_command(&mut self) -> Result<()> {
        self.with_handle("abort_command", |driver, handle| driver.abort_command(handle))
    }

    /// Release the device
    ///
    /// Closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            debug!(?handle, "Closing NFC device");
            self.context.driver().close(handle);
        }
    }
}

impl<D: NfcDriver> Drop for Device<D> {
    fn drop(&mut self) {
        self.close();
    }
}
