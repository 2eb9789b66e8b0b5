//! Native capability interface
//!
//! [`NfcDriver`] is the seam between the binding and the native library. The libnfc crate
//! implements it over the C ABI; tests implement it with a stub. Implementations forward every
//! call verbatim and report native failures through [`NfcError`](crate::NfcError) without
//! retrying or recovering locally.

use std::fmt;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::{
    connstring::ConnString, constants::Property, error::Result, modulation::Modulation,
    target::Target,
};

/// Native NFC library surface
///
/// A driver owns the initialized library state. `Handle` is one open device; it is moved into
/// [`NfcDriver::close`] so a released handle can never be used again.
pub trait NfcDriver: Send + Sync + fmt::Debug {
    /// Open device handle
    type Handle: Send + fmt::Debug;

    /// Version string of the native library
    fn version(&self) -> String;

    /// Connection strings of up to `max` detected devices
    fn list_devices(&self, max: usize) -> Result<Vec<ConnString>>;

    /// Open a device, the first available one when `connstring` is `None`
    fn open(&self, connstring: Option<&ConnString>) -> Result<Self::Handle>;

    /// Release a device
    fn close(&self, handle: Self::Handle);

    /// Device name
    fn name(&self, handle: &Self::Handle) -> String;

    /// Connection string of the open device
    fn connstring(&self, handle: &Self::Handle) -> ConnString;

    /// Last error reported for this device
    fn last_error(&self, handle: &Self::Handle) -> crate::NfcError;

    /// Set an integer property
    fn set_property_int(&self, handle: &mut Self::Handle, property: Property, value: i32)
    -> Result<()>;

    /// Set a boolean property
    fn set_property_bool(
        &self,
        handle: &mut Self::Handle,
        property: Property,
        value: bool,
    ) -> Result<()>;

    /// Put the device in initiator mode
    fn initiator_init(&self, handle: &mut Self::Handle) -> Result<()>;

    /// Send `tx` to the selected target and return at most `rx_capacity` received bytes
    ///
    /// `timeout` is in ms; 0 means no timeout and -1 the device default.
    fn transceive_bytes(
        &self,
        handle: &mut Self::Handle,
        tx: &[u8],
        rx_capacity: usize,
        timeout: i32,
    ) -> Result<Bytes> {
        trace!(tx = %hex::encode(tx), rx_capacity, timeout, "Transceiving frame");
        let result = self.do_transceive_bytes(handle, tx, rx_capacity, timeout);
        match &result {
            Ok(rx) => {
                trace!(rx = %hex::encode(rx), "Received frame");
            }
            Err(e) => {
                debug!(error = %e, code = e.code(), "Transceive failed");
            }
        }
        result
    }

    /// Internal implementation of [`NfcDriver::transceive_bytes`]
    fn do_transceive_bytes(
        &self,
        handle: &mut Self::Handle,
        tx: &[u8],
        rx_capacity: usize,
        timeout: i32,
    ) -> Result<Bytes>;

    /// Poll for one target using the given modulations
    ///
    /// Each modulation is tried `poll_nr` times with `period` * 150 ms between attempts.
    /// `Ok(None)` means nothing answered.
    fn poll_target(
        &self,
        handle: &mut Self::Handle,
        modulations: &[Modulation],
        poll_nr: u8,
        period: u8,
    ) -> Result<Option<Target>>;

    /// Select a passive target, optionally a specific one identified by `init_data`
    fn select_passive_target(
        &self,
        handle: &mut Self::Handle,
        modulation: Modulation,
        init_data: &[u8],
    ) -> Result<Option<Target>>;

    /// Deselect the current target
    fn deselect_target(&self, handle: &mut Self::Handle) -> Result<()>;

    /// Turn the device off (field off, low power)
    fn idle(&self, handle: &mut Self::Handle) -> Result<()>;

    /// Abort the running command
    fn abort_command(&self, handle: &mut Self::Handle) -> Result<()>;
}
