//! Counting driver shared by the integration tests

use std::sync::atomic::{AtomicUsize, Ordering};

use nexum_nfc_core::{
    Bytes, ConnString, Modulation, NfcDriver, NfcError, Property, Result, Target,
};

/// Driver that only counts calls; every device answers every frame with `90 00`
#[derive(Debug, Default)]
pub(crate) struct CountingDriver {
    opens: AtomicUsize,
    closes: AtomicUsize,
    property_sets: AtomicUsize,
}

#[derive(Debug)]
pub(crate) struct CountingHandle {
    connstring: ConnString,
}

impl CountingDriver {
    pub(crate) fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub(crate) fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub(crate) fn property_sets(&self) -> usize {
        self.property_sets.load(Ordering::SeqCst)
    }
}

impl NfcDriver for CountingDriver {
    type Handle = CountingHandle;

    fn version(&self) -> String {
        "counting".to_string()
    }

    fn list_devices(&self, max: usize) -> Result<Vec<ConnString>> {
        (0..max.min(2))
            .map(|i| ConnString::new(format!("counting:{i}")))
            .collect()
    }

    fn open(&self, connstring: Option<&ConnString>) -> Result<Self::Handle> {
        let connstring = match connstring {
            Some(c) if c.as_str().starts_with("counting:") => c.clone(),
            Some(_) => return Err(NfcError::NoSuchDevice),
            None => ConnString::new("counting:0")?,
        };
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(CountingHandle { connstring })
    }

    fn close(&self, _handle: Self::Handle) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self, handle: &Self::Handle) -> String {
        format!("Counting reader ({})", handle.connstring)
    }

    fn connstring(&self, handle: &Self::Handle) -> ConnString {
        handle.connstring.clone()
    }

    fn last_error(&self, _handle: &Self::Handle) -> NfcError {
        NfcError::Success
    }

    fn set_property_int(
        &self,
        _handle: &mut Self::Handle,
        _property: Property,
        value: i32,
    ) -> Result<()> {
        if value < 0 {
            return Err(NfcError::InvalidArgument);
        }
        self.property_sets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn set_property_bool(
        &self,
        _handle: &mut Self::Handle,
        _property: Property,
        _value: bool,
    ) -> Result<()> {
        self.property_sets.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn initiator_init(&self, _handle: &mut Self::Handle) -> Result<()> {
        Ok(())
    }

    fn do_transceive_bytes(
        &self,
        _handle: &mut Self::Handle,
        _tx: &[u8],
        rx_capacity: usize,
        _timeout: i32,
    ) -> Result<Bytes> {
        if rx_capacity < 2 {
            return Err(NfcError::Overflow);
        }
        Ok(Bytes::from_static(&[0x90, 0x00]))
    }

    fn poll_target(
        &self,
        _handle: &mut Self::Handle,
        _modulations: &[Modulation],
        _poll_nr: u8,
        _period: u8,
    ) -> Result<Option<Target>> {
        Ok(None)
    }

    fn select_passive_target(
        &self,
        _handle: &mut Self::Handle,
        _modulation: Modulation,
        _init_data: &[u8],
    ) -> Result<Option<Target>> {
        Err(NfcError::Timeout)
    }

    fn deselect_target(&self, _handle: &mut Self::Handle) -> Result<()> {
        Ok(())
    }

    fn idle(&self, _handle: &mut Self::Handle) -> Result<()> {
        Ok(())
    }

    fn abort_command(&self, _handle: &mut Self::Handle) -> Result<()> {
        Ok(())
    }
}
