//! In-memory driver used by the unit tests

use bytes::Bytes;
use parking_lot::Mutex;

use crate::{
    config::PropertyValue,
    connstring::ConnString,
    constants::{ModulationType, Property},
    driver::NfcDriver,
    error::{NfcError, Result},
    modulation::Modulation,
    target::{Iso14443aInfo, Target, TargetInfo},
};

#[derive(Debug, Default)]
struct StubState {
    next_id: u32,
    open: Vec<u32>,
    opened: usize,
    closed: usize,
    initiator_inits: usize,
    properties: Vec<(Property, PropertyValue)>,
}

/// Driver with a single device at `stub:0`
#[derive(Debug, Default)]
pub(crate) struct StubDriver {
    state: Mutex<StubState>,
    failing_property: Option<Property>,
}

#[derive(Debug)]
pub(crate) struct StubHandle(u32);

impl StubDriver {
    /// Make setting `property` fail with `DeviceNotSupported`
    pub(crate) fn failing_property(mut self, property: Property) -> Self {
        self.failing_property = Some(property);
        self
    }

    pub(crate) fn opened(&self) -> usize {
        self.state.lock().opened
    }

    pub(crate) fn closed(&self) -> usize {
        self.state.lock().closed
    }

    pub(crate) fn initiator_inits(&self) -> usize {
        self.state.lock().initiator_inits
    }

    pub(crate) fn properties(&self) -> Vec<(Property, PropertyValue)> {
        self.state.lock().properties.clone()
    }

    fn set(&self, property: Property, value: PropertyValue) -> Result<()> {
        if self.failing_property == Some(property) {
            return Err(NfcError::DeviceNotSupported);
        }
        self.state.lock().properties.push((property, value));
        Ok(())
    }
}

impl NfcDriver for StubDriver {
    type Handle = StubHandle;

    fn version(&self) -> String {
        "stub".to_string()
    }

    fn list_devices(&self, max: usize) -> Result<Vec<ConnString>> {
        Ok(std::iter::once(ConnString::new("stub:0")?)
            .take(max)
            .collect())
    }

    fn open(&self, connstring: Option<&ConnString>) -> Result<Self::Handle> {
        if connstring.is_some_and(|c| c.as_str() != "stub:0") {
            return Err(NfcError::NoSuchDevice);
        }
        let mut state = self.state.lock();
        state.next_id += 1;
        state.opened += 1;
        let id = state.next_id;
        state.open.push(id);
        Ok(StubHandle(id))
    }

    fn close(&self, handle: Self::Handle) {
        let mut state = self.state.lock();
        let index = state
            .open
            .iter()
            .position(|&id| id == handle.0)
            .expect("closing a handle that is not open");
        state.open.remove(index);
        state.closed += 1;
    }

    fn name(&self, _handle: &Self::Handle) -> String {
        "Stub reader".to_string()
    }

    fn connstring(&self, _handle: &Self::Handle) -> ConnString {
        ConnString::from_c_buffer(b"stub:0\0")
    }

    fn last_error(&self, _handle: &Self::Handle) -> NfcError {
        NfcError::Success
    }

    fn set_property_int(
        &self,
        _handle: &mut Self::Handle,
        property: Property,
        value: i32,
    ) -> Result<()> {
        self.set(property, PropertyValue::Int(value))
    }

    fn set_property_bool(
        &self,
        _handle: &mut Self::Handle,
        property: Property,
        value: bool,
    ) -> Result<()> {
        self.set(property, PropertyValue::Bool(value))
    }

    fn initiator_init(&self, _handle: &mut Self::Handle) -> Result<()> {
        self.state.lock().initiator_inits += 1;
        Ok(())
    }

    fn do_transceive_bytes(
        &self,
        _handle: &mut Self::Handle,
        tx: &[u8],
        rx_capacity: usize,
        _timeout: i32,
    ) -> Result<Bytes> {
        if tx.len() > rx_capacity {
            return Err(NfcError::Overflow);
        }
        Ok(Bytes::copy_from_slice(tx))
    }

    fn poll_target(
        &self,
        _handle: &mut Self::Handle,
        modulations: &[Modulation],
        _poll_nr: u8,
        _period: u8,
    ) -> Result<Option<Target>> {
        Ok(modulations
            .iter()
            .find(|m| m.modulation_type == ModulationType::Iso14443A)
            .map(|&modulation| {
                Target::new(
                    modulation,
                    TargetInfo::Iso14443a(Iso14443aInfo {
                        atqa: [0x00, 0x44],
                        sak: 0x00,
                        uid: Bytes::from_static(&[0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66]),
                        ats: Bytes::new(),
                    }),
                )
            }))
    }

    fn select_passive_target(
        &self,
        handle: &mut Self::Handle,
        modulation: Modulation,
        _init_data: &[u8],
    ) -> Result<Option<Target>> {
        self.poll_target(handle, &[modulation], 1, 1)
    }

    fn deselect_target(&self, _handle: &mut Self::Handle) -> Result<()> {
        Ok(())
    }

    fn idle(&self, _handle: &mut Self::Handle) -> Result<()> {
        Ok(())
    }

    fn abort_command(&self, _handle: &mut Self::Handle) -> Result<()> {
        Err(NfcError::NotImplemented)
    }
}
