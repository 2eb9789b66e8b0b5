//! [`NfcDriver`] implementation over the libnfc C API

use std::{
    ffi::{CStr, c_char},
    fmt,
    path::PathBuf,
    ptr::{self, NonNull},
};

use libloading::Library;
use nexum_nfc_core::{
    BaudRate, Bytes, ConnString, FelicaInfo, Iso14443aInfo, Iso14443bInfo, JewelInfo,
    Modulation, ModulationType, NfcDriver, NfcError, Property, Result, Target, TargetInfo,
    check,
};
use tracing::{debug, info, trace};

use crate::{
    config::LibnfcConfig,
    error::LibnfcError,
    ffi::{Api, RawContext, RawDevice, RawModulation, RawTarget},
};

/// Open libnfc device (`nfc_device *`)
#[derive(Debug)]
pub struct LibnfcDevice(NonNull<RawDevice>);

// SAFETY: an `nfc_device` is not tied to the thread that opened it; exclusive access is
// guaranteed by `Device` taking `&mut self` for every operation.
unsafe impl Send for LibnfcDevice {}

impl LibnfcDevice {
    const fn as_ptr(&self) -> *mut RawDevice {
        self.0.as_ptr()
    }
}

/// libnfc loaded at runtime
///
/// Constructing the driver runs `nfc_init`; dropping it runs `nfc_exit`. Use
/// [`crate::context`] to get the single process-wide instance.
pub struct LibnfcDriver {
    api: Api,
    context: NonNull<RawContext>,
    path: PathBuf,
    // Dropped after `Drop::drop` has called `nfc_exit`.
    _library: Library,
}

// SAFETY: the `nfc_context` is only read after `nfc_init`; libnfc allows concurrent
// `nfc_open` / `nfc_list_devices` calls against it.
unsafe impl Send for LibnfcDriver {}
// SAFETY: see above.
unsafe impl Sync for LibnfcDriver {}

impl fmt::Debug for LibnfcDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibnfcDriver")
            .field("path", &self.path)
            .field("context", &self.context)
            .finish()
    }
}

impl LibnfcDriver {
    /// Load libnfc and initialize it
    ///
    /// Each call runs `nfc_init`; callers go through [`crate::context_with`] so it happens once
    /// per process.
    pub(crate) fn load(config: &LibnfcConfig) -> core::result::Result<Self, LibnfcError> {
        let (library, path) = Self::open_library(config)?;
        let api = Api::load(&library)?;

        let mut context = ptr::null_mut();
        // SAFETY: `nfc_init` writes a context pointer (or NULL on allocation failure).
        unsafe { (api.init)(&mut context) };
        let context = NonNull::new(context).ok_or(NfcError::Soft)?;

        let driver = Self {
            api,
            context,
            path,
            _library: library,
        };
        info!(path = %driver.path.display(), version = %driver.version(), "Loaded libnfc");
        Ok(driver)
    }

    fn open_library(
        config: &LibnfcConfig,
    ) -> core::result::Result<(Library, PathBuf), LibnfcError> {
        if let Some(path) = &config.library_path {
            // SAFETY: loading libnfc runs no initialization routines with preconditions.
            let library = unsafe { Library::new(path) }?;
            return Ok((library, path.clone()));
        }

        for &name in LibnfcConfig::CANDIDATES {
            // SAFETY: as above.
            match unsafe { Library::new(name) } {
                Ok(library) => return Ok((library, PathBuf::from(name))),
                Err(e) => trace!(name, error = %e, "libnfc candidate not loadable"),
            }
        }

        Err(LibnfcError::LibraryNotFound(
            LibnfcConfig::CANDIDATES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        ))
    }

    /// Path or name the library was loaded from
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for LibnfcDriver {
    fn drop(&mut self) {
        debug!("Releasing libnfc context");
        // SAFETY: `context` came from `nfc_init` and is released exactly once.
        unsafe { (self.api.exit)(self.context.as_ptr()) };
    }
}

/// Copy a C string owned by libnfc
///
/// # Safety
///
/// `ptr` must be NULL or point to a NUL-terminated string that outlives the call.
unsafe fn c_string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    // SAFETY: guaranteed by the caller.
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

const fn to_raw_modulation(modulation: Modulation) -> RawModulation {
    RawModulation {
        nmt: modulation.modulation_type.as_raw(),
        nbr: modulation.baud_rate.as_raw(),
    }
}

/// Decode an `nfc_target` filled in by libnfc
pub(crate) fn decode_target(raw: &RawTarget) -> Result<Target> {
    let modulation = Modulation::new(
        ModulationType::try_from(raw.nm.nmt)?,
        BaudRate::try_from(raw.nm.nbr)?,
    );

    // SAFETY: libnfc fills the union member matching `nm.nmt`, and every member is plain
    // bytes/integers, so reading it is valid for any bit pattern.
    let info = unsafe {
        match modulation.modulation_type {
            ModulationType::Iso14443A => {
                let nai = &raw.nti.nai;
                let uid_len = nai.sz_uid_len.min(nai.abt_uid.len());
                let ats_len = nai.sz_ats_len.min(nai.abt_ats.len());
                TargetInfo::Iso14443a(Iso14443aInfo {
                    atqa: nai.abt_atqa,
                    sak: nai.bt_sak,
                    uid: Bytes::copy_from_slice(&nai.abt_uid[..uid_len]),
                    ats: Bytes::copy_from_slice(&nai.abt_ats[..ats_len]),
                })
            }
            ModulationType::Felica => {
                let nfi = &raw.nti.nfi;
                TargetInfo::Felica(FelicaInfo {
                    res_code: nfi.bt_res_code,
                    id: nfi.abt_id,
                    pad: nfi.abt_pad,
                    sys_code: nfi.abt_sys_code,
                })
            }
            ModulationType::Iso14443B => {
                let nbi = &raw.nti.nbi;
                TargetInfo::Iso14443b(Iso14443bInfo {
                    pupi: nbi.abt_pupi,
                    application_data: nbi.abt_application_data,
                    protocol_info: nbi.abt_protocol_info,
                    card_identifier: nbi.ui8_card_identifier,
                })
            }
            ModulationType::Jewel => {
                let nji = &raw.nti.nji;
                TargetInfo::Jewel(JewelInfo {
                    sens_res: nji.bt_sens_res,
                    id: nji.bt_id,
                })
            }
            _ => TargetInfo::Other,
        }
    };

    Ok(Target::new(modulation, info))
}

/// Map a libnfc status return (`0` or a negative error) to `Result<()>`
fn status(ret: i32) -> Result<()> {
    check(ret).map(|_| ())
}

impl NfcDriver for LibnfcDriver {
    type Handle = LibnfcDevice;

    fn version(&self) -> String {
        // SAFETY: `nfc_version` returns a static string.
        unsafe { c_string((self.api.version)()) }
    }

    fn list_devices(&self, max: usize) -> Result<Vec<ConnString>> {
        let mut buffers = vec![[0u8; nexum_nfc_core::BUFSIZE_CONNSTRING]; max];
        // SAFETY: `buffers` holds `max` connstring slots.
        let found = unsafe {
            (self.api.list_devices)(self.context.as_ptr(), buffers.as_mut_ptr(), max)
        };
        Ok(buffers
            .iter()
            .take(found.min(max))
            .map(|buffer| ConnString::from_c_buffer(buffer))
            .collect())
    }

    fn open(&self, connstring: Option<&ConnString>) -> Result<Self::Handle> {
        let buffer = connstring.map(ConnString::to_c_buffer);
        let connstring_ptr = buffer
            .as_ref()
            .map_or(ptr::null(), |buffer| buffer.as_ptr().cast::<c_char>());

        // SAFETY: `connstring_ptr` is NULL or a NUL-terminated buffer alive for the call.
        let device = unsafe { (self.api.open)(self.context.as_ptr(), connstring_ptr) };
        NonNull::new(device)
            .map(LibnfcDevice)
            .ok_or(NfcError::NoSuchDevice)
    }

    fn close(&self, handle: Self::Handle) {
        // SAFETY: the handle is consumed, so the device is closed exactly once.
        unsafe { (self.api.close)(handle.as_ptr()) }
    }

    fn name(&self, handle: &Self::Handle) -> String {
        // SAFETY: the name is owned by the open device.
        unsafe { c_string((self.api.device_get_name)(handle.as_ptr())) }
    }

    fn connstring(&self, handle: &Self::Handle) -> ConnString {
        // SAFETY: the connstring is owned by the open device.
        let raw = unsafe { c_string((self.api.device_get_connstring)(handle.as_ptr())) };
        ConnString::from_c_buffer(raw.as_bytes())
    }

    fn last_error(&self, handle: &Self::Handle) -> NfcError {
        // SAFETY: the device is open.
        NfcError::from_code(unsafe { (self.api.device_get_last_error)(handle.as_ptr()) })
    }

    fn set_property_int(
        &self,
        handle: &mut Self::Handle,
        property: Property,
        value: i32,
    ) -> Result<()> {
        // SAFETY: the device is open and exclusively borrowed.
        status(unsafe {
            (self.api.device_set_property_int)(handle.as_ptr(), property.as_raw(), value)
        })
    }

    fn set_property_bool(
        &self,
        handle: &mut Self::Handle,
        property: Property,
        value: bool,
    ) -> Result<()> {
        // SAFETY: the device is open and exclusively borrowed.
        status(unsafe {
            (self.api.device_set_property_bool)(handle.as_ptr(), property.as_raw(), value)
        })
    }

    fn initiator_init(&self, handle: &mut Self::Handle) -> Result<()> {
        // SAFETY: the device is open and exclusively borrowed.
        status(unsafe { (self.api.initiator_init)(handle.as_ptr()) })
    }

    fn do_transceive_bytes(
        &self,
        handle: &mut Self::Handle,
        tx: &[u8],
        rx_capacity: usize,
        timeout: i32,
    ) -> Result<Bytes> {
        let mut rx = vec![0u8; rx_capacity];
        // SAFETY: both buffers are valid for their stated lengths during the call.
        let received = check(unsafe {
            (self.api.initiator_transceive_bytes)(
                handle.as_ptr(),
                tx.as_ptr(),
                tx.len(),
                rx.as_mut_ptr(),
                rx.len(),
                timeout,
            )
        })?;
        rx.truncate(received.min(rx_capacity));
        Ok(Bytes::from(rx))
    }

    fn poll_target(
        &self,
        handle: &mut Self::Handle,
        modulations: &[Modulation],
        poll_nr: u8,
        period: u8,
    ) -> Result<Option<Target>> {
        let raw_modulations: Vec<RawModulation> =
            modulations.iter().copied().map(to_raw_modulation).collect();
        let mut target = RawTarget::zeroed();

        // SAFETY: the modulation slice and target outlive the call.
        let found = check(unsafe {
            (self.api.initiator_poll_target)(
                handle.as_ptr(),
                raw_modulations.as_ptr(),
                raw_modulations.len(),
                poll_nr,
                period,
                &mut target,
            )
        })?;

        if found == 0 {
            return Ok(None);
        }
        decode_target(&target).map(Some)
    }

    fn select_passive_target(
        &self,
        handle: &mut Self::Handle,
        modulation: Modulation,
        init_data: &[u8],
    ) -> Result<Option<Target>> {
        let init_ptr = if init_data.is_empty() {
            ptr::null()
        } else {
            init_data.as_ptr()
        };
        let mut target = RawTarget::zeroed();

        // SAFETY: `init_data` and `target` outlive the call.
        let found = check(unsafe {
            (self.api.initiator_select_passive_target)(
                handle.as_ptr(),
                to_raw_modulation(modulation),
                init_ptr,
                init_data.len(),
                &mut target,
            )
        })?;

        if found == 0 {
            return Ok(None);
        }
        decode_target(&target).map(Some)
    }

    fn deselect_target(&self, handle: &mut Self::Handle) -> Result<()> {
        // SAFETY: the device is open and exclusively borrowed.
        status(unsafe { (self.api.initiator_deselect_target)(handle.as_ptr()) })
    }

    fn idle(&self, handle: &mut Self::Handle) -> Result<()> {
        // SAFETY: the device is open and exclusively borrowed.
        status(unsafe { (self.api.idle)(handle.as_ptr()) })
    }

    fn abort_command(&self, handle: &mut Self::Handle) -> Result<()> {
        // SAFETY: the device is open and exclusively borrowed.
        status(unsafe { (self.api.abort_command)(handle.as_ptr()) })
    }
}
