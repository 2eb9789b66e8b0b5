//! C ABI of libnfc
//!
//! Layouts follow `nfc-types.h` (libnfc 1.7/1.8). Only the union members the binding decodes
//! are declared; `nfc_iso14443a_info` is the largest member, so the union keeps its C size.

use std::ffi::{c_char, c_int};

use libloading::Library;
use nexum_nfc_core::BUFSIZE_CONNSTRING;

/// `nfc_context`
#[repr(C)]
pub(crate) struct RawContext {
    _private: [u8; 0],
}

/// `nfc_device`
#[repr(C)]
pub(crate) struct RawDevice {
    _private: [u8; 0],
}

/// `nfc_connstring`
pub(crate) type RawConnString = [u8; BUFSIZE_CONNSTRING];

/// `nfc_modulation`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawModulation {
    pub(crate) nmt: c_int,
    pub(crate) nbr: c_int,
}

/// `nfc_iso14443a_info`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawIso14443aInfo {
    pub(crate) abt_atqa: [u8; 2],
    pub(crate) bt_sak: u8,
    pub(crate) sz_uid_len: usize,
    pub(crate) abt_uid: [u8; 10],
    pub(crate) sz_ats_len: usize,
    pub(crate) abt_ats: [u8; 254],
}

/// `nfc_felica_info`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawFelicaInfo {
    pub(crate) sz_len: usize,
    pub(crate) bt_res_code: u8,
    pub(crate) abt_id: [u8; 8],
    pub(crate) abt_pad: [u8; 8],
    pub(crate) abt_sys_code: [u8; 2],
}

/// `nfc_iso14443b_info`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawIso14443bInfo {
    pub(crate) abt_pupi: [u8; 4],
    pub(crate) abt_application_data: [u8; 4],
    pub(crate) abt_protocol_info: [u8; 3],
    pub(crate) ui8_card_identifier: u8,
}

/// `nfc_jewel_info`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawJewelInfo {
    pub(crate) bt_sens_res: [u8; 2],
    pub(crate) bt_id: [u8; 4],
}

/// `nfc_target_info`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) union RawTargetInfo {
    pub(crate) nai: RawIso14443aInfo,
    pub(crate) nfi: RawFelicaInfo,
    pub(crate) nbi: RawIso14443bInfo,
    pub(crate) nji: RawJewelInfo,
}

/// `nfc_target`
#[repr(C)]
#[derive(Clone, Copy)]
pub(crate) struct RawTarget {
    pub(crate) nti: RawTargetInfo,
    pub(crate) nm: RawModulation,
}

impl RawTarget {
    pub(crate) const fn zeroed() -> Self {
        Self {
            nti: RawTargetInfo {
                nai: RawIso14443aInfo {
                    abt_atqa: [0; 2],
                    bt_sak: 0,
                    sz_uid_len: 0,
                    abt_uid: [0; 10],
                    sz_ats_len: 0,
                    abt_ats: [0; 254],
                },
            },
            nm: RawModulation { nmt: 0, nbr: 0 },
        }
    }
}

/// Resolved libnfc entry points
///
/// The function pointers are only valid while the `Library` they came from stays loaded.
pub(crate) struct Api {
    pub(crate) init: unsafe extern "C" fn(*mut *mut RawContext),
    pub(crate) exit: unsafe extern "C" fn(*mut RawContext),
    pub(crate) version: unsafe extern "C" fn() -> *const c_char,
    pub(crate) list_devices:
        unsafe extern "C" fn(*mut RawContext, *mut RawConnString, usize) -> usize,
    pub(crate) open: unsafe extern "C" fn(*mut RawContext, *const c_char) -> *mut RawDevice,
    pub(crate) close: unsafe extern "C" fn(*mut RawDevice),
    pub(crate) device_get_name: unsafe extern "C" fn(*mut RawDevice) -> *const c_char,
    pub(crate) device_get_connstring: unsafe extern "C" fn(*mut RawDevice) -> *const c_char,
    pub(crate) device_get_last_error: unsafe extern "C" fn(*const RawDevice) -> c_int,
    pub(crate) device_set_property_int:
        unsafe extern "C" fn(*mut RawDevice, c_int, c_int) -> c_int,
    pub(crate) device_set_property_bool:
        unsafe extern "C" fn(*mut RawDevice, c_int, bool) -> c_int,
    pub(crate) initiator_init: unsafe extern "C" fn(*mut RawDevice) -> c_int,
    pub(crate) initiator_transceive_bytes:
        unsafe extern "C" fn(*mut RawDevice, *const u8, usize, *mut u8, usize, c_int) -> c_int,
    pub(crate) initiator_poll_target: unsafe extern "C" fn(
        *mut RawDevice,
        *const RawModulation,
        usize,
        u8,
        u8,
        *mut RawTarget,
    ) -> c_int,
    pub(crate) initiator_select_passive_target: unsafe extern "C" fn(
        *mut RawDevice,
        RawModulation,
        *const u8,
        usize,
        *mut RawTarget,
    ) -> c_int,
    pub(crate) initiator_deselect_target: unsafe extern "C" fn(*mut RawDevice) -> c_int,
    pub(crate) idle: unsafe extern "C" fn(*mut RawDevice) -> c_int,
    pub(crate) abort_command: unsafe extern "C" fn(*mut RawDevice) -> c_int,
}

macro_rules! symbol {
    ($library:ident, $name:literal) => {
        // SAFETY: the declared signature matches the libnfc prototype of the same name.
        *unsafe { $library.get(concat!($name, "\0").as_bytes())? }
    };
}

impl Api {
    /// Resolve every entry point up front
    pub(crate) fn load(library: &Library) -> Result<Self, libloading::Error> {
        Ok(Self {
            init: symbol!(library, "nfc_init"),
            exit: symbol!(library, "nfc_exit"),
            version: symbol!(library, "nfc_version"),
            list_devices: symbol!(library, "nfc_list_devices"),
            open: symbol!(library, "nfc_open"),
            close: symbol!(library, "nfc_close"),
            device_get_name: symbol!(library, "nfc_device_get_name"),
            device_get_connstring: symbol!(library, "nfc_device_get_connstring"),
            device_get_last_error: symbol!(library, "nfc_device_get_last_error"),
            device_set_property_int: symbol!(library, "nfc_device_set_property_int"),
            device_set_property_bool: symbol!(library, "nfc_device_set_property_bool"),
            initiator_init: symbol!(library, "nfc_initiator_init"),
            initiator_transceive_bytes: symbol!(library, "nfc_initiator_transceive_bytes"),
            initiator_poll_target: symbol!(library, "nfc_initiator_poll_target"),
            initiator_select_passive_target: symbol!(
                library,
                "nfc_initiator_select_passive_target"
            ),
            initiator_deselect_target: symbol!(library, "nfc_initiator_deselect_target"),
            idle: symbol!(library, "nfc_idle"),
            abort_command: symbol!(library, "nfc_abort_command"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{offset_of, size_of};

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_layouts_match_c() {
        assert_eq!(offset_of!(RawIso14443aInfo, sz_uid_len), 8);
        assert_eq!(offset_of!(RawIso14443aInfo, abt_uid), 16);
        assert_eq!(offset_of!(RawIso14443aInfo, sz_ats_len), 32);
        assert_eq!(offset_of!(RawIso14443aInfo, abt_ats), 40);
        assert_eq!(size_of::<RawIso14443aInfo>(), 296);

        assert_eq!(offset_of!(RawFelicaInfo, abt_id), 9);
        assert_eq!(size_of::<RawTargetInfo>(), 296);
        assert_eq!(offset_of!(RawTarget, nm), 296);
        assert_eq!(size_of::<RawTarget>(), 304);
    }

    #[test]
    fn test_modulation_layout() {
        assert_eq!(size_of::<RawModulation>(), 2 * size_of::<c_int>());
        assert_eq!(size_of::<RawConnString>(), 1024);
    }
}
