//! Device lifecycle through the public API

mod common;

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

use common::CountingDriver;
use nexum_nfc_core::{
    ConnString, Context, ContextCell, DeviceConfig, Modulation, NfcError, Property,
};
use parking_lot::Mutex;

#[test]
fn test_closed_device_reports_no_such_device() {
    let context = Context::new(CountingDriver::default());

    let mut device = context.open_default().unwrap();
    device.set_property_int(Property::TimeoutCommand, 250).unwrap();
    device.close();

    assert_eq!(
        device.set_property_int(Property::TimeoutCommand, 250),
        Err(NfcError::NoSuchDevice)
    );
    assert_eq!(
        device.transceive(&[0x00, 0xA4, 0x04, 0x00], 256, 0),
        Err(NfcError::NoSuchDevice)
    );
    assert_eq!(
        device.poll(&[Modulation::FELICA_212], 1, 1),
        Err(NfcError::NoSuchDevice)
    );
    assert_eq!(device.name(), Err(NfcError::NoSuchDevice));

    assert_eq!(context.driver().opens(), 1);
    assert_eq!(context.driver().closes(), 1);
    assert_eq!(context.driver().property_sets(), 1);
}

#[test]
fn test_process_wide_context_is_shared() {
    static CONTEXT: ContextCell<CountingDriver> = ContextCell::new();
    static INITS: AtomicUsize = AtomicUsize::new(0);

    fn acquire() -> &'static Context<CountingDriver> {
        CONTEXT
            .get_or_try_init(|| {
                INITS.fetch_add(1, Ordering::SeqCst);
                Ok::<_, NfcError>(CountingDriver::default())
            })
            .unwrap()
    }

    let first = acquire();
    first.open_default().unwrap();
    let second = acquire();

    assert!(Context::same_context(first, second));
    assert_eq!(second.driver().opens(), 1);
    assert_eq!(INITS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_opens_on_one_context() {
    let context = Context::new(CountingDriver::default());

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let context = context.clone();
            thread::spawn(move || {
                let mut device = context.open_default().unwrap();
                let rx = device.transceive(&[0x00, 0xB0, 0x00, 0x00], 258, 100).unwrap();
                assert_eq!(rx.as_ref(), &[0x90, 0x00]);
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(context.driver().opens(), 4);
    assert_eq!(context.driver().closes(), 4);
}

#[test]
fn test_device_shared_behind_external_lock() {
    let context = Context::new(CountingDriver::default());
    let device = Arc::new(Mutex::new(context.open_default().unwrap()));

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let device = Arc::clone(&device);
            thread::spawn(move || {
                device
                    .lock()
                    .set_property_bool(Property::ActivateField, i % 2 == 0)
                    .unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(context.driver().property_sets(), 4);
    assert_eq!(context.driver().opens(), 1);
}

#[test]
fn test_open_with_config() {
    let context = Context::new(CountingDriver::default());

    let conn = ConnString::new("counting:1").unwrap();
    let config = DeviceConfig::new()
        .with_connstring(conn.clone())
        .with_initiator(true)
        .with_timeout_com(52)
        .with_easy_framing(true);
    let device = context.open_with_config(&config).unwrap();

    assert_eq!(device.connstring(), Ok(conn));
    assert_eq!(device.name().unwrap(), "Counting reader (counting:1)");
    assert_eq!(context.driver().property_sets(), 2);
}

#[test]
fn test_open_with_invalid_config_closes_device() {
    let context = Context::new(CountingDriver::default());

    let config = DeviceConfig::new().with_timeout_command(-5);
    assert_eq!(
        context.open_with_config(&config).unwrap_err(),
        NfcError::InvalidArgument
    );
    assert_eq!(context.driver().opens(), 1);
    assert_eq!(context.driver().closes(), 1);
}

#[test]
fn test_open_missing_device() {
    let context = Context::new(CountingDriver::default());
    let conn = ConnString::new("pn53x_usb:002:003").unwrap();

    assert_eq!(context.open(&conn).unwrap_err(), NfcError::NoSuchDevice);
    assert_eq!(context.driver().opens(), 0);
}

#[test]
fn test_native_errors_keep_their_code() {
    let context = Context::new(CountingDriver::default());
    let mut device = context.open_default().unwrap();

    let err = device
        .select_passive_target(Modulation::ISO14443A_106, &[])
        .unwrap_err();
    assert_eq!(err, NfcError::Timeout);
    assert_eq!(err.code(), -6);
    assert_eq!(err.to_string(), "Timeout");

    assert_eq!(
        device.transceive(&[0x60], 1, 0).unwrap_err(),
        NfcError::Overflow
    );
}

#[test]
fn test_list_devices() {
    let context = Context::new(CountingDriver::default());
    let devices = context.list_devices(8).unwrap();
    assert_eq!(
        devices.iter().map(ConnString::as_str).collect::<Vec<_>>(),
        ["counting:0", "counting:1"]
    );
    assert_eq!(context.version(), "counting");
}
