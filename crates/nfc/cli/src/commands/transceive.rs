use nexum_nfc_libnfc::{Context, LibnfcDriver, Modulation};
use std::error::Error;
use tracing::info;

use crate::utils::{open_initiator, parse_hex};

/// Select an ISO14443A target and exchange one frame with it
pub(crate) fn transceive_command(
    context: &Context<LibnfcDriver>,
    device: Option<&str>,
    data: &str,
    rx_capacity: usize,
    timeout: i32,
    easy_framing: Option<bool>,
) -> Result<(), Box<dyn Error>> {
    let tx = parse_hex(data)?;
    let mut device = open_initiator(context, device, easy_framing)?;

    let target = device
        .select_passive_target(Modulation::ISO14443A_106, &[])?
        .ok_or("No target in field!")?;
    info!("Selected {}", target);

    println!(">> {}", hex::encode_upper(&tx));
    let rx = device.transceive(&tx, rx_capacity, timeout)?;
    println!("<< {}", hex::encode_upper(&rx));

    device.deselect_target()?;
    Ok(())
}
