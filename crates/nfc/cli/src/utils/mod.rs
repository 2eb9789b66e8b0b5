//! Helpers shared by the command handlers

use nexum_nfc_libnfc::{ConnString, Context, Device, DeviceConfig, LibnfcDriver};
use std::error::Error;

/// Open a reader (the first available one unless `connstring` is given) as an initiator
///
/// `easy_framing` overrides the device default when set.
pub(crate) fn open_initiator(
    context: &Context<LibnfcDriver>,
    connstring: Option<&str>,
    easy_framing: Option<bool>,
) -> Result<Device<LibnfcDriver>, Box<dyn Error>> {
    let mut config = DeviceConfig::new()
        .with_initiator(true)
        .with_infinite_select(false);
    if let Some(connstring) = connstring {
        config = config.with_connstring(ConnString::new(connstring)?);
    }
    if let Some(enabled) = easy_framing {
        config = config.with_easy_framing(enabled);
    }

    let device = context.open_with_config(&config)?;
    tracing::info!("Using reader: {}", device.name()?);
    Ok(device)
}

/// Parse a hex frame, ignoring whitespace and an optional `0x` prefix
pub(crate) fn parse_hex(data: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let compact: String = data.split_whitespace().collect();
    let compact = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);
    hex::decode(compact)
}
