use colored::Colorize;
use nexum_nfc_libnfc::{Context, LibnfcDriver};
use std::error::Error;

/// Print the libnfc version and where it was loaded from
pub(crate) fn version_command(context: &Context<LibnfcDriver>) {
    println!(
        "libnfc {} ({})",
        context.version().bold(),
        context.driver().path().display()
    );
}

/// List available readers
pub(crate) fn list_command(context: &Context<LibnfcDriver>, max: usize) -> Result<(), Box<dyn Error>> {
    let devices = context.list_devices(max)?;

    if devices.is_empty() {
        println!("No readers found!");
        return Ok(());
    }

    println!("Available readers:");
    for (i, connstring) in devices.iter().enumerate() {
        let name = match context.open(connstring) {
            Ok(device) => device.name()?.normal(),
            Err(e) => format!("unavailable: {e}").red(),
        };
        println!("{}. {} ({})", i + 1, connstring, name);
    }

    Ok(())
}
