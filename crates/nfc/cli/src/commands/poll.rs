use clap::ValueEnum;
use colored::Colorize;
use nexum_nfc_libnfc::{Context, LibnfcDriver, Modulation, TargetInfo};
use std::error::Error;
use tracing::info;

use crate::utils::open_initiator;

/// Modulations selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModulationArg {
    /// ISO/IEC 14443A at 106 kbps
    Iso14443a,
    /// ISO/IEC 14443B at 106 kbps
    Iso14443b,
    /// FeliCa at 212 kbps
    Felica212,
    /// FeliCa at 424 kbps
    Felica424,
    /// Innovision Jewel at 106 kbps
    Jewel,
}

impl From<ModulationArg> for Modulation {
    fn from(arg: ModulationArg) -> Self {
        match arg {
            ModulationArg::Iso14443a => Self::ISO14443A_106,
            ModulationArg::Iso14443b => Self::ISO14443B_106,
            ModulationArg::Felica212 => Self::FELICA_212,
            ModulationArg::Felica424 => Self::FELICA_424,
            ModulationArg::Jewel => Self::JEWEL_106,
        }
    }
}

/// Poll for a target and print what was found
pub(crate) fn poll_command(
    context: &Context<LibnfcDriver>,
    device: Option<&str>,
    modulations: &[ModulationArg],
    count: u8,
    period: u8,
) -> Result<(), Box<dyn Error>> {
    let mut device = open_initiator(context, device, None)?;
    let modulations: Vec<Modulation> = modulations.iter().copied().map(Into::into).collect();

    info!(
        reader = %device.name()?,
        count,
        period,
        "Polling for {} modulation(s)",
        modulations.len()
    );

    let Some(target) = device.poll(&modulations, count, period)? else {
        println!("No target found");
        return Ok(());
    };

    println!("{} {}", "Found".green().bold(), target.modulation);
    match &target.info {
        TargetInfo::Iso14443a(info) => {
            println!("  ATQA: {}", hex::encode_upper(info.atqa));
            println!("   SAK: {:02X}", info.sak);
            println!("   UID: {}", hex::encode_upper(&info.uid));
            if !info.ats.is_empty() {
                println!("   ATS: {}", hex::encode_upper(&info.ats));
            }
        }
        TargetInfo::Felica(info) => {
            println!("    ID: {}", hex::encode_upper(info.id));
            println!("   PAD: {}", hex::encode_upper(info.pad));
            println!("   SYS: {}", hex::encode_upper(info.sys_code));
        }
        TargetInfo::Iso14443b(info) => {
            println!("  PUPI: {}", hex::encode_upper(info.pupi));
            println!("   APP: {}", hex::encode_upper(info.application_data));
            println!(" PROTO: {}", hex::encode_upper(info.protocol_info));
        }
        TargetInfo::Jewel(info) => {
            println!("  SENS: {}", hex::encode_upper(info.sens_res));
            println!("    ID: {}", hex::encode_upper(info.id));
        }
        TargetInfo::Other => println!("  (no decoded information)"),
    }

    Ok(())
}
