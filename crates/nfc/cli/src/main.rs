use clap::{Parser, Subcommand};
use nexum_nfc_libnfc::LibnfcConfig;
use std::path::PathBuf;
use tracing::debug;

mod commands;
mod utils;

use commands::*;

#[derive(Parser)]
#[command(version, about = "Inspect and talk to NFC readers through libnfc")]
struct Cli {
    /// Connection string of the reader to use (first available if not specified)
    #[arg(short, long, global = true)]
    device: Option<String>,

    /// Path to the libnfc shared library
    #[arg(long, env = "LIBNFC_PATH", global = true)]
    library: Option<PathBuf>,

    /// Debug level output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the libnfc version
    Version,

    /// List available readers
    List {
        /// Maximum number of readers to report
        #[arg(long, default_value_t = 16)]
        max: usize,
    },

    /// Poll for a target in the field
    Poll {
        /// Modulations to poll for, in order
        #[arg(short, long = "modulation", value_enum, default_values_t = [ModulationArg::Iso14443a])]
        modulations: Vec<ModulationArg>,

        /// Number of polling rounds per modulation (255 polls forever)
        #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u8).range(1..))]
        count: u8,

        /// Polling period in units of 150 ms
        #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=15))]
        period: u8,
    },

    /// Select an ISO14443A target and exchange a raw frame with it
    Transceive {
        /// Frame to send, as a hex string
        #[arg(required = true)]
        data: String,

        /// Receive buffer size in bytes
        #[arg(long, default_value_t = 264)]
        rx_capacity: usize,

        /// Timeout in milliseconds (0 waits forever, -1 uses the device default)
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        timeout: i32,

        /// Force reader-side ISO14443-4 framing on or off (device default if omitted)
        #[arg(long, value_name = "BOOL")]
        easy_framing: Option<bool>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = LibnfcConfig {
        library_path: cli.library,
    };
    let context = nexum_nfc_libnfc::context_with(&config)?;
    debug!(version = %context.version(), "libnfc ready");

    match cli.command {
        Commands::Version => version_command(context),
        Commands::List { max } => list_command(context, max)?,
        Commands::Poll {
            modulations,
            count,
            period,
        } => poll_command(context, cli.device.as_deref(), &modulations, count, period)?,
        Commands::Transceive {
            data,
            rx_capacity,
            timeout,
            easy_framing,
        } => transceive_command(
            context,
            cli.device.as_deref(),
            &data,
            rx_capacity,
            timeout,
            easy_framing,
        )?,
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_poll() {
        let cli = Cli::try_parse_from([
            "nfc-tool",
            "poll",
            "-m",
            "felica212",
            "-m",
            "jewel",
            "--count",
            "3",
            "--device",
            "pn532_uart:/dev/ttyUSB0",
        ])
        .unwrap();

        assert_eq!(cli.device.as_deref(), Some("pn532_uart:/dev/ttyUSB0"));
        match cli.command {
            Commands::Poll {
                modulations,
                count,
                period,
            } => {
                assert_eq!(modulations, [ModulationArg::Felica212, ModulationArg::Jewel]);
                assert_eq!(count, 3);
                assert_eq!(period, 2);
            }
            _ => panic!("expected poll"),
        }
    }

    #[test]
    fn test_easy_framing_defaults_to_device() {
        let cli = Cli::try_parse_from(["nfc-tool", "transceive", "6000"]).unwrap();
        match cli.command {
            Commands::Transceive { easy_framing, .. } => assert_eq!(easy_framing, None),
            _ => panic!("expected transceive"),
        }
    }

    #[test]
    fn test_poll_period_range() {
        assert!(Cli::try_parse_from(["nfc-tool", "poll", "--period", "16"]).is_err());
        assert!(Cli::try_parse_from(["nfc-tool", "poll", "--count", "0"]).is_err());
    }

    #[test]
    fn test_parse_transceive() {
        let cli = Cli::try_parse_from([
            "nfc-tool",
            "transceive",
            "00A4040007D2760000850101",
            "--timeout",
            "-1",
            "--easy-framing",
            "false",
        ])
        .unwrap();

        match cli.command {
            Commands::Transceive {
                data,
                rx_capacity,
                timeout,
                easy_framing,
            } => {
                assert_eq!(data, "00A4040007D2760000850101");
                assert_eq!(rx_capacity, 264);
                assert_eq!(timeout, -1);
                assert_eq!(easy_framing, Some(false));
            }
            _ => panic!("expected transceive"),
        }
    }
}
