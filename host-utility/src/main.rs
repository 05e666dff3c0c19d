use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use epd_frame::Placement;
use std::path::PathBuf;

mod config;
mod constants;
mod device;
mod encode;
mod progress;
mod push;
#[cfg(test)]
mod test_utils;
mod utils;

use constants::{DEFAULT_ACCENT_IMAGE, DEFAULT_BLACK_IMAGE};
use encode::FrameSpec;

/// Encode images for an 800x480 e-Paper display and upload them over HTTP
#[derive(Parser, Debug)]
#[command(name = "epd-push")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Display base URL (overrides the configured one)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Display detailed diagnostic information
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the display's status page
    Status,
    /// Upload a single-plane frame
    Send {
        /// Image to show
        #[arg(default_value = DEFAULT_BLACK_IMAGE)]
        image: PathBuf,

        /// Flip bit polarity so set bits mean black
        #[arg(long)]
        invert: bool,

        /// Keep small images at native size instead of scaling them up
        #[arg(long)]
        no_upscale: bool,

        /// Do not query the status page before uploading
        #[arg(long)]
        skip_status: bool,
    },
    /// Upload a black plane and an accent plane
    SendDual {
        /// Image for the black plane
        #[arg(default_value = DEFAULT_BLACK_IMAGE)]
        black: PathBuf,

        /// Image for the accent plane
        #[arg(default_value = DEFAULT_ACCENT_IMAGE)]
        accent: PathBuf,

        /// Keep small images at native size instead of scaling them up
        #[arg(long)]
        no_upscale: bool,
    },
    /// Blank the display
    Clear,
    /// Write the raw frame to a file instead of uploading it
    Encode {
        /// Image for the single plane (or the black plane with --accent)
        image: PathBuf,

        /// Output file for the raw frame
        #[arg(long, short)]
        output: PathBuf,

        /// Image for the accent plane; produces a dual frame
        #[arg(long)]
        accent: Option<PathBuf>,

        /// Flip bit polarity of a single-plane frame
        #[arg(long)]
        invert: bool,

        /// Keep small images at native size instead of scaling them up
        #[arg(long)]
        no_upscale: bool,

        /// Also save the dithered image as PNG
        #[arg(long)]
        preview: Option<PathBuf>,
    },
    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Display current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (device-url, width, height, timeout-secs)
        key: String,
        /// Configuration value
        value: String,
    },
    /// Delete the configuration file and return to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Show configuration file path
    Path,
}

fn placement(no_upscale: bool) -> Placement {
    if no_upscale {
        Placement::NoUpscale
    } else {
        Placement::Contain
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        // No subcommand provided, print help
        Cli::command().print_help()?;
        std::process::exit(0);
    };

    match command {
        Commands::Config { command } => config::run_config_command(command),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "epd-push",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        command => run_device_command(command, cli.url.as_deref()),
    }
}

fn run_device_command(command: Commands, url: Option<&str>) -> Result<()> {
    let config = config::EpdPushConfig::load()?;
    let canvas = config.canvas()?;
    let device_url = url.unwrap_or(&config.device_url);
    log::debug!(
        "Device {device_url}, panel {}x{}",
        canvas.width,
        canvas.height
    );
    let client = device::DeviceClient::new(device_url, config.timeout_secs);

    match command {
        Commands::Status => push::cmd_status(&client),
        Commands::Send {
            image,
            invert,
            no_upscale,
            skip_status,
        } => {
            let spec = FrameSpec {
                black: &image,
                accent: None,
                placement: placement(no_upscale),
                invert,
            };
            push::cmd_send(&client, canvas, &spec, skip_status)
        }
        Commands::SendDual {
            black,
            accent,
            no_upscale,
        } => {
            let spec = FrameSpec {
                black: &black,
                accent: Some(&accent),
                placement: placement(no_upscale),
                invert: false,
            };
            push::cmd_send_dual(&client, canvas, &spec)
        }
        Commands::Clear => push::cmd_clear(&client, canvas),
        Commands::Encode {
            image,
            output,
            accent,
            invert,
            no_upscale,
            preview,
        } => {
            let spec = FrameSpec {
                black: &image,
                accent: accent.as_deref(),
                placement: placement(no_upscale),
                invert,
            };
            encode::cmd_encode(&spec, canvas, &output, preview.as_deref())
        }
        Commands::Config { .. } | Commands::Completions { .. } => {
            unreachable!("handled before loading the device configuration")
        }
    }
}
