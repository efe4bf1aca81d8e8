use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ptu_controller::{Controller, PtuConfig, SerialTransport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ptu", about = "Drive a pan-tilt unit over its serial link")]
struct Cli {
    /// TOML file with link, limits and timing settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial device, overrides the config file
    #[arg(short, long)]
    port: Option<String>,

    /// Milliseconds to wait after each command
    #[arg(short, long)]
    rate: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move to the rest position
    Origin,
    /// Move both axes to absolute positions
    Move { pan: i32, tilt: i32 },
    /// Pan to an absolute position, starting from origin
    Pan { pos: i32 },
    /// Tilt to an absolute position, starting from origin
    Tilt { pos: i32 },
    /// Move relative to origin
    Nudge {
        #[arg(allow_hyphen_values = true)]
        dpan: i32,
        #[arg(allow_hyphen_values = true)]
        dtilt: i32,
    },
    /// Pan across the full range and back
    Sweep {
        #[arg(short, long, default_value_t = 100)]
        step: i32,
    },
    /// Connect, anchor at origin and print the controller state
    Status,
}

fn load_config(cli: &Cli) -> Result<PtuConfig> {
    let mut config = match &cli.config {
        Some(path) => PtuConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PtuConfig::default(),
    };
    if let Some(port) = &cli.port {
        config.link.port = port.clone();
    }
    if let Some(rate) = cli.rate {
        config.send_rate_ms = rate;
    }
    Ok(config)
}

async fn sweep(controller: &mut Controller, step: i32) -> Result<()> {
    anyhow::ensure!(step > 0, "sweep step must be positive");
    let max_pan = controller.config().limits.max_pan;

    controller.pan_absolute(0).await?;
    while let Some(p) = controller.current_position().filter(|p| p.pan < max_pan) {
        controller.pan_absolute((p.pan + step).min(max_pan)).await?;
    }
    while let Some(p) = controller.current_position().filter(|p| p.pan > 0) {
        controller.pan_absolute((p.pan - step).max(0)).await?;
    }
    controller.move_to_origin().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let port = config.link.port.clone();

    let mut controller = match cli.command {
        Command::Move { pan, tilt } => Controller::open_at(config, SerialTransport::new(), pan, tilt)
            .await
            .with_context(|| format!("moving PTU on {}", port))?,
        _ => Controller::open_at_origin(config, SerialTransport::new())
            .await
            .with_context(|| format!("homing PTU on {}", port))?,
    };

    match cli.command {
        Command::Origin | Command::Move { .. } => {}
        Command::Pan { pos } => controller.pan_absolute(pos).await?,
        Command::Tilt { pos } => controller.tilt_absolute(pos).await?,
        Command::Nudge { dpan, dtilt } => controller.move_relative(dpan, dtilt).await?,
        Command::Sweep { step } => sweep(&mut controller, step).await?,
        Command::Status => {
            let limits = controller.config().limits;
            println!(
                "Limits: pan 0..={}, tilt {}..={}",
                limits.max_pan, limits.tilt_min, limits.tilt_max
            );
            println!("{}", controller.status());
        }
    }

    if let Some(position) = controller.current_position() {
        println!("Position: {}", position);
    }
    controller.disconnect();
    Ok(())
}
