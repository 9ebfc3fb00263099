//! Interactive console for the ride dispatch core.

mod menu;
mod render;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dispatch_core::{DispatchConfig, DispatchCore};
use env_logger::{Builder, Env};

use crate::menu::Menu;

#[derive(Parser, Debug)]
#[command(
    name = "dispatch",
    about = "Interactive ride dispatch console",
    long_about = "Register riders and drivers, request rides matched to the nearest\n\
                  available driver, and complete them. Set RUST_LOG=info to see core logs."
)]
struct Cli {
    /// JSON config file (fare policy)
    #[arg(long, env = "DISPATCH_CONFIG")]
    config: Option<PathBuf>,
    /// Override the base fare
    #[arg(long)]
    base_fare: Option<f64>,
    /// Override the per-distance-unit rate
    #[arg(long)]
    per_unit_rate: Option<f64>,
}

impl Cli {
    /// File values first, then command-line overrides.
    fn dispatch_config(&self) -> Result<DispatchConfig> {
        let mut config = match &self.config {
            Some(path) => DispatchConfig::from_json_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => DispatchConfig::default(),
        };
        if let Some(base_fare) = self.base_fare {
            config.fare.base_fare = base_fare;
        }
        if let Some(per_unit_rate) = self.per_unit_rate {
            config.fare.per_unit_rate = per_unit_rate;
        }
        config.validate().context("invalid fare override")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.dispatch_config()?;
    log::info!(
        "starting dispatch console (base fare {}, per-unit rate {})",
        config.fare.base_fare,
        config.fare.per_unit_rate
    );

    let core = DispatchCore::with_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Menu::new(&core, stdin.lock(), stdout.lock())
        .run()
        .context("console I/O failed")?;
    Ok(())
}
