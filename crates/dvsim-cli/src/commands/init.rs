//! `dvsim init`: write a default simulation configuration.

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::DvsimConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = write_default_config(&args.dir)?;
    println!("Initialized dvsim configuration at {}", config_path.display());
    println!("Edit dvsim.toml to pick a preset or list your own [[graph.edges]].");
    println!("Run 'dvsim run' to simulate the network.");
    Ok(())
}

/// Write `dvsim.toml` with default settings into `dir`, refusing to overwrite.
fn write_default_config(dir: &Path) -> anyhow::Result<PathBuf> {
    let config_path = dir.join("dvsim.toml");
    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }
    DvsimConfig::default().save(&config_path)?;
    Ok(config_path)
}
