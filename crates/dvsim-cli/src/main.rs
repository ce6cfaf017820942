//! dvsim CLI: command-line interface for the distance-vector routing simulator.
//!
//! Subcommands: run, init, presets.

mod commands;
mod config;
mod input;
mod logging;
mod render;

use clap::{Parser, Subcommand};

/// Watch routers agree on shortest paths.
#[derive(Parser, Debug)]
#[command(name = "dvsim", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Converge a network and print every node's routing table.
    Run(commands::run::RunArgs),
    /// Write a default dvsim.toml.
    Init(commands::init::InitArgs),
    /// List the built-in example networks.
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Init(args) => commands::init::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
