//! `dvsim run`: build a network, converge it, and print the routing tables.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use dvsim_core::{Preset, Topology};
use dvsim_routing::{ConvergenceEngine, ConvergenceReport, NoopObserver, RoutingTable};
use serde::Serialize;

use crate::config::{DvsimConfig, GraphConfig, OutputFormat};
use crate::input;
use crate::logging;
use crate::render::{self, StepPrinter};

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Path to the config file.
    #[arg(short, long, default_value = "dvsim.toml")]
    pub config: PathBuf,

    /// Simulate a built-in network (six-node, triangle).
    #[arg(short, long)]
    pub preset: Option<Preset>,

    /// Read the network from an edge-list file (`SRC DST COST` per line).
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Type the edges in at a prompt.
    #[arg(short, long)]
    pub interactive: bool,

    /// Print every advertisement and merge, not only the final tables.
    #[arg(short, long)]
    pub steps: bool,

    /// Output format for the final tables.
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Abort if the network has not converged after this many rounds.
    #[arg(long)]
    pub max_rounds: Option<u32>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Where the simulated network comes from, in order of precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphSource {
    Interactive,
    File(PathBuf),
    Preset(Preset),
    Configured,
}

impl GraphSource {
    /// Pick the source from command-line flags first, then the config file.
    pub fn resolve(args: &RunArgs, graph: &GraphConfig) -> anyhow::Result<Self> {
        if args.interactive {
            return Ok(Self::Interactive);
        }
        if let Some(path) = &args.graph {
            return Ok(Self::File(path.clone()));
        }
        if let Some(preset) = args.preset {
            return Ok(Self::Preset(preset));
        }
        if !graph.edges.is_empty() {
            return Ok(Self::Configured);
        }
        Ok(Self::Preset(graph.preset()?.unwrap_or(Preset::SixNode)))
    }

    /// Build the topology described by this source.
    pub fn load(&self, graph: &GraphConfig) -> anyhow::Result<Topology> {
        let topology = match self {
            Self::Interactive => {
                let stdin = std::io::stdin();
                let mut stdout = std::io::stdout();
                let edges = input::prompt_edges(stdin.lock(), &mut stdout)?;
                Topology::from_edges(edges)
            }
            Self::File(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open graph file {}", path.display()))?;
                let edges = input::read_edge_list(BufReader::new(file))
                    .with_context(|| format!("invalid graph file {}", path.display()))?;
                Topology::from_edges(edges)
            }
            Self::Preset(preset) => preset.topology(),
            Self::Configured => Topology::from_edges(graph.edges.iter().cloned()),
        };
        Ok(topology)
    }
}

/// JSON document printed with `--format json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    report: ConvergenceReport,
    tables: Vec<&'a RoutingTable>,
}

pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let mut config = DvsimConfig::load(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = args.format {
        config.output.format = format;
    }
    if let Some(max_rounds) = args.max_rounds {
        config.simulation.max_rounds = max_rounds;
    }
    if args.steps {
        config.simulation.show_steps = true;
    }

    logging::init_logging(&config.logging.level, config.logging.format);

    let source = GraphSource::resolve(args, &config.graph)?;
    let topology = source.load(&config.graph)?;
    if topology.is_empty() {
        anyhow::bail!("the network has no nodes; add at least one edge");
    }
    tracing::info!(
        source = ?source,
        nodes = topology.node_count(),
        edges = topology.edge_count(),
        "network loaded"
    );

    let mut engine = ConvergenceEngine::new(topology, config.simulation.engine_config());
    let report = if config.simulation.show_steps {
        engine.run(&mut StepPrinter)?
    } else {
        engine.run(&mut NoopObserver)?
    };

    match config.output.format {
        OutputFormat::Table => {
            println!("+ FINAL ROUTING TABLES +");
            for table in engine.tables() {
                render::print_routing_table(table, &[]);
            }
            println!(
                "Converged after {} rounds ({} with updates, {} merges).",
                report.rounds, report.productive_rounds, report.merges
            );
        }
        OutputFormat::Json => {
            let output = JsonOutput {
                report,
                tables: engine.tables().collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
