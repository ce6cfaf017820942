//! Simulation configuration loading and management.

use dvsim_core::{Edge, Preset};
use dvsim_routing::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full configuration for a simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DvsimConfig {
    /// Engine settings.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Network to simulate when none is given on the command line.
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    /// Abort after this many rounds; 0 means no limit.
    #[serde(default)]
    pub max_rounds: u32,
    /// Print every advertisement and merge while converging.
    #[serde(default)]
    pub show_steps: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Final output format.
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphConfig {
    /// Preset name, used when `edges` is empty.
    #[serde(default)]
    pub preset: Option<String>,
    /// Explicit edge list.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// How final routing tables are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// How log lines are written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl SimulationConfig {
    /// Engine configuration derived from these settings.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_rounds: (self.max_rounds > 0).then_some(self.max_rounds),
        }
    }
}

impl GraphConfig {
    /// The configured preset, if any.
    pub fn preset(&self) -> anyhow::Result<Option<Preset>> {
        Ok(self.preset.as_deref().map(str::parse::<Preset>).transpose()?)
    }
}

impl DvsimConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: DvsimConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}
