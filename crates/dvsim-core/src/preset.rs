use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::topology::Topology;
use crate::types::Edge;

/// Built-in example networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Six routers A..F with nine links; the default demo network.
    SixNode,
    /// Three routers where the direct A-C link is costlier than going via B.
    Triangle,
}

impl Preset {
    /// Every preset, in display order.
    pub const ALL: [Preset; 2] = [Preset::SixNode, Preset::Triangle];

    /// Stable name used on the command line and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SixNode => "six-node",
            Self::Triangle => "triangle",
        }
    }

    /// The preset's edges in insertion order.
    pub fn edges(&self) -> Vec<Edge> {
        let raw: &[(&str, &str, u64)] = match self {
            Self::SixNode => &[
                ("A", "B", 1),
                ("A", "F", 3),
                ("F", "B", 1),
                ("F", "E", 2),
                ("F", "D", 6),
                ("E", "B", 5),
                ("E", "D", 1),
                ("B", "C", 3),
                ("C", "D", 2),
            ],
            Self::Triangle => &[("A", "B", 1), ("B", "C", 1), ("A", "C", 5)],
        };
        raw.iter().map(|&(a, b, w)| Edge::new(a, b, w)).collect()
    }

    /// Build the preset's topology.
    pub fn topology(&self) -> Topology {
        Topology::from_edges(self.edges())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownPreset(s.to_string()))
    }
}
