//! `dvsim presets`: list the built-in example networks.

use clap::Args;
use comfy_table::{Cell, Color, Table};
use dvsim_core::Preset;

#[derive(Args, Debug)]
pub struct PresetsArgs {}

pub fn run(_args: &PresetsArgs) -> anyhow::Result<()> {
    println!("{}", presets_table());
    Ok(())
}

fn presets_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Preset").fg(Color::Blue),
        Cell::new("Nodes").fg(Color::Blue),
        Cell::new("Edges").fg(Color::Blue),
    ]);

    for preset in Preset::ALL {
        let topology = preset.topology();
        let edges: Vec<String> = preset
            .edges()
            .iter()
            .map(|e| format!("{} {} {}", e.a, e.b, e.weight))
            .collect();
        table.add_row(vec![
            Cell::new(preset.name()),
            Cell::new(topology.node_count()),
            Cell::new(edges.join("\n")),
        ]);
    }

    table
}
