//! Text rendering of routing tables and step-by-step traces.

use comfy_table::{Cell, Color, Table};
use dvsim_core::NodeId;
use dvsim_routing::{ConvergenceObserver, EngineEvent, NextHop, RoutingTable};

/// Caption printed above a routing table.
pub fn caption(table: &RoutingTable) -> String {
    format!("[{}] Routing table", table.owner())
}

/// Build a `Destination | Cost | Next Hop` table. Rows whose destination is
/// in `highlight` are drawn in green.
pub fn routing_table(table: &RoutingTable, highlight: &[NodeId]) -> Table {
    let mut rendered = Table::new();
    rendered.set_header(vec![
        Cell::new("Destination").fg(Color::Cyan),
        Cell::new("Cost").fg(Color::Cyan),
        Cell::new("Next Hop").fg(Color::Cyan),
    ]);

    for entry in table.entries() {
        let next_hop = match &entry.next_hop {
            NextHop::Local => "-".to_string(),
            NextHop::Via(id) => id.to_string(),
        };
        let mut row = vec![
            Cell::new(&entry.destination),
            Cell::new(entry.cost),
            Cell::new(next_hop),
        ];
        if highlight.contains(&entry.destination) {
            row = row.into_iter().map(|cell| cell.fg(Color::Green)).collect();
        }
        rendered.add_row(row);
    }

    rendered
}

/// Print a caption and table to stdout.
pub fn print_routing_table(table: &RoutingTable, highlight: &[NodeId]) {
    println!("{}", caption(table));
    println!("{}", routing_table(table, highlight));
}

/// Observer that prints every advertisement and merge as it happens.
#[derive(Debug, Default)]
pub struct StepPrinter;

impl ConvergenceObserver for StepPrinter {
    fn on_event(&mut self, event: &EngineEvent<'_>) {
        match event {
            EngineEvent::Advertise {
                round,
                source,
                table,
            } => {
                println!("+ ROUTING TABLE TO SEND (round {}, from [{}]) +", round, source);
                print_routing_table(table, &[]);
                println!();
            }
            EngineEvent::Merge(merge) => {
                println!(
                    "Sending [{}] routing table to [{}] over a link of cost {}.",
                    merge.source, merge.destination, merge.weight
                );
                if merge.changed {
                    println!("Updated [{}] routing table:", merge.destination);
                    print_routing_table(merge.table, merge.updated);
                } else {
                    println!("No changes were made in [{}] routing table.", merge.destination);
                }
                println!();
            }
            EngineEvent::RoundCompleted(summary) => {
                println!(
                    "== Round {} complete: {} of {} merges changed a table ==",
                    summary.round, summary.changed_merges, summary.merges
                );
                println!();
            }
            EngineEvent::Converged(report) => {
                println!(
                    "== Stable after {} rounds, no further updates ==",
                    report.rounds
                );
                println!();
            }
        }
    }
}
