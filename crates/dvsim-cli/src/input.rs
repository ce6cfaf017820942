//! Edge-list input: `SRC DST COST` lines, ended by `DONE` or end of input.

use std::io::{BufRead, Write};

use dvsim_core::{CoreError, Edge};

/// Keyword that ends edge input.
pub const DONE: &str = "DONE";

/// Errors produced while reading edges.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("expected `SRC DST COST`, got {0:?}")]
    Malformed(String),

    #[error("cost {0:?} is not an integer")]
    InvalidCost(String),

    #[error(transparent)]
    Edge(#[from] CoreError),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<InputError>,
    },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeLine {
    Edge(Edge),
    Done,
    /// Blank line or `#` comment.
    Skip,
}

/// Parse a single line of edge input.
pub fn parse_edge_line(line: &str) -> Result<EdgeLine, InputError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(EdgeLine::Skip);
    }
    if trimmed == DONE {
        return Ok(EdgeLine::Done);
    }

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let [src, dst, cost] = fields.as_slice() else {
        return Err(InputError::Malformed(trimmed.to_string()));
    };
    let cost: i64 = cost
        .parse()
        .map_err(|_| InputError::InvalidCost((*cost).to_string()))?;

    Ok(EdgeLine::Edge(Edge::checked(*src, *dst, cost)?))
}

/// Read an edge list, failing on the first bad line.
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Vec<Edge>, InputError> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_edge_line(&line) {
            Ok(EdgeLine::Edge(edge)) => edges.push(edge),
            Ok(EdgeLine::Done) => break,
            Ok(EdgeLine::Skip) => {}
            Err(err) => {
                return Err(InputError::AtLine {
                    line: index + 1,
                    source: Box::new(err),
                })
            }
        }
    }
    tracing::debug!(edges = edges.len(), "edge list read");
    Ok(edges)
}

/// Prompt for edges one line at a time.
///
/// Bad lines are reported to `out` and skipped; input ends at `DONE` or EOF.
pub fn prompt_edges<R: BufRead, W: Write>(reader: R, out: &mut W) -> Result<Vec<Edge>, InputError> {
    writeln!(
        out,
        "Insert the edges of the graph using the format \"SRC DST COST\" (example: A B 1)."
    )?;
    writeln!(
        out,
        "NOTE: the graph is bidirectional, so adding A B 1 automatically adds B A 1."
    )?;
    writeln!(out, "Type {} when there are no more edges to add.", DONE)?;
    writeln!(out)?;

    let mut edges = Vec::new();
    let mut lines = reader.lines();
    loop {
        write!(out, "Insert an edge: ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };
        match parse_edge_line(&line?) {
            Ok(EdgeLine::Edge(edge)) => edges.push(edge),
            Ok(EdgeLine::Done) => break,
            Ok(EdgeLine::Skip) => {}
            Err(err) => {
                tracing::debug!(error = %err, "rejected edge input");
                writeln!(out, "Wrong format! Enter SRC DST COST. ({})", err)?;
            }
        }
    }
    Ok(edges)
}
