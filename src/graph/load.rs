use std::collections::TryReserveError;
use std::io::Read;

use super::{Edge, Graph};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Corrupted file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupted file on number of nodes.")]
    CorruptedNodeCount,
    #[error("Corrupted file on number of nodes: cannot hold {nodes} nodes.")]
    TooManyNodes {
        nodes: usize,
        #[source]
        source: TryReserveError,
    },
    #[error(
        "Corrupted file on edges: edge {edge} ({start} {end}) references a node outside 0..{nodes}."
    )]
    EdgeOutOfRange {
        edge: usize,
        start: usize,
        end: usize,
        nodes: usize,
    },
}

/// Reads the whole source; bytes that are not UTF-8 become replacement characters and
/// so end the edge list like any other malformed token.
pub fn load_graph(mut reader: impl Read) -> Result<Graph, LoadError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    parse_graph(&String::from_utf8_lossy(&bytes))
}

/// Reads unsigned numbers off the front of the text: leading ASCII whitespace is skipped,
/// an optional `+` is accepted, and the digits run up to the first non-digit, which is
/// left for the next read. A leading `-` is not a number here.
struct Numbers<'a> {
    rest: &'a str,
}

impl<'a> Numbers<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    /// `None` once no digits are found or the number does not fit; the scanner then
    /// stays put so the unread remainder can be reported.
    fn next_number(&mut self) -> Option<usize> {
        let trimmed = self.rest.trim_ascii_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
        let value = unsigned[..digits_len].parse::<usize>().ok()?;
        self.rest = &unsigned[digits_len..];
        Some(value)
    }

    fn remainder(&self) -> &'a str {
        self.rest.trim()
    }
}

/// Parses `<n>` followed by `<start> <end>` pairs.
///
/// Numbers are read the way a formatted unsigned read does, so `3abc` yields 3 and the
/// edge list stops at `abc`. Edge reading ends at the first read that finds no number;
/// whatever follows is dropped with a warning.
pub fn parse_graph(text: &str) -> Result<Graph, LoadError> {
    let mut numbers = Numbers::new(text);

    let node_count = numbers
        .next_number()
        .ok_or(LoadError::CorruptedNodeCount)?;

    let mut graph = Graph::try_with_circle_layout(node_count).map_err(|source| {
        LoadError::TooManyNodes {
            nodes: node_count,
            source,
        }
    })?;

    loop {
        let (Some(start), Some(end)) = (numbers.next_number(), numbers.next_number()) else {
            let dropped = numbers.remainder();
            if !dropped.is_empty() {
                log::warn!(
                    "ignoring trailing input after {} edges: {:?}",
                    graph.edges.len(),
                    dropped.chars().take(32).collect::<String>()
                );
            }
            break;
        };

        if start >= node_count || end >= node_count {
            return Err(LoadError::EdgeOutOfRange {
                edge: graph.edges.len(),
                start,
                end,
                nodes: node_count,
            });
        }

        graph.edges.push(Edge::new(start, end));
    }

    log::info!(
        "loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}
