use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    errors::LabyrinthError,
    room::{Position, Prime},
    row::RowBuilder,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WorldNode {
    pub position: Position,
    /// Index of the node's prime within `WorldGraph::primes`.
    pub layer_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WorldEdge {
    pub from: Position,
    pub to: Position,
}

/// Every room and door between two primes, materialized.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorldGraph {
    pub primes: Vec<Prime>,
    pub nodes: Vec<WorldNode>,
    pub edges: Vec<WorldEdge>,
}

impl WorldGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn outgoing(&self, from: &Position) -> Vec<Position> {
        self.edges
            .iter()
            .filter(|edge| edge.from == *from)
            .map(|edge| edge.to)
            .collect()
    }
}

/// Materializes rows `from..=max_prime`. Doors leading past `max_prime` are dropped.
pub fn build_world_graph(
    rows: &RowBuilder<'_>,
    from: Prime,
    max_prime: Prime,
) -> Result<WorldGraph, LabyrinthError> {
    let primes: Vec<Prime> = rows
        .table()
        .primes()
        .iter()
        .copied()
        .filter(|&p| from <= p && p <= max_prime)
        .collect();

    let mut nodes = BTreeMap::new();
    let mut edges = Vec::new();
    for (layer, &p) in primes.iter().enumerate() {
        let row = rows.build_row(p)?;
        for entry in &row.rooms {
            nodes.entry(Position::new(p, entry.room)).or_insert(layer);
        }
        let Some(next) = row.next.filter(|&next| next <= max_prime) else {
            continue;
        };
        // `next` is the successor of `p` and within bounds, so it is the next entry.
        let next_layer = layer + 1;
        for entry in &row.rooms {
            let src = Position::new(p, entry.room);
            for &target in &entry.doors {
                let dst = Position::new(next, target);
                edges.push(WorldEdge { from: src, to: dst });
                nodes.entry(dst).or_insert(next_layer);
            }
        }
    }
    log::debug!(
        "world graph {from}..={max_prime}: {} nodes, {} edges",
        nodes.len(),
        edges.len()
    );
    Ok(WorldGraph {
        primes,
        nodes: nodes
            .into_iter()
            .map(|(position, layer_index)| WorldNode {
                position,
                layer_index,
            })
            .collect(),
        edges,
    })
}
