use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::network::HeatGraph;

/// Index-based view of a graph's successor lists, ordered by node id.
struct SuccessorIndex {
    ids: Vec<String>,
    successors: Vec<Vec<usize>>,
}

impl SuccessorIndex {
    fn build(graph: &HeatGraph) -> Self {
        let ids = graph.sorted_ids();
        let index_by_id = ids
            .iter()
            .enumerate()
            .map(|(index, id)| (id.as_str(), index))
            .collect::<HashMap<_, _>>();

        let successors: Vec<Vec<usize>> = ids
            .iter()
            .map(|id| {
                graph
                    .node(id)
                    .map(|node| {
                        node.successors()
                            .iter()
                            .filter_map(|dest| index_by_id.get(dest.as_str()).copied())
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            })
            .collect();

        Self { ids, successors }
    }
}

/// Mean heat of each node's direct successors, read from `heat` only.
/// Nodes without outgoing edges get 0.
fn outgoing_heat(successors: &[Vec<usize>], heat: &[f64]) -> Vec<f64> {
    successors
        .par_iter()
        .map(|targets| {
            if targets.is_empty() {
                0.0
            } else {
                targets.iter().map(|&target| heat[target]).sum::<f64>() / targets.len() as f64
            }
        })
        .collect()
}

/// Runs `rounds` synchronous rounds of `heat += transfer_rate * mean(successor heat)`.
///
/// Every round reads a frozen snapshot of the previous round's heat, so the result
/// does not depend on node visiting order. Heat never decreases for a
/// non-negative `transfer_rate`.
pub fn diffuse(graph: &mut HeatGraph, rounds: usize, transfer_rate: f64) {
    if rounds == 0 || graph.is_empty() {
        return;
    }

    let index = SuccessorIndex::build(graph);
    let mut heat = index
        .ids
        .iter()
        .map(|id| graph.node(id).map_or(0.0, |node| node.heat))
        .collect::<Vec<_>>();

    for round in 0..rounds {
        let incoming = outgoing_heat(&index.successors, &heat);
        for (value, gained) in heat.iter_mut().zip(incoming) {
            *value += transfer_rate * gained;
        }

        debug!(
            round = round + 1,
            max_heat = heat.iter().copied().fold(0.0, f64::max),
            "diffusion round complete"
        );
    }

    let heat_by_id = index.ids.iter().map(String::as_str).zip(heat).collect::<HashMap<_, _>>();
    for node in graph.nodes_mut() {
        if let Some(&value) = heat_by_id.get(node.id.as_str()) {
            node.heat = value;
        }
    }
}
