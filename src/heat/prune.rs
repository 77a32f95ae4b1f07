use tracing::info;

use crate::network::HeatGraph;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    pub cold_removed: usize,
    pub singletons_removed: usize,
}

/// Drops every node with `heat <= heat_threshold` and its edges, then, if asked,
/// every node left with no edges at all.
pub fn prune(graph: &mut HeatGraph, heat_threshold: f64, eliminate_singletons: bool) -> PruneOutcome {
    let cold = graph
        .nodes()
        .filter(|node| node.heat <= heat_threshold)
        .map(|node| node.id.clone())
        .collect::<Vec<_>>();
    for id in &cold {
        graph.remove_node(id);
    }

    let mut singletons = Vec::new();
    if eliminate_singletons {
        singletons = graph
            .nodes()
            .filter(|node| node.degree() == 0)
            .map(|node| node.id.clone())
            .collect();
        for id in &singletons {
            graph.remove_node(id);
        }
    }

    let outcome = PruneOutcome {
        cold_removed: cold.len(),
        singletons_removed: singletons.len(),
    };
    info!(
        heat_threshold,
        cold_removed = outcome.cold_removed,
        singletons_removed = outcome.singletons_removed,
        remaining = graph.node_count(),
        "network pruned"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::network::{Annotation, Node, NodeClass};

    fn build(heats: &[(&str, f64)], edges: &[(&str, &str)]) -> HeatGraph {
        let mut graph = HeatGraph::new();
        for (id, heat) in heats {
            let annotation = Annotation {
                fold_change: *heat,
                label: id.to_string(),
            };
            graph
                .insert_node(Node::new(*id, NodeClass::Reaction, Some(&annotation)))
                .unwrap();
        }
        for (source, dest) in edges {
            graph.add_edge(source, dest).unwrap();
        }
        graph
    }

    #[test]
    fn node_at_threshold_is_removed() {
        let mut graph = build(&[("at", 0.5), ("above", 0.51)], &[("at", "above")]);
        let outcome = prune(&mut graph, 0.5, false);

        assert_eq!(outcome.cold_removed, 1);
        assert!(!graph.contains("at"));
        assert!(graph.contains("above"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn nodes_orphaned_by_threshold_become_singletons() {
        let mut graph = build(
            &[("hot", 3.0), ("cold", 0.1), ("pair_a", 2.0), ("pair_b", 2.0)],
            &[("hot", "cold"), ("pair_a", "pair_b")],
        );
        let outcome = prune(&mut graph, 0.5, true);

        assert_eq!(
            outcome,
            PruneOutcome {
                cold_removed: 1,
                singletons_removed: 1
            }
        );
        assert!(!graph.contains("hot"));
        assert_eq!(graph.sorted_ids(), vec!["pair_a".to_string(), "pair_b".to_string()]);
    }

    #[test]
    fn singletons_are_kept_when_elimination_is_off() {
        let mut graph = build(&[("hot", 3.0), ("cold", 0.1)], &[("hot", "cold")]);
        prune(&mut graph, 0.5, false);
        assert_eq!(graph.sorted_ids(), vec!["hot".to_string()]);
    }

    #[test]
    fn self_loop_is_not_a_singleton() {
        let mut graph = build(&[("loop", 3.0)], &[("loop", "loop")]);
        prune(&mut graph, 0.5, true);
        assert!(graph.contains("loop"));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            failure_persistence: None,
            ..ProptestConfig::default()
        })]

        #[test]
        fn survivors_are_hot_and_connected(
            heats in prop::collection::vec(0.0f64..4.0, 1..10),
            edge_seeds in prop::collection::vec((0usize..10, 0usize..10), 0..20),
            threshold in 0.0f64..4.0,
        ) {
            let ids = (0..heats.len()).map(|index| format!("n{index}")).collect::<Vec<_>>();
            let named = ids.iter().map(String::as_str).zip(heats.iter().copied()).collect::<Vec<_>>();
            let edges = edge_seeds
                .iter()
                .map(|(a, b)| (ids[a % ids.len()].as_str(), ids[b % ids.len()].as_str()))
                .collect::<Vec<_>>();

            let mut graph = build(&named, &edges);
            prune(&mut graph, threshold, true);

            for node in graph.nodes() {
                prop_assert!(node.heat > threshold);
                prop_assert!(node.degree() > 0);
                for dest in node.successors() {
                    prop_assert!(graph.contains(dest));
                }
            }
        }
    }
}
