use tracing::{debug, info};

use super::annotation::AnnotationTable;
use super::error::Result;
use super::graph::{HeatGraph, Node};
use super::parse::{NetworkRecord, parse_network_records};

/// Builds the heat graph from network records in the order given. Edges may only
/// reference nodes declared by an earlier record.
pub fn assemble_network(
    records: impl IntoIterator<Item = NetworkRecord>,
    annotations: &AnnotationTable,
) -> Result<HeatGraph> {
    let mut graph = HeatGraph::new();
    let mut duplicate_nodes = 0usize;
    let mut duplicate_edges = 0usize;

    for record in records {
        match record {
            NetworkRecord::Node { class, id } => {
                let annotation = annotations.get(&id);
                if !graph.insert_node(Node::new(id, class, annotation))? {
                    duplicate_nodes += 1;
                }
            }
            NetworkRecord::Edge { source, dest } => {
                if !graph.add_edge(&source, &dest)? {
                    duplicate_edges += 1;
                }
            }
        }
    }

    if duplicate_nodes > 0 || duplicate_edges > 0 {
        debug!(duplicate_nodes, duplicate_edges, "ignored repeated network records");
    }

    let measured = graph.nodes().filter(|node| node.is_measured()).count();
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        measured,
        "reference network assembled"
    );

    Ok(graph)
}

/// Parses a raw network listing and assembles it in one step.
pub fn assemble_network_source(
    source_name: &str,
    raw: &str,
    annotations: &AnnotationTable,
) -> Result<HeatGraph> {
    let records = parse_network_records(source_name, raw)?;
    assemble_network(records, annotations)
}
