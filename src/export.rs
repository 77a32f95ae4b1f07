use std::io::{self, Write};

use serde::Serialize;

use crate::network::{HeatGraph, NodeClass};

pub const TSV_HEADER: &str = "Class\tNode_ID\tNode_Label\tLog2FC\tHeat";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExportRecord {
    pub class: NodeClass,
    pub id: String,
    pub label: String,
    pub log2_fold_change: Option<f64>,
    pub heat: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExportEdge {
    pub source: String,
    pub target: String,
}

/// Node and edge listing handed to the visualization layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ElementSet {
    pub nodes: Vec<ExportRecord>,
    pub edges: Vec<ExportEdge>,
}

/// One record per remaining node, sorted by id.
pub fn export_records(graph: &HeatGraph) -> Vec<ExportRecord> {
    graph
        .sorted_nodes()
        .into_iter()
        .map(|node| ExportRecord {
            class: node.class(),
            id: node.id.clone(),
            label: node.label.clone(),
            log2_fold_change: node.fold_change,
            heat: node.heat,
        })
        .collect()
}

pub fn element_set(graph: &HeatGraph) -> ElementSet {
    let edges = graph
        .sorted_edges()
        .into_iter()
        .map(|(source, target)| ExportEdge {
            source: source.to_string(),
            target: target.to_string(),
        })
        .collect();

    ElementSet {
        nodes: export_records(graph),
        edges,
    }
}

pub fn write_tsv(records: &[ExportRecord], mut out: impl Write) -> io::Result<()> {
    writeln!(out, "{TSV_HEADER}")?;
    for record in records {
        let log2_fold_change = record
            .log2_fold_change
            .map(|value| format!("{value:?}"))
            .unwrap_or_default();
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{:?}",
            record.class, record.id, record.label, log2_fold_change, record.heat
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Annotation, Node};

    fn sample_graph() -> HeatGraph {
        let annotation = Annotation {
            fold_change: -1.5,
            label: "glucose".to_string(),
        };
        let mut graph = HeatGraph::new();
        graph.insert_node(Node::new("R1", NodeClass::Reaction, None)).unwrap();
        graph
            .insert_node(Node::new("C1", NodeClass::Metabolite, Some(&annotation)))
            .unwrap();
        graph.add_edge("R1", "C1").unwrap();
        graph
    }

    #[test]
    fn records_are_sorted_by_id() {
        let records = export_records(&sample_graph());
        let ids = records.iter().map(|record| record.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["C1", "R1"]);
        assert_eq!(records[0].log2_fold_change, Some(-1.5));
        assert_eq!(records[1].label, "R1");
    }

    #[test]
    fn tsv_leaves_unmeasured_fold_change_empty() {
        let mut out = Vec::new();
        write_tsv(&export_records(&sample_graph()), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Class\tNode_ID\tNode_Label\tLog2FC\tHeat\n\
             metabolite\tC1\tglucose\t-1.5\t1.5\n\
             reaction\tR1\tR1\t\t0.0\n"
        );
    }

    #[test]
    fn element_set_serializes_nodes_and_edges() {
        let value = serde_json::to_value(element_set(&sample_graph())).unwrap();
        assert_eq!(value["nodes"][0]["class"], "metabolite");
        assert_eq!(value["nodes"][1]["log2_fold_change"], serde_json::Value::Null);
        assert_eq!(value["edges"][0]["source"], "R1");
        assert_eq!(value["edges"][0]["target"], "C1");
    }
}
