use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::network::{HeatGraph, HeatwaveError, NodeClass, Result};
use crate::util::{median, percentage};

const RULE: &str = "**********************";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassStats {
    pub class: NodeClass,
    pub total: usize,
    pub measured: usize,
    /// Median absolute fold-change of measured nodes, on the linear (`2^x`) scale.
    pub median_abs_fold_change: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkStats {
    pub nodes: usize,
    pub edges: usize,
    pub metabolites: ClassStats,
    pub reactions: ClassStats,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Retention {
    pub nodes_percent: Option<f64>,
    pub edges_percent: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    pub reference: NetworkStats,
    #[serde(rename = "final")]
    pub final_network: NetworkStats,
    pub retention: Retention,
}

/// Median of `|log2 fold-change|` over measured nodes of `class`, reported as `2^median`.
pub fn median_abs_fold_change(graph: &HeatGraph, class: NodeClass) -> Result<f64> {
    let magnitudes = graph
        .nodes()
        .filter(|node| node.class() == class)
        .filter_map(|node| node.fold_change.map(f64::abs))
        .collect::<Vec<_>>();

    median(&magnitudes)
        .map(f64::exp2)
        .ok_or(HeatwaveError::EmptySample { class })
}

impl ClassStats {
    fn collect(graph: &HeatGraph, class: NodeClass) -> Self {
        let mut total = 0usize;
        let mut measured = 0usize;
        for node in graph.nodes().filter(|node| node.class() == class) {
            total += 1;
            if node.is_measured() {
                measured += 1;
            }
        }

        let median_abs_fold_change = match median_abs_fold_change(graph, class) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(%err, "median omitted");
                None
            }
        };

        Self {
            class,
            total,
            measured,
            median_abs_fold_change,
        }
    }
}

impl NetworkStats {
    pub fn collect(graph: &HeatGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            metabolites: ClassStats::collect(graph, NodeClass::Metabolite),
            reactions: ClassStats::collect(graph, NodeClass::Reaction),
        }
    }

    pub fn class(&self, class: NodeClass) -> &ClassStats {
        match class {
            NodeClass::Metabolite => &self.metabolites,
            NodeClass::Reaction => &self.reactions,
        }
    }

    fn write_section(&self, f: &mut fmt::Formatter<'_>, heading: &str) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{heading} Network Nodes: {}", self.nodes)?;
        for class in NodeClass::ALL {
            writeln!(
                f,
                "{heading} Network {}s: {}",
                class.report_name(),
                self.class(class).total
            )?;
        }
        writeln!(f, "{heading} Network Edges: {}", self.edges)?;
        writeln!(f, "{RULE}")?;
        for class in NodeClass::ALL {
            writeln!(
                f,
                "Measured {}s: {}",
                class.report_name(),
                self.class(class).measured
            )?;
        }
        for class in NodeClass::ALL {
            if let Some(value) = self.class(class).median_abs_fold_change {
                writeln!(f, "Median {} Absolute FC: {value:.2}", class.report_name())?;
            }
        }
        Ok(())
    }
}

impl Retention {
    pub fn between(reference: &NetworkStats, final_network: &NetworkStats) -> Self {
        Self {
            nodes_percent: percentage(final_network.nodes, reference.nodes),
            edges_percent: percentage(final_network.edges, reference.edges),
        }
    }
}

impl RunSummary {
    pub fn new(reference: NetworkStats, final_network: NetworkStats) -> Self {
        let retention = Retention::between(&reference, &final_network);
        Self {
            reference,
            final_network,
            retention,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reference.write_section(f, "Reference")?;
        self.final_network.write_section(f, "Final")?;
        writeln!(f, "{RULE}")?;
        if let Some(value) = self.retention.nodes_percent {
            writeln!(f, "Percentile of Reference Nodes: {value:.2}%")?;
        }
        if let Some(value) = self.retention.edges_percent {
            writeln!(f, "Percentile of Reference Edges: {value:.2}%")?;
        }
        writeln!(f, "{RULE}")
    }
}
