use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::annotation::Annotation;
use super::error::{HeatwaveError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeClass {
    Metabolite,
    Reaction,
}

impl NodeClass {
    pub const ALL: [NodeClass; 2] = [NodeClass::Metabolite, NodeClass::Reaction];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "metabolite" => Some(Self::Metabolite),
            "reaction" => Some(Self::Reaction),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Metabolite => "metabolite",
            Self::Reaction => "reaction",
        }
    }

    /// Name used in the printed report, where reaction nodes are the measured orthologs.
    pub fn report_name(self) -> &'static str {
        match self {
            Self::Metabolite => "Metabolite",
            Self::Reaction => "Ortholog",
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub fold_change: Option<f64>,
    pub heat: f64,
    class: NodeClass,
    successors: Vec<String>,
    predecessors: Vec<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, class: NodeClass, annotation: Option<&Annotation>) -> Self {
        let id = id.into();
        let (label, fold_change) = match annotation {
            Some(annotation) => (annotation.label.clone(), Some(annotation.fold_change)),
            None => (id.clone(), None),
        };

        Self {
            heat: fold_change.map_or(0.0, f64::abs),
            id,
            label,
            fold_change,
            class,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    pub fn class(&self) -> NodeClass {
        self.class
    }

    pub fn is_measured(&self) -> bool {
        self.fold_change.is_some()
    }

    pub fn successors(&self) -> &[String] {
        &self.successors
    }

    pub fn predecessors(&self) -> &[String] {
        &self.predecessors
    }

    /// In-degree plus out-degree; a self-loop counts twice.
    pub fn degree(&self) -> usize {
        self.successors.len() + self.predecessors.len()
    }
}

#[derive(Clone, Debug, Default)]
pub struct HeatGraph {
    nodes: HashMap<String, Node>,
    edge_count: usize,
}

impl HeatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    pub fn sorted_ids(&self) -> Vec<String> {
        let mut ids = self.nodes.keys().cloned().collect::<Vec<_>>();
        ids.sort();
        ids
    }

    pub fn sorted_nodes(&self) -> Vec<&Node> {
        let mut nodes = self.nodes.values().collect::<Vec<_>>();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    /// All edges as `(source, dest)` pairs, ordered by source then destination.
    pub fn sorted_edges(&self) -> Vec<(&str, &str)> {
        let mut edges = self
            .nodes
            .values()
            .flat_map(|node| {
                node.successors
                    .iter()
                    .map(move |dest| (node.id.as_str(), dest.as_str()))
            })
            .collect::<Vec<_>>();
        edges.sort_unstable();
        edges
    }

    /// Inserts a node unless one with the same id exists. Returns `false` for a
    /// redeclaration with the same class.
    pub fn insert_node(&mut self, node: Node) -> Result<bool> {
        if let Some(existing) = self.nodes.get(&node.id) {
            return if existing.class == node.class {
                Ok(false)
            } else {
                Err(HeatwaveError::ConflictingNodeClass { id: node.id })
            };
        }

        self.nodes.insert(node.id.clone(), node);
        Ok(true)
    }

    /// Adds the directed edge `source -> dest`. Both endpoints must already exist.
    /// Returns `false` if the edge was already present.
    pub fn add_edge(&mut self, source: &str, dest: &str) -> Result<bool> {
        if !self.nodes.contains_key(source) || !self.nodes.contains_key(dest) {
            return Err(HeatwaveError::DanglingEdge {
                source_id: source.to_string(),
                dest_id: dest.to_string(),
            });
        }

        let Some(source_node) = self.nodes.get_mut(source) else {
            return Ok(false);
        };
        if source_node.successors.iter().any(|id| id == dest) {
            return Ok(false);
        }
        source_node.successors.push(dest.to_string());

        if let Some(dest_node) = self.nodes.get_mut(dest) {
            dest_node.predecessors.push(source.to_string());
        }

        self.edge_count += 1;
        Ok(true)
    }

    /// Removes a node together with every edge incident to it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let node = self.nodes.remove(id)?;
        let mut removed_edges = 0usize;

        for dest in &node.successors {
            removed_edges += 1;
            if dest == id {
                continue;
            }
            if let Some(dest_node) = self.nodes.get_mut(dest) {
                dest_node.predecessors.retain(|pred| pred != id);
            }
        }

        for source in &node.predecessors {
            // self-loop already counted above
            if source == id {
                continue;
            }
            removed_edges += 1;
            if let Some(source_node) = self.nodes.get_mut(source) {
                source_node.successors.retain(|succ| succ != id);
            }
        }

        self.edge_count -= removed_edges;
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with(ids: &[(&str, NodeClass)]) -> HeatGraph {
        let mut graph = HeatGraph::new();
        for (id, class) in ids {
            graph.insert_node(Node::new(*id, *class, None)).unwrap();
        }
        graph
    }

    #[test]
    fn unmeasured_node_defaults_label_and_heat() {
        let node = Node::new("C00031", NodeClass::Metabolite, None);
        assert_eq!(node.label, "C00031");
        assert_eq!(node.heat, 0.0);
        assert!(!node.is_measured());
    }

    #[test]
    fn measured_node_takes_absolute_heat() {
        let annotation = Annotation {
            fold_change: -1.5,
            label: "glucose".to_string(),
        };
        let node = Node::new("C00031", NodeClass::Metabolite, Some(&annotation));
        assert_eq!(node.label, "glucose");
        assert_eq!(node.fold_change, Some(-1.5));
        assert_eq!(node.heat, 1.5);
    }

    #[test]
    fn duplicate_edge_is_a_no_op() {
        let mut graph = graph_with(&[("a", NodeClass::Metabolite), ("b", NodeClass::Reaction)]);
        assert!(graph.add_edge("a", "b").unwrap());
        assert!(!graph.add_edge("a", "b").unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.node("b").unwrap().predecessors(), ["a".to_string()]);
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let mut graph = graph_with(&[("a", NodeClass::Metabolite)]);
        let err = graph.add_edge("a", "missing").unwrap_err();
        assert_eq!(
            err,
            HeatwaveError::DanglingEdge {
                source_id: "a".to_string(),
                dest_id: "missing".to_string(),
            }
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn conflicting_redeclaration_is_rejected() {
        let mut graph = graph_with(&[("a", NodeClass::Metabolite)]);
        assert!(!graph.insert_node(Node::new("a", NodeClass::Metabolite, None)).unwrap());
        assert!(matches!(
            graph.insert_node(Node::new("a", NodeClass::Reaction, None)),
            Err(HeatwaveError::ConflictingNodeClass { .. })
        ));
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mut graph = graph_with(&[
            ("a", NodeClass::Metabolite),
            ("b", NodeClass::Reaction),
            ("c", NodeClass::Metabolite),
        ]);
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("b", "c").unwrap();
        graph.add_edge("c", "a").unwrap();
        graph.add_edge("b", "b").unwrap();
        assert_eq!(graph.edge_count(), 4);

        let removed = graph.remove_node("b").unwrap();
        assert_eq!(removed.degree(), 4);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.node("a").unwrap().successors().is_empty());
        assert!(graph.node("c").unwrap().predecessors().is_empty());
        assert_eq!(graph.sorted_edges(), vec![("c", "a")]);
    }
}
