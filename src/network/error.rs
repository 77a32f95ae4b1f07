use thiserror::Error;

use super::graph::NodeClass;

#[derive(Debug, Error, PartialEq)]
pub enum HeatwaveError {
    #[error("{source_name}:{line}: malformed record: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("{source_name}:{line}: unrecognized record type `{tag}`")]
    UnrecognizedRecordType {
        source_name: String,
        line: usize,
        tag: String,
    },

    #[error("{source_name}:{line}: unknown node class `{class}`")]
    UnknownNodeClass {
        source_name: String,
        line: usize,
        class: String,
    },

    #[error("node `{id}` declared as both metabolite and reaction")]
    ConflictingNodeClass { id: String },

    #[error("edge {source_id} -> {dest_id} references an undeclared node")]
    DanglingEdge { source_id: String, dest_id: String },

    #[error("no measured {class} nodes to summarize")]
    EmptySample { class: NodeClass },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, HeatwaveError>;
