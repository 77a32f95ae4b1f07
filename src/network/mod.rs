mod annotation;
mod assemble;
mod error;
mod graph;
mod parse;

pub use annotation::{Annotation, AnnotationTable, load_annotations};
pub use assemble::{assemble_network, assemble_network_source};
pub use error::{HeatwaveError, Result};
pub use graph::{HeatGraph, Node, NodeClass};
pub use parse::NetworkRecord;
