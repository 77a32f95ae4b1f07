use std::collections::HashMap;

use tracing::debug;

use super::error::Result;
use super::parse::{AnnotationRow, parse_annotation_rows};

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub fold_change: f64,
    pub label: String,
}

/// Merged measurements keyed by node id. For a repeated id the record with the
/// larger absolute fold-change is kept; on a tie the earlier record stays.
#[derive(Clone, Debug, Default)]
pub struct AnnotationTable {
    entries: HashMap<String, Annotation>,
}

impl AnnotationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Annotation> {
        self.entries.get(id)
    }

    pub fn merge_row(&mut self, row: AnnotationRow) {
        let replace = self
            .entries
            .get(&row.id)
            .is_none_or(|current| row.fold_change.abs() > current.fold_change.abs());

        if replace {
            self.entries.insert(
                row.id,
                Annotation {
                    fold_change: row.fold_change,
                    label: row.label,
                },
            );
        }
    }

    /// Parses one measurement source and merges it into the table.
    /// Returns the number of rows read from the source.
    pub fn load_source(&mut self, source_name: &str, raw: &str) -> Result<usize> {
        let rows = parse_annotation_rows(source_name, raw)?;
        let count = rows.len();
        for row in rows {
            self.merge_row(row);
        }

        debug!(source = source_name, rows = count, merged = self.len(), "annotation source merged");
        Ok(count)
    }
}

/// Loads sources in the given order into a fresh table. Nothing is merged if any
/// source is malformed.
pub fn load_annotations<'a>(
    sources: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<AnnotationTable> {
    let mut table = AnnotationTable::new();
    for (source_name, raw) in sources {
        table.load_source(source_name, raw)?;
    }
    Ok(table)
}
