use super::error::{HeatwaveError, Result};
use super::graph::NodeClass;

#[derive(Clone, Debug, PartialEq)]
pub struct AnnotationRow {
    pub id: String,
    pub fold_change: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NetworkRecord {
    Node { class: NodeClass, id: String },
    Edge { source: String, dest: String },
}

fn malformed(source_name: &str, line: usize, reason: impl Into<String>) -> HeatwaveError {
    HeatwaveError::MalformedRecord {
        source_name: source_name.to_string(),
        line,
        reason: reason.into(),
    }
}

/// Yields `(line_number, fields)` for every non-blank line, numbering from 1.
fn tab_rows(raw: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    raw.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| (line_number, line.split('\t').collect()))
}

/// Parses a measurement table: one header line, then `id, log2 fold-change, label`.
pub(super) fn parse_annotation_rows(source_name: &str, raw: &str) -> Result<Vec<AnnotationRow>> {
    let mut rows = Vec::new();

    for (line_number, fields) in tab_rows(raw).filter(|(line_number, _)| *line_number > 1) {
        let [id, fold_change, label, ..] = fields.as_slice() else {
            return Err(malformed(
                source_name,
                line_number,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        };

        let fold_change = fold_change
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| {
                malformed(
                    source_name,
                    line_number,
                    format!("fold-change `{fold_change}` is not a finite number"),
                )
            })?;

        rows.push(AnnotationRow {
            id: (*id).to_string(),
            fold_change,
            label: (*label).to_string(),
        });
    }

    Ok(rows)
}

/// Parses the pre-built network listing: `node <class> <id>` and `edge <source> <dest>` rows.
pub(super) fn parse_network_records(source_name: &str, raw: &str) -> Result<Vec<NetworkRecord>> {
    let mut records = Vec::new();

    for (line_number, fields) in tab_rows(raw) {
        let tag = fields[0];
        if tag != "node" && tag != "edge" {
            return Err(HeatwaveError::UnrecognizedRecordType {
                source_name: source_name.to_string(),
                line: line_number,
                tag: tag.to_string(),
            });
        }

        let [_, first, second, ..] = fields.as_slice() else {
            return Err(malformed(
                source_name,
                line_number,
                format!("`{tag}` record needs 3 fields, found {}", fields.len()),
            ));
        };

        let record = if tag == "node" {
            let class = NodeClass::parse(first).ok_or_else(|| HeatwaveError::UnknownNodeClass {
                source_name: source_name.to_string(),
                line: line_number,
                class: (*first).to_string(),
            })?;
            NetworkRecord::Node {
                class,
                id: (*second).to_string(),
            }
        } else {
            NetworkRecord::Edge {
                source: (*first).to_string(),
                dest: (*second).to_string(),
            }
        };
        records.push(record);
    }

    Ok(records)
}
