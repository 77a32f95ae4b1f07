use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::network::{HeatwaveError, Result};

/// Heat threshold used when no fold-change cutoff is given (a magnitude of about 1.41).
pub const DEFAULT_HEAT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_TRANSFER_RATE: f64 = 0.25;

pub const METABOLOMICS_SUFFIX: &str = "_mx.tsv";
pub const GENOMICS_SUFFIX: &str = "_gx.tsv";
pub const DEFAULT_NETWORK_FILE: &str = "reaction_network.tsv";

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PipelineConfig {
    pub heat_threshold: f64,
    pub eliminate_singletons: bool,
    pub rounds: usize,
    pub transfer_rate: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            heat_threshold: DEFAULT_HEAT_THRESHOLD,
            eliminate_singletons: true,
            rounds: 0,
            transfer_rate: DEFAULT_TRANSFER_RATE,
        }
    }
}

impl PipelineConfig {
    /// Sets the heat threshold from a linear fold-change magnitude, `log2(cutoff)`.
    pub fn with_fold_change_cutoff(mut self, cutoff: f64) -> Result<Self> {
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(HeatwaveError::InvalidParameter {
                name: "fold_change_cutoff",
                reason: format!("{cutoff} must be a positive number"),
            });
        }
        self.heat_threshold = cutoff.log2();
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.transfer_rate.is_finite() || self.transfer_rate < 0.0 {
            return Err(HeatwaveError::InvalidParameter {
                name: "transfer_rate",
                reason: format!("{} must be finite and non-negative", self.transfer_rate),
            });
        }
        if !self.heat_threshold.is_finite() {
            return Err(HeatwaveError::InvalidParameter {
                name: "heat_threshold",
                reason: format!("{} must be finite", self.heat_threshold),
            });
        }
        Ok(())
    }
}

/// First file in `dir` (by name) whose name ends with `suffix`.
pub fn discover_input(dir: &Path, suffix: &str) -> io::Result<Option<PathBuf>> {
    let mut matches = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(suffix))
        })
        .collect::<Vec<_>>();
    matches.sort();
    Ok(matches.into_iter().next())
}
