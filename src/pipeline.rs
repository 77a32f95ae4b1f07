use tracing::info;

use crate::config::PipelineConfig;
use crate::export::{ExportRecord, export_records};
use crate::heat::{PruneOutcome, diffuse, prune};
use crate::network::{HeatGraph, Result, assemble_network_source, load_annotations};
use crate::stats::{NetworkStats, RunSummary};

#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub graph: HeatGraph,
    pub summary: RunSummary,
    pub records: Vec<ExportRecord>,
    pub prune: PruneOutcome,
}

/// Scores and filters an assembled reference network.
pub fn run_pipeline(mut graph: HeatGraph, config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;

    let reference = NetworkStats::collect(&graph);

    info!(
        rounds = config.rounds,
        transfer_rate = config.transfer_rate,
        "diffusing heat"
    );
    diffuse(&mut graph, config.rounds, config.transfer_rate);

    let outcome = prune(&mut graph, config.heat_threshold, config.eliminate_singletons);
    let summary = RunSummary::new(reference, NetworkStats::collect(&graph));
    let records = export_records(&graph);

    Ok(PipelineOutput {
        graph,
        summary,
        records,
        prune: outcome,
    })
}

/// Loads annotation sources (in order), assembles the network and runs the pipeline.
pub fn run_from_sources<'a>(
    annotation_sources: impl IntoIterator<Item = (&'a str, &'a str)>,
    network_name: &str,
    network_raw: &str,
    config: &PipelineConfig,
) -> Result<PipelineOutput> {
    let annotations = load_annotations(annotation_sources)?;
    info!(annotations = annotations.len(), "measurements merged");

    let graph = assemble_network_source(network_name, network_raw, &annotations)?;
    run_pipeline(graph, config)
}
