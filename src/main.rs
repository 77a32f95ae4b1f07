use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use heatwave::config::{
    DEFAULT_NETWORK_FILE, DEFAULT_TRANSFER_RATE, GENOMICS_SUFFIX, METABOLOMICS_SUFFIX,
    PipelineConfig, discover_input,
};
use heatwave::export::{element_set, write_tsv};
use heatwave::pipeline::run_from_sources;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Metabolomic measurements; defaults to the first `*_mx.tsv` in the input directory.
    #[arg(long)]
    metabolomics: Option<PathBuf>,

    /// Genomic measurements; defaults to the first `*_gx.tsv` in the input directory.
    #[arg(long)]
    genomics: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_NETWORK_FILE)]
    network: PathBuf,

    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Smallest fold-change magnitude to keep, on the linear scale.
    #[arg(long)]
    fold_change_cutoff: Option<f64>,

    #[arg(long)]
    keep_singletons: bool,

    /// Number of diffusion rounds.
    #[arg(long, default_value_t = 0)]
    waves: usize,

    #[arg(long, default_value_t = DEFAULT_TRANSFER_RATE)]
    transfer_rate: f64,

    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long)]
    summary_json: Option<PathBuf>,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig {
            eliminate_singletons: !self.keep_singletons,
            rounds: self.waves,
            transfer_rate: self.transfer_rate,
            ..PipelineConfig::default()
        };
        if let Some(cutoff) = self.fold_change_cutoff {
            config = config.with_fold_change_cutoff(cutoff)?;
        }
        config.validate()?;
        Ok(config)
    }
}

fn resolve_input(explicit: Option<&Path>, dir: &Path, suffix: &str, kind: &str) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    discover_input(dir, suffix)
        .with_context(|| format!("failed to list {}", dir.display()))?
        .ok_or_else(|| anyhow!("no file ending with {suffix} found (no {kind} data found)"))
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_json(file: File, value: &impl serde::Serialize) -> Result<()> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = args.pipeline_config()?;

    let metabolomics = resolve_input(
        args.metabolomics.as_deref(),
        &args.input_dir,
        METABOLOMICS_SUFFIX,
        "metabolomic",
    )?;
    let genomics = resolve_input(
        args.genomics.as_deref(),
        &args.input_dir,
        GENOMICS_SUFFIX,
        "genomic",
    )?;

    let metabolomics_name = metabolomics.display().to_string();
    let genomics_name = genomics.display().to_string();
    let network_name = args.network.display().to_string();
    let metabolomics_raw = read_source(&metabolomics)?;
    let genomics_raw = read_source(&genomics)?;
    let network_raw = read_source(&args.network)?;

    info!(
        metabolomics = %metabolomics_name,
        genomics = %genomics_name,
        network = %network_name,
        "inputs resolved"
    );

    let output = run_from_sources(
        [
            (metabolomics_name.as_str(), metabolomics_raw.as_str()),
            (genomics_name.as_str(), genomics_raw.as_str()),
        ],
        &network_name,
        &network_raw,
        &config,
    )?;

    if output.graph.is_empty() {
        warn!("no nodes survived pruning");
    }

    print!("{}", output.summary);

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("failed to create {}", args.output_dir.display()))?;

    let tsv_path = args.output_dir.join("heatwave.tsv");
    let tsv = File::create(&tsv_path)
        .with_context(|| format!("failed to create {}", tsv_path.display()))?;
    write_tsv(&output.records, BufWriter::new(tsv))
        .with_context(|| format!("failed to write {}", tsv_path.display()))?;

    let json_path = args.output_dir.join("heatwave.json");
    let json = File::create(&json_path)
        .with_context(|| format!("failed to create {}", json_path.display()))?;
    write_json(json, &element_set(&output.graph))
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    if let Some(summary_path) = &args.summary_json {
        let file = File::create(summary_path)
            .with_context(|| format!("failed to create {}", summary_path.display()))?;
        write_json(file, &output.summary)
            .with_context(|| format!("failed to write {}", summary_path.display()))?;
    }

    info!(
        tsv = %tsv_path.display(),
        json = %json_path.display(),
        nodes = output.records.len(),
        "results exported"
    );
    Ok(())
}
