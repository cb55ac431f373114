// ==========================================
// Breather Advisor - CLI entry point
// ==========================================
// Batch runner: catalog + survey in, merged recommendation report
// out. All selection logic lives in the library; this binary only
// wires files to the engine.
// ==========================================

use anyhow::Context;
use breather_advisor::{
    logging, AssetLoader, CatalogLoader, GlobalConfig, Overrides, ReportBuilder, ReportOptions,
    ResultStatus, SelectionEngine,
};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "breather-advisor",
    version,
    about = "Select desiccant breathers for lubricated industrial components"
)]
struct Cli {
    /// Breather catalog file (.xlsx/.xls/.csv)
    #[arg(long)]
    catalog: PathBuf,

    /// Machinery survey report (.xlsx/.xls/.csv)
    #[arg(long)]
    survey: PathBuf,

    /// Merged report output path (default: <survey>_advised.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// JSON run configuration (global defaults + per-asset overrides)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Restrict the catalog to a single brand
    #[arg(long)]
    brand: Option<String>,

    /// Append the full rule trace to the report
    #[arg(long)]
    verbose_trace: bool,

    /// Append intermediate volume/thermal/flow figures to the report
    #[arg(long)]
    include_calculations: bool,

    /// Also dump the full analysis results as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

/// On-disk run configuration.
#[derive(Debug, Default, Deserialize)]
struct RunConfigFile {
    #[serde(default)]
    global: GlobalConfig,
    #[serde(default)]
    overrides: Overrides,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    let started = chrono::Local::now();

    let mut run_config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<RunConfigFile>(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RunConfigFile::default(),
    };
    if cli.brand.is_some() {
        run_config.global.brand_filter = cli.brand.clone();
    }

    let catalog = CatalogLoader::load(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let survey = AssetLoader::load(&cli.survey)
        .with_context(|| format!("loading survey {}", cli.survey.display()))?;

    let engine = Arc::new(SelectionEngine::new(
        catalog,
        survey.assets.clone(),
        run_config.global,
        run_config.overrides,
    )?);
    let results = engine.analyze_all().await;

    let mut counts = std::collections::BTreeMap::new();
    for result in &results {
        *counts.entry(result.status.to_string()).or_insert(0usize) += 1;
    }
    for (status, count) in &counts {
        tracing::info!(%status, count, "result summary");
    }
    let errors = results
        .iter()
        .filter(|r| r.status == ResultStatus::Error)
        .count();

    let options = ReportOptions {
        verbose_trace: cli.verbose_trace,
        include_calculations: cli.include_calculations,
    };
    let merged = ReportBuilder::merged_table(&survey, &results, &options);
    let output = cli.output.clone().unwrap_or_else(|| {
        let stem = cli
            .survey
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "survey".to_string());
        cli.survey.with_file_name(format!("{stem}_advised.csv"))
    });
    ReportBuilder::write_csv(&merged, &output)?;

    if let Some(json_path) = &cli.json {
        let payload = serde_json::to_string_pretty(&results)?;
        std::fs::write(json_path, payload)
            .with_context(|| format!("writing {}", json_path.display()))?;
    }

    tracing::info!(
        assets = results.len(),
        errors,
        elapsed_ms = (chrono::Local::now() - started).num_milliseconds(),
        output = %output.display(),
        "run complete"
    );
    Ok(())
}
