//! Pipeline stages behind the CLI subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use pf_core::{PipelineConfig, RegressionSummary};
use pf_data::{group_table, load_scenarios, read_summaries, unique_groups, write_summaries,
    write_table, PanelTable};
use pf_stats::{filter_influential, filter_outliers, summarize};
use pf_viz_render::config::VizConfig;

/// Full pipeline: regress, cache the summary table, render charts.
pub fn cmd_run(
    config_path: &Path,
    data_dir: &Path,
    visual_dir: &Path,
    cache_dir: &Path,
    cache_filtered: bool,
) -> Result<()> {
    let config = PipelineConfig::from_path(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;
    tracing::info!(project = %config.project_name, "pipeline start");

    let summaries = regress_pipeline(&config, data_dir, cache_dir, cache_filtered)?;
    cache_summaries(cache_dir, &summaries)?;
    render_charts(&config, &summaries, visual_dir)?;

    tracing::info!(summaries = summaries.len(), "pipeline complete");
    Ok(())
}

/// Regression only: cache the summary table and emit pretty JSON.
pub fn cmd_regress(
    config_path: &Path,
    data_dir: &Path,
    cache_dir: &Path,
    cache_filtered: bool,
    output: Option<&PathBuf>,
) -> Result<()> {
    let config = PipelineConfig::from_path(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let summaries = regress_pipeline(&config, data_dir, cache_dir, cache_filtered)?;
    cache_summaries(cache_dir, &summaries)?;

    write_json(output, serde_json::to_value(&summaries)?)
}

/// Render charts from a cached summary table.
pub fn cmd_viz(config_path: &Path, results: &Path, visual_dir: &Path) -> Result<()> {
    let config = PipelineConfig::from_path(config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    let summaries = read_summaries(results)
        .with_context(|| format!("reading summary table {}", results.display()))?;
    tracing::info!(summaries = summaries.len(), "summary table loaded");

    render_charts(&config, &summaries, visual_dir)
}

/// Load the panel, then per group: outlier filter, influence filter, OLS,
/// summary records. Returns records in group-major, output-variable order.
fn regress_pipeline(
    config: &PipelineConfig,
    data_dir: &Path,
    cache_dir: &Path,
    cache_filtered: bool,
) -> Result<Vec<RegressionSummary>> {
    let mut value_columns = config.input_var.clone();
    value_columns.extend(config.output_var.iter().cloned());

    let panel = load_scenarios(data_dir, &config.scenario, &value_columns)?;
    tracing::info!(rows = panel.n_rows(), "panel loaded");

    let mut summaries = Vec::new();
    let mut filtered_groups = Vec::new();
    for group in unique_groups(&panel) {
        let table = group_table(&panel, &group)?;
        let (table, outliers) = filter_outliers(
            &table,
            config.filter_param.filter_enable,
            config.filter_param.iqr_threshold,
            &config.output_var,
        )?;
        let (table, models, influence) =
            filter_influential(&table, &config.output_var, &config.input_var)?;
        tracing::debug!(
            group = %group,
            outliers = outliers.removed,
            influential = influence.removed,
            rows = table.n_rows(),
            "group filtered"
        );

        summaries.extend(summarize(&group, &models, &config.input_var)?);
        if cache_filtered {
            filtered_groups.push(table);
        }
    }

    if cache_filtered && !filtered_groups.is_empty() {
        std::fs::create_dir_all(cache_dir)?;
        let path = cache_dir.join("filtered.parquet");
        let filtered = PanelTable::concat(filtered_groups)?;
        write_table(&path, &filtered)?;
        tracing::info!(path = %path.display(), rows = filtered.n_rows(), "filtered panel cached");
    }

    Ok(summaries)
}

fn cache_summaries(cache_dir: &Path, summaries: &[RegressionSummary]) -> Result<()> {
    std::fs::create_dir_all(cache_dir)?;
    let path = cache_dir.join("regression.parquet");
    write_summaries(&path, summaries)?;
    tracing::info!(path = %path.display(), records = summaries.len(), "summary table cached");
    Ok(())
}

/// Render one R² chart per (country, scenario) and one coefficient chart
/// per (country, scenario, output variable).
fn render_charts(
    config: &PipelineConfig,
    summaries: &[RegressionSummary],
    visual_dir: &Path,
) -> Result<()> {
    let viz_config = VizConfig::default();
    let long = pf_viz::to_long(summaries);

    let rsq_dir = visual_dir.join("r-squared");
    std::fs::create_dir_all(&rsq_dir)?;
    for artifact in pf_viz::rsquared_artifacts(&long) {
        let path = rsq_dir.join(chart_file_name(&artifact.country, &artifact.scenario));
        let json = serde_json::to_string(&artifact)?;
        render_artifact(&json, "rsquared", &path, &viz_config)?;
        tracing::info!(path = %path.display(), "chart rendered");
    }

    for artifact in
        pf_viz::coefficient_artifacts(&long, &config.input_var, &config.output_var)
    {
        let var_dir = visual_dir.join(&artifact.output_var);
        std::fs::create_dir_all(&var_dir)?;
        let path = var_dir.join(chart_file_name(&artifact.country, &artifact.scenario));
        let json = serde_json::to_string(&artifact)?;
        render_artifact(&json, "coef", &path, &viz_config)?;
        tracing::info!(path = %path.display(), "chart rendered");
    }

    Ok(())
}

/// Render one artifact, folding render failures into the pipeline error type.
fn render_artifact(
    json: &str,
    kind: &str,
    path: &Path,
    viz_config: &VizConfig,
) -> pf_core::Result<()> {
    pf_viz_render::render_to_file(json, kind, path, viz_config)
        .map_err(|e| pf_core::Error::Render(format!("{}: {}", path.display(), e)))
}

fn chart_file_name(country: &str, scenario: &str) -> String {
    format!("{}_{}.png", slug(country), slug(scenario))
}

fn slug(s: &str) -> String {
    s.to_lowercase().replace(char::is_whitespace, "_")
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
