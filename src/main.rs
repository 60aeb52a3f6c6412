use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

mod charts;
mod dataset;
mod error;
mod inspect;
mod logging;
mod models;
mod report;
mod stats;

use dataset::DatasetSource;
use error::LoadError;
use models::{Metric, Table};

#[derive(Parser)]
#[command(name = "cyber-service-analysis")]
#[command(about = "Descriptive analysis of daily cyber service records", long_about = None)]
struct Cli {
    /// Read records from a CSV file instead of the embedded dataset
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Write the chart data series as JSON
    #[arg(long)]
    chart_data: Option<PathBuf>,
}

/// Acquires the table and renders the structural report. This is the only
/// stage whose failures are reported instead of propagated.
fn load_and_inspect(source: &DatasetSource) -> Result<(Table, String), LoadError> {
    let table = dataset::load(source)?;
    let missing_counts = inspect::missing_counts(&table);
    let text = report::render_inspection(
        &source.describe(),
        table.head(report::HEAD_ROWS),
        &inspect::schema(&table),
        &missing_counts,
    );

    if table.is_empty() {
        tracing::warn!(source = %source.describe(), "dataset has no records");
    }

    let missing: usize = missing_counts
        .iter()
        .map(|(_, count)| count)
        .sum();
    if missing > 0 {
        tracing::warn!(missing, "dataset has missing cells");
    }

    Ok((table, text))
}

/// Runs the whole pipeline and returns the console text. A load failure ends
/// the run after its message; later stages propagate their errors.
fn run(source: &DatasetSource, chart_data: Option<&Path>) -> anyhow::Result<String> {
    let (table, mut output) = match load_and_inspect(source) {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!(error = %err, "dataset load failed");
            return Ok(report::render_load_failure(&err));
        }
    };

    let summaries = stats::describe(&table);
    let revenue_means = stats::group_means(&table, Metric::Revenue);
    let customer_means = stats::group_means(&table, Metric::Customers);
    let insights = stats::insights(&table, &revenue_means)
        .context("table has no customer or revenue values to derive insights from")?;
    tracing::debug!(
        services = revenue_means.len(),
        total_revenue = insights.total_revenue,
        "aggregates computed"
    );

    output.push('\n');
    output.push_str(&report::render_analysis(
        &summaries,
        &revenue_means,
        &customer_means,
        table.len(),
        &insights,
    ));

    if let Some(out) = chart_data {
        let charts = charts::ChartSet::build(&table, &revenue_means);
        let json = serde_json::to_string_pretty(&charts)?;
        std::fs::write(out, json)
            .with_context(|| format!("failed to write chart data to {}", out.display()))?;
        output.push_str(&format!("\nChart data written to {}.\n", out.display()));
    }

    Ok(output)
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    let source = match cli.csv {
        Some(path) => DatasetSource::Csv(path),
        None => DatasetSource::Builtin,
    };

    print!("{}", run(&source, cli.chart_data.as_deref())?);
    Ok(())
}
