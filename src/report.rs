use std::fmt::Write;

use crate::error::LoadError;
use crate::models::{ColumnSchema, ColumnSummary, Insights, Metric, Record, ServiceMeans};

pub const HEAD_ROWS: usize = 10;

fn cell<T: ToString>(value: Option<T>, missing: &str) -> String {
    value.map_or_else(|| missing.to_string(), |v| v.to_string())
}

fn write_records(output: &mut String, records: &[Record]) {
    let _ = writeln!(
        output,
        "{:>4}  {:<10}  {:<12}  {:>9}  {:>8}",
        "", "Date", "Service", "Customers", "Revenue"
    );
    for (index, record) in records.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>4}  {:<10}  {:<12}  {:>9}  {:>8}",
            index,
            cell(record.date, "NaT"),
            cell(record.service, "NaN"),
            cell(record.customers, "NaN"),
            cell(record.revenue, "NaN"),
        );
    }
}

pub fn render_inspection(
    source: &str,
    head: &[Record],
    schema: &[ColumnSchema],
    missing: &[(&str, usize)],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "✅ Cyber Service Dataset Loaded Successfully ({source})");
    let _ = writeln!(output);
    write_records(&mut output, head);

    let _ = writeln!(output);
    let _ = writeln!(output, "Dataset Info:");
    let _ = writeln!(output, " #  {:<10}  {:>14}  {}", "Column", "Non-Null Count", "Type");
    for (index, column) in schema.iter().enumerate() {
        let _ = writeln!(
            output,
            "{:>2}  {:<10}  {:>5} non-null  {}",
            index, column.name, column.non_null, column.kind
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "Missing Values per Column:");
    for (column, count) in missing {
        let _ = writeln!(output, "{:<10} {}", column, count);
    }

    output
}

pub fn render_load_failure(err: &LoadError) -> String {
    let mut output = String::new();
    match err {
        LoadError::DatasetUnavailable { .. } => {
            let _ = writeln!(
                output,
                "✗ Dataset file not found. Please check the filename or path."
            );
        }
        LoadError::UnexpectedFailure(_) => {
            let _ = writeln!(output, "✗ An error occurred: {err}");
        }
    }
    output
}

fn write_means(output: &mut String, title: &str, metric: Metric, means: &ServiceMeans) {
    let _ = writeln!(output);
    let _ = writeln!(output, "{title}");
    if means.is_empty() {
        let _ = writeln!(output, "No {} values recorded.", metric.name().to_lowercase());
        return;
    }
    for (service, mean) in means.iter() {
        let _ = writeln!(output, "{:<12} {:>10.2}", service, mean);
    }
}

pub fn render_analysis(
    summaries: &[(Metric, Option<ColumnSummary>)],
    revenue_means: &ServiceMeans,
    customer_means: &ServiceMeans,
    days: usize,
    insights: &Insights,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "📊 Statistical Summary of Numerical Columns:");
    let _ = writeln!(
        output,
        "{:<10} {:>6} {:>10} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}",
        "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for (metric, summary) in summaries {
        match summary {
            Some(s) => {
                let _ = writeln!(
                    output,
                    "{:<10} {:>6} {:>10.2} {:>10.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                    metric.name(),
                    s.count,
                    s.mean,
                    s.std,
                    s.min,
                    s.q25,
                    s.median,
                    s.q75,
                    s.max
                );
            }
            None => {
                let _ = writeln!(output, "{:<10} {:>6}", metric.name(), 0);
            }
        }
    }

    write_means(
        &mut output,
        "💰 Average Revenue per Service:",
        Metric::Revenue,
        revenue_means,
    );
    write_means(
        &mut output,
        "👥 Average Customers per Service:",
        Metric::Customers,
        customer_means,
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "✨ Business Insights:");
    let _ = writeln!(
        output,
        "- Total Revenue over {} days: KES {}",
        days, insights.total_revenue
    );
    let _ = writeln!(
        output,
        "- Busiest Day: {} with {} customers",
        cell(insights.busiest.date, "unknown date"),
        cell(insights.busiest.customers, "0"),
    );
    let _ = writeln!(
        output,
        "- Top Service by Revenue: {} (Avg. {:.2} KES)",
        insights.top_service, insights.top_service_mean
    );

    output
}
