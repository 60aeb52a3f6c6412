use std::collections::HashMap;

use crate::models::{ColumnSummary, Insights, Metric, Record, Service, ServiceMeans, Table};

/// Descriptive statistics for every numeric column.
///
/// Standard deviation uses the sample convention (n - 1) and is `NaN` for
/// fewer than two values. Quartiles interpolate linearly between the order
/// statistics around `q * (n - 1)`.
pub fn describe(table: &Table) -> Vec<(Metric, Option<ColumnSummary>)> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = table
                .records()
                .iter()
                .filter_map(|record| metric.value(record))
                .collect();
            (metric, summarize(&values))
        })
        .collect()
}

pub fn summarize(values: &[f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        f64::NAN
    } else {
        let squared: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (squared / (count - 1) as f64).sqrt()
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    Some(ColumnSummary {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Mean of `metric` per service, in the order services first appear.
///
/// For the embedded table that is Printing, Photocopy, Browsing, KRA
/// Services, Scanning, not the alphabetical Browsing, KRA Services,
/// Photocopy, Printing, Scanning. The means sections of the report and the
/// bar and pie series inherit this order.
pub fn group_means(table: &Table, metric: Metric) -> ServiceMeans {
    let mut slots: HashMap<Service, usize> = HashMap::new();
    let mut totals: Vec<(Service, f64, usize)> = Vec::new();

    for record in table.records() {
        let (Some(service), Some(value)) = (record.service, metric.value(record)) else {
            continue;
        };

        let slot = *slots.entry(service).or_insert_with(|| {
            totals.push((service, 0.0, 0));
            totals.len() - 1
        });
        let entry = &mut totals[slot];
        entry.1 += value;
        entry.2 += 1;
    }

    ServiceMeans::new(
        totals
            .into_iter()
            .map(|(service, sum, count)| (service, sum / count as f64))
            .collect(),
    )
}

pub fn total_revenue(table: &Table) -> f64 {
    table.records().iter().filter_map(|record| record.revenue).sum()
}

/// Record with the most customers. The earliest record wins a tie.
pub fn busiest_record(table: &Table) -> Option<&Record> {
    let mut best: Option<(&Record, u32)> = None;
    for record in table.records() {
        let Some(customers) = record.customers else {
            continue;
        };
        match best {
            Some((_, top)) if customers <= top => {}
            _ => best = Some((record, customers)),
        }
    }
    best.map(|(record, _)| record)
}

/// Service with the highest mean. The first-seen entry wins a tie.
pub fn top_service(means: &ServiceMeans) -> Option<(Service, f64)> {
    let mut best: Option<(Service, f64)> = None;
    for (service, mean) in means.iter() {
        match best {
            Some((_, top)) if mean <= top => {}
            _ => best = Some((service, mean)),
        }
    }
    best
}

pub fn insights(table: &Table, revenue_means: &ServiceMeans) -> Option<Insights> {
    let busiest = busiest_record(table)?.clone();
    let (top_service, top_service_mean) = top_service(revenue_means)?;

    Some(Insights {
        total_revenue: total_revenue(table),
        busiest,
        top_service,
        top_service_mean,
    })
}
