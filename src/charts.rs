//! Data series behind the six report charts. Rendering happens elsewhere;
//! these are the exact values each chart plots.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Service, ServiceMeans, Table};

pub const HISTOGRAM_BINS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedBars {
    pub services: Vec<Service>,
    pub rows: Vec<(NaiveDate, Vec<f64>)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSet {
    pub line: Vec<(NaiveDate, f64)>,
    pub bar: Vec<(Service, f64)>,
    pub histogram: Histogram,
    pub scatter: Vec<(u32, f64)>,
    pub stacked: StackedBars,
    pub pie: Vec<(Service, f64)>,
}

impl ChartSet {
    pub fn build(table: &Table, revenue_means: &ServiceMeans) -> Self {
        let customers: Vec<f64> = table
            .records()
            .iter()
            .filter_map(|record| record.customers.map(f64::from))
            .collect();

        Self {
            line: revenue_over_time(table),
            bar: revenue_means.iter().collect(),
            histogram: histogram(&customers, HISTOGRAM_BINS),
            scatter: customers_vs_revenue(table),
            stacked: stacked_revenue(table),
            pie: revenue_shares(revenue_means),
        }
    }
}

pub fn revenue_over_time(table: &Table) -> Vec<(NaiveDate, f64)> {
    table
        .records()
        .iter()
        .filter_map(|record| Some((record.date?, record.revenue?)))
        .collect()
}

pub fn customers_vs_revenue(table: &Table) -> Vec<(u32, f64)> {
    table
        .records()
        .iter()
        .filter_map(|record| Some((record.customers?, record.revenue?)))
        .collect()
}

/// Equal-width bins over `[min, max]`; the last bin includes `max`.
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    if values.is_empty() || bins == 0 {
        return Histogram {
            edges: Vec::new(),
            counts: vec![0; bins],
        };
    }

    let mut low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let width = (high - low) / bins as f64;
    let edges = (0..=bins).map(|i| low + width * i as f64).collect();
    let mut counts = vec![0; bins];
    for value in values {
        let slot = (((value - low) / width) as usize).min(bins - 1);
        counts[slot] += 1;
    }

    Histogram { edges, counts }
}

/// Revenue pivoted by date and service. Dates ascend, services keep their
/// first-seen order and absent combinations are zero.
pub fn stacked_revenue(table: &Table) -> StackedBars {
    let mut services: Vec<Service> = Vec::new();
    let mut cells: BTreeMap<NaiveDate, Vec<(Service, f64)>> = BTreeMap::new();

    for record in table.records() {
        let (Some(date), Some(service), Some(revenue)) =
            (record.date, record.service, record.revenue)
        else {
            continue;
        };
        if !services.contains(&service) {
            services.push(service);
        }
        cells.entry(date).or_default().push((service, revenue));
    }

    let rows = cells
        .into_iter()
        .map(|(date, entries)| {
            let row: Vec<f64> = services
                .iter()
                .map(|column| {
                    entries
                        .iter()
                        .filter(|(service, _)| service == column)
                        .map(|(_, revenue)| revenue)
                        .sum::<f64>()
                })
                .collect();
            (date, row)
        })
        .collect();

    StackedBars { services, rows }
}

/// Percentage share of each service's mean revenue.
pub fn revenue_shares(means: &ServiceMeans) -> Vec<(Service, f64)> {
    let total: f64 = means.iter().map(|(_, mean)| mean).sum();
    if total == 0.0 {
        return means.iter().map(|(service, _)| (service, 0.0)).collect();
    }
    means
        .iter()
        .map(|(service, mean)| (service, mean / total * 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::models::{Metric, Record};
    use crate::stats;

    fn builtin_charts() -> ChartSet {
        let table = dataset::builtin().unwrap();
        let means = stats::group_means(&table, Metric::Revenue);
        ChartSet::build(&table, &means)
    }

    #[test]
    fn line_and_scatter_have_one_point_per_record() {
        let charts = builtin_charts();
        assert_eq!(charts.line.len(), 20);
        assert_eq!(charts.scatter.len(), 20);
        assert_eq!(charts.line[0].1, 1000.0);
        assert_eq!(charts.scatter[17], (40, 1800.0));
    }

    #[test]
    fn customer_histogram_uses_eight_bins() {
        let charts = builtin_charts();
        assert_eq!(charts.histogram.edges.len(), 9);
        assert_eq!(charts.histogram.edges[0], 5.0);
        assert_eq!(charts.histogram.edges[8], 40.0);
        assert_eq!(charts.histogram.counts, vec![5, 3, 3, 3, 2, 1, 2, 1]);
    }

    #[test]
    fn histogram_widens_a_flat_range() {
        let flat = histogram(&[3.0, 3.0], 2);
        assert_eq!(flat.edges, vec![2.5, 3.0, 3.5]);
        assert_eq!(flat.counts, vec![0, 2]);
        assert_eq!(histogram(&[], 4).counts, vec![0; 4]);
    }

    #[test]
    fn stacked_bars_fill_absent_services_with_zero() {
        let charts = builtin_charts();
        assert_eq!(charts.stacked.services, Service::ALL.to_vec());
        assert_eq!(charts.stacked.rows.len(), 20);

        let (date, row) = &charts.stacked.rows[1];
        assert_eq!(*date, NaiveDate::from_ymd_opt(2025, 9, 2).unwrap());
        assert_eq!(row, &vec![0.0, 750.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn stacked_bars_sort_dates() {
        let table = Table::new(vec![
            Record::new(
                NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(),
                Service::Scanning,
                1,
                10.0,
            ),
            Record::new(
                NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
                Service::Printing,
                2,
                20.0,
            ),
        ]);

        let stacked = stacked_revenue(&table);
        assert_eq!(stacked.services, vec![Service::Scanning, Service::Printing]);
        assert_eq!(stacked.rows[0].1, vec![0.0, 20.0]);
        assert_eq!(stacked.rows[1].1, vec![10.0, 0.0]);
    }

    #[test]
    fn pie_shares_sum_to_one_hundred() {
        let charts = builtin_charts();
        let total: f64 = charts.pie.iter().map(|(_, share)| share).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(charts.bar.len(), charts.pie.len());

        let browsing = charts
            .pie
            .iter()
            .find(|(service, _)| *service == Service::Browsing)
            .unwrap();
        assert!((browsing.1 - 1675.0 / 5150.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn chart_set_serializes_to_json() {
        let json = serde_json::to_value(builtin_charts()).unwrap();
        assert_eq!(json["histogram"]["counts"][0], 5);
        assert_eq!(json["bar"][3][0], "KRA Services");
        assert_eq!(json["line"][0][0], "2025-09-01");
    }
}
