use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    Printing,
    Photocopy,
    Browsing,
    #[serde(rename = "KRA Services")]
    KraServices,
    Scanning,
}

impl Service {
    pub const ALL: [Service; 5] = [
        Service::Printing,
        Service::Photocopy,
        Service::Browsing,
        Service::KraServices,
        Service::Scanning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Service::Printing => "Printing",
            Service::Photocopy => "Photocopy",
            Service::Browsing => "Browsing",
            Service::KraServices => "KRA Services",
            Service::Scanning => "Scanning",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// One day's observation. Cells are optional so file-backed tables can carry
/// missing values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Date")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "Service")]
    pub service: Option<Service>,
    #[serde(rename = "Customers")]
    pub customers: Option<u32>,
    #[serde(rename = "Revenue")]
    pub revenue: Option<f64>,
}

impl Record {
    pub fn new(date: NaiveDate, service: Service, customers: u32, revenue: f64) -> Self {
        Self {
            date: Some(date),
            service: Some(service),
            customers: Some(customers),
            revenue: Some(revenue),
        }
    }
}

/// Ordered, immutable collection of records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Zips four parallel columns into a table.
    ///
    /// Every column must hold exactly `expected_rows` values and dates must be
    /// strictly increasing.
    pub fn from_columns(
        expected_rows: usize,
        dates: Vec<NaiveDate>,
        services: Vec<Service>,
        customers: Vec<u32>,
        revenue: Vec<f64>,
    ) -> Result<Self, ConstructionError> {
        let lengths = [
            (Column::Date, dates.len()),
            (Column::Service, services.len()),
            (Column::Customers, customers.len()),
            (Column::Revenue, revenue.len()),
        ];
        for (column, actual) in lengths {
            if actual != expected_rows {
                return Err(ConstructionError::ColumnLength {
                    column: column.name(),
                    expected: expected_rows,
                    actual,
                });
            }
        }

        if let Some(index) = dates.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(ConstructionError::UnorderedDates { index: index + 1 });
        }

        let records = dates
            .into_iter()
            .zip(services)
            .zip(customers)
            .zip(revenue)
            .map(|(((date, service), customers), revenue)| {
                Record::new(date, service, customers, revenue)
            })
            .collect();

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Date,
    Service,
    Customers,
    Revenue,
}

impl Column {
    pub const ALL: [Column; 4] = [
        Column::Date,
        Column::Service,
        Column::Customers,
        Column::Revenue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Service => "Service",
            Column::Customers => "Customers",
            Column::Revenue => "Revenue",
        }
    }

    pub fn is_present(&self, record: &Record) -> bool {
        match self {
            Column::Date => record.date.is_some(),
            Column::Service => record.service.is_some(),
            Column::Customers => record.customers.is_some(),
            Column::Revenue => record.revenue.is_some(),
        }
    }
}

/// Numeric columns that can be summarized and grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Customers,
    Revenue,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Customers, Metric::Revenue];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Customers => "Customers",
            Metric::Revenue => "Revenue",
        }
    }

    pub fn value(&self, record: &Record) -> Option<f64> {
        match self {
            Metric::Customers => record.customers.map(f64::from),
            Metric::Revenue => record.revenue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Date,
    Categorical,
    Integer,
    Decimal,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnKind::Date => "date",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Integer => "integer",
            ColumnKind::Decimal => "decimal",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub non_null: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Per-service means in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceMeans {
    entries: Vec<(Service, f64)>,
}

impl ServiceMeans {
    pub fn new(entries: Vec<(Service, f64)>) -> Self {
        Self { entries }
    }

    #[cfg(test)]
    pub fn get(&self, service: Service) -> Option<f64> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == service)
            .map(|(_, mean)| *mean)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Service, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insights {
    pub total_revenue: f64,
    pub busiest: Record,
    pub top_service: Service,
    pub top_service_mean: f64,
}
