use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{ConstructionError, LoadError};
use crate::models::{Record, Service, Table};

pub const DAYS: usize = 20;

const CUSTOMERS: [u32; DAYS] = [
    20, 15, 30, 12, 8, 25, 18, 35, 10, 6, 22, 14, 33, 11, 7, 26, 20, 40, 9, 5,
];

const REVENUE: [f64; DAYS] = [
    1000.0, 750.0, 1500.0, 1200.0, 400.0, 1100.0, 900.0, 1750.0, 1300.0, 300.0, 1050.0, 720.0,
    1650.0, 1250.0, 350.0, 1200.0, 950.0, 1800.0, 1150.0, 280.0,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Builtin,
    Csv(PathBuf),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Builtin => "embedded dataset".to_string(),
            DatasetSource::Csv(path) => path.display().to_string(),
        }
    }
}

/// Twenty days of service records starting 2025-09-01.
pub fn builtin() -> Result<Table, ConstructionError> {
    let start = NaiveDate::from_ymd_opt(2025, 9, 1).ok_or(ConstructionError::InvalidStartDate)?;
    let dates: Vec<NaiveDate> = start.iter_days().take(DAYS).collect();
    let services: Vec<Service> = Service::ALL.iter().copied().cycle().take(DAYS).collect();

    Table::from_columns(
        DAYS,
        dates,
        services,
        CUSTOMERS.to_vec(),
        REVENUE.to_vec(),
    )
}

/// Reads a headed `Date,Service,Customers,Revenue` file. Blank cells load as
/// missing values. Rows must hold non-negative revenue and dates that are
/// present must increase.
pub fn from_csv(path: &Path) -> Result<Table, LoadError> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoadError::DatasetUnavailable {
            path: path.to_path_buf(),
        },
        _ => LoadError::UnexpectedFailure(format!("failed to open {}: {err}", path.display())),
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<Record>().enumerate() {
        records.push(check_revenue(index, result?)?);
    }
    check_date_order(&records)?;

    Ok(Table::new(records))
}

/// `NaN` revenue loads as a missing cell; infinite or negative revenue is
/// rejected.
fn check_revenue(index: usize, mut record: Record) -> Result<Record, LoadError> {
    match record.revenue {
        Some(value) if value.is_nan() => record.revenue = None,
        Some(value) if value.is_infinite() || value < 0.0 => {
            return Err(LoadError::UnexpectedFailure(format!(
                "row {index}: revenue {value} is not a non-negative amount"
            )));
        }
        _ => {}
    }
    Ok(record)
}

/// Dates that are present must be strictly increasing.
fn check_date_order(records: &[Record]) -> Result<(), ConstructionError> {
    let dated: Vec<(usize, NaiveDate)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| Some((index, record.date?)))
        .collect();

    match dated.windows(2).find(|pair| pair[0].1 >= pair[1].1) {
        Some(pair) => Err(ConstructionError::UnorderedDates { index: pair[1].0 }),
        None => Ok(()),
    }
}

pub fn load(source: &DatasetSource) -> Result<Table, LoadError> {
    let table = match source {
        DatasetSource::Builtin => builtin()?,
        DatasetSource::Csv(path) => from_csv(path)?,
    };

    tracing::info!(
        source = %source.describe(),
        rows = table.len(),
        "dataset loaded"
    );
    Ok(table)
}
