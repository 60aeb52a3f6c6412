use std::path::PathBuf;

use thiserror::Error;

/// Structural problems found while assembling a table from columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("column {column} has {actual} values, expected {expected}")]
    ColumnLength {
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("dates are not strictly increasing at row {index}")]
    UnorderedDates { index: usize },

    #[error("start date is out of range")]
    InvalidStartDate,
}

/// Failures while acquiring or inspecting the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset file not found: {}", path.display())]
    DatasetUnavailable { path: PathBuf },

    #[error("{0}")]
    UnexpectedFailure(String),
}

impl From<ConstructionError> for LoadError {
    fn from(err: ConstructionError) -> Self {
        LoadError::UnexpectedFailure(err.to_string())
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::UnexpectedFailure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_errors_become_unexpected_failures() {
        let err = LoadError::from(ConstructionError::UnorderedDates { index: 4 });
        match err {
            LoadError::UnexpectedFailure(message) => {
                assert_eq!(message, "dates are not strictly increasing at row 4");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
