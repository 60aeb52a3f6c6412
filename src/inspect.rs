use crate::models::{Column, ColumnKind, ColumnSchema, Table};

fn kind_of(column: Column) -> ColumnKind {
    match column {
        Column::Date => ColumnKind::Date,
        Column::Service => ColumnKind::Categorical,
        Column::Customers => ColumnKind::Integer,
        Column::Revenue => ColumnKind::Decimal,
    }
}

fn non_null(table: &Table, column: Column) -> usize {
    table
        .records()
        .iter()
        .filter(|record| column.is_present(record))
        .count()
}

pub fn schema(table: &Table) -> Vec<ColumnSchema> {
    Column::ALL
        .iter()
        .map(|&column| ColumnSchema {
            name: column.name(),
            kind: kind_of(column),
            non_null: non_null(table, column),
        })
        .collect()
}

/// Missing cells per column, counted by scanning every record.
pub fn missing_counts(table: &Table) -> Vec<(&'static str, usize)> {
    Column::ALL
        .iter()
        .map(|&column| (column.name(), table.len() - non_null(table, column)))
        .collect()
}
