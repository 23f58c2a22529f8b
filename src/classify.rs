use serde::Serialize;

use crate::table::{ColumnKind, ColumnType, Table};

/// Inferred type and chart-facing kind of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnTypeEntry {
    pub column: String,
    pub datatype: ColumnType,
    pub kind: ColumnKind,
}

/// Numeric and categorical column names, each in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    pub fn is_numeric(&self, name: &str) -> bool {
        self.numeric.iter().any(|c| c == name)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical.iter().any(|c| c == name)
    }
}

pub fn classify(table: &Table) -> ColumnClassification {
    let mut classification = ColumnClassification::default();
    for column in table.columns() {
        match column.kind() {
            ColumnKind::Numeric => classification.numeric.push(column.name().to_string()),
            ColumnKind::Categorical => classification.categorical.push(column.name().to_string()),
            ColumnKind::Other => {}
        }
    }
    classification
}

pub fn column_types(table: &Table) -> Vec<ColumnTypeEntry> {
    table
        .columns()
        .iter()
        .map(|column| ColumnTypeEntry {
            column: column.name().to_string(),
            datatype: column.datatype(),
            kind: column.kind(),
        })
        .collect()
}
