use serde::Serialize;

use crate::{
    frequency::compute_value_counts,
    stats::NumericStats,
    table::{ColumnKind, ColumnType, Table},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub mean: f64,
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalSummary {
    pub unique: usize,
    pub top: String,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub datatype: ColumnType,
    pub kind: ColumnKind,
    pub count: usize,
    pub missing: usize,
    pub numeric: Option<NumericSummary>,
    pub categorical: Option<CategoricalSummary>,
}

/// Describe table with one entry per column, in table order.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    table
        .columns()
        .iter()
        .map(|column| {
            let numeric = match column.kind() {
                ColumnKind::Numeric => {
                    NumericStats::from_values(&column.present_numbers()).map(|stats| {
                        NumericSummary {
                            mean: stats.mean(),
                            std_dev: stats.std_dev(),
                            min: stats.min(),
                            q1: stats.quantile(0.25),
                            median: stats.median(),
                            q3: stats.quantile(0.75),
                            max: stats.max(),
                        }
                    })
                }
                _ => None,
            };
            let categorical = match (column.kind(), column.texts()) {
                (ColumnKind::Categorical, Some(values)) => {
                    let counts = compute_value_counts(column.name(), values, 0);
                    counts.entries.first().map(|top| CategoricalSummary {
                        unique: counts.distinct,
                        top: top.value.clone(),
                        freq: top.count,
                    })
                }
                _ => None,
            };
            ColumnSummary {
                column: column.name().to_string(),
                datatype: column.datatype(),
                kind: column.kind(),
                count: column.present_count(),
                missing: column.missing_count(),
                numeric,
                categorical,
            }
        })
        .collect()
}
