//! In-memory table model produced by the loader.
//!
//! A [`Table`] is an ordered list of named [`Column`]s with identical row
//! counts. Each column carries the [`ColumnType`] inferred at load time and
//! the coarse [`ColumnKind`] tag the chart planner works from. Tables are
//! immutable once built; a new upload produces a new table.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{ExploreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    String,
    /// No non-missing values were observed.
    Empty,
}

/// Semantic tag used for chart eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Other,
}

impl ColumnType {
    pub const fn kind(self) -> ColumnKind {
        match self {
            ColumnType::Integer | ColumnType::Float => ColumnKind::Numeric,
            ColumnType::String => ColumnKind::Categorical,
            ColumnType::Boolean | ColumnType::Empty => ColumnKind::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Integer => "Integer",
            ColumnType::Float => "Float",
            ColumnType::Boolean => "Boolean",
            ColumnType::String => "String",
            ColumnType::Empty => "Empty",
        }
    }
}

impl ColumnKind {
    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Categorical => "categorical",
            ColumnKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    datatype: ColumnType,
    data: ColumnData,
}

impl Column {
    /// Builds a column, rejecting storage that does not fit the datatype.
    pub fn new(name: impl Into<String>, datatype: ColumnType, data: ColumnData) -> Result<Self> {
        let name = name.into();
        let numeric = datatype.kind() == ColumnKind::Numeric;
        let fits = match &data {
            ColumnData::Numeric(_) => numeric,
            ColumnData::Text(_) => !numeric,
        };
        if !fits {
            return Err(ExploreError::InvalidTable(format!(
                "column '{name}' of type {} has mismatched storage",
                datatype.label()
            )));
        }
        Ok(Self {
            name,
            datatype,
            data,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> ColumnType {
        self.datatype
    }

    pub fn kind(&self) -> ColumnKind {
        self.datatype.kind()
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Numeric cells, or `None` when the column does not hold numbers.
    pub fn numbers(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(values) => Some(values),
            ColumnData::Text(_) => None,
        }
    }

    /// Text cells, or `None` when the column holds numbers.
    pub fn texts(&self) -> Option<&[Option<String>]> {
        match &self.data {
            ColumnData::Text(values) => Some(values),
            ColumnData::Numeric(_) => None,
        }
    }

    /// Non-missing numeric values in row order.
    pub fn present_numbers(&self) -> Vec<f64> {
        self.numbers()
            .map(|values| values.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(values) => values.iter().filter(|v| v.is_none()).count(),
            ColumnData::Text(values) => values.iter().filter(|v| v.is_none()).count(),
        }
    }

    pub fn present_count(&self) -> usize {
        self.len() - self.missing_count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(ExploreError::InvalidTable(
                "a table needs at least one column".to_string(),
            ));
        };
        let row_count = first.len();
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(ExploreError::InvalidTable(format!(
                    "duplicate column name '{}'",
                    column.name()
                )));
            }
            if column.len() != row_count {
                return Err(ExploreError::InvalidTable(format!(
                    "column '{}' has {} row(s), expected {row_count}",
                    column.name(),
                    column.len()
                )));
            }
        }
        Ok(Self { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
