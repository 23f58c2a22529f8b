use thiserror::Error;

use crate::plan::ChartKind;

pub type Result<T, E = ExploreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ExploreError {
    /// The upload could not be read as delimited text with a header row.
    #[error("Unable to parse input: {0}")]
    Parse(String),
    /// A chart request named a column outside the set its chart kind accepts.
    #[error("Column '{column}' cannot be used for {kind}: {reason}")]
    InvalidSelection {
        kind: ChartKind,
        column: String,
        reason: String,
    },
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Invalid table: {0}")]
    InvalidTable(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ExploreError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        ExploreError::Parse(message.into())
    }
}

impl From<csv::Error> for ExploreError {
    fn from(err: csv::Error) -> Self {
        ExploreError::Parse(err.to_string())
    }
}
