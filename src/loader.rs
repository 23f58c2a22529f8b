use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::debug;

use crate::{
    error::{ExploreError, Result},
    io_utils,
    table::{Column, ColumnData, ColumnType, Table},
};

/// Tokens read as missing values, compared after trimming.
const MISSING_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA",
];

#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub encoding: &'static Encoding,
    /// Maximum number of data rows to read.
    pub row_limit: Option<usize>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: io_utils::DEFAULT_CSV_DELIMITER,
            encoding: UTF_8,
            row_limit: None,
        }
    }
}

pub fn load_table_from_path(path: &Path, options: &LoadOptions) -> Result<Table> {
    let bytes = io_utils::read_input_bytes(path)?;
    load_table(&bytes, options)
}

/// Parses delimited text with a header row into a typed [`Table`].
///
/// Short rows are padded with missing values; rows with more fields than the
/// header are rejected.
pub fn load_table(bytes: &[u8], options: &LoadOptions) -> Result<Table> {
    let text = io_utils::decode_bytes(bytes, options.encoding)?;
    if text.trim().is_empty() {
        return Err(ExploreError::parse("no columns to parse from input"));
    }

    let mut reader = io_utils::open_csv_reader(text.as_bytes(), options.delimiter);
    let headers = unique_headers(reader.headers()?.iter());
    let width = headers.len();

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut candidates = vec![TypeCandidate::new(); width];
    let mut record = csv::StringRecord::new();
    let mut rows = 0usize;
    while reader.read_record(&mut record)? {
        if let Some(limit) = options.row_limit
            && rows >= limit
        {
            break;
        }
        if record.len() > width {
            let line = record.position().map_or(0, |pos| pos.line());
            return Err(ExploreError::parse(format!(
                "line {line}: expected {width} field(s), found {}",
                record.len()
            )));
        }
        if width > 1 && record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        for (idx, column) in cells.iter_mut().enumerate() {
            let value = record.get(idx).and_then(normalize_cell);
            if let Some(value) = &value {
                candidates[idx].update(value);
            }
            column.push(value);
        }
        rows += 1;
    }

    let columns = headers
        .into_iter()
        .zip(cells)
        .zip(candidates)
        .map(|((name, values), candidate)| {
            let datatype = candidate.decide();
            debug!(
                "Column '{name}' inferred as {} from {} value(s)",
                datatype.label(),
                candidate.non_empty
            );
            build_column(name, datatype, values)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Loaded {rows} row(s) across {width} column(s)");
    Table::new(columns)
}

fn build_column(name: String, datatype: ColumnType, values: Vec<Option<String>>) -> Result<Column> {
    match datatype {
        ColumnType::Integer | ColumnType::Float => {
            let numbers = values
                .iter()
                .map(|value| value.as_deref().and_then(parse_finite))
                .collect();
            Column::new(name, datatype, ColumnData::Numeric(numbers))
        }
        _ => Column::new(name, datatype, ColumnData::Text(values)),
    }
}

fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Blank names become `Unnamed: {index}`; repeats get `.1`, `.2`, ...
fn unique_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for (idx, header) in raw.enumerate() {
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while headers.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        headers.push(candidate);
    }
    headers
}

#[derive(Debug, Clone)]
struct TypeCandidate {
    non_empty: usize,
    possible_integer: bool,
    possible_float: bool,
    possible_boolean: bool,
}

impl TypeCandidate {
    fn new() -> Self {
        Self {
            non_empty: 0,
            possible_integer: true,
            possible_float: true,
            possible_boolean: true,
        }
    }

    fn update(&mut self, value: &str) {
        self.non_empty += 1;
        if self.possible_integer && value.parse::<i64>().is_err() {
            self.possible_integer = false;
        }
        if self.possible_float && parse_finite(value).is_none() {
            self.possible_float = false;
        }
        if self.possible_boolean
            && !value.eq_ignore_ascii_case("true")
            && !value.eq_ignore_ascii_case("false")
        {
            self.possible_boolean = false;
        }
    }

    fn decide(&self) -> ColumnType {
        if self.non_empty == 0 {
            ColumnType::Empty
        } else if self.possible_integer {
            ColumnType::Integer
        } else if self.possible_float {
            ColumnType::Float
        } else if self.possible_boolean {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }
}
