//! I/O helpers for reading uploads: encoding, delimiter resolution and CSV
//! reader construction.
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` → comma,
//!   `.tsv` → tab) with manual override support.
//! - **Encoding**: whole-upload decoding via `encoding_rs`, defaulting to UTF-8.
//! - **stdin**: the `-` path convention reads the upload from standard input.

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use encoding_rs::{Encoding, UTF_8};

use crate::error::{ExploreError, Result};

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| ExploreError::InvalidParameter(format!("Unknown encoding '{value}'")))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(path: &Path, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

/// Reads the whole upload into memory; `-` reads standard input.
pub fn read_input_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    if is_dash(path) {
        io::stdin().lock().read_to_end(&mut bytes)?;
    } else {
        let file = File::open(path).map_err(|err| {
            io::Error::new(err.kind(), format!("Opening input file {path:?}: {err}"))
        })?;
        BufReader::new(file).read_to_end(&mut bytes)?;
    }
    Ok(bytes)
}

/// Record lengths are validated by the loader, so the reader is flexible.
pub fn open_csv_reader<R>(reader: R, delimiter: u8) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(true);
    builder.from_reader(reader)
}

/// Decodes an upload, dropping a leading byte-order mark for `encoding`.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        Err(ExploreError::parse(format!(
            "input is not valid {} text",
            encoding.name()
        )))
    } else {
        Ok(text.into_owned())
    }
}
