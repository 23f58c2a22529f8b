//! Optional YAML configuration holding defaults for the command line.
//!
//! ```yaml
//! delimiter: ";"
//! input_encoding: windows-1252
//! limit: 10000
//! preview_rows: 10
//! bins: 20
//! top: 15
//! ```
//!
//! Flags given on the command line win over values from the file.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExploreConfig {
    pub delimiter: Option<String>,
    pub input_encoding: Option<String>,
    pub limit: Option<usize>,
    pub preview_rows: Option<usize>,
    pub bins: Option<usize>,
    pub top: Option<usize>,
}

impl ExploreConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let config = serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing config file {path:?}"))?;
        Ok(config)
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
