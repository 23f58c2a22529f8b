use std::path::Path;

use log::debug;

use crate::{
    error::Result,
    io_utils,
    loader::{LoadOptions, load_table},
    plan::ChartPlanner,
    table::Table,
};

#[derive(Debug, Default)]
pub enum SessionState {
    #[default]
    NoTable,
    TableLoaded(Table),
}

/// Owns the current table. Each successful upload replaces it whole; a
/// failed upload leaves the session as it was.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    options: LoadOptions,
}

impl Session {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            state: SessionState::NoTable,
            options,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::TableLoaded(_))
    }

    pub fn table(&self) -> Option<&Table> {
        match &self.state {
            SessionState::TableLoaded(table) => Some(table),
            SessionState::NoTable => None,
        }
    }

    pub fn into_table(self) -> Option<Table> {
        match self.state {
            SessionState::TableLoaded(table) => Some(table),
            SessionState::NoTable => None,
        }
    }

    pub fn planner(&self) -> Option<ChartPlanner<'_>> {
        self.table().map(ChartPlanner::new)
    }

    pub fn upload(&mut self, bytes: &[u8]) -> Result<()> {
        let table = load_table(bytes, &self.options)?;
        if self.is_loaded() {
            debug!("Replacing the loaded table");
        }
        debug!(
            "Session holds {} row(s) across {} column(s)",
            table.row_count(),
            table.column_count()
        );
        self.state = SessionState::TableLoaded(table);
        Ok(())
    }

    pub fn upload_path(&mut self, path: &Path) -> Result<()> {
        let bytes = io_utils::read_input_bytes(path)?;
        self.upload(&bytes)
    }
}
