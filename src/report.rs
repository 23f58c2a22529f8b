use serde::Serialize;

use crate::{
    boxplot::BoxplotSpec,
    classify::{ColumnClassification, ColumnTypeEntry, column_types},
    correlation::CorrelationMatrix,
    error::Result,
    frequency::ValueCounts,
    histogram::{DEFAULT_BINS, HistogramSpec},
    plan::{ChartKind, ChartPlanner, Planned, SelectionSlot},
    preview::{DEFAULT_PREVIEW_ROWS, Preview, preview},
    summary::{ColumnSummary, describe},
    table::Table,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub preview_rows: usize,
    pub bins: usize,
    /// Value-count entries to keep (0 keeps all).
    pub top: usize,
    pub histogram_column: Option<String>,
    pub boxplot_column: Option<String>,
    pub counts_column: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            bins: DEFAULT_BINS,
            top: 0,
            histogram_column: None,
            boxplot_column: None,
            counts_column: None,
        }
    }
}

/// Everything the exploration page shows for one table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: usize,
    pub columns: usize,
    pub preview: Preview,
    pub column_types: Vec<ColumnTypeEntry>,
    pub summary: Vec<ColumnSummary>,
    pub classification: ColumnClassification,
    pub slots: Vec<SelectionSlot>,
    pub correlation: Planned<CorrelationMatrix>,
    pub histogram: Planned<HistogramSpec>,
    pub boxplot: Planned<BoxplotSpec>,
    pub value_counts: Planned<ValueCounts>,
}

pub fn build_report(table: &Table, options: &ReportOptions) -> Result<Report> {
    let planner = ChartPlanner::new(table);
    let histogram = planner.histogram(options.histogram_column.as_deref(), Some(options.bins))?;
    let boxplot = planner.boxplot(options.boxplot_column.as_deref())?;
    let value_counts = planner.value_counts(options.counts_column.as_deref(), Some(options.top))?;

    let mut slots = planner.slots();
    for slot in &mut slots {
        let chosen = match slot.kind {
            ChartKind::Histogram => histogram.ready().map(|spec| &spec.column),
            ChartKind::Boxplot => boxplot.ready().map(|spec| &spec.column),
            ChartKind::ValueCounts => value_counts.ready().map(|counts| &counts.column),
            ChartKind::Correlation => None,
        };
        if let Some(column) = chosen {
            slot.selected = column.clone();
        }
    }

    Ok(Report {
        rows: table.row_count(),
        columns: table.column_count(),
        preview: preview(table, options.preview_rows),
        column_types: column_types(table),
        summary: describe(table),
        classification: planner.classification().clone(),
        slots,
        correlation: planner.correlation(),
        histogram,
        boxplot,
        value_counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, load_table};

    #[test]
    fn report_reflects_selected_columns() {
        let table = load_table(
            b"city,temp,rain\nOslo,4,10\nRome,18,3\nOslo,6,12\n",
            &LoadOptions::default(),
        )
        .expect("load");
        let options = ReportOptions {
            boxplot_column: Some("rain".to_string()),
            ..ReportOptions::default()
        };
        let report = build_report(&table, &options).expect("report");
        assert_eq!(report.histogram.ready().unwrap().column, "temp");
        assert_eq!(report.boxplot.ready().unwrap().column, "rain");
        let boxplot_slot = report
            .slots
            .iter()
            .find(|slot| slot.kind == ChartKind::Boxplot)
            .unwrap();
        assert_eq!(boxplot_slot.selected, "rain");
        assert_eq!(report.preview.rows.len(), 3);
        assert!(report.correlation.is_ready());
    }
}
