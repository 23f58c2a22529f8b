//! Chart planning: which columns each chart kind may use, and the chart
//! specifications derived from a selection.
//!
//! A [`ChartPlanner`] is bound to one [`Table`] and classifies its columns
//! once. Each selectable chart kind exposes exactly one [`SelectionSlot`]
//! whose options are the eligible columns. A chart with no eligible column
//! plans to [`Planned::NotApplicable`], which is an ordinary outcome. A
//! request naming a column outside the eligible set fails with
//! [`ExploreError::InvalidSelection`].

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    boxplot::{BoxplotSpec, compute_boxplot},
    classify::{ColumnClassification, classify},
    correlation::{CorrelationMatrix, correlation_matrix},
    error::{ExploreError, Result},
    frequency::{ValueCounts, compute_value_counts},
    histogram::{DEFAULT_BINS, HistogramSpec, compute_histogram},
    table::{ColumnKind, Table},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Correlation,
    Histogram,
    Boxplot,
    ValueCounts,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Correlation,
        ChartKind::Histogram,
        ChartKind::Boxplot,
        ChartKind::ValueCounts,
    ];

    /// Column kind this chart draws from.
    pub fn eligible_kind(self) -> ColumnKind {
        match self {
            ChartKind::Correlation | ChartKind::Histogram | ChartKind::Boxplot => {
                ColumnKind::Numeric
            }
            ChartKind::ValueCounts => ColumnKind::Categorical,
        }
    }

    /// The correlation heatmap spans every numeric column at once.
    pub fn takes_selection(self) -> bool {
        !matches!(self, ChartKind::Correlation)
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Correlation => "correlation heatmap",
            ChartKind::Histogram => "histogram",
            ChartKind::Boxplot => "boxplot",
            ChartKind::ValueCounts => "value counts",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum Planned<T> {
    Ready(T),
    NotApplicable { kind: ChartKind, reason: String },
}

impl<T> Planned<T> {
    fn not_applicable(kind: ChartKind) -> Self {
        let reason = match kind.eligible_kind() {
            ColumnKind::Numeric => "No numerical columns found in the dataset.",
            _ => "No categorical columns found in the dataset.",
        };
        Planned::NotApplicable {
            kind,
            reason: reason.to_string(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Planned::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Planned::Ready(value) => Some(value),
            Planned::NotApplicable { .. } => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Planned::Ready(value) => Some(value),
            Planned::NotApplicable { .. } => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Planned<U> {
        match self {
            Planned::Ready(value) => Planned::Ready(f(value)),
            Planned::NotApplicable { kind, reason } => Planned::NotApplicable { kind, reason },
        }
    }
}

/// A single select box: the eligible columns and the current choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSlot {
    pub kind: ChartKind,
    pub options: Vec<String>,
    pub selected: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub column: Option<String>,
    pub bins: Option<usize>,
    pub top: Option<usize>,
}

impl ChartRequest {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            column: None,
            bins: None,
            top: None,
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn bins(mut self, bins: usize) -> Self {
        self.bins = Some(bins);
        self
    }

    pub fn top(mut self, top: usize) -> Self {
        self.top = Some(top);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "spec", rename_all = "snake_case")]
pub enum Chart {
    Correlation(CorrelationMatrix),
    Histogram(HistogramSpec),
    Boxplot(BoxplotSpec),
    ValueCounts(ValueCounts),
}

#[derive(Debug, Clone)]
pub struct ChartPlanner<'a> {
    table: &'a Table,
    classification: ColumnClassification,
}

impl<'a> ChartPlanner<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            classification: classify(table),
        }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn classification(&self) -> &ColumnClassification {
        &self.classification
    }

    pub fn eligible(&self, kind: ChartKind) -> &[String] {
        match kind.eligible_kind() {
            ColumnKind::Numeric => &self.classification.numeric,
            _ => &self.classification.categorical,
        }
    }

    pub fn is_applicable(&self, kind: ChartKind) -> bool {
        !self.eligible(kind).is_empty()
    }

    /// `None` for the correlation heatmap and for kinds with no eligible column.
    pub fn slot(&self, kind: ChartKind) -> Option<SelectionSlot> {
        if !kind.takes_selection() {
            return None;
        }
        let options = self.eligible(kind).to_vec();
        let selected = options.first()?.clone();
        Some(SelectionSlot {
            kind,
            options,
            selected,
        })
    }

    pub fn slots(&self) -> Vec<SelectionSlot> {
        ChartKind::ALL
            .iter()
            .filter_map(|kind| self.slot(*kind))
            .collect()
    }

    /// Resolves the column a chart will use, defaulting to the slot's first
    /// option.
    pub fn select(&self, kind: ChartKind, requested: Option<&str>) -> Result<Planned<String>> {
        if !kind.takes_selection() {
            return match requested {
                Some(column) => Err(no_selection(kind, column)),
                None => Err(ExploreError::InvalidParameter(format!(
                    "the {kind} has no selection slot"
                ))),
            };
        }
        let eligible = self.eligible(kind);
        match requested {
            Some(column) if eligible.iter().any(|c| c == column) => {
                debug!("Selected '{column}' for {kind}");
                Ok(Planned::Ready(column.to_string()))
            }
            Some(column) => Err(self.invalid_selection(kind, column)),
            None => match eligible.first() {
                Some(column) => {
                    debug!("Defaulted {kind} selection to '{column}'");
                    Ok(Planned::Ready(column.clone()))
                }
                None => Ok(Planned::not_applicable(kind)),
            },
        }
    }

    fn invalid_selection(&self, kind: ChartKind, column: &str) -> ExploreError {
        let reason = match self.table.column(column) {
            None => "no such column in the table".to_string(),
            Some(found) => format!(
                "column is {} but the {kind} requires a {} column",
                found.kind().label(),
                kind.eligible_kind().label()
            ),
        };
        ExploreError::InvalidSelection {
            kind,
            column: column.to_string(),
            reason,
        }
    }

    fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        self.table
            .column(name)
            .filter(|column| column.numbers().is_some())
            .map(|column| column.present_numbers())
            .ok_or_else(|| {
                ExploreError::InvalidTable(format!("column '{name}' has no numeric storage"))
            })
    }

    pub fn correlation(&self) -> Planned<CorrelationMatrix> {
        let columns = self
            .classification
            .numeric
            .iter()
            .filter_map(|name| {
                let column = self.table.column(name)?;
                Some((column.name(), column.numbers()?))
            })
            .collect::<Vec<_>>();
        if columns.is_empty() {
            return Planned::not_applicable(ChartKind::Correlation);
        }
        debug!("Correlating {} numeric column(s)", columns.len());
        Planned::Ready(correlation_matrix(&columns))
    }

    pub fn histogram(
        &self,
        column: Option<&str>,
        bins: Option<usize>,
    ) -> Result<Planned<HistogramSpec>> {
        let bins = bins.unwrap_or(DEFAULT_BINS);
        if bins == 0 {
            return Err(ExploreError::InvalidParameter(
                "histogram bin count must be at least 1".to_string(),
            ));
        }
        let Planned::Ready(name) = self.select(ChartKind::Histogram, column)? else {
            return Ok(Planned::not_applicable(ChartKind::Histogram));
        };
        let values = self.numeric_values(&name)?;
        compute_histogram(&name, &values, bins).map(Planned::Ready)
    }

    pub fn boxplot(&self, column: Option<&str>) -> Result<Planned<BoxplotSpec>> {
        let Planned::Ready(name) = self.select(ChartKind::Boxplot, column)? else {
            return Ok(Planned::not_applicable(ChartKind::Boxplot));
        };
        let values = self.numeric_values(&name)?;
        compute_boxplot(&name, &values)
            .map(Planned::Ready)
            .ok_or_else(|| ExploreError::InvalidTable(format!("column '{name}' has no values")))
    }

    pub fn value_counts(
        &self,
        column: Option<&str>,
        top: Option<usize>,
    ) -> Result<Planned<ValueCounts>> {
        let Planned::Ready(name) = self.select(ChartKind::ValueCounts, column)? else {
            return Ok(Planned::not_applicable(ChartKind::ValueCounts));
        };
        let values = self
            .table
            .column(&name)
            .and_then(|column| column.texts())
            .ok_or_else(|| {
                ExploreError::InvalidTable(format!("column '{name}' has no text storage"))
            })?;
        Ok(Planned::Ready(compute_value_counts(
            &name,
            values,
            top.unwrap_or(0),
        )))
    }

    pub fn plan(&self, request: &ChartRequest) -> Result<Planned<Chart>> {
        let kind = request.kind;
        if request.bins.is_some() && kind != ChartKind::Histogram {
            return Err(ExploreError::InvalidParameter(format!(
                "bins apply to histograms, not the {kind}"
            )));
        }
        if request.top.is_some() && kind != ChartKind::ValueCounts {
            return Err(ExploreError::InvalidParameter(format!(
                "top applies to value counts, not the {kind}"
            )));
        }
        let column = request.column.as_deref();
        match kind {
            ChartKind::Correlation => {
                if let Some(column) = column {
                    return Err(no_selection(kind, column));
                }
                Ok(self.correlation().map(Chart::Correlation))
            }
            ChartKind::Histogram => Ok(self
                .histogram(column, request.bins)?
                .map(Chart::Histogram)),
            ChartKind::Boxplot => Ok(self.boxplot(column)?.map(Chart::Boxplot)),
            ChartKind::ValueCounts => Ok(self
                .value_counts(column, request.top)?
                .map(Chart::ValueCounts)),
        }
    }
}

fn no_selection(kind: ChartKind, column: &str) -> ExploreError {
    ExploreError::InvalidSelection {
        kind,
        column: column.to_string(),
        reason: "this chart uses every numeric column and takes no selection".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, load_table};

    fn table(text: &str) -> Table {
        load_table(text.as_bytes(), &LoadOptions::default()).expect("load")
    }

    #[test]
    fn slots_offer_eligible_columns() {
        let table = table("name,age,height\nAlice,30,1.6\nBob,41,1.8\n");
        let planner = ChartPlanner::new(&table);
        let slot = planner.slot(ChartKind::Histogram).unwrap();
        assert_eq!(slot.options, vec!["age", "height"]);
        assert_eq!(slot.selected, "age");
        assert_eq!(
            planner.slot(ChartKind::ValueCounts).unwrap().options,
            vec!["name"]
        );
        assert!(planner.slot(ChartKind::Correlation).is_none());
        assert_eq!(planner.slots().len(), 3);
    }

    #[test]
    fn selection_outside_the_set_is_rejected() {
        let table = table("name,age\nAlice,30\n");
        let planner = ChartPlanner::new(&table);
        let err = planner.histogram(Some("name"), None).unwrap_err();
        match err {
            ExploreError::InvalidSelection { kind, column, reason } => {
                assert_eq!(kind, ChartKind::Histogram);
                assert_eq!(column, "name");
                assert!(reason.contains("categorical"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(planner.value_counts(Some("age"), None).is_err());
        assert!(planner.boxplot(Some("missing")).is_err());
    }

    #[test]
    fn text_only_tables_skip_numeric_charts() {
        let table = table("city,country\nOslo,Norway\nLyon,France\n");
        let planner = ChartPlanner::new(&table);
        assert!(!planner.correlation().is_ready());
        assert!(!planner.histogram(None, None).unwrap().is_ready());
        assert!(!planner.boxplot(None).unwrap().is_ready());
        assert!(planner.value_counts(None, None).unwrap().is_ready());
    }

    #[test]
    fn numeric_only_tables_skip_value_counts() {
        let table = table("a,b\n1,2\n3,4\n");
        let planner = ChartPlanner::new(&table);
        match planner.value_counts(None, None).unwrap() {
            Planned::NotApplicable { kind, reason } => {
                assert_eq!(kind, ChartKind::ValueCounts);
                assert!(reason.contains("categorical"));
            }
            Planned::Ready(_) => panic!("expected not applicable"),
        }
    }

    #[test]
    fn histogram_uses_override_bins() {
        let table = table("x\n1\n2\n3\n4\n");
        let planner = ChartPlanner::new(&table);
        let spec = planner.histogram(None, Some(2)).unwrap().into_ready().unwrap();
        assert_eq!(spec.counts, vec![2, 2]);
        let default = planner.histogram(None, None).unwrap().into_ready().unwrap();
        assert_eq!(default.bins(), DEFAULT_BINS);
    }

    #[test]
    fn plan_dispatches_requests() {
        let table = table("name,score\na,1\nb,2\na,3\n");
        let planner = ChartPlanner::new(&table);
        let chart = planner
            .plan(&ChartRequest::new(ChartKind::ValueCounts).column("name"))
            .unwrap();
        match chart.into_ready() {
            Some(Chart::ValueCounts(counts)) => {
                assert_eq!(counts.pairs(), vec![("a", 2), ("b", 1)])
            }
            other => panic!("unexpected chart {other:?}"),
        }
        assert!(matches!(
            planner.plan(&ChartRequest::new(ChartKind::Boxplot).bins(3)),
            Err(ExploreError::InvalidParameter(_))
        ));
        assert!(matches!(
            planner.plan(&ChartRequest::new(ChartKind::Correlation).column("score")),
            Err(ExploreError::InvalidSelection { .. })
        ));
        assert!(matches!(
            planner.plan(&ChartRequest::new(ChartKind::Histogram).bins(0)),
            Err(ExploreError::InvalidParameter(_))
        ));
    }
}
