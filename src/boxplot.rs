use serde::Serialize;

use crate::stats::NumericStats;

/// Multiplier applied to the interquartile range to place the fences.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotSpec {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    /// Smallest value at or above the lower fence.
    pub lower_whisker: f64,
    /// Largest value at or below the upper fence.
    pub upper_whisker: f64,
    /// Values outside the fences, in row order.
    pub outliers: Vec<f64>,
}

/// Tukey boxplot over `values` (row order). `None` when empty.
pub fn compute_boxplot(column: &str, values: &[f64]) -> Option<BoxplotSpec> {
    let stats = NumericStats::from_values(values)?;
    let q1 = stats.quantile(0.25);
    let q3 = stats.quantile(0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - WHISKER_IQR_FACTOR * iqr;
    let upper_fence = q3 + WHISKER_IQR_FACTOR * iqr;

    let inside = |v: &f64| *v >= lower_fence && *v <= upper_fence;
    // Q1 and Q3 interpolate between in-fence values, so both finds succeed.
    let lower_whisker = stats.sorted().iter().copied().find(inside).unwrap_or(q1);
    let upper_whisker = stats
        .sorted()
        .iter()
        .rev()
        .copied()
        .find(inside)
        .unwrap_or(q3);
    let outliers = values.iter().copied().filter(|v| !inside(v)).collect();

    Some(BoxplotSpec {
        column: column.to_string(),
        count: stats.count(),
        min: stats.min(),
        q1,
        median: stats.median(),
        q3,
        max: stats.max(),
        mean: stats.mean(),
        iqr,
        lower_fence,
        upper_fence,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}
