use itertools::{Itertools, MinMaxResult};
use serde::Serialize;

use crate::error::{ExploreError, Result};

pub const DEFAULT_BINS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub column: String,
    /// `counts.len() + 1` ascending edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub total: usize,
}

impl HistogramSpec {
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Half-open `[start, end)` range of bin `idx`; the last bin is closed.
    pub fn bin_range(&self, idx: usize) -> Option<(f64, f64)> {
        Some((*self.edges.get(idx)?, *self.edges.get(idx + 1)?))
    }
}

/// Equal-width bins spanning the observed range of `values`.
///
/// A constant column is widened around its value so every bin has a
/// positive width. Edges stay finite even when the range itself overflows.
pub fn compute_histogram(column: &str, values: &[f64], bins: usize) -> Result<HistogramSpec> {
    if bins == 0 {
        return Err(ExploreError::InvalidParameter(
            "histogram bin count must be at least 1".to_string(),
        ));
    }
    let (low, high) = match values.iter().copied().minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => widen(0.0, bins),
        MinMaxResult::OneElement(v) => widen(v, bins),
        MinMaxResult::MinMax(min, max) if min == max => widen(min, bins),
        MinMaxResult::MinMax(min, max) => (min, max),
    };
    let count = bins as f64;
    let span = high - low;
    let width = if span.is_finite() {
        span / count
    } else {
        high / count - low / count
    };

    let mut edges = Vec::with_capacity(bins + 1);
    edges.push(low);
    for i in 1..bins {
        let edge = low + width * i as f64;
        if edge.is_finite() {
            edges.push(edge);
        } else {
            let t = i as f64 / count;
            edges.push(low * (1.0 - t) + high * t);
        }
    }
    edges.push(high);

    let mut counts = vec![0usize; bins];
    for value in values {
        let distance = value - low;
        let offset = if distance.is_finite() {
            (distance / width).floor()
        } else {
            (value / width - low / width).floor()
        };
        let idx = if offset <= 0.0 {
            0
        } else {
            (offset as usize).min(bins - 1)
        };
        counts[idx] += 1;
    }

    Ok(HistogramSpec {
        column: column.to_string(),
        edges,
        counts,
        total: values.len(),
    })
}

/// Range around a single value: at least `±0.5`, and wide enough that each
/// bin spans a few representable steps at large magnitudes.
fn widen(value: f64, bins: usize) -> (f64, f64) {
    let pad = (value.abs() * f64::EPSILON * bins as f64).max(0.5);
    ((value - pad).max(f64::MIN), (value + pad).min(f64::MAX))
}
