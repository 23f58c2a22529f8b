//! Order statistics and moments over the non-missing values of a numeric
//! column. Shared by the boxplot planner and the describe table.

#[derive(Debug, Clone)]
pub struct NumericStats {
    sorted: Vec<f64>,
    sum: f64,
}

impl NumericStats {
    /// Returns `None` when there are no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let sum = sorted.iter().sum();
        Some(Self { sorted, sum })
    }

    pub fn count(&self) -> usize {
        self.sorted.len()
    }

    pub fn min(&self) -> f64 {
        self.sorted[0]
    }

    pub fn max(&self) -> f64 {
        self.sorted[self.sorted.len() - 1]
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count() as f64
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn std_dev(&self) -> Option<f64> {
        if self.count() < 2 {
            return None;
        }
        let mean = self.mean();
        let squares: f64 = self.sorted.iter().map(|v| (v - mean).powi(2)).sum();
        Some((squares / (self.count() as f64 - 1.0)).sqrt())
    }

    /// Linear interpolation between closest ranks at position `q * (n - 1)`.
    pub fn quantile(&self, q: f64) -> f64 {
        let q = q.clamp(0.0, 1.0);
        let position = q * (self.count() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        let low = self.sorted[lower];
        let high = self.sorted[upper];
        low + (high - low) * (position - lower as f64)
    }

    pub fn median(&self) -> f64 {
        self.quantile(0.5)
    }

    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }
}
