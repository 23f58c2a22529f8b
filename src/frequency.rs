use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    pub percent: f64,
}

/// Occurrences of each distinct value, most frequent first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCounts {
    pub column: String,
    /// Non-missing values counted, including any cut by a `top` limit.
    pub total: usize,
    /// Distinct values before any `top` limit.
    pub distinct: usize,
    pub entries: Vec<ValueCount>,
}

impl ValueCounts {
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.entries
            .iter()
            .map(|entry| (entry.value.as_str(), entry.count))
            .collect()
    }
}

/// Counts non-missing values. Equal counts keep first-seen order; `top = 0`
/// keeps every value.
pub fn compute_value_counts(column: &str, values: &[Option<String>], top: usize) -> ValueCounts {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counted: Vec<(&str, usize)> = Vec::new();
    let mut total = 0usize;
    for value in values.iter().flatten() {
        total += 1;
        match positions.get(value.as_str()) {
            Some(&idx) => counted[idx].1 += 1,
            None => {
                positions.insert(value.as_str(), counted.len());
                counted.push((value.as_str(), 1));
            }
        }
    }
    // `sort_by` is stable, which preserves first-seen order among ties.
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    let distinct = counted.len();
    if top > 0 && counted.len() > top {
        counted.truncate(top);
    }

    let entries = counted
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
            percent: (count as f64 / total as f64) * 100.0,
        })
        .collect();

    ValueCounts {
        column: column.to_string(),
        total,
        distinct,
        entries,
    }
}
