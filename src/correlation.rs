use serde::Serialize;

/// Pairwise Pearson correlations between numeric columns.
///
/// `None` marks an undefined coefficient: fewer than two rows where both
/// columns have values, or zero variance over those rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied().flatten()
    }

    pub fn get_by_name(&self, left: &str, right: &str) -> Option<f64> {
        let row = self.columns.iter().position(|c| c == left)?;
        let col = self.columns.iter().position(|c| c == right)?;
        self.get(row, col)
    }
}

pub fn correlation_matrix(columns: &[(&str, &[Option<f64>])]) -> CorrelationMatrix {
    let n = columns.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = pearson(columns[i].1, columns[i].1).map(|_| 1.0);
        for j in (i + 1)..n {
            let r = pearson(columns[i].1, columns[j].1);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix {
        columns: columns.iter().map(|(name, _)| name.to_string()).collect(),
        values,
    }
}

/// Pearson's r over rows where both sides are present.
///
/// Each side is scaled by its largest magnitude first, so the sums of
/// squares stay finite for any finite input.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect::<Vec<_>>();
    if pairs.len() < 2 {
        return None;
    }
    let scale_x = pairs.iter().fold(0.0f64, |acc, (a, _)| acc.max(a.abs()));
    let scale_y = pairs.iter().fold(0.0f64, |acc, (_, b)| acc.max(b.abs()));
    if scale_x == 0.0 || scale_y == 0.0 {
        return None;
    }
    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a / scale_x).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|(_, b)| b / scale_y).sum::<f64>() / count;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a / scale_x - mean_x;
        let dy = b / scale_y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
