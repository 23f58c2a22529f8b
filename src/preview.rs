use serde::Serialize;

use crate::table::{ColumnData, Table};

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Rows in the table, shown or not.
    pub total_rows: usize,
}

/// First `rows` rows of `table` as display strings; missing cells are empty.
pub fn preview(table: &Table, rows: usize) -> Preview {
    let shown = rows.min(table.row_count());
    let rendered = (0..shown)
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|column| match column.data() {
                    ColumnData::Numeric(values) => {
                        values[row].map(display_number).unwrap_or_default()
                    }
                    ColumnData::Text(values) => values[row].clone().unwrap_or_default(),
                })
                .collect()
        })
        .collect();
    Preview {
        headers: table.headers(),
        rows: rendered,
        total_rows: table.row_count(),
    }
}

/// Integral values print without a fraction; others round to at most four
/// decimals with trailing zeros dropped.
fn display_number(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e15 {
        return value.to_string();
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.4}");
    match fixed.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadOptions, load_table};

    #[test]
    fn preview_renders_head_rows() {
        let table = load_table(
            b"name,age,score\nAlice,30,1.25\nBob,,2\nCara,25,3.5\n",
            &LoadOptions::default(),
        )
        .expect("load");
        let head = preview(&table, 2);
        assert_eq!(head.headers, vec!["name", "age", "score"]);
        assert_eq!(
            head.rows,
            vec![
                vec!["Alice".to_string(), "30".to_string(), "1.25".to_string()],
                vec!["Bob".to_string(), String::new(), "2".to_string()],
            ]
        );
        assert_eq!(head.total_rows, 3);
        assert_eq!(preview(&table, 10).rows.len(), 3);
    }

    #[test]
    fn fractions_round_to_four_decimals() {
        let table = load_table(
            b"x\n1.123456789\n2.5\n-0.00001\n7\n",
            &LoadOptions::default(),
        )
        .expect("load");
        let cells = preview(&table, 4)
            .rows
            .into_iter()
            .map(|mut row| row.remove(0))
            .collect::<Vec<_>>();
        assert_eq!(cells, vec!["1.1235", "2.5", "0", "7"]);
    }
}
