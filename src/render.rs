//! Plain-text rendering of previews, summaries and chart specifications as
//! aligned tables.

use std::borrow::Cow;
use std::fmt::Write as _;

use itertools::Itertools;

use crate::{
    boxplot::BoxplotSpec,
    classify::{ColumnClassification, ColumnTypeEntry},
    correlation::CorrelationMatrix,
    frequency::ValueCounts,
    histogram::HistogramSpec,
    plan::{Chart, Planned},
    preview::Preview,
    report::Report,
    summary::ColumnSummary,
};

const HISTOGRAM_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    render_aligned(headers, rows, &[])
}

/// Columns without an entry in `aligns` are left-aligned.
pub fn render_aligned(headers: &[String], rows: &[Vec<String>], aligns: &[Align]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(cell));
        }
    }

    for width in &mut widths {
        *width = (*width).max(1);
    }

    let mut output = String::new();

    let header_line = format_row(headers, &widths, aligns);
    let _ = writeln!(output, "{header_line}");

    let separator_widths = widths.iter().map(|w| (*w).max(3)).collect::<Vec<usize>>();
    let separator_cells = separator_widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>();
    let separator_line = format_row(&separator_cells, &separator_widths, &[]);
    let _ = writeln!(output, "{separator_line}");

    for row in rows {
        let row_line = format_row(row, &widths, aligns);
        let _ = writeln!(output, "{row_line}");
    }

    output
}

fn format_row(values: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let mut cells = Vec::with_capacity(values.len());
    for (idx, value) in values.iter().enumerate() {
        if idx >= widths.len() {
            break;
        }
        let sanitized = sanitize_cell(value);
        let padding = " ".repeat(
            widths[idx].saturating_sub(display_width(sanitized.as_ref())),
        );
        let cell = match aligns.get(idx).copied().unwrap_or(Align::Left) {
            Align::Left => format!("{sanitized}{padding}"),
            Align::Right => format!("{padding}{sanitized}"),
        };
        cells.push(cell);
    }
    let mut line = cells.join("  ");
    while line.ends_with(' ') {
        line.pop();
    }
    line
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // Skip ANSI escape sequence (e.g. \x1b[31m)
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn render_planned<T>(planned: &Planned<T>, render: impl FnOnce(&T) -> String) -> String {
    match planned {
        Planned::Ready(value) => render(value),
        Planned::NotApplicable { reason, .. } => format!("note: {reason}\n"),
    }
}

pub fn render_preview(preview: &Preview) -> String {
    let mut output = render_table(&preview.headers, &preview.rows);
    if preview.total_rows > preview.rows.len() {
        let _ = writeln!(
            output,
            "({} of {} row(s) shown)",
            preview.rows.len(),
            preview.total_rows
        );
    }
    output
}

pub fn render_classification(
    columns: &[ColumnTypeEntry],
    classification: &ColumnClassification,
) -> String {
    let rows = columns
        .iter()
        .map(|entry| {
            vec![
                entry.column.clone(),
                entry.datatype.label().to_string(),
                entry.kind.label().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    let mut output = render_table(&strings(["column", "type", "kind"]), &rows);
    let _ = writeln!(
        output,
        "numeric columns: {}",
        classification.numeric.iter().join(", ")
    );
    let _ = writeln!(
        output,
        "categorical columns: {}",
        classification.categorical.iter().join(", ")
    );
    output
}

pub fn render_summary(summary: &[ColumnSummary]) -> String {
    let headers = strings([
        "column", "kind", "count", "missing", "mean", "std", "min", "25%", "50%", "75%", "max",
        "unique", "top", "freq",
    ]);
    let rows = summary
        .iter()
        .map(|column| {
            let mut row = vec![
                column.column.clone(),
                column.kind.label().to_string(),
                column.count.to_string(),
                column.missing.to_string(),
            ];
            match &column.numeric {
                Some(n) => row.extend([
                    format_number(n.mean),
                    format_optional(n.std_dev),
                    format_number(n.min),
                    format_number(n.q1),
                    format_number(n.median),
                    format_number(n.q3),
                    format_number(n.max),
                ]),
                None => row.extend(std::iter::repeat_n(String::new(), 7)),
            }
            match &column.categorical {
                Some(c) => row.extend([c.unique.to_string(), c.top.clone(), c.freq.to_string()]),
                None => row.extend(std::iter::repeat_n(String::new(), 3)),
            }
            row
        })
        .collect::<Vec<_>>();
    let mut aligns = vec![Align::Left, Align::Left];
    aligns.extend(std::iter::repeat_n(Align::Right, 10));
    aligns.extend([Align::Left, Align::Right]);
    render_aligned(&headers, &rows, &aligns)
}

pub fn render_correlation(matrix: &CorrelationMatrix) -> String {
    let mut headers = vec![String::new()];
    headers.extend(matrix.columns.iter().cloned());
    let rows = matrix
        .columns
        .iter()
        .zip(&matrix.values)
        .map(|(name, values)| {
            let mut row = vec![name.clone()];
            row.extend(values.iter().map(|value| match value {
                Some(r) => format!("{r:.2}"),
                None => "NaN".to_string(),
            }));
            row
        })
        .collect::<Vec<_>>();
    let mut aligns = vec![Align::Left];
    aligns.extend(std::iter::repeat_n(Align::Right, matrix.len()));
    render_aligned(&headers, &rows, &aligns)
}

pub fn render_histogram(spec: &HistogramSpec) -> String {
    let peak = spec.counts.iter().copied().max().unwrap_or(0).max(1);
    let last = spec.bins().saturating_sub(1);
    let rows = (0..spec.bins())
        .filter_map(|idx| {
            let (start, end) = spec.bin_range(idx)?;
            let count = spec.counts[idx];
            let close = if idx == last { ']' } else { ')' };
            let bar_len = (count * HISTOGRAM_BAR_WIDTH).div_ceil(peak);
            Some(vec![
                format!("[{}, {}{close}", format_number(start), format_number(end)),
                count.to_string(),
                "#".repeat(bar_len),
            ])
        })
        .collect::<Vec<_>>();
    let mut output = format!("Histogram of {} ({} value(s))\n", spec.column, spec.total);
    output.push_str(&render_aligned(
        &strings(["bin", "count", ""]),
        &rows,
        &[Align::Left, Align::Right, Align::Left],
    ));
    output
}

pub fn render_boxplot(spec: &BoxplotSpec) -> String {
    let rows = [
        ("count", spec.count.to_string()),
        ("min", format_number(spec.min)),
        ("lower whisker", format_number(spec.lower_whisker)),
        ("q1", format_number(spec.q1)),
        ("median", format_number(spec.median)),
        ("mean", format_number(spec.mean)),
        ("q3", format_number(spec.q3)),
        ("upper whisker", format_number(spec.upper_whisker)),
        ("max", format_number(spec.max)),
        ("iqr", format_number(spec.iqr)),
        ("lower fence", format_number(spec.lower_fence)),
        ("upper fence", format_number(spec.upper_fence)),
    ]
    .into_iter()
    .map(|(label, value)| vec![label.to_string(), value])
    .collect::<Vec<_>>();
    let mut output = format!("Boxplot of {}\n", spec.column);
    output.push_str(&render_aligned(
        &strings(["statistic", "value"]),
        &rows,
        &[Align::Left, Align::Right],
    ));
    let outliers = if spec.outliers.is_empty() {
        "none".to_string()
    } else {
        spec.outliers.iter().map(|v| format_number(*v)).join(", ")
    };
    let _ = writeln!(output, "outliers: {outliers}");
    output
}

pub fn render_value_counts(counts: &ValueCounts) -> String {
    let rows = counts
        .entries
        .iter()
        .map(|entry| {
            vec![
                entry.value.clone(),
                entry.count.to_string(),
                format!("{:.2}%", entry.percent),
            ]
        })
        .collect::<Vec<_>>();
    let mut output = format!(
        "Value counts of {} ({} value(s), {} distinct)\n",
        counts.column, counts.total, counts.distinct
    );
    output.push_str(&render_aligned(
        &strings([counts.column.as_str(), "count", "percent"]),
        &rows,
        &[Align::Left, Align::Right, Align::Right],
    ));
    output
}

pub fn render_chart(chart: &Chart) -> String {
    match chart {
        Chart::Correlation(matrix) => render_correlation(matrix),
        Chart::Histogram(spec) => render_histogram(spec),
        Chart::Boxplot(spec) => render_boxplot(spec),
        Chart::ValueCounts(counts) => render_value_counts(counts),
    }
}

pub fn render_report(report: &Report) -> String {
    let sections = [
        ("Data Preview", render_preview(&report.preview)),
        (
            "Column Types",
            render_classification(&report.column_types, &report.classification),
        ),
        ("Descriptive Statistics", render_summary(&report.summary)),
        (
            "Correlation Heatmap (Numerical Features Only)",
            render_planned(&report.correlation, render_correlation),
        ),
        (
            "Histograms of Numerical Features",
            render_planned(&report.histogram, render_histogram),
        ),
        (
            "Boxplot for Outliers",
            render_planned(&report.boxplot, render_boxplot),
        ),
        (
            "Value Counts of Categorical Columns",
            render_planned(&report.value_counts, render_value_counts),
        ),
    ];
    let mut output = format!(
        "{} row(s) x {} column(s)\n",
        report.rows, report.columns
    );
    for (title, body) in sections {
        let _ = write!(output, "\n{title}\n{}\n{body}", "=".repeat(title.len()));
    }
    output
}
