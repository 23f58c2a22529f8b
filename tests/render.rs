mod common;

use common::load_fixture;
use csv_explore::{
    frequency::compute_value_counts,
    histogram::compute_histogram,
    render::{render_histogram, render_report, render_table, render_value_counts},
    report::{ReportOptions, build_report},
};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn render_table_aligns_columns() {
    let headers = strings(&["column", "kind"]);
    let rows = vec![strings(&["age", "numeric"]), strings(&["name", "categorical"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "column  kind",
            "------  -----------",
            "age     numeric",
            "name    categorical",
        ]
    );
}

#[test]
fn render_table_normalizes_control_characters() {
    let headers = strings(&["city"]);
    let rows = vec![strings(&["New\nYork\tCity"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "New York City");
}

#[test]
fn render_table_ignores_ansi_escapes_in_widths() {
    let headers = strings(&["region", "state"]);
    let rows = vec![strings(&["Nord", "\u{1b}[32mOK\u{1b}[0m"])];

    let rendered = render_table(&headers, &rows);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "region  state");
    assert_eq!(lines[2], "Nord    \u{1b}[32mOK\u{1b}[0m");
}

#[test]
fn value_counts_render_with_percentages() {
    let values = vec![
        Some("Oslo".to_string()),
        Some("Rome".to_string()),
        None,
        Some("Oslo".to_string()),
    ];
    let counts = compute_value_counts("city", &values, 0);

    let rendered = render_value_counts(&counts);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Value counts of city (3 value(s), 2 distinct)",
            "city  count  percent",
            "----  -----  -------",
            "Oslo      2   66.67%",
            "Rome      1   33.33%",
        ]
    );
}

#[test]
fn histogram_bars_scale_to_the_fullest_bin() {
    let spec = compute_histogram("x", &[1.0, 2.0, 2.5, 3.0, 4.0, 10.0], 3).expect("histogram");

    let rendered = render_histogram(&spec);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "Histogram of x (6 value(s))");
    assert!(lines[3].starts_with("[1, 4)"), "{}", lines[3]);
    assert!(lines[3].ends_with(&"#".repeat(40)), "{}", lines[3]);
    assert!(lines[5].starts_with("[7, 10]"), "{}", lines[5]);
    assert!(lines[5].ends_with(" ##########"), "{}", lines[5]);
}

#[test]
fn report_sections_follow_the_page_order() {
    let table = load_fixture("orders.csv");
    let report = build_report(&table, &ReportOptions::default()).expect("report");
    let rendered = render_report(&report);

    assert!(rendered.starts_with("10 row(s) x 8 column(s)\n"));
    let positions = [
        "Data Preview",
        "Column Types",
        "Descriptive Statistics",
        "Correlation Heatmap (Numerical Features Only)",
        "Histograms of Numerical Features",
        "Boxplot for Outliers",
        "Value Counts of Categorical Columns",
    ]
    .iter()
    .map(|title| rendered.find(title).unwrap_or_else(|| panic!("missing {title}")))
    .collect::<Vec<_>>();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(rendered.contains("(5 of 10 row(s) shown)"));
    assert!(rendered.contains("Boxplot of order_id"));
    assert!(rendered.contains("outliers: none"));
}
