use csv_explore::{
    boxplot::compute_boxplot,
    classify::classify,
    correlation::correlation_matrix,
    frequency::compute_value_counts,
    histogram::compute_histogram,
    loader::{LoadOptions, load_table},
    plan::ChartPlanner,
    summary::describe,
    table::Table,
};
use proptest::prelude::*;

fn row_strategy() -> impl Strategy<Value = (i64, String, Option<f64>)> {
    (
        -1_000i64..=1_000,
        "[a-d]{1,3}",
        proptest::option::of(-1_000.0f64..1_000.0),
    )
}

fn render_csv(rows: &[(i64, String, Option<f64>)]) -> String {
    let mut text = String::from("id,label,score\n");
    for (id, label, score) in rows {
        let score = score.map(|v| v.to_string()).unwrap_or_default();
        text.push_str(&format!("{id},{label},{score}\n"));
    }
    text
}

fn load(text: &str) -> Table {
    load_table(text.as_bytes(), &LoadOptions::default()).expect("generated csv loads")
}

proptest! {
    #[test]
    fn numeric_and_categorical_sets_are_disjoint(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let table = load(&render_csv(&rows));
        let classification = classify(&table);
        for name in &classification.numeric {
            prop_assert!(!classification.is_categorical(name));
        }
        prop_assert!(classification.is_numeric("id"));
        prop_assert!(classification.is_categorical("label"));
        let classified = classification.numeric.len() + classification.categorical.len();
        prop_assert!(classified <= table.column_count());
    }

    #[test]
    fn correlation_matrix_is_symmetric_and_bounded(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let table = load(&render_csv(&rows));
        let planner = ChartPlanner::new(&table);
        let matrix = planner.correlation().into_ready().expect("id is numeric");
        for i in 0..matrix.len() {
            if let Some(diagonal) = matrix.get(i, i) {
                prop_assert_eq!(diagonal, 1.0);
            }
            for j in 0..matrix.len() {
                prop_assert_eq!(matrix.get(i, j), matrix.get(j, i));
                if let Some(r) = matrix.get(i, j) {
                    prop_assert!((-1.0..=1.0).contains(&r));
                }
            }
        }
    }

    #[test]
    fn value_counts_cover_every_present_value(
        values in prop::collection::vec(proptest::option::of("[a-e]{1,2}"), 0..60),
        top in 0usize..6
    ) {
        let present = values.iter().flatten().count();
        let all = compute_value_counts("label", &values, 0);
        prop_assert_eq!(all.entries.iter().map(|e| e.count).sum::<usize>(), present);
        prop_assert_eq!(all.total, present);
        prop_assert_eq!(all.entries.len(), all.distinct);
        for pair in all.entries.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
        }

        let limited = compute_value_counts("label", &values, top);
        if top > 0 {
            prop_assert!(limited.entries.len() <= top);
        }
        prop_assert_eq!(&limited.entries[..], &all.entries[..limited.entries.len()]);
    }

    #[test]
    fn histogram_counts_sum_to_total(
        values in prop::collection::vec(-1e6f64..1e6, 0..200),
        bins in 1usize..50
    ) {
        let spec = compute_histogram("x", &values, bins).expect("positive bins");
        prop_assert_eq!(spec.bins(), bins);
        prop_assert_eq!(spec.edges.len(), bins + 1);
        prop_assert_eq!(spec.counts.iter().sum::<usize>(), values.len());
        for pair in spec.edges.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn histogram_edges_stay_finite_near_the_float_limits(
        values in prop::collection::vec((-1.0f64..1.0).prop_map(|v| v * f64::MAX), 1..50),
        bins in 1usize..50
    ) {
        let spec = compute_histogram("x", &values, bins).expect("positive bins");
        prop_assert!(spec.edges.iter().all(|edge| edge.is_finite()));
        prop_assert_eq!(spec.edges.len(), bins + 1);
        prop_assert_eq!(spec.counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn correlation_stays_bounded_at_extreme_magnitudes(
        pairs in prop::collection::vec(
            ((-1.0f64..1.0).prop_map(|v| v * 1e300), (-1.0f64..1.0).prop_map(|v| v * 1e300)),
            2..30
        )
    ) {
        let x = pairs.iter().map(|(a, _)| Some(*a)).collect::<Vec<_>>();
        let y = pairs.iter().map(|(_, b)| Some(*b)).collect::<Vec<_>>();
        let matrix = correlation_matrix(&[("x", &x), ("y", &y)]);
        prop_assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
        if let Some(r) = matrix.get(0, 1) {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn boxplot_outliers_lie_beyond_the_fences(values in prop::collection::vec(-1e4f64..1e4, 1..100)) {
        let spec = compute_boxplot("x", &values).expect("non-empty");
        prop_assert_eq!(spec.count, values.len());
        prop_assert!(spec.lower_whisker >= spec.lower_fence);
        prop_assert!(spec.upper_whisker <= spec.upper_fence);
        for outlier in &spec.outliers {
            prop_assert!(*outlier < spec.lower_fence || *outlier > spec.upper_fence);
        }
        let inside = values
            .iter()
            .filter(|v| **v >= spec.lower_fence && **v <= spec.upper_fence)
            .count();
        prop_assert_eq!(inside + spec.outliers.len(), values.len());
    }

    #[test]
    fn reloading_the_same_bytes_is_stable(rows in prop::collection::vec(row_strategy(), 1..30)) {
        let text = render_csv(&rows);
        let first = load(&text);
        let second = load(&text);
        prop_assert_eq!(classify(&first), classify(&second));
        prop_assert_eq!(describe(&first), describe(&second));
        prop_assert_eq!(first.row_count(), rows.len());
    }
}
