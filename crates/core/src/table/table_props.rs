//! Property-based tests for table filtering and sorting.

use proptest::prelude::*;
use serde_json::{Value, json};

use super::{SortDirection, TableRow, TableState, compare_cells};

/// Rows with a text column, a numeric column and an index column.
fn arb_rows() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(("[a-zA-Z ]{0,12}", -1000i64..1000), 0..30).prop_map(|cells| {
        cells
            .into_iter()
            .enumerate()
            .map(|(index, (name, amount))| json!({"Index": index, "Name": name, "Amount": amount}))
            .collect()
    })
}

/// Cells mixing numbers, number-like text and plain text.
fn arb_mixed_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        (-50i64..50).prop_map(|n| n.to_string()),
        "[0-9]{1,2}[a-c]",
        "[a-c]{0,2}",
    ]
}

/// Rows whose `Amount` values are all distinct.
fn arb_unique_rows() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::hash_set(-100_000i64..100_000, 0..30)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|amounts| {
            amounts
                .into_iter()
                .enumerate()
                .map(|(index, amount)| json!({"Index": index, "Amount": amount}))
                .collect()
        })
}

fn indexes(view: &[&Value]) -> Vec<String> {
    view.iter().filter_map(|row| row.cell("Index")).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Empty filters and no sort leave the rows untouched.
    #[test]
    fn prop_empty_filters_are_identity(rows in arb_rows()) {
        let state = TableState::new().with_filter("Name", "").with_filter("Amount", "");
        let view = state.apply(&rows);
        prop_assert_eq!(view.len(), rows.len());
        prop_assert!(view.iter().zip(rows.iter()).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    /// A filter keeps exactly the rows whose cell contains the text, ignoring case.
    #[test]
    fn prop_filter_is_case_insensitive_subset(
        rows in arb_rows(),
        needle in "[a-zA-Z]{1,2}",
    ) {
        let state = TableState::new().with_filter("Name", needle.clone());
        let expected: Vec<String> = rows
            .iter()
            .filter(|row| {
                row.cell("Name")
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
            .filter_map(|row| row.cell("Index"))
            .collect();
        prop_assert_eq!(indexes(&state.apply(&rows)), expected);
    }

    /// Adding a filter never grows the result.
    #[test]
    fn prop_filters_narrow(
        rows in arb_rows(),
        first in "[a-z]{1,2}",
        second in "[0-9]{1}",
    ) {
        let one = TableState::new().with_filter("Name", first.clone());
        let both = one.clone().with_filter("Amount", second);
        let narrow = indexes(&both.apply(&rows));
        let wide = indexes(&one.apply(&rows));
        prop_assert!(narrow.iter().all(|i| wide.contains(i)));
    }

    /// With unique keys, descending order is ascending order reversed.
    #[test]
    fn prop_descending_reverses_ascending(rows in arb_unique_rows()) {
        let mut state = TableState::new();
        state.click_header("Amount");
        let ascending = indexes(&state.apply(&rows));
        state.click_header("Amount");
        prop_assert_eq!(state.sort().map(|s| s.direction), Some(SortDirection::Descending));
        let mut descending = indexes(&state.apply(&rows));
        descending.reverse();
        prop_assert_eq!(ascending, descending);
    }

    /// Cell comparison is a total order, even over mixed columns.
    #[test]
    fn prop_compare_cells_is_transitive(
        a in arb_mixed_cell(),
        b in arb_mixed_cell(),
        c in arb_mixed_cell(),
    ) {
        prop_assert_eq!(compare_cells(&a, &b), compare_cells(&b, &a).reverse());
        if compare_cells(&a, &b).is_le() && compare_cells(&b, &c).is_le() {
            prop_assert!(compare_cells(&a, &c).is_le());
        }
    }

    /// Sorted output is ordered and ties keep their input order.
    #[test]
    fn prop_sort_is_ordered_and_stable(rows in arb_rows()) {
        let mut state = TableState::new();
        state.click_header("Name");
        let view = state.apply(&rows);
        for pair in view.windows(2) {
            let a = pair[0].cell("Name").unwrap_or_default();
            let b = pair[1].cell("Name").unwrap_or_default();
            let ordering = compare_cells(&a, &b);
            prop_assert!(ordering.is_le());
            if ordering.is_eq() {
                let ia = pair[0]["Index"].as_u64().unwrap_or_default();
                let ib = pair[1]["Index"].as_u64().unwrap_or_default();
                prop_assert!(ia < ib);
            }
        }
    }
}
