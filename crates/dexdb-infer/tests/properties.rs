//! Property tests for classification, resolution and scrubbing.

use dexdb_infer::{classify_value, normalize_row, scrub_text, storage_type_for, tally_column};
use dexdb_model::{StorageType, ValueKind};
use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest};

proptest! {
    #[test]
    fn signed_digit_strings_are_integers(value in "-?[0-9]{1,18}") {
        prop_assert_eq!(classify_value(&value), ValueKind::Integer);
    }

    #[test]
    fn decimal_strings_are_reals(value in "(-?[0-9]{1,6}\\.[0-9]{0,6})|(\\.[0-9]{1,6})") {
        prop_assert_eq!(classify_value(&value), ValueKind::Real);
    }

    #[test]
    fn strings_with_letters_are_text(prefix in "[0-9.]{0,4}", letter in "[a-zA-Z]", suffix in ".{0,8}") {
        let value = format!("{prefix}{letter}{suffix}");
        prop_assert_eq!(classify_value(&value), ValueKind::Text);
    }

    #[test]
    fn any_text_cell_forces_text_column(numbers in proptest::collection::vec("-?[0-9]{1,5}", 0..20), position in any::<usize>()) {
        let mut rows: Vec<Vec<String>> = numbers.into_iter().map(|v| vec![v]).collect();
        let at = if rows.is_empty() { 0 } else { position % (rows.len() + 1) };
        rows.insert(at, vec!["n/a".to_string()]);
        prop_assert_eq!(storage_type_for(&tally_column(&rows, 0)), StorageType::Text);
    }

    #[test]
    fn scrubbing_leaves_markup_free_text_alone(value in "[^\\[\\]{}]{0,40}") {
        let scrubbed = scrub_text(&value);
        prop_assert_eq!(scrubbed.as_ref(), value.as_str());
    }

    #[test]
    fn scrubbing_is_idempotent_on_its_output(display in "[a-zA-Z ]{1,10}", reference in "[a-z]{1,6}:[a-z-]{1,10}") {
        let once = scrub_text(&format!("x [{display}]{{{reference}}} y")).into_owned();
        let twice = scrub_text(&once);
        prop_assert_eq!(twice.as_ref(), once.as_str());
    }

    #[test]
    fn normalized_rows_have_header_width(len in 0usize..12, width in 0usize..12) {
        let row: Vec<String> = (0..len).map(|i| i.to_string()).collect();
        let (fields, shape) = normalize_row(row, width);
        prop_assert_eq!(fields.len(), width);
        prop_assert!(shape.is_exact() == (len == width));
    }
}
