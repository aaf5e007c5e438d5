#[cfg(test)]
mod tests {
    use crate::utilities::{alternator, copy, extend, json_parse, pluralize, repeat, rev_hash, to_number};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    #[test]
    fn test_copy_overwrites_existing_keys() {
        let mut dest = HashMap::from([("a", 1), ("z", 26)]);
        let src = HashMap::from([("a", 10), ("b", 20)]);
        copy(&mut dest, &src, None);

        assert_eq!(dest, HashMap::from([("a", 10), ("b", 20), ("z", 26)]));
    }

    #[test]
    fn test_copy_with_restrict_only_copies_listed_keys() {
        let mut dest = HashMap::new();
        let src = HashMap::from([("a", 1), ("b", 2), ("c", 3)]);
        copy(&mut dest, &src, Some(&["b", "missing"][..]));

        assert_eq!(dest, HashMap::from([("b", 2)]));
    }

    #[test]
    fn test_extend_never_overwrites() {
        let mut dest = HashMap::from([("a", 1)]);
        let src = HashMap::from([("a", 100), ("b", 2)]);
        extend(&mut dest, &src);

        assert_eq!(dest, HashMap::from([("a", 1), ("b", 2)]));
    }

    #[test]
    fn test_repeat() {
        assert_eq!(repeat("x", 3), vec!["x", "x", "x"]);
        assert!(repeat(0, 0).is_empty());
    }

    #[test]
    fn test_alternator_longer_first_sequence() {
        let out = alternator(vec![vec![1, 2, 3, 4], vec![10, 20, 30]]);
        assert_eq!(out, vec![1, 10, 2, 20, 3, 30, 4]);
    }

    #[test]
    fn test_alternator_three_sequences_uneven() {
        let out = alternator([vec!["a"], vec![], vec!["x", "y", "z"]]);
        assert_eq!(out, vec!["a", "x", "y", "z"]);
    }

    // edge case: nothing to interleave
    #[test]
    fn test_alternator_empty_input() {
        let out: Vec<i32> = alternator(Vec::<Vec<i32>>::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_rev_hash_swaps_keys_and_values() {
        let map = HashMap::from([("NONE", 0), ("FATAL", 1)]);
        assert_eq!(rev_hash(&map), HashMap::from([(0, "NONE"), (1, "FATAL")]));
    }

    #[test]
    fn test_json_parse_valid_and_fallback() {
        assert_eq!(json_parse(r#"{"a": [1, 2]}"#, Value::Null), json!({"a": [1, 2]}));
        assert_eq!(json_parse("not json", json!("")), json!(""));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "day"), "day");
        assert_eq!(pluralize(0, "day"), "days");
        assert_eq!(pluralize(2, "day"), "days");
    }

    #[test]
    fn test_to_number_lenient_parsing() {
        assert_eq!(to_number("42"), 42.0);
        assert_eq!(to_number("  -3.5 "), -3.5);
        assert_eq!(to_number("1e3"), 1000.0);
        assert_eq!(to_number("0x1F"), 31.0);
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("12px"), 0.0);
        assert_eq!(to_number("NaN"), 0.0);
    }

    #[test]
    fn test_to_number_follows_javascript_literals() {
        assert_eq!(to_number("Infinity"), f64::INFINITY);
        assert_eq!(to_number("+Infinity"), f64::INFINITY);
        assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(to_number("0o17"), 15.0);
        assert_eq!(to_number("0B101"), 5.0);
        // edge case: spellings Rust's float parser accepts but JavaScript does not
        for text in ["inf", "-inf", "infinity", "INFINITY", "nan", "-NaN"] {
            assert_eq!(to_number(text), 0.0, "{text:?}");
        }
        // edge case: signs and empty digits after a radix prefix
        for text in ["0x", "0x+1", "-0x1", "0b102", "0o8"] {
            assert_eq!(to_number(text), 0.0, "{text:?}");
        }
    }
}
