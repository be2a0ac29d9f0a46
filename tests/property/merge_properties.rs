//! Property-based tests for merge ordering and coercion guarantees

use layerstore::merge::deep_merge;
use layerstore::resolve::string_to_number;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

fn to_object(entries: &HashMap<String, i64>) -> Value {
    let map: Map<String, Value> = entries
        .iter()
        .map(|(k, v)| (k.clone(), json!(v)))
        .collect();
    Value::Object(map)
}

/// Later source wins on every key it carries; untouched keys survive.
#[test]
fn test_later_source_wins_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                proptest::collection::hash_map("[a-d]", any::<i64>(), 0..6),
                proptest::collection::hash_map("[a-d]", any::<i64>(), 0..6),
            ),
            |(first, second)| {
                let mut merged = to_object(&first);
                deep_merge(&mut merged, &to_object(&second));

                for (key, value) in &second {
                    assert_eq!(merged[key], json!(value));
                }
                for (key, value) in &first {
                    if !second.contains_key(key) {
                        assert_eq!(merged[key], json!(value));
                    }
                }
                Ok(())
            },
        )
        .unwrap();
}

/// Merging is deterministic: the same inputs always give the same result.
#[test]
fn test_merge_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                proptest::collection::hash_map("[a-d]", any::<i64>(), 0..6),
                proptest::collection::hash_map("[a-d]", any::<i64>(), 0..6),
            ),
            |(first, second)| {
                let mut once = to_object(&first);
                deep_merge(&mut once, &to_object(&second));
                let mut twice = to_object(&first);
                deep_merge(&mut twice, &to_object(&second));
                assert_eq!(once, twice);
                Ok(())
            },
        )
        .unwrap();
}

/// Every unsigned integer round-trips through the digit-string rule.
#[test]
fn test_digit_string_conversion_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<u32>(), |number| {
            assert_eq!(string_to_number(&number.to_string()), json!(number));
            Ok(())
        })
        .unwrap();
}

/// Non-digit characters anywhere keep the string unchanged.
#[test]
fn test_non_digit_strings_pass_through_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[0-9]*[a-z.+-][0-9a-z]*", |text| {
            assert_eq!(string_to_number(&text), json!(text));
            Ok(())
        })
        .unwrap();
}
