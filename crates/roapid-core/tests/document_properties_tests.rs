// Property tests for the timestamp-blind comparison

use proptest::prelude::*;
use proptest::sample::Index;
use roapid_core::document::{canonical_bytes, compare, pretty_bytes, stamp, CompareMode};
use roapid_core::{Document, JsonMap};
use serde_json::Value;

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("JSON has no NaN or infinity", |f| f.is_finite())
            .prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = JsonMap> {
    prop::collection::btree_map("[a-z]{1,8}", arb_value(), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .filter(|(k, _)| k != "roLastUpdated")
            .collect()
    })
}

/// A content edit applied to a document's top-level members
#[derive(Debug, Clone)]
enum Edit {
    Insert(String, Value),
    Remove(Index),
    Replace(Index, Value),
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        ("[a-z]{1,8}", arb_value()).prop_map(|(k, v)| Edit::Insert(k, v)),
        any::<Index>().prop_map(Edit::Remove),
        (any::<Index>(), arb_value()).prop_map(|(i, v)| Edit::Replace(i, v)),
    ]
}

fn apply(map: &JsonMap, edit: Edit) -> JsonMap {
    let mut edited = map.clone();
    let nth_key = |i: &Index| {
        if map.is_empty() {
            None
        } else {
            map.keys().nth(i.index(map.len())).cloned()
        }
    };
    match edit {
        Edit::Insert(key, value) => {
            edited.insert(key, value);
        }
        Edit::Remove(i) => {
            if let Some(key) = nth_key(&i) {
                edited.remove(&key);
            }
        }
        Edit::Replace(i, value) => {
            if let Some(key) = nth_key(&i) {
                edited.insert(key, value);
            }
        }
    }
    edited
}

fn timestamp() -> impl Strategy<Value = String> {
    (2000u32..2100, 1u32..13, 1u32..29, 0u32..24).prop_map(|(y, mo, d, h)| {
        format!("{:04}-{:02}-{:02}T{:02}:00:00Z", y, mo, d, h)
    })
}

proptest! {
    #[test]
    fn timestamp_only_differences_are_unchanged(
        map in arb_object(),
        t1 in timestamp(),
        t2 in timestamp(),
    ) {
        let mut a = map.clone();
        let mut b = map;
        stamp(&mut a, t1);
        stamp(&mut b, t2);

        let verdict = compare(&pretty_bytes(&a).unwrap(), &canonical_bytes(&b).unwrap()).unwrap();
        prop_assert!(!verdict.changed);
        prop_assert_eq!(verdict.mode, CompareMode::Canonical);
    }

    #[test]
    fn non_reserved_differences_are_changed(
        map in arb_object(),
        edit in arb_edit(),
        t in timestamp(),
    ) {
        let incoming = apply(&map, edit);
        // Edits that land on an identical document (removing from an empty
        // map, replacing a value with itself) are not differences.
        prop_assume!(incoming != map);

        let mut stored = map;
        stamp(&mut stored, t);

        let verdict = compare(&pretty_bytes(&stored).unwrap(), &canonical_bytes(&incoming).unwrap()).unwrap();
        prop_assert!(verdict.changed);
    }

    #[test]
    fn canonical_bytes_are_stable(map in arb_object()) {
        let first = canonical_bytes(&map).unwrap();
        let reparsed = Document::parse(&first).into_object().unwrap();
        prop_assert_eq!(first, canonical_bytes(&reparsed).unwrap());
    }

    #[test]
    fn pretty_snapshot_reparses_to_same_canonical_form(map in arb_object(), t in timestamp()) {
        let mut stored = map.clone();
        stamp(&mut stored, t);
        let on_disk = pretty_bytes(&stored).unwrap();

        let verdict = compare(&on_disk, &pretty_bytes(&map).unwrap()).unwrap();
        prop_assert!(!verdict.changed);
    }
}

#[test]
fn test_concrete_scenario_name_change() {
    let stored = br#"{"id":"7","name":"Alpha","roLastUpdated":"2024-01-01T00:00:00Z"}"#;
    assert!(!compare(stored, br#"{"id":"7","name":"Alpha"}"#).unwrap().changed);
    assert!(compare(stored, br#"{"id":"7","name":"Beta"}"#).unwrap().changed);
}

#[test]
fn test_concrete_scenario_not_json() {
    let verdict = compare(b"not json", b"not json").unwrap();
    assert!(!verdict.changed);
    assert_eq!(verdict.mode, CompareMode::RawStored);
    assert!(compare(b"not json", b"still not json").unwrap().changed);
}

#[test]
fn test_field_order_and_whitespace_ignored() {
    let stored = b"{\n  \"b\": 1,\n  \"a\": [1, 2]\n}";
    let incoming = br#"{"a":[1,2],"b":1}"#;
    assert!(!compare(stored, incoming).unwrap().changed);
}
