use std::collections::HashMap;

use schema_filter::FilterError;
use schema_filter::processing::{filter_records, parse_filters};
use schema_filter::types::{DataType, Field, Record, Schema, SchemaType};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Address {
    city: String,
}

impl SchemaType for Address {
    fn data_type() -> DataType {
        DataType::Record(Schema::new(vec![
            Field::new("City", String::data_type()).with_tag("city"),
        ]))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct User {
    name: String,
    address: Address,
    #[serde(default)]
    age: Option<i64>,
}

impl SchemaType for User {
    fn data_type() -> DataType {
        DataType::Record(Schema::new(vec![
            Field::new("Name", String::data_type()).with_tag("name"),
            Field::new("Address", Address::data_type()).with_tag("address"),
            Field::new("Age", <Option<i64>>::data_type()).with_tag("age,omitempty"),
        ]))
    }
}

fn record(v: Value) -> Record {
    match v {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn users() -> Record {
    record(json!({
        "u1": {"name": "Ann", "address": {"city": "Rome"}},
        "u2": {"name": "Bo", "address": {"city": "Oslo"}, "age": 41}
    }))
}

fn user(name: &str, city: &str, age: Option<i64>) -> User {
    User {
        name: name.to_string(),
        address: Address {
            city: city.to_string(),
        },
        age,
    }
}

#[test]
fn filters_by_nested_internal_path() {
    let out = filter_records::<User>(&users(), &record(json!({"Address": {"City": "Rome"}}))).unwrap();

    let mut expected = HashMap::new();
    expected.insert("u1".to_string(), user("Ann", "Rome", None));
    assert_eq!(out, expected);
}

#[test]
fn empty_spec_returns_every_map_valued_record() {
    let mut records = users();
    records.insert("scalar".to_string(), json!(42));
    records.insert("list".to_string(), json!([{"name": "x"}]));

    let out = filter_records::<User>(&records, &Record::new()).unwrap();

    let mut keys: Vec<_> = out.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["u1", "u2"]);
    assert_eq!(out["u2"], user("Bo", "Oslo", Some(41)));
}

#[test]
fn list_values_match_by_membership() {
    let out = filter_records::<User>(&users(), &record(json!({"Age": [1, 41, 99]}))).unwrap();
    assert_eq!(out.keys().collect::<Vec<_>>(), vec!["u2"]);

    let none = filter_records::<User>(&users(), &record(json!({"Age": [1, 2, 3]}))).unwrap();
    assert!(none.is_empty());
}

#[test]
fn numbers_match_across_integer_and_float_forms() {
    let out = filter_records::<User>(&users(), &record(json!({"Age": 41.0}))).unwrap();
    assert!(out.contains_key("u2"));
}

#[test]
fn all_predicates_must_hold() {
    let both = record(json!({"Name": "Bo", "Address": {"City": "Oslo"}}));
    assert_eq!(filter_records::<User>(&users(), &both).unwrap().len(), 1);

    let mixed = record(json!({"Name": "Ann", "Address": {"City": "Oslo"}}));
    assert!(filter_records::<User>(&users(), &mixed).unwrap().is_empty());
}

#[test]
fn unresolvable_predicates_are_ignored() {
    let spec = record(json!({"Nickname": "zzz", "Address": {"City": "Oslo"}}));
    let out = filter_records::<User>(&users(), &spec).unwrap();
    assert_eq!(out.keys().collect::<Vec<_>>(), vec!["u2"]);

    let only_unknown = record(json!({"Nickname": "zzz"}));
    assert_eq!(filter_records::<User>(&users(), &only_unknown).unwrap().len(), 2);

    let predicates = parse_filters::<User>(&spec).unwrap();
    assert_eq!(predicates.len(), 1);
    assert_eq!(predicates.dropped(), ["Nickname".to_string()]);
}

#[test]
fn partially_resolved_paths_never_match() {
    // `Address.Zip` resolves to `address`, which is a map in every record, never a leaf.
    let spec = record(json!({"Address": {"Zip": "00100"}}));
    assert!(filter_records::<User>(&users(), &spec).unwrap().is_empty());
}

#[test]
fn external_names_are_not_accepted_in_the_spec() {
    let spec = record(json!({"address": {"city": "Rome"}}));
    assert_eq!(filter_records::<User>(&users(), &spec).unwrap().len(), 2);
}

#[test]
fn decode_failure_of_a_match_fails_the_whole_call() {
    let mut records = users();
    records.insert("bad".to_string(), json!({"name": "Cy", "address": "Rome"}));

    let err = filter_records::<User>(&records, &Record::new()).unwrap_err();
    assert!(err.is_conversion());
    match err {
        FilterError::Decode { key, .. } => assert_eq!(key, "bad"),
        other => panic!("expected decode error, got {other}"),
    }
}

#[test]
fn non_matching_undecodable_records_are_not_decoded() {
    let mut records = users();
    records.insert("bad".to_string(), json!({"name": "Cy", "address": "Rome"}));

    let out = filter_records::<User>(&records, &record(json!({"Name": "Ann"}))).unwrap();
    assert_eq!(out.len(), 1);
}

#[test]
fn non_record_target_is_a_schema_error() {
    let err = filter_records::<String>(&users(), &Record::new()).unwrap_err();
    assert!(matches!(err, FilterError::Schema { .. }));
}

#[test]
fn inputs_are_left_untouched() {
    let records = users();
    let spec = record(json!({"Name": ["Ann", "Bo"]}));
    let before = (records.clone(), spec.clone());

    let _ = filter_records::<User>(&records, &spec).unwrap();

    assert_eq!((records, spec), before);
}
