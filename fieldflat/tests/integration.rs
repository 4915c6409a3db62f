//! Integration tests for fieldflat
//!
//! These tests exercise the derive macro together with the flatteners and the
//! results table, the way a benchmark harness uses them.

use fieldflat::{
    Entry, Mapping, Record, RecordValue, Report, ReportError, ResultsTable, Summary, Value,
    flatten_paths, flatten_paths_with_separator, flatten_sequence, flatten_values,
    format_human_output, generate_csv_report, generate_json_report, to_mapping,
};
use pretty_assertions::assert_eq;
use std::time::Duration;

#[derive(Record, Clone)]
struct A {
    x: i64,
    y: i64,
}

#[derive(Record, Clone)]
struct B {
    z: i64,
    a1: A,
    a2: A,
}

fn scenario() -> B {
    B {
        z: 0,
        a1: A { x: 1, y: 2 },
        a2: A { x: 3, y: 4 },
    }
}

#[derive(Record)]
struct ElectionOptions {
    ping_period: Duration,
    no_ping_timeout_min: Duration,
}

#[derive(Record)]
struct LeaderOptions {
    #[record(rename = "stutter_every")]
    stutter: u32,
    election_options: ElectionOptions,
}

#[derive(Record)]
struct Input {
    f: u32,
    num_client_procs: u32,
    state_machine: String,
    leader_options: LeaderOptions,
    #[record(leaf)]
    workload: A,
    #[record(skip)]
    #[allow(dead_code)]
    scratch: Vec<u8>,
}

fn input(f: u32) -> Input {
    Input {
        f,
        num_client_procs: 4,
        state_machine: "Noop".to_string(),
        leader_options: LeaderOptions {
            stutter: 1000,
            election_options: ElectionOptions {
                ping_period: Duration::from_secs(1),
                no_ping_timeout_min: Duration::from_secs(10),
            },
        },
        workload: A { x: 5, y: 6 },
        scratch: vec![0; 16],
    }
}

#[derive(Record)]
struct Latency {
    median_ms: f64,
    p90_ms: f64,
}

#[derive(Record)]
struct Output {
    latency: Latency,
    start_throughput_1s: Option<f64>,
}

fn output(median_ms: f64) -> Output {
    Output {
        latency: Latency {
            median_ms,
            p90_ms: median_ms * 2.0,
        },
        start_throughput_1s: None,
    }
}

#[test]
fn test_scenario_paths_and_mapping() {
    let t = scenario();
    assert_eq!(flatten_paths(&t).unwrap(), ["z", "a1.x", "a1.y", "a2.x", "a2.y"]);

    let mapping = to_mapping(&t).unwrap();
    assert_eq!(
        mapping.to_string(),
        "{z: 0, a1: {x: 1, y: 2}, a2: {x: 3, y: 4}}"
    );
    assert_eq!(mapping.keys().collect::<Vec<_>>(), ["z", "a1", "a2"]);
}

#[test]
fn test_scenario_sequence() {
    let seq = Value::List(vec![
        1.into(),
        2.into(),
        Value::List(vec![3.into(), Value::List(vec![4.into(), 5.into()])]),
        6.into(),
    ]);
    let expected: Vec<Value> = (1..=6).map(Value::from).collect();
    assert_eq!(flatten_sequence(&seq).unwrap(), expected);
}

#[test]
fn test_attributes_are_honored() {
    let paths = flatten_paths(&input(1)).unwrap();
    assert_eq!(
        paths,
        [
            "f",
            "num_client_procs",
            "state_machine",
            "leader_options.stutter_every",
            "leader_options.election_options.ping_period",
            "leader_options.election_options.no_ping_timeout_min",
            "workload",
        ]
    );

    let mapping = to_mapping(&input(1)).unwrap();
    let workload = mapping.get("workload").and_then(Entry::as_leaf).unwrap();
    assert!(matches!(workload, Value::Map(_)));
    assert_eq!(workload.to_string(), "{x: 5, y: 6}");
}

#[test]
fn test_consistency_laws() {
    let record = input(3);
    let paths = flatten_paths(&record).unwrap();
    let mapping = to_mapping(&record).unwrap();
    let values = flatten_values(&record).unwrap();

    assert_eq!(paths.len(), mapping.leaf_count());
    assert_eq!(mapping.leaf_paths(), paths);
    assert_eq!(values.len(), paths.len());
    assert_eq!(
        values,
        mapping.leaf_values().into_iter().cloned().collect::<Vec<_>>()
    );

    // repeated calls are identical
    assert_eq!(flatten_paths(&record).unwrap(), paths);
    assert_eq!(to_mapping(&record).unwrap(), mapping);
}

#[test]
fn test_derived_and_dynamic_records_agree() {
    let dynamic = RecordValue::new()
        .with_field("z", 0)
        .with_field("a1", RecordValue::new().with_field("x", 1).with_field("y", 2))
        .with_field("a2", RecordValue::new().with_field("x", 3).with_field("y", 4));

    assert_eq!(flatten_paths(&dynamic).unwrap(), flatten_paths(&scenario()).unwrap());
    assert_eq!(to_mapping(&dynamic).unwrap(), to_mapping(&scenario()).unwrap());
}

#[derive(Record)]
struct Empty;

#[derive(Record)]
struct NoFields {}

#[test]
fn test_zero_field_records() {
    assert!(flatten_paths(&Empty).unwrap().is_empty());
    assert_eq!(to_mapping(&NoFields {}).unwrap(), Mapping::new());
}

#[derive(Record)]
struct Tagged<T> {
    name: String,
    inner: T,
}

#[test]
fn test_generic_record() {
    let tagged = Tagged {
        name: "run".to_string(),
        inner: scenario(),
    };
    assert_eq!(
        flatten_paths_with_separator(&tagged, "/").unwrap(),
        ["name", "inner/z", "inner/a1/x", "inner/a1/y", "inner/a2/x", "inner/a2/y"]
    );

    let plain = Tagged {
        name: "n".to_string(),
        inner: 7u8,
    };
    assert_eq!(flatten_paths(&plain).unwrap(), ["name", "inner"]);
}

#[derive(Record)]
struct Maybe {
    present: Option<A>,
    absent: Option<A>,
}

#[test]
fn test_optional_records() {
    let maybe = Maybe {
        present: Some(A { x: 1, y: 2 }),
        absent: None,
    };
    assert_eq!(
        flatten_paths(&maybe).unwrap(),
        ["present.x", "present.y", "absent"]
    );
    assert_eq!(
        to_mapping(&maybe).unwrap().get("absent"),
        Some(&Entry::Leaf(Value::Null))
    );
}

#[test]
fn test_non_record_top_level_is_rejected() {
    let err = flatten_paths(&5i64).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type mismatch: expected record, found int"
    );
    assert!(to_mapping(&vec![1, 2]).is_err());
    assert!(flatten_sequence(&Value::from(1)).is_err());
}

#[test]
fn test_results_table_from_derived_records() {
    let mut table = ResultsTable::new();
    table.push(&input(1), &output(1.25)).unwrap();
    table.push(&input(2), &output(2.5)).unwrap();

    let csv = generate_csv_report(&table).unwrap();
    let mut lines = csv.lines();
    let mut expected_header = flatten_paths(&input(1)).unwrap();
    expected_header.extend(flatten_paths(&output(1.0)).unwrap());
    assert_eq!(lines.next().unwrap(), expected_header.join(","));
    assert_eq!(
        lines.next().unwrap(),
        "1,4,Noop,1000,1s,10s,\"{x: 5, y: 6}\",1.25,2.5,null"
    );
    assert_eq!(lines.count(), 1);

    let summary = Summary::new().fields(["f", "latency.median_ms"]);
    assert_eq!(
        summary.render_row(&table.rows()[1]).unwrap(),
        "{f: 2, latency.median_ms: 2.5}"
    );
}

#[test]
fn test_results_table_rejects_other_shapes() {
    let mut table = ResultsTable::new();
    table.push(&input(1), &output(1.0)).unwrap();
    let err = table.push(&scenario(), &output(1.0)).unwrap_err();
    assert!(matches!(err, ReportError::SchemaMismatch { row: 1, .. }));
}

#[test]
fn test_json_report_from_derived_records() {
    let mut table = ResultsTable::new();
    table.push(&input(1), &output(1.25)).unwrap();

    let json = generate_json_report(&Report::new(&table)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    let row = &parsed["rows"][0];
    assert_eq!(row["input"]["leader_options"]["stutter_every"], 1000);
    assert_eq!(
        row["input"]["leader_options"]["election_options"]["ping_period"],
        1.0
    );
    assert_eq!(row["input"]["workload"], serde_json::json!({"x": 5, "y": 6}));
    assert!(row["input"].get("scratch").is_none());
    assert_eq!(row["output"]["latency"]["p90_ms"], 2.5);
    assert!(row["output"]["start_throughput_1s"].is_null());
    assert_eq!(parsed["columns"].as_array().unwrap().len(), 10);
}

#[test]
fn test_selected_table_keeps_only_selected_leaves() {
    let mut table = ResultsTable::new();
    table.push(&input(1), &output(1.0)).unwrap();
    let mut latency = table.select(|c| c.starts_with("latency."));
    latency.push(&input(2), &output(2.0)).unwrap();

    let human = format_human_output(&latency);
    assert!(!human.contains("state_machine"));
    assert!(human.contains("median_ms: 2"));

    let json = generate_json_report(&Report::new(&latency)).unwrap();
    assert!(!json.contains("leader_options"));
    assert_eq!(
        generate_csv_report(&latency).unwrap(),
        "latency.median_ms,latency.p90_ms\n1,2\n2,4\n"
    );
}
