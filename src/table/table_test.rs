// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for table storage and keyed selection.

use crate::error::RelError;
use crate::indices::{IndexBackend, IndexConfig};
use crate::schema::{ColumnDef, Schema};
use crate::table::Table;
use crate::value::{Domain, KeyType, Value};

fn student_schema() -> Schema {
    Schema::new(
        "student",
        vec![
            ColumnDef::new("id", Domain::I32),
            ColumnDef::new("name", Domain::Str),
        ],
        &["id"],
    )
    .expect("valid schema")
}

fn student_table() -> Table {
    let mut table = Table::with_default_index(student_schema()).expect("create");
    table
        .insert(vec![Value::I32(1), Value::Str("A".into())])
        .expect("insert");
    table
        .insert(vec![Value::I32(2), Value::Str("B".into())])
        .expect("insert");
    table
}

#[test]
fn test_insert_preserves_order() {
    let table = student_table();
    assert_eq!(table.len(), 2);
    assert_eq!(table.tuples()[0][0], Value::I32(1));
    assert_eq!(table.tuples()[1][0], Value::I32(2));
    table.validate().expect("invariants hold");
}

#[test]
fn test_insert_rejects_type_mismatch_without_side_effects() {
    let mut table = student_table();

    // Wrong domain
    let result = table.insert(vec![Value::I64(3), Value::Str("C".into())]);
    assert!(matches!(result, Err(RelError::TypeMismatch { .. })));

    // Wrong arity
    let result = table.insert(vec![Value::I32(3)]);
    assert!(matches!(result, Err(RelError::TypeMismatch { .. })));

    assert_eq!(table.len(), 2);
    table.validate().expect("invariants hold");
}

#[test]
fn test_insert_rejects_duplicate_key_without_side_effects() {
    let mut table = student_table();

    let result = table.insert(vec![Value::I32(1), Value::Str("clone".into())]);
    assert!(matches!(result, Err(RelError::DuplicateKey { .. })));

    assert_eq!(table.len(), 2);
    let hit = table
        .select_key(&KeyType::from_value(Value::I32(1)))
        .expect("probe");
    assert_eq!(hit.tuples()[0][1], Value::Str("A".into()));
}

#[test]
fn test_select_true_preserves_everything() {
    let table = student_table();
    let all = table.select(|_| true).expect("select");
    assert_eq!(all.tuples(), table.tuples());
}

#[test]
fn test_select_filters_in_order() {
    let mut table = Table::with_default_index(student_schema()).expect("create");
    for i in 1..=6 {
        table
            .insert(vec![Value::I32(i), Value::Str(format!("s{}", i).into())])
            .expect("insert");
    }

    let even = table
        .select(|tuple| matches!(tuple[0], Value::I32(id) if id % 2 == 0))
        .expect("select");
    let ids: Vec<&Value> = even.tuples().iter().map(|t| &t[0]).collect();
    assert_eq!(ids, vec![&Value::I32(2), &Value::I32(4), &Value::I32(6)]);
}

#[test]
fn test_select_key_hit_and_miss() {
    let table = student_table();

    let hit = table
        .select_key(&KeyType::from_value(Value::I32(2)))
        .expect("probe");
    assert_eq!(hit.len(), 1);
    assert_eq!(hit.tuples()[0][1], Value::Str("B".into()));

    let miss = table
        .select_key(&KeyType::from_value(Value::I32(9)))
        .expect("probe");
    assert!(miss.is_empty());
}

#[test]
fn test_every_backend_serves_as_key_index() {
    for backend in [
        IndexBackend::BpTree,
        IndexBackend::ExtHash,
        IndexBackend::LinHash,
    ] {
        let mut table =
            Table::new(student_schema(), IndexConfig::for_backend(backend)).expect("create");
        for i in 0..50 {
            table
                .insert(vec![Value::I32(i), Value::Str(format!("s{}", i).into())])
                .expect("insert");
        }

        table.validate().expect("invariants hold");
        let hit = table
            .select_key(&KeyType::from_value(Value::I32(31)))
            .expect("probe");
        assert_eq!(hit.len(), 1);
    }
}

#[test]
fn test_composite_key() {
    let schema = Schema::new(
        "enroll",
        vec![
            ColumnDef::new("sid", Domain::I32),
            ColumnDef::new("cid", Domain::Str),
        ],
        &["sid", "cid"],
    )
    .expect("valid schema");

    let mut table = Table::with_default_index(schema).expect("create");
    table
        .insert(vec![Value::I32(1), Value::Str("c1".into())])
        .expect("insert");
    table
        .insert(vec![Value::I32(1), Value::Str("c2".into())])
        .expect("insert");

    // Same sid, different cid: distinct composite keys
    assert_eq!(table.len(), 2);

    let result = table.insert(vec![Value::I32(1), Value::Str("c1".into())]);
    assert!(matches!(result, Err(RelError::DuplicateKey { .. })));
}

#[test]
fn test_new_revalidates_hand_built_schema() {
    let schema = Schema {
        name: "broken".to_string(),
        columns: vec![],
        key: vec!["id".to_string()],
    };
    assert!(matches!(
        Table::with_default_index(schema),
        Err(RelError::InvalidSchema { .. })
    ));
}

#[test]
fn test_display_renders_rows_in_order() {
    let table = student_table();
    let rendered = table.to_string();

    assert!(rendered.contains("student"));
    assert!(rendered.contains("| id "));
    let a = rendered.find("A").expect("first row");
    let b = rendered.find("B").expect("second row");
    assert!(a < b);
}
