// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for column resolution and tuple validation.

use crate::error::RelError;
use crate::schema::{ColumnDef, Schema};
use crate::value::{Domain, Value};

fn student() -> Schema {
    Schema::new(
        "student",
        vec![
            ColumnDef::new("id", Domain::I32),
            ColumnDef::new("name", Domain::Str),
            ColumnDef::new("gpa", Domain::F64),
        ],
        &["id"],
    )
    .expect("valid schema")
}

#[test]
fn test_match_columns() {
    let schema = student();
    assert_eq!(
        schema.match_columns(&["gpa", "id"]).expect("known names"),
        vec![2, 0]
    );
}

#[test]
fn test_match_columns_unknown_name() {
    let schema = student();
    let err = schema.match_columns(&["id", "salary"]).unwrap_err();
    assert_eq!(
        err,
        RelError::UnknownAttribute {
            attribute: "salary".to_string(),
            relation: "student".to_string(),
        }
    );
}

#[test]
fn test_extract_positional_copy() {
    let schema = student();
    let tuple = vec![Value::I32(1), Value::Str("A".into()), Value::F64(3.5)];

    let projected = schema.extract(&tuple, &[2, 0]);
    assert_eq!(projected, vec![Value::F64(3.5), Value::I32(1)]);
}

#[test]
fn test_type_check_passes_on_match() {
    let schema = student();
    let tuple = vec![Value::I32(1), Value::Str("A".into()), Value::F64(3.5)];
    schema.type_check(&tuple).expect("matching tuple");
}

#[test]
fn test_type_check_rejects_arity_mismatch() {
    let schema = student();
    let tuple = vec![Value::I32(1), Value::Str("A".into())];
    assert!(matches!(
        schema.type_check(&tuple),
        Err(RelError::TypeMismatch { .. })
    ));
}

#[test]
fn test_type_check_rejects_wrong_domain() {
    let schema = student();
    let tuple = vec![Value::I64(1), Value::Str("A".into()), Value::F64(3.5)];

    match schema.type_check(&tuple) {
        Err(RelError::TypeMismatch { column, reason, .. }) => {
            assert_eq!(column, "id");
            assert!(reason.contains("expected i32"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_compatible_ignores_names() {
    let schema = student();
    let renamed = Schema::new(
        "alumni",
        vec![
            ColumnDef::new("number", Domain::I32),
            ColumnDef::new("label", Domain::Str),
            ColumnDef::new("score", Domain::F64),
        ],
        &["number"],
    )
    .expect("valid schema");

    assert!(schema.compatible(&renamed));
}

#[test]
fn test_incompatible_on_domain_or_arity() {
    let schema = student();
    let wrong_domain = Schema::new(
        "other",
        vec![
            ColumnDef::new("id", Domain::I64),
            ColumnDef::new("name", Domain::Str),
            ColumnDef::new("gpa", Domain::F64),
        ],
        &["id"],
    )
    .expect("valid schema");
    let wrong_arity = Schema::new(
        "short",
        vec![ColumnDef::new("id", Domain::I32)],
        &["id"],
    )
    .expect("valid schema");

    assert!(!schema.compatible(&wrong_domain));
    assert!(!schema.compatible(&wrong_arity));
}
