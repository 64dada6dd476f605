// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for composite keys.

use crate::value::{KeyType, Value};

#[test]
fn test_key_equality_component_wise() {
    let a = KeyType::new(vec![Value::I32(1), Value::Str("x".into())]);
    let b = KeyType::new(vec![Value::I32(1), Value::Str("x".into())]);
    let c = KeyType::new(vec![Value::I32(1), Value::Str("y".into())]);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_key_lexicographic_order() {
    let a = KeyType::new(vec![Value::I32(1), Value::I32(9)]);
    let b = KeyType::new(vec![Value::I32(2), Value::I32(0)]);
    let c = KeyType::new(vec![Value::I32(2), Value::I32(1)]);

    // First component decides before the second is consulted
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn test_key_project() {
    let tuple = vec![Value::I32(7), Value::Str("n".into()), Value::F64(1.5)];
    let key = KeyType::project(&tuple, &[0, 2]);

    assert_eq!(key.arity(), 2);
    assert_eq!(key.values(), &[Value::I32(7), Value::F64(1.5)]);
}

#[test]
fn test_key_from_value() {
    let key = KeyType::from_value(Value::I32(3));
    assert_eq!(key.arity(), 1);
    assert_eq!(key, KeyType::new(vec![Value::I32(3)]));
}

#[test]
fn test_key_display() {
    let key = KeyType::new(vec![Value::I32(1), Value::Str("A".into())]);
    assert_eq!(key.to_string(), "(1, A)");
}
