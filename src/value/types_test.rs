// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for Domain and Value.

use crate::value::{Domain, Value};
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(v: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    v.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_value_domain() {
    assert_eq!(Value::I8(1).domain(), Domain::I8);
    assert_eq!(Value::I16(1).domain(), Domain::I16);
    assert_eq!(Value::I32(1).domain(), Domain::I32);
    assert_eq!(Value::I64(1).domain(), Domain::I64);
    assert_eq!(Value::F32(1.0).domain(), Domain::F32);
    assert_eq!(Value::F64(1.0).domain(), Domain::F64);
    assert_eq!(Value::Char('a').domain(), Domain::Char);
    assert_eq!(Value::Str("a".into()).domain(), Domain::Str);
}

#[test]
fn test_value_matches() {
    assert!(Value::I32(42).matches(Domain::I32));
    assert!(!Value::I32(42).matches(Domain::I64));
    assert!(Value::Str("x".into()).matches(Domain::Str));
    assert!(!Value::Char('x').matches(Domain::Str));
}

#[test]
fn test_value_ordering_integers() {
    assert!(Value::I32(1) < Value::I32(2));
    assert!(Value::I64(-5) < Value::I64(0));
    assert_eq!(Value::I16(7).cmp(&Value::I16(7)), Ordering::Equal);
}

#[test]
fn test_value_ordering_strings() {
    assert!(Value::Str("abc".into()) < Value::Str("abd".into()));
    assert!(Value::Str("ab".into()) < Value::Str("abc".into()));
}

#[test]
fn test_value_float_total_order() {
    assert!(Value::F64(1.5) < Value::F64(2.5));
    // NaN is ordered, not poisonous: total ordering places it above +inf
    assert!(Value::F64(f64::INFINITY) < Value::F64(f64::NAN));
    assert_eq!(
        Value::F64(f64::NAN).cmp(&Value::F64(f64::NAN)),
        Ordering::Equal
    );
}

#[test]
fn test_value_equality_is_value_equality() {
    assert_eq!(Value::Str("abc".into()), Value::Str("abc".into()));
    assert_ne!(Value::I32(1), Value::I32(2));
    // Mixed domains never compare equal
    assert_ne!(Value::I32(1), Value::I64(1));
}

#[test]
fn test_value_hash_consistent_with_eq() {
    let a = Value::Str("page".into());
    let b = Value::Str("page".into());
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let f1 = Value::F64(3.25);
    let f2 = Value::F64(3.25);
    assert_eq!(hash_of(&f1), hash_of(&f2));
}

#[test]
fn test_value_display() {
    assert_eq!(Value::I32(42).to_string(), "42");
    assert_eq!(Value::Str("hello".into()).to_string(), "hello");
    assert_eq!(Value::Char('x').to_string(), "x");
}

#[test]
fn test_value_from_conversions() {
    assert_eq!(Value::from(3i32), Value::I32(3));
    assert_eq!(Value::from(3i64), Value::I64(3));
    assert_eq!(Value::from("abc"), Value::Str("abc".into()));
    assert_eq!(Value::from('c'), Value::Char('c'));
}

#[test]
fn test_domain_name_roundtrip() {
    for domain in [
        Domain::I8,
        Domain::I16,
        Domain::I32,
        Domain::I64,
        Domain::F32,
        Domain::F64,
        Domain::Char,
        Domain::Str,
    ] {
        assert_eq!(domain.to_string(), domain.name());
    }
}
