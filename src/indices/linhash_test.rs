// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the linear-hashing backend.

use crate::indices::{Index, LinHashMap};

#[test]
fn test_insert_and_get() {
    let mut map = LinHashMap::new();
    map.insert("a".to_string(), 1usize).expect("insert");
    map.insert("b".to_string(), 2usize).expect("insert");

    assert_eq!(map.get(&"a".to_string()), Some(1));
    assert_eq!(map.get(&"b".to_string()), Some(2));
    assert_eq!(map.get(&"c".to_string()), None);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_overwrite_keeps_keys_unique() {
    let mut map = LinHashMap::new();
    map.insert(9u32, "first").expect("insert");
    map.insert(9u32, "second").expect("insert");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&9), Some("second"));
}

#[test]
fn test_geometry_validation() {
    assert!(LinHashMap::<u32, u32>::with_capacity(0, 4).is_err());
    assert!(LinHashMap::<u32, u32>::with_capacity(4, 0).is_err());
    assert!(LinHashMap::<u32, u32>::with_capacity(5, 2).is_ok());
}

#[test]
fn test_split_pointer_advances_one_per_overload() {
    let mut map = LinHashMap::with_capacity(4, 4).expect("geometry");

    // Below load 1.0 nothing splits
    for i in 0..15u64 {
        map.insert(i, i).expect("insert");
    }
    assert_eq!(map.split_pointer(), 0);
    assert_eq!(map.round_size(), 4);

    // Each overload advances the pointer by exactly one
    map.insert(15, 15).expect("insert");
    assert_eq!(map.split_pointer(), 1);
    map.insert(16, 16).expect("insert");
    assert_eq!(map.split_pointer(), 2);
    map.insert(17, 17).expect("insert");
    assert_eq!(map.split_pointer(), 3);

    // The wrapping split resets the pointer and doubles the round
    map.insert(18, 18).expect("insert");
    assert_eq!(map.split_pointer(), 0);
    assert_eq!(map.round_size(), 8);

    for i in 0..19u64 {
        assert_eq!(map.get(&i), Some(i));
    }
    map.validate().expect("address rule holds");
}

#[test]
fn test_address_rule_under_load() {
    let mut map = LinHashMap::with_capacity(4, 4).expect("geometry");
    for i in 0..300u32 {
        map.insert(i, i as usize).expect("insert");
    }

    assert_eq!(map.len(), 300);
    map.validate().expect("address rule holds");

    for i in 0..300u32 {
        assert_eq!(map.get(&i), Some(i as usize));
    }
}

#[test]
fn test_overflow_chains_before_split() {
    // One home bucket and one slot: every additional key chains before
    // the load check splits
    let mut map = LinHashMap::with_capacity(1, 2).expect("geometry");
    for i in 0..20u32 {
        map.insert(i, i).expect("insert");
    }

    assert_eq!(map.len(), 20);
    map.validate().expect("address rule holds");
    for i in 0..20u32 {
        assert_eq!(map.get(&i), Some(i));
    }
}

#[test]
fn test_entries_enumerate_every_pair_once() {
    let mut map = LinHashMap::new();
    for i in 0..100u32 {
        map.insert(i, i).expect("insert");
    }

    let mut keys: Vec<u32> = map.entries().into_iter().map(|(k, _)| k).collect();
    keys.sort_unstable();
    let expected: Vec<u32> = (0..100).collect();
    assert_eq!(keys, expected);
}

#[test]
fn test_backend_type() {
    let map = LinHashMap::<u32, u32>::new();
    assert_eq!(map.backend_type(), "linhash");
}
