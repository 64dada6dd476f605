// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the extendible-hashing backend.

use crate::indices::hashing::hash_key;
use crate::indices::{ExtHashMap, Index};

#[test]
fn test_insert_and_get() {
    let mut map = ExtHashMap::new();
    map.insert("a".to_string(), 1usize).expect("insert");
    map.insert("b".to_string(), 2usize).expect("insert");

    assert_eq!(map.get(&"a".to_string()), Some(1));
    assert_eq!(map.get(&"b".to_string()), Some(2));
    assert_eq!(map.get(&"c".to_string()), None);
    assert_eq!(map.len(), 2);
}

#[test]
fn test_overwrite_keeps_keys_unique() {
    let mut map = ExtHashMap::new();
    map.insert(7u32, "first").expect("insert");
    map.insert(7u32, "second").expect("insert");

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&7), Some("second"));
}

#[test]
fn test_geometry_validation() {
    assert!(ExtHashMap::<u32, u32>::with_capacity(3, 4).is_err());
    assert!(ExtHashMap::<u32, u32>::with_capacity(0, 4).is_err());
    assert!(ExtHashMap::<u32, u32>::with_capacity(4, 0).is_err());
    assert!(ExtHashMap::<u32, u32>::with_capacity(8, 2).is_ok());
}

#[test]
fn test_colliding_keys_force_directory_growth() {
    // 17 keys whose hashes agree on the low 2 bits all address directory
    // slot 0 of a size-4 directory
    let colliding: Vec<u64> = (0u64..)
        .filter(|k| hash_key(k) % 4 == 0)
        .take(17)
        .collect();

    let mut map = ExtHashMap::with_capacity(4, 4).expect("geometry");
    for &key in &colliding {
        map.insert(key, key as usize).expect("insert");
    }

    assert!(map.directory_size() >= 8);
    assert!(map.slot_local_depth(0) >= 3);

    for &key in &colliding {
        assert_eq!(map.get(&key), Some(key as usize));
    }
    assert_eq!(map.len(), 17);
    map.validate().expect("directory invariant holds");
}

#[test]
fn test_directory_invariant_under_load() {
    let mut map = ExtHashMap::with_capacity(4, 4).expect("geometry");
    for i in 0..500u32 {
        map.insert(i, i * 3).expect("insert");
    }

    assert_eq!(map.len(), 500);
    map.validate().expect("directory invariant holds");

    for i in 0..500u32 {
        assert_eq!(map.get(&i), Some(i * 3));
    }
}

#[test]
fn test_entries_enumerate_every_pair_once() {
    let mut map = ExtHashMap::new();
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
    let map = ExtHashMap::<u32, u32>::new();
    assert_eq!(map.backend_type(), "exthash");
}
