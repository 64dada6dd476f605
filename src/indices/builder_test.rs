// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tests for the index builder factory.

use crate::indices::{build_key_index, IndexBackend, IndexConfig};
use crate::value::{KeyType, Value};

#[test]
fn test_default_backend_is_bptree() {
    let index = build_key_index(&IndexConfig::default()).expect("build");
    assert_eq!(index.backend_type(), "bptree");
}

#[test]
fn test_build_each_backend() {
    for (backend, name) in [
        (IndexBackend::BpTree, "bptree"),
        (IndexBackend::ExtHash, "exthash"),
        (IndexBackend::LinHash, "linhash"),
    ] {
        let mut index =
            build_key_index(&IndexConfig::for_backend(backend)).expect("build");
        assert_eq!(index.backend_type(), name);

        index
            .insert(KeyType::from_value(Value::I32(1)), 0)
            .expect("insert");
        assert_eq!(index.get(&KeyType::from_value(Value::I32(1))), Some(0));
        assert_eq!(index.get(&KeyType::from_value(Value::I32(2))), None);
    }
}

#[test]
fn test_from_toml() {
    let config = IndexConfig::from_toml(
        r#"
backend = "exthash"
buckets = 8
slots = 2
"#,
    )
    .expect("parse");

    assert_eq!(config.backend, IndexBackend::ExtHash);
    assert_eq!(config.buckets, Some(8));
    assert_eq!(config.slots, Some(2));
}

#[test]
fn test_from_toml_defaults() {
    let config = IndexConfig::from_toml("").expect("parse");
    assert_eq!(config.backend, IndexBackend::BpTree);
    assert_eq!(config.btree_order, None);
}

#[test]
fn test_from_toml_rejects_unknown_backend() {
    assert!(IndexConfig::from_toml(r#"backend = "skiplist""#).is_err());
}

#[test]
fn test_invalid_order_propagates() {
    let config = IndexConfig {
        backend: IndexBackend::BpTree,
        btree_order: Some(2),
        ..IndexConfig::default()
    };
    assert!(build_key_index(&config).is_err());
}
