// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Index trait abstraction for pluggable backends.
//!
//! Allows a table to switch between the B+-Tree, extendible-hashing, or
//! linear-hashing backend without changing storage or operator logic.

use crate::error::RelResult;
use std::fmt::Debug;

/// Common interface for all index implementations.
///
/// ## Type Parameters
/// - `K`: Key type (must be Clone for return values)
/// - `V`: Value type (must be Clone for return values)
///
/// ## Implementations
/// - `BpTreeMap<K, V>`: order-preserving, supports range scans
/// - `ExtHashMap<K, V>`: extendible hashing, expected O(1) lookups
/// - `LinHashMap<K, V>`: linear hashing with overflow chains
///
/// ## Thread Safety
/// - Implementations must be `Send + Sync` so tables can own them as
///   boxed trait objects
/// - Write operations require `&mut self` (exclusive access)
pub trait Index<K, V>: Send + Sync + Debug {
    /// Get value for exact key match.
    ///
    /// ## Input
    /// - `key`: Key to look up
    ///
    /// ## Output
    /// - `Some(V)` if key exists
    /// - `None` if key not found
    fn get(&self, key: &K) -> Option<V>;

    /// Insert a key-value pair.
    ///
    /// Equal-key behaviour is backend-specific: the hash backends
    /// overwrite (unique keys, last write wins), the B+-Tree rejects the
    /// duplicate as a recorded no-op.
    ///
    /// ## Error Conditions
    /// - `IndexCapacity`: backend cannot grow further (pathological hash
    ///   collision load)
    fn insert(&mut self, key: K, value: V) -> RelResult<()>;

    /// All key-value pairs.
    ///
    /// ## Output
    /// - Ascending key order for the B+-Tree
    /// - Arbitrary order for the hash backends
    fn entries(&self) -> Vec<(K, V)>;

    /// Total key count.
    fn len(&self) -> usize;

    /// Check whether the index holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Backend type identifier.
    ///
    /// ## Returns
    /// - `"bptree"`, `"exthash"`, or `"linhash"`
    fn backend_type(&self) -> &'static str;
}

/// Extended interface for order-preserving backends.
///
/// Range-dependent operators are gated on this capability; the hash
/// backends do not implement it.
pub trait OrderedIndex<K, V>: Index<K, V> {
    /// Minimum key.
    ///
    /// ## Error Conditions
    /// - `EmptyIndex`: index holds no keys
    fn first_key(&self) -> RelResult<K>;

    /// Maximum key.
    ///
    /// ## Error Conditions
    /// - `EmptyIndex`: index holds no keys
    fn last_key(&self) -> RelResult<K>;

    /// Entries with keys in `[min, to)`, ascending.
    fn head(&self, to: &K) -> Vec<(K, V)>;

    /// Entries with keys in `[from, max]`, ascending.
    fn tail(&self, from: &K) -> Vec<(K, V)>;

    /// Entries with keys in `[from, to)`, ascending.
    fn range(&self, from: &K, to: &K) -> Vec<(K, V)>;
}
