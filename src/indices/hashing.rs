// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Shared key hashing for the hash-based backends.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Intrinsic hash of a key.
///
/// Uses a `DefaultHasher` constructed with fixed keys, so the value is
/// deterministic across runs and both hash backends agree on it.
pub(crate) fn hash_key<K: Hash>(key: &K) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
