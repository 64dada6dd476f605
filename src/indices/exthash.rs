// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Extendible-hashing index backend.
//!
//! Unordered key-value mapping with expected O(1) lookups. A directory of
//! `2^D` slots (global depth `D`) references buckets in an arena; each
//! bucket tracks a local depth `<= D`, the number of low hash bits its
//! keys agree on. A full bucket splits by the next hash bit; when the
//! splitting bucket already uses all `D` bits, the directory doubles
//! first, duplicating every entry.
//!
//! ## Invariant
//!
//! For every directory index `i`, every key `k` in the referenced bucket
//! satisfies `h(k) mod 2^local == i mod 2^local`.
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::indices::{ExtHashMap, Index};
//!
//! let mut map = ExtHashMap::new();
//! map.insert("page".to_string(), 1usize)?;
//! map.insert("page".to_string(), 2usize)?; // overwrite, unique keys
//!
//! assert_eq!(map.get(&"page".to_string()), Some(2));
//! assert_eq!(map.len(), 1);
//! # Ok::<(), relbase::RelError>(())
//! ```

use crate::error::{RelError, RelResult};
use crate::indices::hashing::hash_key;
use crate::indices::Index;
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use std::fmt::Debug;
use std::hash::Hash;

/// Default directory size (power of two).
const DEFAULT_DIRECTORY: usize = 4;

/// Default slots per bucket.
const DEFAULT_SLOTS: usize = 4;

/// Directory growth bound; beyond this the key distribution is
/// pathological and insertion reports `IndexCapacity`.
const MAX_GLOBAL_DEPTH: u32 = 30;

#[derive(Debug, Clone)]
struct Bucket<K, V> {
    entries: Vec<(K, V)>,
    local_depth: u32,
}

/// Extendible-hashing key-value mapping.
///
/// ## Type Parameters
/// - `K`: Key type (Clone + Eq + Hash)
/// - `V`: Value type (Clone)
///
/// ## Thread Safety
/// - Not internally synchronised; write operations take `&mut self`
#[derive(Debug)]
pub struct ExtHashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Bucket arena; split buckets stay in place, new siblings append.
    buckets: Vec<Bucket<K, V>>,

    /// Directory of bucket ids, sized `2^global_depth`.
    directory: Vec<usize>,

    /// Number of low hash bits indexing the directory.
    global_depth: u32,

    /// Slot capacity per bucket.
    slots: usize,

    /// Stored key count.
    len: usize,
}

impl<K, V> ExtHashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Create a map with the default directory size 4 and 4 slots per
    /// bucket.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DIRECTORY, DEFAULT_SLOTS)
            .expect("default extendible-hash geometry is valid")
    }

    /// Create a map with explicit geometry.
    ///
    /// ## Input
    /// - `directory_size`: initial directory size (power of two, >= 1)
    /// - `slots`: bucket capacity (>= 1)
    ///
    /// ## Error Conditions
    /// - `InvalidSchema` is never returned here; geometry errors are
    ///   `IndexCapacity` with the offending parameter named
    pub fn with_capacity(directory_size: usize, slots: usize) -> RelResult<Self> {
        if directory_size == 0 || !directory_size.is_power_of_two() {
            return Err(RelError::IndexCapacity {
                backend: "exthash".to_string(),
                reason: format!(
                    "directory size must be a power of two, got {}",
                    directory_size
                ),
            });
        }
        if slots == 0 {
            return Err(RelError::IndexCapacity {
                backend: "exthash".to_string(),
                reason: "bucket capacity must be at least 1".to_string(),
            });
        }

        let global_depth = directory_size.trailing_zeros();
        let buckets = (0..directory_size)
            .map(|_| Bucket {
                entries: Vec::with_capacity(slots),
                local_depth: global_depth,
            })
            .collect();

        Ok(Self {
            buckets,
            directory: (0..directory_size).collect(),
            global_depth,
            slots,
            len: 0,
        })
    }

    /// Current directory size (`2^global_depth`).
    pub fn directory_size(&self) -> usize {
        self.directory.len()
    }

    /// Number of low hash bits indexing the directory.
    pub fn global_depth(&self) -> u32 {
        self.global_depth
    }

    /// Local depth of the bucket a key addresses.
    pub fn local_depth(&self, key: &K) -> u32 {
        self.buckets[self.directory[self.dir_index(key)]].local_depth
    }

    /// Local depth of the bucket a directory slot references.
    pub fn slot_local_depth(&self, slot: usize) -> u32 {
        self.buckets[self.directory[slot]].local_depth
    }

    fn dir_index(&self, key: &K) -> usize {
        (hash_key(key) & ((1u64 << self.global_depth) - 1)) as usize
    }

    /// Double the directory, duplicating every entry.
    fn double_directory(&mut self) -> RelResult<()> {
        if self.global_depth >= MAX_GLOBAL_DEPTH {
            return Err(RelError::IndexCapacity {
                backend: "exthash".to_string(),
                reason: format!("global depth limit {} reached", MAX_GLOBAL_DEPTH),
            });
        }

        // Low-bit addressing: slot i and slot i + 2^D reference the same
        // bucket after doubling.
        let current = self.directory.clone();
        self.directory.extend(current);
        self.global_depth += 1;

        MetricsCollector::global().record(Metric::new(
            "exthash.directory_double",
            1.0,
            MetricUnit::Count,
        ));
        Ok(())
    }

    /// Split a full bucket by its next hash bit and repoint the
    /// directory entries that referenced it.
    fn split_bucket(&mut self, bucket_id: usize) {
        let local = self.buckets[bucket_id].local_depth;
        let bit = 1u64 << local;

        let moved = std::mem::take(&mut self.buckets[bucket_id].entries);
        self.buckets[bucket_id].local_depth = local + 1;

        let sibling_id = self.buckets.len();
        self.buckets.push(Bucket {
            entries: Vec::with_capacity(self.slots),
            local_depth: local + 1,
        });

        // Redistribute by h(k) mod 2^(local+1)
        for (key, value) in moved {
            if hash_key(&key) & bit != 0 {
                self.buckets[sibling_id].entries.push((key, value));
            } else {
                self.buckets[bucket_id].entries.push((key, value));
            }
        }

        for (slot, target) in self.directory.iter_mut().enumerate() {
            if *target == bucket_id && (slot as u64) & bit != 0 {
                *target = sibling_id;
            }
        }

        MetricsCollector::global().record(Metric::new(
            "exthash.bucket_split",
            1.0,
            MetricUnit::Count,
        ));
    }

    /// Verify the directory invariant.
    ///
    /// ## Error Conditions
    /// - `CorruptedIndex`: a key disagrees with its directory slot on the
    ///   low local-depth bits, a bucket overflows its slots, or the
    ///   directory size does not match the global depth
    pub fn validate(&self) -> RelResult<()> {
        let corrupted = |reason: String| RelError::CorruptedIndex {
            backend: "exthash".to_string(),
            reason,
        };

        if self.directory.len() != 1usize << self.global_depth {
            return Err(corrupted(format!(
                "directory size {} does not match global depth {}",
                self.directory.len(),
                self.global_depth
            )));
        }

        for (slot, &bucket_id) in self.directory.iter().enumerate() {
            let bucket = &self.buckets[bucket_id];
            if bucket.local_depth > self.global_depth {
                return Err(corrupted(format!(
                    "bucket local depth {} exceeds global depth {}",
                    bucket.local_depth, self.global_depth
                )));
            }
            if bucket.entries.len() > self.slots {
                return Err(corrupted("bucket exceeds slot capacity".to_string()));
            }

            let mask = (1u64 << bucket.local_depth) - 1;
            for (key, _) in &bucket.entries {
                if hash_key(key) & mask != (slot as u64) & mask {
                    return Err(corrupted(format!(
                        "key in directory slot {} disagrees on low {} bits",
                        slot, bucket.local_depth
                    )));
                }
            }
        }
        Ok(())
    }
}

impl<K, V> Default for ExtHashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<K, V> for ExtHashMap<K, V>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
    V: Clone + Debug + Send + Sync,
{
    /// Point lookup via the directory.
    fn get(&self, key: &K) -> Option<V> {
        self.buckets[self.directory[self.dir_index(key)]]
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Insert or overwrite; splits (and doubles the directory) as needed.
    fn insert(&mut self, key: K, value: V) -> RelResult<()> {
        loop {
            let bucket_id = self.directory[self.dir_index(&key)];

            if let Some(slot) = self.buckets[bucket_id]
                .entries
                .iter_mut()
                .find(|(k, _)| *k == key)
            {
                slot.1 = value;
                return Ok(());
            }

            if self.buckets[bucket_id].entries.len() < self.slots {
                self.buckets[bucket_id].entries.push((key, value));
                self.len += 1;
                return Ok(());
            }

            if self.buckets[bucket_id].local_depth == self.global_depth {
                self.double_directory()?;
            }
            self.split_bucket(bucket_id);
        }
    }

    /// All entries in arbitrary order.
    fn entries(&self) -> Vec<(K, V)> {
        // Every arena bucket stays referenced by the directory, so the
        // arena enumerates each entry exactly once.
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.entries.iter().cloned())
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn backend_type(&self) -> &'static str {
        "exthash"
    }
}
