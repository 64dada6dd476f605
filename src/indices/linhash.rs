// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Linear-hashing index backend.
//!
//! Unordered key-value mapping that grows one home bucket at a time. A
//! split pointer walks the home buckets of the current round; overloads
//! (load factor >= 1) split the pointed-at bucket by rehashing its chain
//! under the doubled modulus, then advance the pointer. When the pointer
//! wraps, the round size doubles.
//!
//! ## Address rule
//!
//! `i = h(k) mod mod1`; if `i < split`, the bucket at `i` has already
//! been split this round and the key lives under `h(k) mod mod2` with
//! `mod2 = 2 * mod1`.
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::indices::{Index, LinHashMap};
//!
//! let mut map = LinHashMap::new();
//! for i in 0..40u32 {
//!     map.insert(i, i as usize)?;
//! }
//!
//! assert_eq!(map.get(&17), Some(17));
//! assert_eq!(map.len(), 40);
//! # Ok::<(), relbase::RelError>(())
//! ```

use crate::error::{RelError, RelResult};
use crate::indices::hashing::hash_key;
use crate::indices::Index;
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use std::fmt::Debug;
use std::hash::Hash;

/// Default initial home-bucket count.
const DEFAULT_BUCKETS: usize = 4;

/// Default slots per bucket.
const DEFAULT_SLOTS: usize = 4;

/// Bucket with a fixed slot capacity and an overflow chain.
#[derive(Debug, Clone)]
struct Bucket<K, V> {
    entries: Vec<(K, V)>,
    overflow: Option<Box<Bucket<K, V>>>,
}

impl<K, V> Bucket<K, V>
where
    K: Eq,
{
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            overflow: None,
        }
    }

    /// Collect every entry of the chain, consuming it.
    fn drain_chain(self) -> Vec<(K, V)> {
        let mut collected = self.entries;
        let mut current = self.overflow;
        while let Some(bucket) = current {
            collected.extend(bucket.entries);
            current = bucket.overflow;
        }
        collected
    }

    /// Overwrite an existing key anywhere in the chain.
    ///
    /// ## Output
    /// - `None` if the value was consumed by an overwrite
    /// - `Some(value)` handed back when the key is absent
    fn try_overwrite(&mut self, key: &K, value: V) -> Option<V> {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value;
            return None;
        }
        match &mut self.overflow {
            Some(next) => next.try_overwrite(key, value),
            None => Some(value),
        }
    }

    /// Place a pair in the first free slot of the chain, appending an
    /// overflow bucket when every slot is taken. The key must be absent.
    fn place(&mut self, slots: usize, key: K, value: V) {
        if self.entries.len() < slots {
            self.entries.push((key, value));
            return;
        }
        match &mut self.overflow {
            Some(next) => next.place(slots, key, value),
            None => {
                let mut fresh = Bucket::new();
                fresh.entries.push((key, value));
                self.overflow = Some(Box::new(fresh));
            }
        }
    }
}

/// Linear-hashing key-value mapping with overflow chains.
///
/// ## Type Parameters
/// - `K`: Key type (Clone + Eq + Hash)
/// - `V`: Value type (Clone)
///
/// ## Thread Safety
/// - Not internally synchronised; write operations take `&mut self`
#[derive(Debug)]
pub struct LinHashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Home buckets: indices `[0, mod1 + split)`.
    buckets: Vec<Bucket<K, V>>,

    /// Current round size.
    mod1: usize,

    /// Next home bucket to split, in `[0, mod1)`.
    split: usize,

    /// Slot capacity per bucket.
    slots: usize,

    /// Stored key count.
    len: usize,
}

impl<K, V> LinHashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Create a map with the default geometry (4 home buckets, 4 slots).
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUCKETS, DEFAULT_SLOTS)
            .expect("default linear-hash geometry is valid")
    }

    /// Create a map with explicit geometry.
    ///
    /// ## Input
    /// - `buckets`: initial home-bucket count (>= 1)
    /// - `slots`: bucket capacity (>= 1)
    pub fn with_capacity(buckets: usize, slots: usize) -> RelResult<Self> {
        if buckets == 0 || slots == 0 {
            return Err(RelError::IndexCapacity {
                backend: "linhash".to_string(),
                reason: "bucket count and capacity must be at least 1".to_string(),
            });
        }
        Ok(Self {
            buckets: (0..buckets).map(|_| Bucket::new()).collect(),
            mod1: buckets,
            split: 0,
            slots,
            len: 0,
        })
    }

    /// Current round size (`mod1`).
    pub fn round_size(&self) -> usize {
        self.mod1
    }

    /// Current split pointer.
    pub fn split_pointer(&self) -> usize {
        self.split
    }

    /// Home bucket index for a key under the current state.
    fn address(&self, key: &K) -> usize {
        let hash = hash_key(key);
        let low = (hash % self.mod1 as u64) as usize;
        if low < self.split {
            (hash % (2 * self.mod1) as u64) as usize
        } else {
            low
        }
    }

    /// Split the bucket at the split pointer and advance it.
    fn split_next(&mut self) {
        let mod2 = 2 * self.mod1;

        // Fresh home bucket at mod1 + split; the old chain rehashes under
        // mod2 and lands either back at split or at the new bucket.
        let moved = std::mem::replace(&mut self.buckets[self.split], Bucket::new());
        self.buckets.push(Bucket::new());

        let slots = self.slots;
        for (key, value) in moved.drain_chain() {
            let target = (hash_key(&key) % mod2 as u64) as usize;
            self.buckets[target].place(slots, key, value);
        }

        MetricsCollector::global().record(Metric::new(
            "linhash.bucket_split",
            1.0,
            MetricUnit::Count,
        ));

        self.split += 1;
        if self.split == self.mod1 {
            self.split = 0;
            self.mod1 = mod2;
            MetricsCollector::global().record(Metric::new(
                "linhash.round_double",
                1.0,
                MetricUnit::Count,
            ));
        }
    }

    /// Verify reachability and chain capacity.
    ///
    /// ## Error Conditions
    /// - `CorruptedIndex`: a stored key is not addressed to the chain it
    ///   lives in, a chain slot array overflows, or the home-bucket count
    ///   disagrees with `mod1 + split`
    pub fn validate(&self) -> RelResult<()> {
        let corrupted = |reason: String| RelError::CorruptedIndex {
            backend: "linhash".to_string(),
            reason,
        };

        if self.buckets.len() != self.mod1 + self.split {
            return Err(corrupted(format!(
                "home bucket count {} != mod1 {} + split {}",
                self.buckets.len(),
                self.mod1,
                self.split
            )));
        }

        let mut reachable = 0;
        for (index, bucket) in self.buckets.iter().enumerate() {
            let mut current = Some(bucket);
            while let Some(b) = current {
                if b.entries.len() > self.slots {
                    return Err(corrupted("chain bucket exceeds slot capacity".to_string()));
                }
                for (key, _) in &b.entries {
                    if self.address(key) != index {
                        return Err(corrupted(format!(
                            "key stored in bucket {} addresses elsewhere",
                            index
                        )));
                    }
                    reachable += 1;
                }
                current = b.overflow.as_deref();
            }
        }

        if reachable != self.len {
            return Err(corrupted(format!(
                "reachable key count {} != recorded count {}",
                reachable, self.len
            )));
        }
        Ok(())
    }
}

impl<K, V> Default for LinHashMap<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<K, V> for LinHashMap<K, V>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
    V: Clone + Debug + Send + Sync,
{
    /// Point lookup: address rule, then chain walk.
    fn get(&self, key: &K) -> Option<V> {
        let mut current = Some(&self.buckets[self.address(key)]);
        while let Some(bucket) = current {
            if let Some((_, value)) = bucket.entries.iter().find(|(k, _)| k == key) {
                return Some(value.clone());
            }
            current = bucket.overflow.as_deref();
        }
        None
    }

    /// Insert or overwrite; a net insertion that pushes the load factor
    /// to 1.0 triggers a controlled split.
    fn insert(&mut self, key: K, value: V) -> RelResult<()> {
        let index = self.address(&key);
        let slots = self.slots;

        let value = match self.buckets[index].try_overwrite(&key, value) {
            None => return Ok(()),
            Some(value) => value,
        };

        self.buckets[index].place(slots, key, value);
        self.len += 1;

        if self.len >= self.slots * self.mod1 {
            self.split_next();
        }
        Ok(())
    }

    /// All entries in arbitrary order.
    fn entries(&self) -> Vec<(K, V)> {
        let mut collected = Vec::with_capacity(self.len);
        for bucket in &self.buckets {
            let mut current = Some(bucket);
            while let Some(b) = current {
                collected.extend(b.entries.iter().cloned());
                current = b.overflow.as_deref();
            }
        }
        collected
    }

    fn len(&self) -> usize {
        self.len
    }

    fn backend_type(&self) -> &'static str {
        "linhash"
    }
}
