// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Associative index structures behind a common mapping interface.
//!
//! Three interchangeable backends serve as a table's primary-key index:
//!
//! ## Index Types
//!
//! - **BpTreeMap** (in `crate::btree`): order-preserving, O(log n)
//!   lookups, leaf-chain range scans
//! - **ExtHashMap**: extendible hashing, expected O(1), grows by
//!   directory doubling
//! - **LinHashMap**: linear hashing, expected O(1), grows one bucket at
//!   a time with overflow chains
//!
//! All three implement [`Index`]; only the B+-Tree additionally
//! implements [`OrderedIndex`], which gates the range operators.
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::indices::{build_key_index, Index, IndexConfig};
//! use relbase::value::{KeyType, Value};
//!
//! let mut index = build_key_index(&IndexConfig::default())?;
//! index.insert(KeyType::from_value(Value::I32(1)), 0)?;
//!
//! assert_eq!(index.get(&KeyType::from_value(Value::I32(1))), Some(0));
//! # Ok::<(), relbase::RelError>(())
//! ```

pub mod builder;
pub mod exthash;
pub mod index_trait;
pub mod linhash;

mod hashing;

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod exthash_test;
#[cfg(test)]
mod linhash_test;

// Re-export public API
pub use builder::{build_key_index, IndexBackend, IndexConfig};
pub use exthash::ExtHashMap;
pub use index_trait::{Index, OrderedIndex};
pub use linhash::LinHashMap;
