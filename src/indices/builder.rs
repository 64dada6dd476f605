// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Index builder factory for creating key indexes from configuration.
//!
//! A table's primary-key index is any backend behind the `Index` trait;
//! the factory constructs one from an `IndexConfig`, which can be given
//! programmatically or parsed from TOML.
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::indices::{build_key_index, Index, IndexBackend, IndexConfig};
//!
//! let config = IndexConfig::from_toml(r#"backend = "linhash""#)?;
//! assert_eq!(config.backend, IndexBackend::LinHash);
//!
//! let index = build_key_index(&config)?;
//! assert_eq!(index.backend_type(), "linhash");
//! # Ok::<(), relbase::RelError>(())
//! ```

use crate::btree::{BpTreeMap, Order};
use crate::error::{RelError, RelResult};
use crate::indices::exthash::ExtHashMap;
use crate::indices::linhash::LinHashMap;
use crate::indices::Index;
use crate::value::KeyType;
use serde::{Deserialize, Serialize};

/// Index backend type.
///
/// ## Variants
/// - `BpTree`: order-preserving, supports range scans
/// - `ExtHash`: extendible hashing, expected O(1) lookups
/// - `LinHash`: linear hashing with overflow chains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBackend {
    BpTree,
    ExtHash,
    LinHash,
}

impl Default for IndexBackend {
    fn default() -> Self {
        Self::BpTree
    }
}

/// Index configuration.
///
/// Every field beyond the backend is optional; backends fall back to
/// their design defaults (order 5, four buckets of four slots).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Backend type (bptree, exthash, or linhash).
    #[serde(default)]
    pub backend: IndexBackend,

    /// B+-Tree branching factor (backend = bptree only).
    #[serde(default)]
    pub btree_order: Option<u16>,

    /// Initial bucket count (hash backends only; power of two for
    /// exthash).
    #[serde(default)]
    pub buckets: Option<usize>,

    /// Slots per bucket (hash backends only).
    #[serde(default)]
    pub slots: Option<usize>,
}

impl IndexConfig {
    /// Parse a configuration from TOML text.
    ///
    /// ## Error Conditions
    /// - `InvalidSchema`: TOML syntax error or unknown backend name
    pub fn from_toml(toml_str: &str) -> RelResult<Self> {
        toml::from_str(toml_str).map_err(|e| RelError::InvalidSchema {
            reason: format!("index config parse error: {}", e),
        })
    }

    /// Configuration for a specific backend with defaults elsewhere.
    pub fn for_backend(backend: IndexBackend) -> Self {
        Self {
            backend,
            ..Self::default()
        }
    }
}

/// Build a primary-key index for a table.
///
/// ## Input
/// - `config`: backend choice and geometry
///
/// ## Output
/// - Boxed index mapping key projections to tuple positions
///
/// ## Error Conditions
/// - `InvalidOrder`: B+-Tree order below 3
/// - `IndexCapacity`: invalid hash geometry
pub fn build_key_index(config: &IndexConfig) -> RelResult<Box<dyn Index<KeyType, usize>>> {
    let index: Box<dyn Index<KeyType, usize>> = match config.backend {
        IndexBackend::BpTree => {
            let order = match config.btree_order {
                Some(order) => Order::new(order)?,
                None => Order::default(),
            };
            Box::new(BpTreeMap::new(order))
        }
        IndexBackend::ExtHash => Box::new(ExtHashMap::with_capacity(
            config.buckets.unwrap_or(4),
            config.slots.unwrap_or(4),
        )?),
        IndexBackend::LinHash => Box::new(LinHashMap::with_capacity(
            config.buckets.unwrap_or(4),
            config.slots.unwrap_or(4),
        )?),
    };
    Ok(index)
}
