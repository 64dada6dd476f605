// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! relbase - embeddable in-memory relational database engine.
//!
//! A small relational algebra over named, typed relations, with indexed
//! point lookups via pluggable index structures.
//!
//! ## Features
//!
//! - **Typed relations**: schemas with a closed scalar domain set and
//!   composite primary keys; every insert is type-checked
//! - **Pluggable key index**: B+-Tree, extendible hashing, or linear
//!   hashing behind one mapping interface
//! - **Relational algebra**: project, select (predicate and key), union,
//!   difference, equi-join, and index-backed join
//! - **Snapshots**: whole-table save/load over byte streams with
//!   checksum validation
//! - **Metrics & Observability**: structural events (splits, rejected
//!   duplicates) recorded in-process
//!
//! ## Quick Start
//!
//! ```rust
//! use relbase::schema::{ColumnDef, Schema};
//! use relbase::table::Table;
//! use relbase::value::{Domain, KeyType, Value};
//!
//! let schema = Schema::new(
//!     "student",
//!     vec![
//!         ColumnDef::new("id", Domain::I32),
//!         ColumnDef::new("name", Domain::Str),
//!     ],
//!     &["id"],
//! )?;
//!
//! let mut student = Table::with_default_index(schema)?;
//! student.insert(vec![Value::I32(1), Value::Str("A".into())])?;
//! student.insert(vec![Value::I32(2), Value::Str("B".into())])?;
//!
//! // Keyed selection probes the primary-key index
//! let row = student.select_key(&KeyType::from_value(Value::I32(2)))?;
//! assert_eq!(row.len(), 1);
//! # Ok::<(), relbase::RelError>(())
//! ```
//!
//! ## Architecture
//!
//! relbase is organized into modules:
//!
//! - **value**: scalar domains, tagged values, composite keys
//! - **schema**: relation schemas, validation, TOML loading
//! - **btree**: order-preserving B+-Tree index
//! - **indices**: index traits, hash backends, backend factory
//! - **table**: tuple storage and the algebra operators
//! - **snapshot**: byte-stream persistence boundary
//! - **metrics**: in-process observability
//!
//! Concurrency model: single-threaded; operators run to completion on
//! the calling thread and tables are not internally synchronised.

pub mod btree;
pub mod error;
pub mod indices;
pub mod metrics;
pub mod schema;
pub mod snapshot;
pub mod table;
pub mod value;

// Re-export commonly used types
pub use btree::{BpTreeMap, Order};
pub use error::{RelError, RelResult};
pub use indices::{
    build_key_index, ExtHashMap, Index, IndexBackend, IndexConfig, LinHashMap, OrderedIndex,
};
pub use metrics::{Metric, MetricUnit, MetricsCollector};
pub use schema::{ColumnDef, Schema};
pub use table::Table;
pub use value::{Domain, KeyType, Tuple, Value};
