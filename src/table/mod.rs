// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Relational store and algebra kernel.
//!
//! A `Table` owns a schema, its tuples in insertion order, and a
//! primary-key index (any backend behind the `Index` trait). Inserts are
//! type-checked and indexed; the algebra operators derive new tables
//! without mutating their inputs.
//!
//! ## Operators
//!
//! | Operator | Access path |
//! |---|---|
//! | `project` | tuple scan |
//! | `select` (predicate) | tuple scan |
//! | `select_key` | index probe |
//! | `union` / `minus` | tuple scan, value equality |
//! | `join` | nested-loop scan |
//! | `index_join` | index probe per outer tuple |
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::schema::{ColumnDef, Schema};
//! use relbase::table::Table;
//! use relbase::value::{Domain, Value};
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
//! let names = student.project(&["name"])?;
//! assert_eq!(names.len(), 2);
//! # Ok::<(), relbase::RelError>(())
//! ```

mod algebra;
mod table;

#[cfg(test)]
mod table_test;

// Re-export public API
pub use table::Table;
