// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Relation schemas with type and key validation.
//!
//! A `Schema` names a relation, its ordered typed columns, and a primary
//! key that is a non-empty subsequence of the columns. Construction
//! validates structure; operators use `match_columns`, `extract`,
//! `type_check`, and `compatible` to keep every stored tuple and every
//! derived relation schema-correct.
//!
//! Schemas are also loadable from TOML text (see [`from_toml`]):
//!
//! ```toml
//! name = "student"
//! key = ["id"]
//!
//! [[columns]]
//! name = "id"
//! type = "i32"
//!
//! [[columns]]
//! name = "name"
//! type = "str"
//! ```

pub mod loader;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_test;

// Re-export public API
pub use loader::{from_toml, to_toml};
pub use types::{ColumnDef, Schema};
