// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Schema loading and saving with TOML format.

use crate::error::{RelError, RelResult};
use crate::schema::types::Schema;

/// Parse a schema from TOML text.
///
/// The parsed schema passes the same structural validation as
/// programmatic construction.
///
/// ## Error Conditions
/// - `InvalidSchema`: TOML syntax error, unknown domain name, or a
///   structural violation (duplicate columns, bad key, ...)
///
/// ## Example
/// ```rust
/// let schema = relbase::schema::from_toml(r#"
/// name = "student"
/// key = ["id"]
///
/// [[columns]]
/// name = "id"
/// type = "i32"
///
/// [[columns]]
/// name = "name"
/// type = "str"
/// "#)?;
///
/// assert_eq!(schema.arity(), 2);
/// # Ok::<(), relbase::RelError>(())
/// ```
pub fn from_toml(content: &str) -> RelResult<Schema> {
    let schema: Schema = toml::from_str(content).map_err(|e| RelError::InvalidSchema {
        reason: format!("TOML parse error: {}", e),
    })?;
    schema.validate_structure()?;
    Ok(schema)
}

/// Serialise a schema to pretty TOML.
///
/// ## Error Conditions
/// - `SerializationError`: TOML encoding failed
pub fn to_toml(schema: &Schema) -> RelResult<String> {
    toml::to_string_pretty(schema).map_err(|e| RelError::SerializationError {
        reason: format!("TOML serialisation error: {}", e),
    })
}
