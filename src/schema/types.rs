// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Schema types for relation definitions.

use crate::error::{RelError, RelResult};
use crate::value::Domain;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Relation and attribute names are plain identifiers.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Relation schema definition.
///
/// Attribute names are unique within one schema; the primary key is a
/// non-empty subsequence of the attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    /// Relation name.
    pub name: String,

    /// Ordered column definitions.
    pub columns: Vec<ColumnDef>,

    /// Primary-key attribute names, in column order.
    pub key: Vec<String>,
}

impl Schema {
    /// Create a validated schema.
    ///
    /// ## Input
    /// - `name`: Relation name (identifier)
    /// - `columns`: Ordered column definitions
    /// - `key`: Primary-key attribute names
    ///
    /// ## Error Conditions
    /// - `InvalidSchema`: empty columns, empty key, duplicate or
    ///   malformed names, key attribute missing or out of column order
    ///
    /// ## Example
    /// ```rust
    /// use relbase::schema::{ColumnDef, Schema};
    /// use relbase::value::Domain;
    ///
    /// let schema = Schema::new(
    ///     "student",
    ///     vec![
    ///         ColumnDef::new("id", Domain::I32),
    ///         ColumnDef::new("name", Domain::Str),
    ///     ],
    ///     &["id"],
    /// )?;
    /// assert_eq!(schema.arity(), 2);
    /// # Ok::<(), relbase::RelError>(())
    /// ```
    pub fn new(name: &str, columns: Vec<ColumnDef>, key: &[&str]) -> RelResult<Self> {
        let schema = Schema {
            name: name.to_string(),
            columns,
            key: key.iter().map(|k| k.to_string()).collect(),
        };
        schema.validate_structure()?;
        Ok(schema)
    }

    /// Validate structural invariants (shared by `new` and TOML loading).
    pub(crate) fn validate_structure(&self) -> RelResult<()> {
        let invalid = |reason: String| RelError::InvalidSchema { reason };

        if !IDENTIFIER.is_match(&self.name) {
            return Err(invalid(format!("relation name '{}' is not an identifier", self.name)));
        }
        if self.columns.is_empty() {
            return Err(invalid("schema must have at least one column".to_string()));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !IDENTIFIER.is_match(&column.name) {
                return Err(invalid(format!(
                    "column name '{}' is not an identifier",
                    column.name
                )));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(invalid(format!("duplicate column name '{}'", column.name)));
            }
        }

        if self.key.is_empty() {
            return Err(invalid("primary key must name at least one column".to_string()));
        }

        // The key is a subsequence: every name resolves, positions
        // strictly ascending
        let mut previous: Option<usize> = None;
        for key_attr in &self.key {
            let position = self.position_of(key_attr).ok_or_else(|| {
                invalid(format!("key attribute '{}' is not a column", key_attr))
            })?;
            if let Some(prev) = previous {
                if position <= prev {
                    return Err(invalid(format!(
                        "key attribute '{}' out of column order",
                        key_attr
                    )));
                }
            }
            previous = Some(position);
        }
        Ok(())
    }

    /// Position of a column by name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column definition by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of attributes.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }

    /// Attribute names in order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Positions of the primary-key columns.
    pub fn key_positions(&self) -> Vec<usize> {
        self.key
            .iter()
            .filter_map(|k| self.position_of(k))
            .collect()
    }
}

/// Column definition: attribute name and declared domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDef {
    /// Attribute name.
    pub name: String,

    /// Declared domain.
    #[serde(rename = "type")]
    pub domain: Domain,
}

impl ColumnDef {
    /// Create a new column definition.
    pub fn new(name: &str, domain: Domain) -> Self {
        ColumnDef {
            name: name.to_string(),
            domain,
        }
    }
}
