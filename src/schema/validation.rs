// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Tuple validation and column resolution against a schema.
//!
//! The operators the table kernel builds on: resolving attribute names
//! to positions, projecting tuples positionally, type-checking tuples on
//! insert, and gating set operations on schema compatibility.

use crate::error::{RelError, RelResult};
use crate::schema::types::Schema;
use crate::value::Tuple;

impl Schema {
    /// Resolve attribute names to positional indices.
    ///
    /// ## Input
    /// - `names`: Attribute names to resolve
    ///
    /// ## Output
    /// - Positions in schema order of the given names
    ///
    /// ## Error Conditions
    /// - `UnknownAttribute`: a name is not a column of this schema
    pub fn match_columns(&self, names: &[&str]) -> RelResult<Vec<usize>> {
        names
            .iter()
            .map(|name| {
                self.position_of(name).ok_or_else(|| RelError::UnknownAttribute {
                    attribute: name.to_string(),
                    relation: self.name.clone(),
                })
            })
            .collect()
    }

    /// Project a tuple by positional copy.
    ///
    /// ## Input
    /// - `tuple`: Source tuple (must satisfy this schema)
    /// - `positions`: Column positions to keep, in output order
    pub fn extract(&self, tuple: &Tuple, positions: &[usize]) -> Tuple {
        positions.iter().map(|&i| tuple[i].clone()).collect()
    }

    /// Confirm arity and per-position class membership.
    ///
    /// A match passes; a mismatch rejects with the offending column and
    /// value named.
    ///
    /// ## Error Conditions
    /// - `TypeMismatch`: wrong arity, or a value outside its declared
    ///   domain
    pub fn type_check(&self, tuple: &Tuple) -> RelResult<()> {
        if tuple.len() != self.arity() {
            return Err(RelError::TypeMismatch {
                column: String::new(),
                reason: format!("arity mismatch: expected {}, got {}", self.arity(), tuple.len()),
                value: None,
            });
        }

        for (value, column) in tuple.iter().zip(self.columns.iter()) {
            if !value.matches(column.domain) {
                return Err(RelError::TypeMismatch {
                    column: column.name.clone(),
                    reason: format!("expected {}, got {}", column.domain, value.domain()),
                    value: Some(value.to_string()),
                });
            }
        }
        Ok(())
    }

    /// Equal arity and position-wise equal domains.
    ///
    /// Gates union and difference; attribute names play no part.
    pub fn compatible(&self, other: &Schema) -> bool {
        self.arity() == other.arity()
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|(a, b)| a.domain == b.domain)
    }
}
