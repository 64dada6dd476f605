// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Relational algebra operators deriving new tables.
//!
//! All operators leave their inputs untouched and emit tuples in the
//! inputs' insertion order. Union and difference compare tuples by
//! value, never by position or identity.

use crate::error::{RelError, RelResult};
use crate::schema::{ColumnDef, Schema};
use crate::table::Table;
use crate::value::{KeyType, Tuple};
use std::collections::HashSet;

impl Table {
    /// Project onto the named attributes.
    ///
    /// Carries the original primary key if fully retained; otherwise the
    /// projected attributes become the key, and the rebuilt index does
    /// not re-enforce uniqueness (the tuple list keeps every row).
    ///
    /// ## Error Conditions
    /// - `UnknownAttribute`: a name is not a column
    /// - `InvalidSchema`: a name is listed twice
    pub fn project(&self, attrs: &[&str]) -> RelResult<Table> {
        let positions = self.schema().match_columns(attrs)?;

        let columns: Vec<ColumnDef> = positions
            .iter()
            .map(|&i| self.schema().columns[i].clone())
            .collect();

        let key_retained = self
            .schema()
            .key
            .iter()
            .all(|k| attrs.contains(&k.as_str()));
        let key: Vec<&str> = if key_retained {
            // Original key, reordered to the projected column order
            attrs
                .iter()
                .filter(|a| self.schema().key.iter().any(|k| k == *a))
                .copied()
                .collect()
        } else {
            attrs.to_vec()
        };

        let schema = Schema::new(&format!("{}_prj", self.schema().name), columns, &key)?;
        let tuples = self
            .tuples()
            .iter()
            .map(|tuple| self.schema().extract(tuple, &positions))
            .collect();
        Table::derive(schema, tuples, self.config())
    }

    /// Set union by tuple value equality.
    ///
    /// This table's tuples in order, then the other's tuples whose value
    /// is not already present.
    ///
    /// ## Error Conditions
    /// - `SchemaMismatch`: differing arity or domain sequences
    pub fn union(&self, other: &Table) -> RelResult<Table> {
        self.require_compatible(other, "union")?;

        let mut tuples: Vec<Tuple> = self.tuples().to_vec();
        for tuple in other.tuples() {
            if !tuples.contains(tuple) {
                tuples.push(tuple.clone());
            }
        }

        let mut schema = self.schema().clone();
        schema.name = format!("{}_union", schema.name);
        Table::derive(schema, tuples, self.config())
    }

    /// Set difference by tuple value equality.
    ///
    /// ## Error Conditions
    /// - `SchemaMismatch`: differing arity or domain sequences
    pub fn minus(&self, other: &Table) -> RelResult<Table> {
        self.require_compatible(other, "minus")?;

        let tuples: Vec<Tuple> = self
            .tuples()
            .iter()
            .filter(|tuple| !other.tuples().contains(tuple))
            .cloned()
            .collect();

        let mut schema = self.schema().clone();
        schema.name = format!("{}_minus", schema.name);
        Table::derive(schema, tuples, self.config())
    }

    fn require_compatible(&self, other: &Table, operation: &str) -> RelResult<()> {
        if !self.schema().compatible(other.schema()) {
            return Err(RelError::SchemaMismatch {
                left: self.schema().name.clone(),
                right: other.schema().name.clone(),
                reason: format!("{} requires equal arity and domains", operation),
            });
        }
        Ok(())
    }

    /// Equi-join on paired attribute lists, nested loops.
    ///
    /// The result schema concatenates both attribute lists; duplicate
    /// names from the right side get a `2` suffix. The outer loop runs
    /// over this table, the inner over the other, preserving both
    /// insertion orders. The left primary key carries over.
    ///
    /// ## Error Conditions
    /// - `SchemaMismatch`: attribute lists differ in length
    /// - `UnknownAttribute`: a name missing on its side
    pub fn join(&self, attrs_l: &[&str], attrs_r: &[&str], other: &Table) -> RelResult<Table> {
        if attrs_l.len() != attrs_r.len() {
            return Err(RelError::SchemaMismatch {
                left: self.schema().name.clone(),
                right: other.schema().name.clone(),
                reason: format!(
                    "join attribute lists differ in length ({} vs {})",
                    attrs_l.len(),
                    attrs_r.len()
                ),
            });
        }
        let positions_l = self.schema().match_columns(attrs_l)?;
        let positions_r = other.schema().match_columns(attrs_r)?;

        let schema = self.joined_schema(other)?;
        let mut tuples = Vec::new();
        for left in self.tuples() {
            for right in other.tuples() {
                let matched = positions_l
                    .iter()
                    .zip(positions_r.iter())
                    .all(|(&l, &r)| left[l] == right[r]);
                if matched {
                    tuples.push(Self::concat(left, right));
                }
            }
        }
        Table::derive(schema, tuples, self.config())
    }

    /// Equi-join probing the other table's primary-key index.
    ///
    /// For each tuple here, the value at `attr_l` probes the other
    /// side's index; on hit the pair concatenates. Yields the same
    /// multiset as the nested-loop join on the same attributes.
    ///
    /// ## Error Conditions
    /// - `NotPrimaryKey`: `attr_r` is not the other table's whole key
    /// - `UnknownAttribute`: `attr_l` missing here
    pub fn index_join(&self, attr_l: &str, attr_r: &str, other: &Table) -> RelResult<Table> {
        if other.schema().key != [attr_r.to_string()] {
            return Err(RelError::NotPrimaryKey {
                attribute: attr_r.to_string(),
                relation: other.schema().name.clone(),
            });
        }
        let position_l = self.schema().match_columns(&[attr_l])?[0];

        let schema = self.joined_schema(other)?;
        let mut tuples = Vec::new();
        for left in self.tuples() {
            let probe = KeyType::from_value(left[position_l].clone());
            if let Some(right) = other.probe(&probe) {
                tuples.push(Self::concat(left, right));
            }
        }
        Table::derive(schema, tuples, self.config())
    }

    /// Concatenated schema for join results; right-side duplicate
    /// attribute names get a `2` suffix, the left key carries over.
    fn joined_schema(&self, other: &Table) -> RelResult<Schema> {
        let left_names: HashSet<&str> = self
            .schema()
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        let mut columns = self.schema().columns.clone();
        for column in &other.schema().columns {
            let name = if left_names.contains(column.name.as_str()) {
                format!("{}2", column.name)
            } else {
                column.name.clone()
            };
            columns.push(ColumnDef::new(&name, column.domain));
        }

        let key: Vec<&str> = self.schema().key.iter().map(|k| k.as_str()).collect();
        Schema::new(
            &format!("{}_join_{}", self.schema().name, other.schema().name),
            columns,
            &key,
        )
    }

    fn concat(left: &Tuple, right: &Tuple) -> Tuple {
        let mut combined = left.clone();
        combined.extend(right.iter().cloned());
        combined
    }
}
