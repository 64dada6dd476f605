// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Table storage: schema, tuple list, and primary-key index.

use crate::error::{RelError, RelResult};
use crate::indices::{build_key_index, Index, IndexConfig};
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use crate::schema::Schema;
use crate::value::{KeyType, Tuple};
use std::fmt;

/// Named, typed relation with a primary-key index.
///
/// ## Invariants
/// - every stored tuple satisfies the schema
/// - the index maps each stored tuple's key projection to its position;
///   primary keys are unique
/// - tuple insertion order is preserved (scan operators rely on it)
///
/// ## Thread Safety
/// - Not internally synchronised; write operations take `&mut self`
#[derive(Debug)]
pub struct Table {
    /// Relation schema.
    schema: Schema,

    /// Tuples in insertion order.
    tuples: Vec<Tuple>,

    /// Primary-key index: key projection -> tuple position.
    index: Box<dyn Index<KeyType, usize>>,

    /// Index configuration, inherited by derived tables.
    config: IndexConfig,
}

impl Table {
    /// Create an empty table.
    ///
    /// ## Input
    /// - `schema`: Relation schema (revalidated here, so hand-built
    ///   schema values cannot bypass construction checks)
    /// - `config`: Primary-key index backend and geometry
    ///
    /// ## Error Conditions
    /// - `InvalidSchema`: structural violation in the schema
    /// - `InvalidOrder` / `IndexCapacity`: bad index geometry
    pub fn new(schema: Schema, config: IndexConfig) -> RelResult<Self> {
        schema.validate_structure()?;
        Ok(Self {
            index: build_key_index(&config)?,
            schema,
            tuples: Vec::new(),
            config,
        })
    }

    /// Create an empty table with the default B+-Tree index.
    pub fn with_default_index(schema: Schema) -> RelResult<Self> {
        Self::new(schema, IndexConfig::default())
    }

    /// Build a table around operator output: tuples are trusted to
    /// satisfy the schema, the index is rebuilt best-effort (duplicate
    /// keys in derived relations keep the tuple list intact and resolve
    /// inside the index by backend semantics).
    pub(crate) fn derive(
        schema: Schema,
        tuples: Vec<Tuple>,
        config: &IndexConfig,
    ) -> RelResult<Self> {
        schema.validate_structure()?;
        let mut table = Self {
            index: build_key_index(config)?,
            schema,
            tuples,
            config: config.clone(),
        };
        table.reindex()?;
        Ok(table)
    }

    fn reindex(&mut self) -> RelResult<()> {
        let positions = self.schema.key_positions();
        for (position, tuple) in self.tuples.iter().enumerate() {
            self.index
                .insert(KeyType::project(tuple, &positions), position)?;
        }
        Ok(())
    }

    /// Insert a tuple.
    ///
    /// Validates the tuple against the schema and primary-key
    /// uniqueness; on success appends to the tuple list and indexes the
    /// key projection. A rejected tuple leaves the table untouched.
    ///
    /// ## Error Conditions
    /// - `TypeMismatch`: arity or per-position domain violation
    /// - `DuplicateKey`: key projection already present
    pub fn insert(&mut self, tuple: Tuple) -> RelResult<()> {
        if let Err(err) = self.schema.type_check(&tuple) {
            self.record_rejection();
            return Err(err);
        }

        let key = KeyType::project(&tuple, &self.schema.key_positions());
        if self.index.get(&key).is_some() {
            self.record_rejection();
            return Err(RelError::DuplicateKey {
                key: key.to_string(),
                relation: self.schema.name.clone(),
            });
        }

        let position = self.tuples.len();
        self.tuples.push(tuple);
        self.index.insert(key, position)?;
        Ok(())
    }

    fn record_rejection(&self) {
        MetricsCollector::global().record(
            Metric::new("table.insert_rejected", 1.0, MetricUnit::Count)
                .with_tag("relation", &self.schema.name),
        );
    }

    /// Select by predicate: linear scan preserving insertion order.
    ///
    /// ## Input
    /// - `predicate`: Pure total function over tuples
    pub fn select<P>(&self, predicate: P) -> RelResult<Table>
    where
        P: Fn(&Tuple) -> bool,
    {
        let tuples = self
            .tuples
            .iter()
            .filter(|tuple| predicate(tuple))
            .cloned()
            .collect();
        Table::derive(self.schema.clone(), tuples, &self.config)
    }

    /// Select by primary key: a single index probe.
    ///
    /// ## Output
    /// - Table holding the unique matching tuple, or an empty table
    pub fn select_key(&self, key: &KeyType) -> RelResult<Table> {
        let tuples = match self.index.get(key) {
            Some(position) => vec![self.tuples[position].clone()],
            None => Vec::new(),
        };
        Table::derive(self.schema.clone(), tuples, &self.config)
    }

    /// Probe the primary-key index (used by `index_join`).
    pub(crate) fn probe(&self, key: &KeyType) -> Option<&Tuple> {
        self.index.get(key).map(|position| &self.tuples[position])
    }

    /// Relation schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Stored tuples in insertion order.
    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    /// Index configuration (inherited by derived tables).
    pub(crate) fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Number of stored tuples.
    pub fn len(&self) -> usize {
        self.tuples.len()
    }

    /// Check whether the table holds no tuples.
    pub fn is_empty(&self) -> bool {
        self.tuples.is_empty()
    }

    /// Index backend identifier (`"bptree"`, `"exthash"`, `"linhash"`).
    pub fn index_backend(&self) -> &'static str {
        self.index.backend_type()
    }

    /// Verify the table invariants.
    ///
    /// Checks that every tuple satisfies the schema and that the index
    /// maps exactly the stored key projections, each to the position of
    /// its tuple. Derived relations with non-unique keys fail this check.
    ///
    /// ## Error Conditions
    /// - `CorruptedIndex`: index and tuple list disagree
    /// - `TypeMismatch`: a stored tuple violates the schema
    pub fn validate(&self) -> RelResult<()> {
        let corrupted = |reason: String| RelError::CorruptedIndex {
            backend: "table".to_string(),
            reason,
        };

        if self.index.len() != self.tuples.len() {
            return Err(corrupted(format!(
                "index holds {} keys for {} tuples",
                self.index.len(),
                self.tuples.len()
            )));
        }

        let positions = self.schema.key_positions();
        for (position, tuple) in self.tuples.iter().enumerate() {
            self.schema.type_check(tuple)?;
            let key = KeyType::project(tuple, &positions);
            if self.index.get(&key) != Some(position) {
                return Err(corrupted(format!(
                    "key {} does not map to its tuple position {}",
                    key, position
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Table {
    /// Aligned ASCII rendering in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers = self.schema.attribute_names();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

        let rendered: Vec<Vec<String>> = self
            .tuples
            .iter()
            .map(|tuple| tuple.iter().map(|v| v.to_string()).collect())
            .collect();
        for row in &rendered {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.len());
            }
        }

        writeln!(f, "-- {} ({} tuples)", self.schema.name, self.tuples.len())?;
        for (&width, header) in widths.iter().zip(headers.iter()) {
            write!(f, "| {:width$} ", header, width = width)?;
        }
        writeln!(f, "|")?;
        for row in &rendered {
            for (&width, cell) in widths.iter().zip(row.iter()) {
                write!(f, "| {:width$} ", cell, width = width)?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
