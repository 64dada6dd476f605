// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Composite primary-key wrapper.

use crate::value::{Tuple, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered sequence of scalar values forming a tuple's key projection.
///
/// Two keys are equal iff component-wise equal; comparison is
/// lexicographic left-to-right using each component's natural order.
/// Comparing keys of differing arities is undefined behaviour of the
/// caller; the derived prefix order is what you get.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyType {
    values: Vec<Value>,
}

impl KeyType {
    /// Create a key from its component values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Create a single-component key.
    pub fn from_value(value: Value) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Project a key out of a tuple by column positions.
    ///
    /// ## Input
    /// - `tuple`: Source tuple
    /// - `positions`: Key column positions (must be in range)
    pub fn project(tuple: &Tuple, positions: &[usize]) -> Self {
        Self {
            values: positions.iter().map(|&i| tuple[i].clone()).collect(),
        }
    }

    /// Number of key components.
    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Component values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}
