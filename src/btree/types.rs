// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Core types for the B+-Tree backend.

use crate::error::{RelError, RelResult};
use serde::{Deserialize, Serialize};

/// Node identifier: an index into the tree's node arena.
pub type NodeId = usize;

/// Default branching factor (up to 4 keys and 5 children per node).
pub const DEFAULT_ORDER: u16 = 5;

/// B+-Tree order (branching factor) configuration.
///
/// The order is the maximum number of children an internal node may hold;
/// every node holds at most `order - 1` keys, and a leaf additionally
/// carries its next-leaf pointer.
///
/// ## Constraints
/// - Minimum order: 3 (two keys, three children)
///
/// ## Example
/// ```rust
/// use relbase::btree::Order;
///
/// let order = Order::new(5)?;
/// assert_eq!(order.fanout(), 5);
/// assert_eq!(order.max_keys(), 4);
/// # Ok::<(), relbase::RelError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order(u16);

impl Order {
    /// Create a new order with validation.
    ///
    /// ## Input
    /// - `order`: Desired branching factor (must be >= 3)
    ///
    /// ## Error Conditions
    /// - `InvalidOrder`: order less than 3
    pub fn new(order: u16) -> RelResult<Self> {
        if order < 3 {
            return Err(RelError::InvalidOrder { order, min: 3 });
        }
        Ok(Self(order))
    }

    /// Maximum number of children per internal node.
    pub fn fanout(&self) -> usize {
        self.0 as usize
    }

    /// Maximum number of keys per node.
    pub fn max_keys(&self) -> usize {
        self.0 as usize - 1
    }

    /// Raw order value.
    pub fn value(&self) -> u16 {
        self.0
    }
}

impl Default for Order {
    fn default() -> Self {
        Self(DEFAULT_ORDER)
    }
}
