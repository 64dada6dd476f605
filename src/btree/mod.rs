// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B+-Tree index engine.
//!
//! Order-preserving key-value mapping implementing the `Index` and
//! `OrderedIndex` traits. Nodes live in an arena and are identified by
//! index; leaves carry an explicit next-pointer forming a chain that all
//! range operators traverse.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │ BpTreeMap                                 │
//! ├───────────────────────────────────────────┤
//! │ - nodes: Vec<Node>   (arena, never freed) │
//! │ - root: NodeId                            │
//! │ - order: Order       (fanout, default 5)  │
//! └───────────────────────────────────────────┘
//!            │ routing                │ scans
//!            ▼                        ▼
//!   ┌─────────────────┐     ┌──────────────────────┐
//!   │ InternalNode    │     │ LeafNode             │
//!   │ keys + children │     │ keys + values + next ─┼──▶ next leaf
//!   └─────────────────┘     └──────────────────────┘
//! ```
//!
//! ## Operations
//!
//! - **Point lookup**: O(log n) descent + binary search
//! - **Ordered scan / range**: O(log n + k) leaf-chain walk
//! - **Insert**: O(log n) with splits propagating up the descent path
//! - **Duplicate keys**: rejected as a recorded no-op (the tree never
//!   holds two equal keys)
//!
//! ## Example Usage
//!
//! ```rust
//! use relbase::btree::{BpTreeMap, Order};
//! use relbase::indices::{Index, OrderedIndex};
//!
//! let mut tree = BpTreeMap::new(Order::new(5)?);
//! for i in [3, 1, 2] {
//!     tree.insert(i, i * 10)?;
//! }
//!
//! assert_eq!(tree.get(&2), Some(20));
//! assert_eq!(tree.first_key()?, 1);
//! assert_eq!(tree.entries(), vec![(1, 10), (2, 20), (3, 30)]);
//! # Ok::<(), relbase::RelError>(())
//! ```

mod node;
mod tree;
mod types;


// Re-export public API
pub use tree::BpTreeMap;
pub use types::{NodeId, Order, DEFAULT_ORDER};
