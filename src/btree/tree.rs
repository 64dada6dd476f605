// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! B+-Tree map over an in-memory node arena.
//!
//! Implements the `Index` and `OrderedIndex` traits. The descent path is
//! carried as a dynamically-sized vector (its length is the tree height),
//! and splits propagate along it; a root split grows the tree by one
//! level. Duplicate keys are rejected as a recorded no-op: any equality
//! observed against a separator on the descent path, or against a leaf
//! key, leaves the tree unmodified and records a
//! `bptree.duplicate_key` metric.

use crate::btree::node::{InternalNode, LeafNode, Node};
use crate::btree::types::{NodeId, Order};
use crate::error::{RelError, RelResult};
use crate::indices::{Index, OrderedIndex};
use crate::metrics::{Metric, MetricUnit, MetricsCollector};
use std::fmt::Debug;

/// Order-preserving key-value mapping.
///
/// ## Type Parameters
/// - `K`: Key type (Clone + Ord)
/// - `V`: Value type (Clone)
///
/// ## Thread Safety
/// - Not internally synchronised; write operations take `&mut self`
#[derive(Debug)]
pub struct BpTreeMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Node arena; slots are allocated on split and never reclaimed.
    nodes: Vec<Node<K, V>>,

    /// Root node identifier.
    root: NodeId,

    /// Branching factor.
    order: Order,
}

impl<K, V> BpTreeMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    /// Create an empty tree with the given order.
    pub fn new(order: Order) -> Self {
        Self {
            nodes: vec![Node::Leaf(LeafNode::new())],
            root: 0,
            order,
        }
    }

    /// Create an empty tree with the default order of 5.
    pub fn with_default_order() -> Self {
        Self::new(Order::default())
    }

    /// Configured branching factor.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Number of levels; a lone root leaf is height 1.
    pub fn height(&self) -> usize {
        let mut depth = 1;
        let mut current = self.root;
        while let Node::Internal(node) = &self.nodes[current] {
            current = node.children[0];
            depth += 1;
        }
        depth
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Descend to the leaf for a key, recording the parent chain.
    ///
    /// ## Output
    /// - `(leaf_id, path, saw_equal)`: the target leaf, the descended
    ///   internal nodes root-first, and whether any separator matched
    ///   the key exactly
    fn search_leaf(&self, key: &K) -> (NodeId, Vec<NodeId>, bool) {
        let mut path = Vec::new();
        let mut saw_equal = false;
        let mut current = self.root;

        loop {
            match &self.nodes[current] {
                Node::Internal(node) => {
                    let (child_idx, equal) = node.find_child(key);
                    saw_equal |= equal;
                    path.push(current);
                    current = node.children[child_idx];
                }
                Node::Leaf(_) => return (current, path, saw_equal),
            }
        }
    }

    /// Leftmost leaf (the left-spine descent reaches the minimum key).
    fn leftmost_leaf(&self) -> NodeId {
        let mut current = self.root;
        while let Node::Internal(node) = &self.nodes[current] {
            current = node.children[0];
        }
        current
    }

    fn leaf(&self, id: NodeId) -> &LeafNode<K, V> {
        match &self.nodes[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("leaf id resolved to internal node"),
        }
    }

    fn leaf_mut(&mut self, id: NodeId) -> &mut LeafNode<K, V> {
        match &mut self.nodes[id] {
            Node::Leaf(leaf) => leaf,
            Node::Internal(_) => unreachable!("leaf id resolved to internal node"),
        }
    }

    fn internal_mut(&mut self, id: NodeId) -> &mut InternalNode<K> {
        match &mut self.nodes[id] {
            Node::Internal(node) => node,
            Node::Leaf(_) => unreachable!("internal id resolved to leaf node"),
        }
    }

    fn record(name: &str) {
        MetricsCollector::global().record(Metric::new(name, 1.0, MetricUnit::Count));
    }

    /// Split the full target leaf, place the pending pair, and promote.
    fn split_leaf_and_insert(&mut self, leaf_id: NodeId, path: Vec<NodeId>, key: K, value: V) {
        let mut sibling = self.leaf_mut(leaf_id).split();

        // The pair lands on whichever side its sorted position falls in.
        if key < sibling.keys[0] {
            self.leaf_mut(leaf_id).insert_sorted(key, value);
        } else {
            sibling.insert_sorted(key, value);
        }

        // The separator promoted from a leaf is the sibling's first key.
        let separator = sibling.keys[0].clone();
        let sibling_id = self.alloc(Node::Leaf(sibling));
        self.leaf_mut(leaf_id).next = Some(sibling_id);

        Self::record("bptree.leaf_split");
        self.promote(path, separator, sibling_id);
    }

    /// Propagate a split up the recorded descent path.
    fn promote(&mut self, mut path: Vec<NodeId>, separator: K, new_child: NodeId) {
        let mut separator = separator;
        let mut new_child = new_child;

        let order = self.order;
        while let Some(node_id) = path.pop() {
            if !self.internal_mut(node_id).is_full(order) {
                self.internal_mut(node_id)
                    .insert_separator(separator, new_child);
                return;
            }

            let (promoted, mut sibling) = self.internal_mut(node_id).split();
            if separator < promoted {
                self.internal_mut(node_id)
                    .insert_separator(separator, new_child);
            } else {
                sibling.insert_separator(separator, new_child);
            }

            separator = promoted;
            new_child = self.alloc(Node::Internal(sibling));
        }

        // Path exhausted: the root itself split, the tree grows a level.
        let new_root = InternalNode::from_split(separator, self.root, new_child);
        self.root = self.alloc(Node::Internal(new_root));
        Self::record("bptree.root_split");
    }

    /// Verify structural invariants.
    ///
    /// Checks, over the whole tree: strictly ascending keys in every
    /// node, separator bounds on every subtree, `children = keys + 1` in
    /// internal nodes, uniform leaf depth, and that the next-leaf chain
    /// from the leftmost leaf visits exactly the leaves in key order.
    ///
    /// ## Error Conditions
    /// - `CorruptedIndex`: any invariant violated
    pub fn validate(&self) -> RelResult<()> {
        let mut ordered_leaves = Vec::new();
        self.check_node(self.root, None, None, &mut ordered_leaves)?;

        let mut chain = Vec::new();
        let mut current = Some(self.leftmost_leaf());
        while let Some(id) = current {
            chain.push(id);
            current = self.leaf(id).next;
        }

        if chain != ordered_leaves {
            return Err(Self::corrupted(
                "leaf chain does not match in-order leaf sequence",
            ));
        }
        Ok(())
    }

    fn corrupted(reason: &str) -> RelError {
        RelError::CorruptedIndex {
            backend: "bptree".to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check one subtree; returns its leaf depth.
    fn check_node(
        &self,
        id: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        leaves: &mut Vec<NodeId>,
    ) -> RelResult<usize> {
        let check_keys = |keys: &[K]| -> RelResult<()> {
            for pair in keys.windows(2) {
                if pair[0] >= pair[1] {
                    return Err(Self::corrupted("keys not strictly ascending"));
                }
            }
            for key in keys {
                if let Some(low) = lower {
                    if key < low {
                        return Err(Self::corrupted("key below subtree lower bound"));
                    }
                }
                if let Some(high) = upper {
                    if key >= high {
                        return Err(Self::corrupted("key at or above subtree upper bound"));
                    }
                }
            }
            Ok(())
        };

        match &self.nodes[id] {
            Node::Leaf(leaf) => {
                check_keys(&leaf.keys)?;
                if leaf.keys.len() != leaf.values.len() {
                    return Err(Self::corrupted("leaf key/value arity mismatch"));
                }
                leaves.push(id);
                Ok(1)
            }
            Node::Internal(node) => {
                check_keys(&node.keys)?;
                if node.children.len() != node.keys.len() + 1 {
                    return Err(Self::corrupted("internal child count != keys + 1"));
                }

                let mut depth = None;
                for (i, &child) in node.children.iter().enumerate() {
                    let child_lower = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
                    let child_upper = if i < node.keys.len() {
                        Some(&node.keys[i])
                    } else {
                        upper
                    };
                    let child_depth = self.check_node(child, child_lower, child_upper, leaves)?;
                    match depth {
                        None => depth = Some(child_depth),
                        Some(expected) if expected != child_depth => {
                            return Err(Self::corrupted("leaves at differing depths"));
                        }
                        Some(_) => {}
                    }
                }
                Ok(depth.unwrap_or(1) + 1)
            }
        }
    }

    /// Collect entries along the leaf chain while `keep` holds, skipping
    /// keys before `from` in the first leaf.
    fn collect_chain(&self, start: NodeId, from: Option<&K>, keep: impl Fn(&K) -> bool) -> Vec<(K, V)> {
        let mut results = Vec::new();
        let mut current = Some(start);

        while let Some(id) = current {
            let leaf = self.leaf(id);
            for (key, value) in leaf.keys.iter().zip(leaf.values.iter()) {
                if let Some(low) = from {
                    if key < low {
                        continue;
                    }
                }
                if !keep(key) {
                    return results;
                }
                results.push((key.clone(), value.clone()));
            }
            current = leaf.next;
        }
        results
    }
}

impl<K, V> Index<K, V> for BpTreeMap<K, V>
where
    K: Clone + Ord + Debug + Send + Sync,
    V: Clone + Debug + Send + Sync,
{
    /// Point lookup: root-to-leaf descent, binary search at the leaf.
    fn get(&self, key: &K) -> Option<V> {
        let (leaf_id, _, _) = self.search_leaf(key);
        self.leaf(leaf_id).find_value(key).cloned()
    }

    /// Insert a pair; a duplicate key is a recorded no-op.
    ///
    /// Equality against any separator on the descent path or against a
    /// leaf key rejects the pair without modifying the tree.
    fn insert(&mut self, key: K, value: V) -> RelResult<()> {
        let (leaf_id, path, saw_equal) = self.search_leaf(&key);

        if saw_equal || self.leaf(leaf_id).find_value(&key).is_some() {
            Self::record("bptree.duplicate_key");
            return Ok(());
        }

        if self.leaf(leaf_id).is_full(self.order) {
            self.split_leaf_and_insert(leaf_id, path, key, value);
        } else {
            self.leaf_mut(leaf_id).insert_sorted(key, value);
        }
        Ok(())
    }

    /// All entries in ascending key order (leaf-chain walk).
    fn entries(&self) -> Vec<(K, V)> {
        self.collect_chain(self.leftmost_leaf(), None, |_| true)
    }

    /// Total key count, computed by walking the leaf chain.
    fn len(&self) -> usize {
        let mut count = 0;
        let mut current = Some(self.leftmost_leaf());
        while let Some(id) = current {
            let leaf = self.leaf(id);
            count += leaf.keys.len();
            current = leaf.next;
        }
        count
    }

    fn backend_type(&self) -> &'static str {
        "bptree"
    }
}

impl<K, V> OrderedIndex<K, V> for BpTreeMap<K, V>
where
    K: Clone + Ord + Debug + Send + Sync,
    V: Clone + Debug + Send + Sync,
{
    /// Minimum key, reached by the left-spine descent.
    fn first_key(&self) -> RelResult<K> {
        self.leaf(self.leftmost_leaf())
            .keys
            .first()
            .cloned()
            .ok_or_else(|| RelError::EmptyIndex {
                operation: "first_key".to_string(),
            })
    }

    /// Maximum key, reached by the right-spine descent.
    fn last_key(&self) -> RelResult<K> {
        let mut current = self.root;
        loop {
            match &self.nodes[current] {
                Node::Internal(node) => {
                    current = *node
                        .children
                        .last()
                        .expect("internal node without children");
                }
                Node::Leaf(leaf) => {
                    return leaf.keys.last().cloned().ok_or_else(|| RelError::EmptyIndex {
                        operation: "last_key".to_string(),
                    });
                }
            }
        }
    }

    /// Entries with keys in `[min, to)`.
    fn head(&self, to: &K) -> Vec<(K, V)> {
        self.collect_chain(self.leftmost_leaf(), None, |key| key < to)
    }

    /// Entries with keys in `[from, max]`.
    fn tail(&self, from: &K) -> Vec<(K, V)> {
        let (start, _, _) = self.search_leaf(from);
        self.collect_chain(start, Some(from), |_| true)
    }

    /// Entries with keys in `[from, to)`.
    fn range(&self, from: &K, to: &K) -> Vec<(K, V)> {
        let (start, _, _) = self.search_leaf(from);
        self.collect_chain(start, Some(from), |key| key < to)
    }
}
