//! Nested export representation of a forest
//!
//! A [`Subtree`] maps each direct child id to that child's own subtree. A leaf
//! is an empty mapping, so `{"a": {}, "c": {"b": {}}}` is a forest with two
//! top-level nodes where `c` has one child.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Nested mapping from node id to the subtree below it
///
/// Keys are ordered by id so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subtree(BTreeMap<NodeId, Subtree>);

impl Subtree {
    /// An empty subtree (a leaf, or an empty forest)
    pub fn new() -> Self {
        Subtree(BTreeMap::new())
    }

    /// Insert a child with its subtree, returning the previous subtree if any
    pub fn insert(&mut self, id: NodeId, subtree: Subtree) -> Option<Subtree> {
        self.0.insert(id, subtree)
    }

    /// Builder-style insert
    pub fn with(mut self, id: NodeId, subtree: Subtree) -> Self {
        self.0.insert(id, subtree);
        self
    }

    /// Subtree below a direct child
    pub fn get(&self, id: &str) -> Option<&Subtree> {
        self.0.get(id)
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is a leaf
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of nodes at every depth
    pub fn node_count(&self) -> usize {
        self.0.values().map(|child| 1 + child.node_count()).sum()
    }

    /// Iterate over direct children in id order
    pub fn iter(&self) -> btree_map::Iter<'_, NodeId, Subtree> {
        self.0.iter()
    }

    /// Consume and return the inner map
    pub fn into_inner(self) -> BTreeMap<NodeId, Subtree> {
        self.0
    }
}

impl FromIterator<(NodeId, Subtree)> for Subtree {
    fn from_iter<I: IntoIterator<Item = (NodeId, Subtree)>>(iter: I) -> Self {
        Subtree(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Subtree {
    type Item = (&'a NodeId, &'a Subtree);
    type IntoIter = btree_map::Iter<'a, NodeId, Subtree>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
