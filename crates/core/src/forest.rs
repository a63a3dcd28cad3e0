//! In-memory forest index
//!
//! The forest is an arena of node records keyed by [`NodeId`]. Each record
//! holds an explicit parent and the set of its direct children; the root
//! sentinel's children are held separately since the root has no record of
//! its own. Export walks this index from the root, so no part of the nested
//! structure is ever shared between records.
//!
//! # Mutation contract
//!
//! Every mutation validates all of its preconditions before touching the
//! index. A returned error therefore always means the forest is unchanged.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::{ForestError, InvariantViolation, Result};
use crate::node::{NodeId, Parent};
use crate::subtree::Subtree;

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeRecord {
    parent: Parent,
    children: BTreeSet<NodeId>,
}

/// Forest of uniquely named nodes below an implicit root sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forest {
    /// Direct children of the root sentinel
    roots: BTreeSet<NodeId>,
    /// Flat index of every non-root node
    nodes: FxHashMap<NodeId, NodeRecord>,
}

/// Read-only view of one position in the forest (a node or the root)
#[derive(Debug, Clone, Copy)]
pub struct Locator<'a> {
    forest: &'a Forest,
    id: Option<&'a NodeId>,
    parent: Option<&'a Parent>,
    children: &'a BTreeSet<NodeId>,
}

impl<'a> Locator<'a> {
    /// The node id, or `None` for the root sentinel
    pub fn id(&self) -> Option<&'a NodeId> {
        self.id
    }

    /// Current parent, or `None` for the root sentinel
    pub fn parent(&self) -> Option<&'a Parent> {
        self.parent
    }

    /// Whether this locator addresses the root sentinel
    pub fn is_root(&self) -> bool {
        self.id.is_none()
    }

    /// Direct children
    pub fn children(&self) -> &'a BTreeSet<NodeId> {
        self.children
    }

    /// Ancestor chain from the root sentinel down to the immediate parent
    ///
    /// Empty for the root sentinel itself.
    pub fn ancestors(&self) -> Vec<Parent> {
        let mut chain = Vec::new();
        let mut cursor = self.parent;
        while let Some(parent) = cursor {
            chain.push(parent.clone());
            cursor = match parent {
                Parent::Root => None,
                Parent::Node(id) => self.forest.nodes.get(id).map(|record| &record.parent),
            };
        }
        chain.reverse();
        chain
    }

    /// Number of edges between this position and the root
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    /// Nested mapping of everything below this position
    pub fn export(&self) -> Subtree {
        self.forest.subtree(self.children)
    }
}

impl Forest {
    /// Create a forest containing only the root sentinel
    pub fn new() -> Self {
        Forest::default()
    }

    /// Number of nodes, not counting the root sentinel
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest holds no nodes besides the root sentinel
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node is present
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Iterate over all node ids in unspecified order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Locator of the root sentinel
    pub fn root(&self) -> Locator<'_> {
        Locator {
            forest: self,
            id: None,
            parent: None,
            children: &self.roots,
        }
    }

    /// Look up a node by id
    pub fn get(&self, id: &NodeId) -> Option<Locator<'_>> {
        self.nodes.get_key_value(id).map(|(key, record)| Locator {
            forest: self,
            id: Some(key),
            parent: Some(&record.parent),
            children: &record.children,
        })
    }

    /// Look up either a node or the root sentinel
    pub fn lookup(&self, at: &Parent) -> Option<Locator<'_>> {
        match at {
            Parent::Root => Some(self.root()),
            Parent::Node(id) => self.get(id),
        }
    }

    /// Whole forest as a nested mapping rooted at the root sentinel
    pub fn export(&self) -> Subtree {
        self.subtree(&self.roots)
    }

    /// Every node below `id` at any depth, or `None` if `id` is absent
    pub fn descendants(&self, id: &NodeId) -> Option<Vec<NodeId>> {
        let record = self.nodes.get(id)?;
        let mut found = Vec::new();
        let mut stack: Vec<&NodeId> = record.children.iter().collect();
        while let Some(next) = stack.pop() {
            found.push(next.clone());
            if let Some(child) = self.nodes.get(next) {
                stack.extend(child.children.iter());
            }
        }
        Some(found)
    }

    fn subtree(&self, children: &BTreeSet<NodeId>) -> Subtree {
        children
            .iter()
            .map(|child| {
                let below = self
                    .nodes
                    .get(child)
                    .map(|record| self.subtree(&record.children))
                    .unwrap_or_default();
                (child.clone(), below)
            })
            .collect()
    }

    /// Children of an existing parent, or `NonexistingParent`
    fn children_of(&self, parent: &Parent) -> Result<&BTreeSet<NodeId>> {
        match parent {
            Parent::Root => Ok(&self.roots),
            Parent::Node(id) => self
                .nodes
                .get(id)
                .map(|record| &record.children)
                .ok_or_else(|| ForestError::NonexistingParent { parent: id.clone() }),
        }
    }

    fn children_mut(&mut self, parent: &Parent) -> Option<&mut BTreeSet<NodeId>> {
        match parent {
            Parent::Root => Some(&mut self.roots),
            Parent::Node(id) => self.nodes.get_mut(id).map(|record| &mut record.children),
        }
    }

    fn set_parent(&mut self, id: &NodeId, parent: Parent) {
        if let Some(record) = self.nodes.get_mut(id) {
            record.parent = parent;
        }
    }

    /// Whether `candidate` is `node` or lies anywhere below it
    fn is_self_or_descendant(&self, node: &NodeId, candidate: &NodeId) -> bool {
        let mut cursor = Some(candidate);
        while let Some(current) = cursor {
            if current == node {
                return true;
            }
            cursor = self.nodes.get(current).and_then(|record| record.parent.node());
        }
        false
    }

    /// Create `node` under `parent`, adopting the listed children of `parent`
    ///
    /// # Errors
    ///
    /// - `AddExisting` if `node` is already present
    /// - `NonexistingParent` if `parent` is absent
    /// - `InvalidChild` if a listed child is not a direct child of `parent`
    pub fn add(&mut self, node: NodeId, parent: Parent, children: &[NodeId]) -> Result<()> {
        if self.contains(&node) {
            return Err(ForestError::AddExisting { node });
        }
        let siblings = self.children_of(&parent)?;
        if let Some(child) = children.iter().find(|child| !siblings.contains(*child)) {
            return Err(ForestError::InvalidChild {
                child: child.clone(),
                parent,
            });
        }

        let adopted: BTreeSet<NodeId> = children.iter().cloned().collect();
        if let Some(siblings) = self.children_mut(&parent) {
            for child in &adopted {
                siblings.remove(child);
            }
            siblings.insert(node.clone());
        }
        for child in &adopted {
            self.set_parent(child, Parent::Node(node.clone()));
        }

        trace!(node = %node, parent = %parent, adopted = adopted.len(), "added node");
        self.nodes.insert(
            node,
            NodeRecord {
                parent,
                children: adopted,
            },
        );
        Ok(())
    }

    /// Re-parent `node` under `parent`, then adopt the listed children of `parent`
    ///
    /// Adoption draws from the *destination* parent, not from the node's
    /// previous parent. The node's own descendants move with it.
    ///
    /// # Errors
    ///
    /// - `MoveNonexisting` if `node` is absent
    /// - `NonexistingParent` if `parent` is absent
    /// - `CyclicMove` if `parent` is `node` or one of its descendants
    /// - `InvalidChild` if a listed child is `node` itself or is not a
    ///   direct child of `parent`
    pub fn move_node(&mut self, node: &NodeId, parent: Parent, children: &[NodeId]) -> Result<()> {
        let Some(current) = self.nodes.get(node).map(|record| record.parent.clone()) else {
            return Err(ForestError::MoveNonexisting { node: node.clone() });
        };
        let targets = self.children_of(&parent)?;
        if let Parent::Node(target) = &parent {
            if self.is_self_or_descendant(node, target) {
                return Err(ForestError::CyclicMove {
                    node: node.clone(),
                    parent: target.clone(),
                });
            }
        }
        if let Some(child) = children
            .iter()
            .find(|child| *child == node || !targets.contains(*child))
        {
            return Err(ForestError::InvalidChild {
                child: child.clone(),
                parent,
            });
        }

        if let Some(siblings) = self.children_mut(&current) {
            siblings.remove(node);
        }
        let mut adopted = Vec::new();
        if let Some(siblings) = self.children_mut(&parent) {
            siblings.insert(node.clone());
            for child in children {
                // Repeated entries were already adopted on first sight.
                if siblings.remove(child) {
                    adopted.push(child.clone());
                }
            }
        }
        for child in &adopted {
            self.set_parent(child, Parent::Node(node.clone()));
        }

        trace!(node = %node, from = %current, to = %parent, adopted = adopted.len(), "moved node");
        if let Some(record) = self.nodes.get_mut(node) {
            record.parent = parent;
            record.children.extend(adopted);
        }
        Ok(())
    }

    /// Remove `node`, either with its whole subtree or by splicing its
    /// children into its former parent
    ///
    /// Returns the number of nodes removed.
    ///
    /// # Errors
    ///
    /// - `RemoveNonexisting` if `node` is absent
    pub fn remove(&mut self, node: &NodeId, recursive: bool) -> Result<usize> {
        let Some(NodeRecord { parent, children }) = self.nodes.remove(node) else {
            return Err(ForestError::RemoveNonexisting { node: node.clone() });
        };

        if recursive {
            if let Some(siblings) = self.children_mut(&parent) {
                siblings.remove(node);
            }
            let mut removed = 1;
            let mut stack: Vec<NodeId> = children.into_iter().collect();
            while let Some(next) = stack.pop() {
                if let Some(record) = self.nodes.remove(&next) {
                    stack.extend(record.children);
                    removed += 1;
                }
            }
            trace!(node = %node, removed, "removed subtree");
            return Ok(removed);
        }

        for child in &children {
            self.set_parent(child, parent.clone());
        }
        let spliced = children.len();
        if let Some(siblings) = self.children_mut(&parent) {
            siblings.remove(node);
            siblings.extend(children);
        }
        trace!(node = %node, parent = %parent, spliced, "spliced node out");
        Ok(1)
    }

    /// Verify the structural invariants of the index
    ///
    /// - every top-level node records the root as its parent
    /// - every node appears in its parent's children set and nowhere else
    /// - every child listed by a node points back to that node
    /// - walking from the root reaches every indexed node exactly once
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantViolation> {
        for id in &self.roots {
            match self.nodes.get(id) {
                Some(record) if record.parent.is_root() => {}
                Some(record) => {
                    return Err(InvariantViolation(format!(
                        "{} is listed under the root but records parent {}",
                        id, record.parent
                    )))
                }
                None => {
                    return Err(InvariantViolation(format!(
                        "{} is listed under the root but is not indexed",
                        id
                    )))
                }
            }
        }

        for (id, record) in &self.nodes {
            let listed = self
                .children_of(&record.parent)
                .is_ok_and(|siblings| siblings.contains(id));
            if !listed {
                return Err(InvariantViolation(format!(
                    "{} is missing from the children of its parent {}",
                    id, record.parent
                )));
            }
            for child in &record.children {
                match self.nodes.get(child) {
                    Some(below) if below.parent.node() == Some(id) => {}
                    _ => {
                        return Err(InvariantViolation(format!(
                            "{} lists {} as a child but {} does not point back",
                            id, child, child
                        )))
                    }
                }
            }
        }

        let mut seen: BTreeSet<&NodeId> = BTreeSet::new();
        let mut stack: Vec<&NodeId> = self.roots.iter().collect();
        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                return Err(InvariantViolation(format!("{} is reachable twice", next)));
            }
            if let Some(record) = self.nodes.get(next) {
                stack.extend(record.children.iter());
            }
        }
        if seen.len() != self.nodes.len() {
            return Err(InvariantViolation(format!(
                "{} nodes indexed but {} reachable from the root",
                self.nodes.len(),
                seen.len()
            )));
        }

        Ok(())
    }
}
