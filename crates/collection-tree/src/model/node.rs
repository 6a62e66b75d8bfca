//! Immutable grouped tree storage.
//!
//! A [`GroupedTree`] is produced by [`build`](super::build) and never changes
//! afterwards. Nodes live in an arena owned by the tree and are addressed by
//! [`NodeId`]s, which carry the id of the tree that created them: ids from a
//! tree that has since been rebuilt resolve to nothing in the new tree.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique tree ids.
static TREE_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

fn next_tree_id() -> u64 {
    TREE_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Identifies one node of one [`GroupedTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

/// A node in the tree structure.
struct TreeNode<K> {
    /// Key value; `None` only for the root.
    value: Option<K>,
    allows_children: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A single-root tree of grouped key values.
///
/// The root carries no key value. Every other node carries the key value one
/// level of the hierarchy produced for the records grouped under it. Nodes on
/// the last level are leaf-only: they never have children, and sibling leaves
/// may carry equal key values.
///
/// Query the tree through the [`TreeModel`](super::TreeModel) trait, or
/// directly with [`key_value`](Self::key_value) and
/// [`pre_order`](Self::pre_order).
pub struct GroupedTree<K> {
    id: u64,
    nodes: Vec<TreeNode<K>>,
}

impl<K> GroupedTree<K> {
    /// Creates a tree holding only the root.
    pub(crate) fn new() -> Self {
        let id = next_tree_id();
        Self {
            id,
            nodes: vec![TreeNode {
                value: None,
                allows_children: true,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode<K>> {
        if id.tree == self.id {
            self.nodes.get(id.index)
        } else {
            None
        }
    }

    /// Appends a child under `parent` and returns its id.
    fn push_child(&mut self, parent: NodeId, value: K, allows_children: bool) -> NodeId {
        debug_assert!(
            self.node(parent).is_some_and(|node| node.allows_children),
            "parent must belong to this tree and allow children"
        );
        let id = NodeId {
            tree: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(TreeNode {
            value: Some(value),
            allows_children,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index].children.push(id);
        id
    }

    /// Appends a leaf-only child under `parent`, even if an equal sibling
    /// already exists.
    pub(crate) fn push_leaf(&mut self, parent: NodeId, value: K) -> NodeId {
        self.push_child(parent, value, false)
    }

    /// Returns the root id.
    pub fn root(&self) -> NodeId {
        NodeId {
            tree: self.id,
            index: 0,
        }
    }

    /// Returns `true` if `node` belongs to this tree.
    pub fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    /// Returns the total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the key value stored at `node`, or `None` for the root and for
    /// ids that do not belong to this tree.
    pub fn key_value(&self, node: NodeId) -> Option<&K> {
        self.node(node).and_then(|n| n.value.as_ref())
    }

    /// Returns the children of `parent` in insertion order.
    pub fn child_ids(&self, parent: NodeId) -> &[NodeId] {
        self.node(parent)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub(crate) fn node_allows_children(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|n| n.allows_children)
    }

    /// Depth-first pre-order traversal of the whole tree, root first.
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        self.pre_order_from(self.root())
    }

    /// Depth-first pre-order traversal of the subtree rooted at `node`.
    ///
    /// Yields nothing if `node` does not belong to this tree.
    pub fn pre_order_from(&self, node: NodeId) -> PreOrder<'_, K> {
        let stack = if self.contains(node) {
            vec![node]
        } else {
            Vec::new()
        };
        PreOrder { tree: self, stack }
    }
}

impl<K: PartialEq> GroupedTree<K> {
    /// Returns the child of `parent` whose key value equals `value`, creating
    /// it at the end of the child list if there is none.
    pub(crate) fn find_or_insert_branch(&mut self, parent: NodeId, value: K) -> NodeId {
        let existing = self
            .child_ids(parent)
            .iter()
            .copied()
            .find(|&child| self.key_value(child) == Some(&value));
        match existing {
            Some(child) => child,
            None => self.push_child(parent, value, true),
        }
    }
}

impl<K> std::fmt::Debug for GroupedTree<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupedTree")
            .field("id", &self.id)
            .field("node_count", &self.nodes.len())
            .finish()
    }
}

/// Pre-order iterator over a [`GroupedTree`].
pub struct PreOrder<'a, K> {
    tree: &'a GroupedTree<K>,
    stack: Vec<NodeId>,
}

impl<K> Iterator for PreOrder<'_, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.child_ids(node).iter().rev().copied());
        Some(node)
    }
}

static_assertions::assert_impl_all!(GroupedTree<String>: Send, Sync);
