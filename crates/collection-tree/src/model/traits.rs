//! Core traits for consumers of grouped trees.
//!
//! Rendering layers (tree widgets, terminal printers, test harnesses) depend
//! on [`TreeModel`] for read-only traversal and on [`ModelSignals`] to learn
//! when the tree has been rebuilt. Neither knows anything about the records or
//! the hierarchy behind the tree.

use collection_tree_core::Signal;

use super::node::{GroupedTree, NodeId};

/// Read-only traversal surface of a grouped tree.
///
/// Node ids are only meaningful for the tree that produced them. For a model
/// that rebuilds, ids obtained before a rebuild behave like unknown ids
/// afterwards: they have no parent, no children, no value and do not allow
/// children.
///
/// # Example
///
/// ```
/// use collection_tree::{CollectionTreeModel, TreeModel};
///
/// struct Book {
///     publisher: String,
///     title: String,
/// }
///
/// let books = vec![Book {
///     publisher: "Orbit".into(),
///     title: "Use Of Weapons".into(),
/// }];
///
/// let model: CollectionTreeModel<Book> = CollectionTreeModel::builder(books)
///     .level(|b: &Book| b.publisher.clone())
///     .level(|b: &Book| b.title.clone())
///     .build()?;
///
/// let publisher = model.child(model.root(), 0).unwrap();
/// assert_eq!(model.value(publisher).as_deref(), Some("Orbit"));
/// assert_eq!(model.child_count(publisher), 1);
/// # Ok::<(), collection_tree::Error>(())
/// ```
pub trait TreeModel: Send + Sync {
    /// The key value type carried by non-root nodes.
    type Value;

    /// Returns the root node.
    fn root(&self) -> NodeId;

    /// Returns the child of `parent` at `index`, or `None` if out of bounds.
    fn child(&self, parent: NodeId, index: usize) -> Option<NodeId>;

    /// Returns the number of children of `parent`.
    fn child_count(&self, parent: NodeId) -> usize;

    /// Returns the parent of `node`, or `None` for the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Returns the position of `child` among the children of `parent`, or
    /// `None` if it is not one of them.
    fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize>;

    /// Returns `true` if the node allows children, i.e. it is not on the last
    /// hierarchy level.
    fn allows_children(&self, node: NodeId) -> bool;

    /// Returns a clone of the key value at `node`; `None` for the root.
    fn value(&self, node: NodeId) -> Option<Self::Value>;

    // -------------------------------------------------------------------------
    // Convenience methods
    // -------------------------------------------------------------------------

    /// Returns `true` if the node has no children.
    ///
    /// An empty root is a leaf too.
    fn is_leaf(&self, node: NodeId) -> bool {
        self.child_count(node) == 0
    }

    /// Returns the children of `parent` in order.
    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        (0..self.child_count(parent))
            .filter_map(|index| self.child(parent, index))
            .collect()
    }

    /// Returns the number of edges between `node` and the root.
    fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }
}

impl<K: Clone + Send + Sync> TreeModel for GroupedTree<K> {
    type Value = K;

    fn root(&self) -> NodeId {
        GroupedTree::root(self)
    }

    fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.child_ids(parent).get(index).copied()
    }

    fn child_count(&self, parent: NodeId) -> usize {
        self.child_ids(parent).len()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_of(node)
    }

    fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.child_ids(parent).iter().position(|&id| id == child)
    }

    fn allows_children(&self, node: NodeId) -> bool {
        self.node_allows_children(node)
    }

    fn value(&self, node: NodeId) -> Option<K> {
        self.key_value(node).cloned()
    }

    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.child_ids(parent).to_vec()
    }
}

/// Notification that a tree was replaced wholesale.
///
/// Describes the new root and its direct children only; it is not a diff.
/// Every node id from the previous tree is invalid once this is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureChange {
    /// The new root.
    pub root: NodeId,
    /// Indices `0..n` of the root's children.
    pub child_indices: Vec<usize>,
    /// The root's children, in order.
    pub children: Vec<NodeId>,
}

impl StructureChange {
    /// Describes the root level of `tree`.
    pub fn for_tree<K>(tree: &GroupedTree<K>) -> Self {
        let children = tree.child_ids(tree.root()).to_vec();
        Self {
            root: tree.root(),
            child_indices: (0..children.len()).collect(),
            children,
        }
    }
}

/// Collection of signals emitted by tree models.
///
/// Views connect to these signals to stay synchronized with the model.
pub struct ModelSignals {
    /// Emitted once after each successful rebuild, never on construction.
    pub structure_changed: Signal<StructureChange>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            structure_changed: Signal::new(),
        }
    }

    /// Emits `structure_changed` describing the root level of `tree`.
    pub fn emit_structure_changed<K>(&self, tree: &GroupedTree<K>) {
        self.structure_changed.emit(StructureChange::for_tree(tree));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn two_level_tree() -> GroupedTree<String> {
        let mut tree = GroupedTree::new();
        let root = tree.root();
        let orbit = tree.find_or_insert_branch(root, "Orbit".to_string());
        tree.push_leaf(orbit, "Excession".to_string());
        tree.push_leaf(orbit, "Excession".to_string());
        tree.find_or_insert_branch(root, "Ace".to_string());
        tree
    }

    #[test]
    fn test_traversal_surface() {
        let tree = two_level_tree();
        let root = TreeModel::root(&tree);

        assert_eq!(tree.child_count(root), 2);
        let orbit = tree.child(root, 0).unwrap();
        let ace = tree.child(root, 1).unwrap();
        assert_eq!(tree.child(root, 2), None);

        assert_eq!(tree.value(orbit).as_deref(), Some("Orbit"));
        assert_eq!(tree.value(root), None);
        assert_eq!(tree.parent(orbit), Some(root));
        assert_eq!(tree.index_of_child(root, ace), Some(1));
        assert_eq!(tree.index_of_child(orbit, ace), None);

        let leaves = tree.children(orbit);
        assert_eq!(leaves.len(), 2);
        assert!(tree.is_leaf(leaves[0]));
        assert!(!tree.allows_children(leaves[0]));
        assert_eq!(tree.depth(leaves[1]), 2);
        assert_eq!(tree.depth(root), 0);
    }

    #[test]
    fn test_branch_without_children_is_leaf_but_allows_children() {
        let tree = two_level_tree();
        let ace = tree.child(TreeModel::root(&tree), 1).unwrap();

        assert!(tree.is_leaf(ace));
        assert!(tree.allows_children(ace));
    }

    #[test]
    fn test_structure_change_for_tree() {
        let tree = two_level_tree();
        let change = StructureChange::for_tree(&tree);

        assert_eq!(change.root, tree.root());
        assert_eq!(change.child_indices, vec![0, 1]);
        assert_eq!(change.children, tree.child_ids(tree.root()));
    }

    #[test]
    fn test_emit_structure_changed() {
        let signals = ModelSignals::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signals.structure_changed.connect(move |change| {
            received_clone.lock().push(change.children.len());
        });

        signals.emit_structure_changed(&two_level_tree());
        assert_eq!(*received.lock(), vec![2]);
    }
}
