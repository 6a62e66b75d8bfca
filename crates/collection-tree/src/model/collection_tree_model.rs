//! Tree model over a collection of records.
//!
//! `CollectionTreeModel` groups a collection of records into a tree according
//! to a shared [`Hierarchy`], and rebuilds that tree on request, typically
//! after levels have been swapped.

use std::sync::Arc;

use collection_tree_core::PerfSpan;
use collection_tree_core::logging::{span_names, targets};
use parking_lot::{ReentrantMutex, RwLock};

use super::grouping;
use super::node::{GroupedTree, NodeId};
use super::traits::{ModelSignals, TreeModel};
use crate::error::{Error, Result};
use crate::hierarchy::{Hierarchy, LevelId};

/// A tree model that groups records of type `T` by the levels of a
/// [`Hierarchy`].
///
/// Given
///
/// ```
/// struct Book {
///     publisher: String,
///     author: String,
///     title: String,
/// }
/// ```
///
/// a publisher → author → title model is built, reordered and rebuilt like so:
///
/// ```
/// # struct Book { publisher: String, author: String, title: String }
/// use collection_tree::CollectionTreeModel;
///
/// # let books: Vec<Book> = Vec::new();
/// let model: CollectionTreeModel<Book> = CollectionTreeModel::builder(books)
///     .level_with_id(|b: &Book| b.publisher.clone(), "PublisherNode")
///     .level_with_id(|b: &Book| b.author.clone(), "AuthorNode")
///     .level(|b: &Book| b.title.clone())
///     .build()?;
///
/// assert_eq!(model.hierarchy().level_ids(), ["PublisherNode", "AuthorNode", "Node3"]);
///
/// model.hierarchy().swap_levels("PublisherNode", "AuthorNode")?;
/// assert_eq!(model.hierarchy().level_ids(), ["AuthorNode", "PublisherNode", "Node3"]);
///
/// model.rebuild()?;
/// # Ok::<(), collection_tree::Error>(())
/// ```
///
/// # Consistency
///
/// The published tree is an immutable `Arc<GroupedTree<K>>`. A rebuild builds
/// the replacement off to the side and swaps it in under a short write lock,
/// so readers see either the old tree or the new one, never a partial tree.
/// If a rebuild fails, the old tree stays published and no signal fires.
///
/// Rebuilds and record replacements are serialized: each one builds, publishes
/// and notifies before the next starts, so the last `structure_changed` a
/// listener receives always names the published root. Listeners and key
/// functions may read the model back, and a listener may start another rebuild
/// from the notifying thread.
pub struct CollectionTreeModel<T, K = String> {
    records: RwLock<Vec<T>>,
    hierarchy: Arc<Hierarchy<T, K>>,
    tree: RwLock<Arc<GroupedTree<K>>>,
    /// Held from build through notification; taken before `records`.
    publish: ReentrantMutex<()>,
    signals: ModelSignals,
}

impl<T, K: PartialEq> CollectionTreeModel<T, K> {
    /// Creates a model over `records` and builds the initial tree.
    ///
    /// The records are copied into the model; later changes to the caller's
    /// collection are not observed. No signal is emitted.
    ///
    /// # Errors
    ///
    /// Fails like [`build`](super::build).
    pub fn new(records: impl IntoIterator<Item = T>, hierarchy: Arc<Hierarchy<T, K>>) -> Result<Self> {
        let records: Vec<T> = records.into_iter().collect();
        let tree = grouping::build(&records, &*hierarchy)?;
        Ok(Self {
            records: RwLock::new(records),
            hierarchy,
            tree: RwLock::new(Arc::new(tree)),
            publish: ReentrantMutex::new(()),
            signals: ModelSignals::new(),
        })
    }

    /// Rebuilds the tree from the records and the hierarchy's current level
    /// order, then emits `structure_changed` once.
    ///
    /// # Errors
    ///
    /// Fails like [`build`](super::build); the previous tree stays published.
    #[tracing::instrument(skip_all, target = "collection_tree::model", level = "debug")]
    pub fn rebuild(&self) -> Result<()> {
        let _span = PerfSpan::new(span_names::REBUILD);
        let _publish = self.publish.lock();
        let tree = {
            let records = self.records.read();
            Arc::new(grouping::build(records.iter(), &*self.hierarchy)?)
        };
        self.publish_tree(tree);
        Ok(())
    }

    /// Replaces the records and rebuilds, emitting `structure_changed` once.
    ///
    /// # Errors
    ///
    /// Fails like [`build`](super::build); the previous records and tree are
    /// kept.
    #[tracing::instrument(skip_all, target = "collection_tree::model", level = "debug")]
    pub fn set_records(&self, records: impl IntoIterator<Item = T>) -> Result<()> {
        let _span = PerfSpan::new(span_names::REBUILD);
        let _publish = self.publish.lock();
        let records: Vec<T> = records.into_iter().collect();
        let tree = Arc::new(grouping::build(&records, &*self.hierarchy)?);
        *self.records.write() = records;
        self.publish_tree(tree);
        Ok(())
    }

    /// Swaps in `tree` and notifies. Caller holds `publish`.
    fn publish_tree(&self, tree: Arc<GroupedTree<K>>) {
        *self.tree.write() = Arc::clone(&tree);
        tracing::debug!(target: targets::MODEL, nodes = tree.node_count(), "published tree");
        self.signals.emit_structure_changed(&tree);
    }
}

impl<T, K> CollectionTreeModel<T, K> {
    /// Starts building a model over `records` with a new hierarchy.
    pub fn builder(records: impl IntoIterator<Item = T>) -> CollectionTreeModelBuilder<T, K> {
        CollectionTreeModelBuilder::new(records)
    }

    /// Returns the hierarchy, for querying and reordering levels.
    ///
    /// Reordering takes effect on the next [`rebuild`](Self::rebuild).
    pub fn hierarchy(&self) -> &Arc<Hierarchy<T, K>> {
        &self.hierarchy
    }

    /// Returns the currently published tree.
    ///
    /// The returned tree stays valid after later rebuilds; it is simply no
    /// longer the model's tree.
    pub fn tree(&self) -> Arc<GroupedTree<K>> {
        Arc::clone(&self.tree.read())
    }

    /// Returns the number of records.
    pub fn record_count(&self) -> usize {
        self.records.read().len()
    }

    /// Provides read access to the records.
    pub fn with_records<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[T]) -> R,
    {
        f(&self.records.read())
    }

    /// Returns the signals for this model.
    pub fn signals(&self) -> &ModelSignals {
        &self.signals
    }
}

impl<T, K> TreeModel for CollectionTreeModel<T, K>
where
    T: Send + Sync,
    K: Clone + Send + Sync,
{
    type Value = K;

    fn root(&self) -> NodeId {
        self.tree.read().root()
    }

    fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.tree.read().child(parent, index)
    }

    fn child_count(&self, parent: NodeId) -> usize {
        self.tree.read().child_count(parent)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.read().parent_of(node)
    }

    fn index_of_child(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.tree.read().index_of_child(parent, child)
    }

    fn allows_children(&self, node: NodeId) -> bool {
        self.tree.read().node_allows_children(node)
    }

    fn value(&self, node: NodeId) -> Option<K> {
        self.tree.read().key_value(node).cloned()
    }

    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.tree.read().child_ids(parent).to_vec()
    }
}

static_assertions::assert_impl_all!(CollectionTreeModel<String>: Send, Sync);

/// Builder for [`CollectionTreeModel`] that assembles the hierarchy inline.
///
/// Errors from adding levels (duplicate or blank ids) are held back and
/// returned by [`build`](Self::build).
pub struct CollectionTreeModelBuilder<T, K = String> {
    records: Vec<T>,
    hierarchy: Hierarchy<T, K>,
    error: Option<Error>,
}

impl<T, K> CollectionTreeModelBuilder<T, K> {
    /// Creates a builder over `records` with no levels.
    pub fn new(records: impl IntoIterator<Item = T>) -> Self {
        Self {
            records: records.into_iter().collect(),
            hierarchy: Hierarchy::new(),
            error: None,
        }
    }

    fn record_error(&mut self, result: Result<LevelId>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

impl<T: 'static, K: PartialEq + 'static> CollectionTreeModelBuilder<T, K> {
    /// Adds a level with a generated id.
    pub fn level<F, R>(mut self, key_fn: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Option<K>> + 'static,
    {
        let result = self.hierarchy.add_level(key_fn);
        self.record_error(result);
        self
    }

    /// Adds a level with the given id.
    pub fn level_with_id<F, R>(mut self, key_fn: F, id: impl Into<LevelId>) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Option<K>> + 'static,
    {
        let result = self.hierarchy.add_level_with_id(key_fn, id);
        self.record_error(result);
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// The first error from adding a level, otherwise fails like
    /// [`build`](super::build).
    pub fn build(self) -> Result<CollectionTreeModel<T, K>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        CollectionTreeModel::new(self.records, Arc::new(self.hierarchy))
    }
}
