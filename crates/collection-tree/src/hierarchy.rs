//! Ordered grouping levels for a record type.
//!
//! A [`Hierarchy`] specifies how records of type `T` are grouped into a tree:
//! each level is a key-extraction function plus an id, and level order is
//! grouping depth. Given
//!
//! ```
//! struct Book {
//!     publisher: String,
//!     author: String,
//!     title: String,
//! }
//! ```
//!
//! a publisher → author → title tree is specified as:
//!
//! ```
//! # struct Book { publisher: String, author: String, title: String }
//! use collection_tree::Hierarchy;
//!
//! let hierarchy: Hierarchy<Book> = Hierarchy::new();
//! hierarchy.add_level_with_id(|b: &Book| b.publisher.clone(), "Publisher")?;
//! hierarchy.add_level_with_id(|b: &Book| b.author.clone(), "Author")?;
//! hierarchy.add_level(|b: &Book| b.title.clone())?;
//!
//! assert_eq!(hierarchy.level_ids(), ["Publisher", "Author", "Node3"]);
//!
//! hierarchy.swap_levels("Publisher", "Author")?;
//! assert_eq!(hierarchy.level_ids(), ["Author", "Publisher", "Node3"]);
//! # Ok::<(), collection_tree::Error>(())
//! ```
//!
//! When no id is supplied a default id `Node<n>` is allocated, where `n` is the
//! 1-based position the level occupies when it is added. Generated ids are
//! fixed at that point and follow the level through later swaps.
//!
//! # Thread Safety
//!
//! The level list lives behind a single `RwLock`. Every mutation (add, swap,
//! move) happens under one write lock, and tree construction copies the levels
//! under one read lock, so a build observes a hierarchy either entirely before
//! or entirely after any concurrent mutation.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use collection_tree_core::logging::targets;
use parking_lot::RwLock;

use crate::error::{Error, Result};

/// Identifier of one level in a [`Hierarchy`].
///
/// Ids are compared by value. They are either supplied by the caller or
/// generated as `Node<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LevelId(String);

impl LevelId {
    /// Creates a level id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id generated for a level added at 1-based `position`.
    fn generated(position: usize) -> Self {
        Self(format!("Node{position}"))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LevelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LevelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for LevelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LevelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LevelId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LevelId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A shared key-extraction function.
///
/// Returns `None` when the record has no key value for the level. Key
/// functions run while a model builds; they may read that model but must not
/// rebuild it or replace its records.
pub type KeyFn<T, K> = Arc<dyn Fn(&T) -> Option<K> + Send + Sync>;

/// One grouping level: a key-extraction function and its id.
pub(crate) struct Level<T, K> {
    id: LevelId,
    key_fn: KeyFn<T, K>,
}

impl<T, K> Level<T, K> {
    pub(crate) fn id(&self) -> &LevelId {
        &self.id
    }

    pub(crate) fn key(&self, record: &T) -> Option<K> {
        (self.key_fn)(record)
    }
}

impl<T, K> Clone for Level<T, K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            key_fn: Arc::clone(&self.key_fn),
        }
    }
}

/// Ordered levels and the set of every id issued, kept in step under one lock.
struct HierarchyState<T, K> {
    levels: Vec<Level<T, K>>,
    issued_ids: HashSet<LevelId>,
}

impl<T, K> HierarchyState<T, K> {
    fn position(&self, id: &str) -> Option<usize> {
        if !self.issued_ids.contains(id) {
            return None;
        }
        self.levels.iter().position(|level| level.id.as_str() == id)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.levels.len() {
            Ok(())
        } else {
            Err(Error::index_out_of_range(index, self.levels.len()))
        }
    }

    fn resolve(&self, id: &str) -> Result<usize> {
        self.position(id)
            .ok_or_else(|| Error::unknown_level(LevelId::new(id), self.levels.len()))
    }
}

/// An ordered, identifiable list of grouping levels for records of type `T`
/// producing keys of type `K`.
///
/// Levels are appended with [`add_level`](Self::add_level) or
/// [`add_level_with_id`](Self::add_level_with_id) and reordered with
/// [`swap_levels`](Self::swap_levels), [`swap_levels_at`](Self::swap_levels_at)
/// or [`move_level`](Self::move_level). Levels are never removed.
///
/// All methods take `&self`; share a hierarchy between a model and the code
/// reordering it through an `Arc`.
pub struct Hierarchy<T, K = String> {
    state: RwLock<HierarchyState<T, K>>,
}

impl<T, K> Default for Hierarchy<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> Hierarchy<T, K> {
    /// Creates a hierarchy with no levels.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HierarchyState {
                levels: Vec::new(),
                issued_ids: HashSet::new(),
            }),
        }
    }

    /// Returns the level ids in current level order.
    pub fn level_ids(&self) -> Vec<LevelId> {
        self.state
            .read()
            .levels
            .iter()
            .map(|level| level.id.clone())
            .collect()
    }

    /// Returns the number of levels.
    pub fn level_count(&self) -> usize {
        self.state.read().levels.len()
    }

    /// Returns `true` if no levels have been added.
    pub fn is_empty(&self) -> bool {
        self.state.read().levels.is_empty()
    }

    /// Returns the 0-based position of the level with the given id, or `None`
    /// if no level has that id.
    pub fn index_of(&self, id: impl AsRef<str>) -> Option<usize> {
        self.state.read().position(id.as_ref())
    }

    /// Returns `true` if a level has the given id.
    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.state.read().issued_ids.contains(id.as_ref())
    }

    /// Swaps the levels with the given ids.
    ///
    /// Swapping an id with itself does nothing.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if either id does not belong to a level. The
    /// hierarchy is unchanged in that case.
    pub fn swap_levels(&self, id1: impl AsRef<str>, id2: impl AsRef<str>) -> Result<()> {
        let mut state = self.state.write();
        let i = state.resolve(id1.as_ref())?;
        let j = state.resolve(id2.as_ref())?;
        if i != j {
            state.levels.swap(i, j);
            tracing::debug!(
                target: targets::HIERARCHY,
                id1 = id1.as_ref(),
                id2 = id2.as_ref(),
                i,
                j,
                "swapped levels by id"
            );
        }
        Ok(())
    }

    /// Swaps the levels at 0-based positions `i` and `j`.
    ///
    /// Swapping a position with itself does nothing.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if either index is not less than
    /// [`level_count`](Self::level_count).
    pub fn swap_levels_at(&self, i: usize, j: usize) -> Result<()> {
        let mut state = self.state.write();
        state.check_index(i)?;
        state.check_index(j)?;
        if i != j {
            state.levels.swap(i, j);
            tracing::debug!(target: targets::HIERARCHY, i, j, "swapped levels");
        }
        Ok(())
    }

    /// Moves the level at position `from` to position `to`, shifting the
    /// levels in between by one.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if either index is not less than
    /// [`level_count`](Self::level_count).
    pub fn move_level(&self, from: usize, to: usize) -> Result<()> {
        let mut state = self.state.write();
        state.check_index(from)?;
        state.check_index(to)?;
        if from != to {
            let level = state.levels.remove(from);
            state.levels.insert(to, level);
            tracing::debug!(target: targets::HIERARCHY, from, to, "moved level");
        }
        Ok(())
    }

    /// Copies the current levels under one read lock.
    pub(crate) fn snapshot(&self) -> Vec<Level<T, K>> {
        self.state.read().levels.clone()
    }
}

impl<T: 'static, K: 'static> Hierarchy<T, K> {
    /// Appends a level with a generated id of the form `Node<n>`, where `n` is
    /// the 1-based position of the new level.
    ///
    /// The key function may return `K` or `Option<K>`; `None` marks a record
    /// that has no key for this level, which fails tree construction.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateIdentifier`] if the generated id was already supplied
    /// explicitly for an earlier level.
    pub fn add_level<F, R>(&self, key_fn: F) -> Result<LevelId>
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Option<K>> + 'static,
    {
        let mut state = self.state.write();
        let id = LevelId::generated(state.levels.len() + 1);
        Self::push_level(&mut state, key_fn, id)
    }

    /// Appends a level with the given id.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if the id is empty or only whitespace.
    /// - [`Error::DuplicateIdentifier`] if the id belongs to any existing
    ///   level, generated or supplied. The hierarchy is unchanged.
    pub fn add_level_with_id<F, R>(&self, key_fn: F, id: impl Into<LevelId>) -> Result<LevelId>
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Option<K>> + 'static,
    {
        let id = id.into();
        if id.as_str().trim().is_empty() {
            return Err(Error::invalid_argument("level id must not be blank"));
        }
        let mut state = self.state.write();
        Self::push_level(&mut state, key_fn, id)
    }

    fn push_level<F, R>(state: &mut HierarchyState<T, K>, key_fn: F, id: LevelId) -> Result<LevelId>
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: Into<Option<K>> + 'static,
    {
        if state.issued_ids.contains(&id) {
            tracing::warn!(target: targets::HIERARCHY, %id, "rejected duplicate level id");
            return Err(Error::DuplicateIdentifier { id });
        }

        let key_fn: KeyFn<T, K> = Arc::new(move |record: &T| -> Option<K> { key_fn(record).into() });
        state.issued_ids.insert(id.clone());
        state.levels.push(Level {
            id: id.clone(),
            key_fn,
        });
        tracing::debug!(
            target: targets::HIERARCHY,
            %id,
            position = state.levels.len() - 1,
            "added level"
        );
        Ok(id)
    }
}

impl<T, K> fmt::Debug for Hierarchy<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hierarchy")
            .field("levels", &self.level_ids())
            .finish()
    }
}

static_assertions::assert_impl_all!(Hierarchy<String>: Send, Sync);
