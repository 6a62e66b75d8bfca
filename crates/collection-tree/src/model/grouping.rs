//! Grouping records into a tree.

use collection_tree_core::PerfSpan;
use collection_tree_core::logging::{span_names, targets};

use super::node::GroupedTree;
use crate::error::{Error, Result};
use crate::hierarchy::{Hierarchy, Level};

/// Builds a grouped tree from `records` using the current level order of
/// `hierarchy`.
///
/// Each record contributes one root-to-leaf path. For every level except the
/// last, the record descends into the child whose key value equals its own,
/// creating that child (after any existing siblings) if there is none. The key
/// value of the last level always becomes a new leaf, so records whose keys
/// are equal on every level still produce separate leaves.
///
/// The hierarchy is copied once at the start, so concurrent reordering is seen
/// either entirely or not at all. Node order follows record iteration order.
/// An empty `records` yields a tree holding only the root.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if the hierarchy has no levels.
/// - [`Error::NullKeyValue`] if a key function returns `None`. No tree is
///   produced.
pub fn build<'a, T, K>(
    records: impl IntoIterator<Item = &'a T>,
    hierarchy: &Hierarchy<T, K>,
) -> Result<GroupedTree<K>>
where
    T: 'a,
    K: PartialEq,
{
    let _span = PerfSpan::new(span_names::BUILD);

    let levels = hierarchy.snapshot();
    let Some((leaf_level, branch_levels)) = levels.split_last() else {
        return Err(Error::invalid_argument(
            "hierarchy must have at least one level",
        ));
    };

    let mut tree = GroupedTree::new();
    let mut record_count = 0;
    let mut branch_keys = Vec::with_capacity(branch_levels.len());

    for (record_index, record) in records.into_iter().enumerate() {
        // Evaluate every level before touching the tree.
        for (level_index, level) in branch_levels.iter().enumerate() {
            branch_keys.push(key_for(level, record, record_index, level_index)?);
        }
        let leaf_key = key_for(leaf_level, record, record_index, branch_levels.len())?;

        let mut parent = tree.root();
        for key in branch_keys.drain(..) {
            parent = tree.find_or_insert_branch(parent, key);
        }
        tree.push_leaf(parent, leaf_key);
        record_count += 1;
    }

    tracing::debug!(
        target: targets::MODEL,
        records = record_count,
        levels = levels.len(),
        nodes = tree.node_count(),
        "built grouped tree"
    );
    Ok(tree)
}

fn key_for<T, K>(
    level: &Level<T, K>,
    record: &T,
    record_index: usize,
    level_index: usize,
) -> Result<K> {
    level.key(record).ok_or_else(|| {
        tracing::warn!(
            target: targets::MODEL,
            record_index,
            level_index,
            level_id = %level.id(),
            "key function produced no value"
        );
        Error::NullKeyValue {
            record_index,
            level_index,
            level_id: level.id().clone(),
        }
    })
}
