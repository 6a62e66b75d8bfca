//! Plain-text rendering of grouped trees.

use std::fmt;

use super::node::{GroupedTree, NodeId};

/// Options controlling how a [`TreeFormatter`] renders a tree.
///
/// The defaults produce one line per node in pre-order:
///
/// ```text
/// + root
///   + Orbit
///     - Use Of Weapons
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFormatOptions {
    /// Spaces of indentation per depth.
    pub indent_size: usize,
    /// Prefix for nodes that have children.
    pub branch_marker: String,
    /// Prefix for nodes without children.
    pub leaf_marker: String,
    /// Label printed for the root, which carries no key value.
    pub root_label: String,
    /// Deepest level printed; `None` prints the whole tree.
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            indent_size: 2,
            branch_marker: "+ ".to_string(),
            leaf_marker: "- ".to_string(),
            root_label: "root".to_string(),
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Sets the indentation per depth.
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Sets the branch and leaf prefixes.
    pub fn with_markers(mut self, branch: impl Into<String>, leaf: impl Into<String>) -> Self {
        self.branch_marker = branch.into();
        self.leaf_marker = leaf.into();
        self
    }

    /// Sets the root label.
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Limits output to nodes at most `depth` edges below the start node.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Renders a tree, or a subtree, with [`TreeFormatOptions`].
///
/// Created by [`GroupedTree::formatter`] and [`GroupedTree::format_with`].
pub struct TreeFormatter<'a, K> {
    tree: &'a GroupedTree<K>,
    node: NodeId,
    options: TreeFormatOptions,
}

impl<K> TreeFormatter<'_, K> {
    /// Starts rendering at `node` instead of the root.
    ///
    /// Depths are counted from `node`. Nothing is rendered if the node does
    /// not belong to the tree.
    pub fn starting_at(mut self, node: NodeId) -> Self {
        self.node = node;
        self
    }
}

impl<K: fmt::Display> TreeFormatter<'_, K> {
    fn fmt_rec(&self, f: &mut fmt::Formatter<'_>, node: NodeId, depth: usize) -> fmt::Result {
        let children = self.tree.child_ids(node);
        let marker = if children.is_empty() {
            &self.options.leaf_marker
        } else {
            &self.options.branch_marker
        };

        write!(f, "{:indent$}{marker}", "", indent = depth * self.options.indent_size)?;
        match self.tree.key_value(node) {
            Some(value) => writeln!(f, "{value}")?,
            None => writeln!(f, "{}", self.options.root_label)?,
        }

        if self.options.max_depth.is_some_and(|max| depth >= max) {
            return Ok(());
        }
        for &child in children {
            self.fmt_rec(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl<K: fmt::Display> fmt::Display for TreeFormatter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.tree.contains(self.node) {
            return Ok(());
        }
        self.fmt_rec(f, self.node, 0)
    }
}

impl<K> GroupedTree<K> {
    /// Returns a formatter with default options.
    pub fn formatter(&self) -> TreeFormatter<'_, K> {
        self.format_with(TreeFormatOptions::default())
    }

    /// Returns a formatter with the given options.
    pub fn format_with(&self, options: TreeFormatOptions) -> TreeFormatter<'_, K> {
        TreeFormatter {
            tree: self,
            node: self.root(),
            options,
        }
    }
}

impl<K: fmt::Display> fmt::Display for GroupedTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.formatter(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> GroupedTree<&'static str> {
        let mut tree = GroupedTree::new();
        let root = tree.root();
        let orbit = tree.find_or_insert_branch(root, "Orbit");
        let banks = tree.find_or_insert_branch(orbit, "Banks");
        tree.push_leaf(banks, "Games");
        tree.push_leaf(banks, "Weapons");
        let penguin = tree.find_or_insert_branch(root, "Penguin");
        let gibson = tree.find_or_insert_branch(penguin, "Gibson");
        tree.push_leaf(gibson, "Light");
        tree
    }

    #[test]
    fn test_default_format() {
        let expected = concat!(
            "+ root\n",
            "  + Orbit\n",
            "    + Banks\n",
            "      - Games\n",
            "      - Weapons\n",
            "  + Penguin\n",
            "    + Gibson\n",
            "      - Light\n",
        );

        assert_eq!(sample_tree().to_string(), expected);
    }

    #[test]
    fn test_empty_tree_root_is_leaf() {
        let tree = GroupedTree::<String>::new();
        assert_eq!(tree.to_string(), "- root\n");
    }

    #[test]
    fn test_custom_options() {
        let tree = sample_tree();
        let options = TreeFormatOptions::default()
            .with_indent_size(1)
            .with_markers("[", "*")
            .with_root_label("books")
            .with_max_depth(1);

        assert_eq!(
            tree.format_with(options).to_string(),
            "[books\n [Orbit\n [Penguin\n"
        );
    }

    #[test]
    fn test_subtree() {
        let tree = sample_tree();
        let penguin = tree.child_ids(tree.root())[1];

        assert_eq!(
            tree.formatter().starting_at(penguin).to_string(),
            "+ Penguin\n  + Gibson\n    - Light\n"
        );
    }

    #[test]
    fn test_foreign_node_renders_nothing() {
        let tree = sample_tree();
        let other = sample_tree();
        let foreign = other.child_ids(other.root())[0];

        assert_eq!(tree.formatter().starting_at(foreign).to_string(), "");
    }
}
