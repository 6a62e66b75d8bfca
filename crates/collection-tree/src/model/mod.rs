//! Grouped trees and the model that publishes them.
//!
//! # Core Types
//!
//! - `GroupedTree`: Immutable tree produced by grouping records
//! - `NodeId`: Identifies a node within one tree
//! - `TreeModel`: Read-only traversal trait implemented by trees and models
//! - `ModelSignals`: Signals for change notifications
//!
//! # Model Implementations
//!
//! - `CollectionTreeModel`: Groups a record collection by a [`Hierarchy`] and
//!   rebuilds on request
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐  build   ┌──────────────┐  emit   ┌─────────────┐
//! │  Hierarchy  │─────────>│ GroupedTree  │────────>│    View     │
//! │  + records  │          │ (TreeModel)  │         │             │
//! └─────────────┘          └──────────────┘         └─────────────┘
//!       ^                                                  │
//!       └──────────────── swap_levels + rebuild ───────────┘
//! ```
//!
//! [`Hierarchy`]: crate::Hierarchy

mod collection_tree_model;
mod format;
mod grouping;
mod node;
mod traits;

pub use collection_tree_model::{CollectionTreeModel, CollectionTreeModelBuilder};
pub use format::{TreeFormatOptions, TreeFormatter};
pub use grouping::build;
pub use node::{GroupedTree, NodeId, PreOrder};
pub use traits::{ModelSignals, StructureChange, TreeModel};
