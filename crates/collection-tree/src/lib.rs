//! Collection Tree - group a flat collection of records into a tree.
//!
//! A [`Hierarchy`] lists key-extraction levels for a record type. Building
//! walks the records and groups them level by level into a [`GroupedTree`],
//! whose leaves are one per record. [`CollectionTreeModel`] owns the records,
//! shares the hierarchy and republishes the tree on [`rebuild`], notifying
//! listeners through [`ModelSignals`].
//!
//! # Example
//!
//! ```
//! use collection_tree::{CollectionTreeModel, TreeModel};
//!
//! struct Book {
//!     publisher: &'static str,
//!     author: &'static str,
//!     title: &'static str,
//! }
//!
//! let books = vec![
//!     Book { publisher: "Orbit", author: "Iain M.Banks", title: "Use Of Weapons" },
//!     Book { publisher: "Ace", author: "William Gibson", title: "Neuromancer" },
//! ];
//!
//! let model: CollectionTreeModel<Book> = CollectionTreeModel::builder(books)
//!     .level_with_id(|b: &Book| b.publisher.to_string(), "Publisher")
//!     .level_with_id(|b: &Book| b.author.to_string(), "Author")
//!     .level(|b: &Book| b.title.to_string())
//!     .build()?;
//!
//! model.signals().structure_changed.connect(|change| {
//!     println!("tree rebuilt with {} top-level nodes", change.children.len());
//! });
//!
//! model.hierarchy().swap_levels("Publisher", "Author")?;
//! model.rebuild()?;
//!
//! let first = model.child(model.root(), 0).unwrap();
//! assert_eq!(model.value(first).as_deref(), Some("Iain M.Banks"));
//! print!("{}", model.tree());
//! # Ok::<(), collection_tree::Error>(())
//! ```
//!
//! [`rebuild`]: CollectionTreeModel::rebuild

pub mod error;
pub mod hierarchy;
pub mod model;

pub use error::{Error, LevelRef, Result};
pub use hierarchy::{Hierarchy, KeyFn, LevelId};
pub use model::{
    CollectionTreeModel, CollectionTreeModelBuilder, GroupedTree, ModelSignals, NodeId, PreOrder,
    StructureChange, TreeFormatOptions, TreeFormatter, TreeModel, build,
};
