//! Core systems for collection-tree.
//!
//! This crate provides the infrastructure the grouping model is built on:
//!
//! - **Signal/Slot System**: Type-safe change notification with ordered slots
//! - **Logging**: `tracing` targets, span names and a timing span guard
//!
//! # Signal/Slot Example
//!
//! ```
//! use collection_tree_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
