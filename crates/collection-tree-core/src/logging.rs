//! Logging facilities for collection-tree.
//!
//! collection-tree uses the `tracing` crate for instrumentation. The library
//! never installs a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("collection_tree=debug")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```

/// Span names used throughout collection-tree for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Grouped tree construction span.
    pub const BUILD: &str = "collection_tree::build";
    /// Model rebuild span.
    pub const REBUILD: &str = "collection_tree::rebuild";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "collection_tree_core::signal";
    /// Hierarchy (level list) target.
    pub const HIERARCHY: &str = "collection_tree::hierarchy";
    /// Tree model target.
    pub const MODEL: &str = "collection_tree::model";
    /// Performance span target.
    pub const PERF: &str = "collection_tree::perf";
}

/// A guard for timing one operation.
///
/// Enters an `info` span on the [`targets::PERF`] target that stays active
/// until the guard is dropped, so subscribers that record span timings can
/// report how long the operation took.
///
/// ```
/// use collection_tree_core::logging::{span_names, PerfSpan};
///
/// {
///     let _span = PerfSpan::new(span_names::BUILD);
///     // ... timed work ...
/// }
/// ```
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_crate_prefixes() {
        assert!(targets::SIGNAL.starts_with("collection_tree_core::"));
        for target in [targets::HIERARCHY, targets::MODEL, targets::PERF] {
            assert!(target.starts_with("collection_tree::"));
        }
    }

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new(span_names::REBUILD);
    }
}
