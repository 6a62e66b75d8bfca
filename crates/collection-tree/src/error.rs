//! Error types for hierarchy configuration and tree construction.

use std::fmt;

use crate::hierarchy::LevelId;

/// Result type alias for collection-tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`Hierarchy`](crate::Hierarchy) and tree building.
///
/// Every variant is a configuration or input error: none of them is transient,
/// and a failed operation leaves previously published state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required argument was missing or blank, or the hierarchy had no
    /// levels when a tree was built.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A level id was added that is already in use.
    #[error("Duplicate node id ('{id}').")]
    DuplicateIdentifier { id: LevelId },

    /// A key-extraction function returned no key value for a record.
    #[error(
        "Level {level_index} ('{level_id}') produced no key value for record {record_index}"
    )]
    NullKeyValue {
        record_index: usize,
        level_index: usize,
        level_id: LevelId,
    },

    /// A level index or id did not resolve to a level.
    #[error("Level {level} out of range for hierarchy of {len} levels")]
    OutOfRange { level: LevelRef, len: usize },
}

impl Error {
    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an out-of-range error for a level index.
    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange {
            level: LevelRef::Index(index),
            len,
        }
    }

    /// Create an out-of-range error for a level id that does not resolve.
    pub fn unknown_level(id: LevelId, len: usize) -> Self {
        Self::OutOfRange {
            level: LevelRef::Id(id),
            len,
        }
    }
}

/// How a caller referred to a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelRef {
    /// By 0-based position.
    Index(usize),
    /// By level id.
    Id(LevelId),
}

impl fmt::Display for LevelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {index}"),
            Self::Id(id) => write!(f, "id '{id}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identifier_message() {
        let err = Error::DuplicateIdentifier {
            id: LevelId::from("Author"),
        };
        assert_eq!(err.to_string(), "Duplicate node id ('Author').");
    }

    #[test]
    fn test_out_of_range_messages() {
        assert_eq!(
            Error::index_out_of_range(5, 3).to_string(),
            "Level index 5 out of range for hierarchy of 3 levels"
        );
        assert_eq!(
            Error::unknown_level(LevelId::from("Genre"), 3).to_string(),
            "Level id 'Genre' out of range for hierarchy of 3 levels"
        );
    }

    #[test]
    fn test_null_key_value_message() {
        let err = Error::NullKeyValue {
            record_index: 7,
            level_index: 1,
            level_id: LevelId::from("Author"),
        };
        assert_eq!(
            err.to_string(),
            "Level 1 ('Author') produced no key value for record 7"
        );
    }
}
