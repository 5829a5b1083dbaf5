//! Conversation transcript model for Inline Video
//!
//! This crate describes the rich-text document that a conversation is rendered
//! into: a stream of characters and embedded child objects, plus marks that
//! follow the content as it is edited. Hosts backed by a native text widget
//! implement [`Transcript`] for it; [`MemoryTranscript`] is a complete
//! in-memory implementation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod memory;

pub use memory::{MemoryTranscript, Segment, OBJECT_REPLACEMENT_CHAR};

use serde::{Deserialize, Serialize};
use std::ops::Range;
use thiserror::Error;

/// Transcript errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranscriptError {
    /// Position lies past the end of the content
    #[error("Position {position} out of bounds (length {len})")]
    OutOfBounds {
        /// Requested position
        position: usize,
        /// Current content length
        len: usize,
    },

    /// Range is reversed or extends past the end of the content
    #[error("Invalid range {start}..{end} (length {len})")]
    InvalidRange {
        /// Range start
        start: usize,
        /// Range end
        end: usize,
        /// Current content length
        len: usize,
    },

    /// Mark was never created or has already been deleted
    #[error("Unknown mark: {0}")]
    UnknownMark(MarkId),

    /// Embedded child is not in the content
    #[error("Unknown child: {0}")]
    UnknownChild(ChildId),
}

/// Result type for transcript operations
pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Identifier of a position mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkId(pub u64);

impl std::fmt::Display for MarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mark#{}", self.0)
    }
}

/// Identifier of an embedded child object (button, web view, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChildId(pub u64);

impl std::fmt::Display for ChildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "child#{}", self.0)
    }
}

/// Which way a mark moves when content is inserted exactly at its offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkGravity {
    /// Stay before the inserted content
    #[default]
    Left,
    /// Move after the inserted content
    Right,
}

/// A mutable rich-text document with marks and embedded children
///
/// Positions count content items: every `char` occupies one position and
/// every embedded child occupies one position.
pub trait Transcript {
    /// Number of content positions
    fn len(&self) -> usize;

    /// Whether the transcript has no content
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `position` is the end of the content
    fn is_end(&self, position: usize) -> bool {
        position >= self.len()
    }

    /// Create a mark at `position` that follows later edits
    fn create_mark(&mut self, position: usize, gravity: MarkGravity) -> Result<MarkId>;

    /// Create a mark bound to an embedded child
    ///
    /// The mark sits wherever the child sits, so content inserted right
    /// before the child carries the mark along with it.
    fn create_child_mark(&mut self, child: ChildId) -> Result<MarkId>;

    /// Release a mark
    fn delete_mark(&mut self, mark: MarkId) -> Result<()>;

    /// Current position of a mark
    fn mark_position(&self, mark: MarkId) -> Result<usize>;

    /// Current position of an embedded child
    fn child_position(&self, child: ChildId) -> Result<usize>;

    /// Insert text at `position`
    fn insert_text(&mut self, position: usize, text: &str) -> Result<()>;

    /// Insert an embedded child object at `position`
    fn insert_child(&mut self, position: usize, child: ChildId) -> Result<()>;

    /// Delete the content in `range`
    fn delete_range(&mut self, range: Range<usize>) -> Result<()>;
}
