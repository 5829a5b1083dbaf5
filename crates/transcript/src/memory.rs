//! In-memory transcript
//!
//! A framework-agnostic implementation of [`Transcript`] that keeps the
//! content stream in a `Vec`. Offset marks are shifted on every edit; child
//! marks are resolved through their child.

use crate::{ChildId, MarkGravity, MarkId, Result, Transcript, TranscriptError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

/// Character used when rendering an embedded child as text
pub const OBJECT_REPLACEMENT_CHAR: char = '\u{FFFC}';

/// One content position of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Segment {
    /// A single character
    Char(char),
    /// An embedded child object
    Child(ChildId),
}

#[derive(Debug, Clone, Copy)]
enum Mark {
    Offset { position: usize, gravity: MarkGravity },
    Child(ChildId),
}

/// In-memory transcript
///
/// # Example
///
/// ```
/// use transcript::{ChildId, MarkGravity, MemoryTranscript, Transcript};
///
/// let mut doc = MemoryTranscript::with_text("watch this");
/// let mark = doc.create_mark(5, MarkGravity::Left).unwrap();
/// doc.insert_text(0, ">> ").unwrap();
/// assert_eq!(doc.mark_position(mark).unwrap(), 8);
///
/// doc.insert_child(8, ChildId(1)).unwrap();
/// assert_eq!(doc.text(), ">> watch\u{FFFC} this");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTranscript {
    segments: Vec<Segment>,
    marks: HashMap<MarkId, Mark>,
    next_mark: u64,
}

impl MemoryTranscript {
    /// Creates an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcript holding `text`
    pub fn with_text(text: &str) -> Self {
        Self { segments: text.chars().map(Segment::Char).collect(), ..Default::default() }
    }

    /// Renders the content, embedded children as U+FFFC
    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Char(c) => *c,
                Segment::Child(_) => OBJECT_REPLACEMENT_CHAR,
            })
            .collect()
    }

    /// Returns the raw content stream
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the embedded children in document order
    pub fn children(&self) -> Vec<ChildId> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Child(id) => Some(*id),
                Segment::Char(_) => None,
            })
            .collect()
    }

    /// Number of live marks
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Appends text at the end of the content
    pub fn append_text(&mut self, text: &str) {
        let end = self.segments.len();
        self.splice(end, text.chars().map(Segment::Char).collect());
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position > self.segments.len() {
            return Err(TranscriptError::OutOfBounds { position, len: self.segments.len() });
        }
        Ok(())
    }

    fn splice(&mut self, position: usize, items: Vec<Segment>) {
        let count = items.len();
        if count == 0 {
            return;
        }

        for mark in self.marks.values_mut() {
            if let Mark::Offset { position: at, gravity } = mark {
                if *at > position || (*at == position && *gravity == MarkGravity::Right) {
                    *at += count;
                }
            }
        }

        self.segments.splice(position..position, items);
    }
}

impl Transcript for MemoryTranscript {
    fn len(&self) -> usize {
        self.segments.len()
    }

    fn create_mark(&mut self, position: usize, gravity: MarkGravity) -> Result<MarkId> {
        self.check_position(position)?;
        let id = MarkId(self.next_mark);
        self.next_mark += 1;
        self.marks.insert(id, Mark::Offset { position, gravity });
        Ok(id)
    }

    fn create_child_mark(&mut self, child: ChildId) -> Result<MarkId> {
        self.child_position(child)?;
        let id = MarkId(self.next_mark);
        self.next_mark += 1;
        self.marks.insert(id, Mark::Child(child));
        Ok(id)
    }

    fn delete_mark(&mut self, mark: MarkId) -> Result<()> {
        self.marks.remove(&mark).map(|_| ()).ok_or(TranscriptError::UnknownMark(mark))
    }

    fn mark_position(&self, mark: MarkId) -> Result<usize> {
        match self.marks.get(&mark) {
            Some(Mark::Offset { position, .. }) => Ok(*position),
            Some(Mark::Child(child)) => self.child_position(*child),
            None => Err(TranscriptError::UnknownMark(mark)),
        }
    }

    fn child_position(&self, child: ChildId) -> Result<usize> {
        self.segments
            .iter()
            .position(|segment| *segment == Segment::Child(child))
            .ok_or(TranscriptError::UnknownChild(child))
    }

    fn insert_text(&mut self, position: usize, text: &str) -> Result<()> {
        self.check_position(position)?;
        self.splice(position, text.chars().map(Segment::Char).collect());
        Ok(())
    }

    fn insert_child(&mut self, position: usize, child: ChildId) -> Result<()> {
        self.check_position(position)?;
        self.splice(position, vec![Segment::Child(child)]);
        Ok(())
    }

    fn delete_range(&mut self, range: Range<usize>) -> Result<()> {
        let len = self.segments.len();
        if range.start > range.end || range.end > len {
            return Err(TranscriptError::InvalidRange { start: range.start, end: range.end, len });
        }

        let removed = range.end - range.start;
        for mark in self.marks.values_mut() {
            if let Mark::Offset { position, .. } = mark {
                if *position >= range.end {
                    *position -= removed;
                } else if *position > range.start {
                    *position = range.start;
                }
            }
        }

        self.segments.drain(range);
        Ok(())
    }
}
