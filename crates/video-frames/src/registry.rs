//! Button registry
//!
//! Maps each live [`ButtonId`] to what is known about its button: where it
//! sits in the transcript, which website its link belongs to, and the player
//! currently shown below it, if any. The registry owns every entry; an entry's
//! mark is released exactly once, either when the button is removed or when
//! the whole registry is released.

use crate::button::{ButtonId, ToggleButton, ToggleState};
use crate::view::EmbeddedView;
use crate::{Result, VideoFramesError};
use std::collections::HashMap;
use std::sync::Arc;
use transcript::{ChildId, MarkId, Transcript};
use video_embed::{GeneratedPage, WebsitePattern};

/// What is known about a button's link
///
/// The anchor is a mark bound to the button's child object in the transcript
/// owned by the [`VideoFrames`](crate::VideoFrames) context holding this
/// entry, so it resolves to the button's position whatever is edited around
/// it.
#[derive(Debug, Clone)]
pub struct ButtonInfo {
    anchor: MarkId,
    website: Arc<WebsitePattern>,
    matched_text: String,
    is_end_of_text: bool,
}

impl ButtonInfo {
    /// Mark bound to the button
    pub fn anchor(&self) -> MarkId {
        self.anchor
    }

    /// Website the link matched
    pub fn website(&self) -> &Arc<WebsitePattern> {
        &self.website
    }

    /// The matched link
    pub fn matched_text(&self) -> &str {
        &self.matched_text
    }

    /// Whether the button was the last content when it was inserted
    pub fn is_end_of_text(&self) -> bool {
        self.is_end_of_text
    }
}

/// A player shown below a button
pub struct ExpandedFrame {
    pub(crate) view: Box<dyn EmbeddedView>,
    pub(crate) child: ChildId,
    pub(crate) page: GeneratedPage,
    pub(crate) span: usize,
}

impl ExpandedFrame {
    /// Child object holding the view
    pub fn child(&self) -> ChildId {
        self.child
    }

    /// Page the view was asked to load
    pub fn page(&self) -> &GeneratedPage {
        &self.page
    }

    /// Number of transcript positions inserted for the player
    pub fn span(&self) -> usize {
        self.span
    }
}

impl std::fmt::Debug for ExpandedFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandedFrame")
            .field("child", &self.child)
            .field("page", &self.page)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

/// Registry entry
#[derive(Debug)]
pub struct ButtonEntry {
    /// Button widget
    pub button: ToggleButton,
    /// Link metadata
    pub info: ButtonInfo,
    /// Player shown below the button while expanded
    pub frame: Option<ExpandedFrame>,
}

impl ButtonEntry {
    /// Current toggle state
    pub fn state(&self) -> ToggleState {
        self.button.state()
    }
}

/// Registry of live buttons
#[derive(Debug, Default)]
pub struct ButtonRegistry {
    entries: HashMap<ButtonId, ButtonEntry>,
}

impl ButtonRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create link metadata for a button already placed in `document`
    ///
    /// Allocates a mark bound to the child object `button` and copies the
    /// first `matched_length` bytes of `matched_text`. The entry is not
    /// registered.
    pub fn create_entry<D: Transcript + ?Sized>(
        document: &mut D,
        button: ChildId,
        website: Arc<WebsitePattern>,
        matched_text: &str,
        matched_length: usize,
    ) -> Result<ButtonInfo> {
        let matched_text = matched_text
            .get(..matched_length)
            .ok_or(VideoFramesError::InvalidMatchLength {
                length: matched_length,
                text_len: matched_text.len(),
            })?
            .to_string();

        let position = document.child_position(button)?;
        let is_end_of_text = document.is_end(position + 1);
        let anchor = document.create_child_mark(button)?;

        Ok(ButtonInfo { anchor, website, matched_text, is_end_of_text })
    }

    /// Register a button with its metadata
    ///
    /// A rejected entry's mark is released.
    pub fn register<D: Transcript + ?Sized>(
        &mut self,
        document: &mut D,
        button: ToggleButton,
        info: ButtonInfo,
    ) -> Result<()> {
        let id = button.id();
        if self.entries.contains_key(&id) {
            if let Err(e) = document.delete_mark(info.anchor) {
                tracing::warn!(button = %id, "Failed to release mark: {}", e);
            }
            return Err(VideoFramesError::DuplicateButton(id));
        }
        self.entries.insert(id, ButtonEntry { button, info, frame: None });
        Ok(())
    }

    /// Look up a button
    pub fn lookup(&self, id: ButtonId) -> Result<&ButtonEntry> {
        self.entries.get(&id).ok_or_else(|| Self::missing(id))
    }

    /// Look up a button for modification
    pub fn lookup_mut(&mut self, id: ButtonId) -> Result<&mut ButtonEntry> {
        self.entries.get_mut(&id).ok_or_else(|| Self::missing(id))
    }

    /// Unregister a button and release its mark
    ///
    /// The entry is handed back so the caller can release the widget. If the
    /// mark cannot be released the entry stays registered.
    pub fn remove_entry<D: Transcript + ?Sized>(
        &mut self,
        document: &mut D,
        id: ButtonId,
    ) -> Result<ButtonEntry> {
        let anchor = self.lookup(id)?.info.anchor;
        document.delete_mark(anchor)?;
        self.entries.remove(&id).ok_or_else(|| Self::missing(id))
    }

    /// Release every entry: players are destroyed and marks released
    ///
    /// Returns how many entries were released. Failures to release a mark are
    /// logged and do not stop the teardown.
    pub fn release_all<D: Transcript + ?Sized>(&mut self, document: &mut D) -> usize {
        let count = self.entries.len();
        for (id, mut entry) in self.entries.drain() {
            if let Some(mut frame) = entry.frame.take() {
                frame.view.destroy();
            }
            if let Err(e) = document.delete_mark(entry.info.anchor) {
                tracing::warn!(button = %id, "Failed to release mark: {}", e);
            }
        }
        count
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: ButtonId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Handles of all live buttons, in ascending order
    pub fn handles(&self) -> Vec<ButtonId> {
        let mut handles: Vec<_> = self.entries.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Number of live buttons
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no buttons are live
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn missing(id: ButtonId) -> VideoFramesError {
        tracing::error!(button = %id, "No registry entry for button");
        VideoFramesError::UnknownButton(id)
    }
}
