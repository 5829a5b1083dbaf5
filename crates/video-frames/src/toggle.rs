//! Expand/collapse state machine
//!
//! Expanding inserts, right after the button, a newline, the player's child
//! object and (unless the button ends the transcript) a second newline.
//! Collapsing deletes exactly the span that expansion inserted, so the pair
//! leaves the transcript as it was.

use crate::button::ToggleState;
use crate::config::{EndOfTextPolicy, VideoFramesConfig};
use crate::registry::{ButtonEntry, ExpandedFrame};
use crate::view::{forward_new_windows, EmbeddedView, UriOpener, WebViewFactory};
use crate::{Result, VideoFramesError};
use std::sync::Arc;
use transcript::{ChildId, Transcript};
use video_embed::PageGenerator;

/// Host services used while expanding
pub struct FrameServices {
    /// Writes player pages
    pub generator: PageGenerator,
    /// Creates embedded views
    pub views: Box<dyn WebViewFactory>,
    /// Opens URIs the players try to open in a new window
    pub opener: Arc<dyn UriOpener>,
}

impl FrameServices {
    /// Bundle the host services
    pub fn new(
        generator: PageGenerator,
        views: Box<dyn WebViewFactory>,
        opener: Arc<dyn UriOpener>,
    ) -> Self {
        Self { generator, views, opener }
    }
}

/// State machine for one button
pub struct VideoToggle<'a, D: Transcript + ?Sized> {
    entry: &'a mut ButtonEntry,
    document: &'a mut D,
    config: &'a VideoFramesConfig,
}

impl<'a, D: Transcript + ?Sized> VideoToggle<'a, D> {
    /// Drive `entry`, whose button lives in `document`
    pub fn new(entry: &'a mut ButtonEntry, document: &'a mut D, config: &'a VideoFramesConfig) -> Self {
        Self { entry, document, config }
    }

    /// Current state
    pub fn state(&self) -> ToggleState {
        self.entry.state()
    }

    /// Collapsed -> expanded
    ///
    /// The player is inserted as child object `child`. If the page cannot be
    /// generated, the transcript and the button are left untouched.
    pub fn activate(&mut self, services: &FrameServices, child: ChildId) -> Result<()> {
        let id = self.entry.button.id();
        if self.entry.frame.is_some() {
            return Err(VideoFramesError::AlreadyExpanded(id));
        }

        let position = self.document.mark_position(self.entry.info.anchor())? + 1;
        let page = services
            .generator
            .generate_page(self.entry.info.website(), self.entry.info.matched_text())?;

        let mut view = services.views.create_view(child);
        view.load_uri(&page.uri);
        view.connect_new_window(forward_new_windows(Arc::clone(&services.opener)));

        let at_end = match self.config.end_of_text {
            EndOfTextPolicy::Insertion => self.entry.info.is_end_of_text(),
            EndOfTextPolicy::Expansion => self.document.is_end(position),
        };
        let span = match self.insert_frame(position, child, at_end) {
            Ok(span) => span,
            Err(e) => {
                view.destroy();
                return Err(e);
            }
        };

        self.entry.button.show_expanded(self.config);
        tracing::debug!(button = %id, %child, span, uri = %page.uri, "Expanded video");
        self.entry.frame = Some(ExpandedFrame { view, child, page, span });
        Ok(())
    }

    /// Expanded -> collapsed
    pub fn deactivate(&mut self) -> Result<()> {
        let id = self.entry.button.id();
        let mut frame = self.entry.frame.take().ok_or(VideoFramesError::NotExpanded(id))?;

        let position = match self.document.mark_position(self.entry.info.anchor()) {
            Ok(position) => position + 1,
            Err(e) => {
                self.entry.frame = Some(frame);
                return Err(e.into());
            }
        };
        if let Err(e) = self.document.delete_range(position..position + frame.span) {
            self.entry.frame = Some(frame);
            return Err(e.into());
        }

        frame.view.destroy();
        self.entry.button.show_collapsed(self.config);
        tracing::debug!(button = %id, child = %frame.child, span = frame.span, "Collapsed video");

        if self.config.remove_pages_on_collapse {
            if let Err(e) = frame.page.remove() {
                tracing::warn!(path = %frame.page.path.display(), "Failed to remove page: {}", e);
            }
        }
        Ok(())
    }

    /// Flip the state
    pub fn toggle(&mut self, services: &FrameServices, child: ChildId) -> Result<ToggleState> {
        match self.state() {
            ToggleState::Collapsed => self.activate(services, child)?,
            ToggleState::Expanded => self.deactivate()?,
        }
        Ok(self.state())
    }

    /// Insert the player's span, or nothing at all
    fn insert_frame(&mut self, position: usize, child: ChildId, at_end: bool) -> Result<usize> {
        let span = if at_end { 2 } else { 3 };
        for offset in 0..span {
            let inserted = if offset == 1 {
                self.document.insert_child(position + offset, child)
            } else {
                self.document.insert_text(position + offset, "\n")
            };
            if let Err(e) = inserted {
                if let Err(undo) = self.document.delete_range(position..position + offset) {
                    tracing::warn!(%child, "Failed to roll back player: {}", undo);
                }
                return Err(e.into());
            }
        }
        Ok(span)
    }
}
