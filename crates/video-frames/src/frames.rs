//! Inline video context
//!
//! [`VideoFrames`] is created once per conversation transcript and owns
//! everything the inline players need: the transcript, the button registry,
//! the host services and the configuration. Creating it replaces a global
//! init step; [`VideoFrames::destroy`] releases everything and hands the
//! transcript back.

use crate::button::{ButtonId, ToggleButton, ToggleState};
use crate::config::VideoFramesConfig;
use crate::registry::{ButtonEntry, ButtonInfo, ButtonRegistry};
use crate::toggle::{FrameServices, VideoToggle};
use crate::view::{UriOpener, WebViewFactory};
use crate::Result;
use std::sync::Arc;
use transcript::{ChildId, Transcript};
use video_embed::{GeneratedPage, PageGenerator, WebsitePattern};

/// Inline video players for one transcript
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use transcript::MemoryTranscript;
/// use video_embed::WebsiteCatalog;
/// use video_frames::test_utils::{RecordingOpener, RecordingViews};
/// use video_frames::{ToggleState, VideoFrames, VideoFramesConfig};
///
/// let catalog = WebsiteCatalog::with_defaults().unwrap();
/// let text = "check https://youtu.be/dQw4w9WgXcQ";
/// let found = catalog.find_match(text).unwrap();
///
/// let mut frames = VideoFrames::new(
///     MemoryTranscript::with_text(text),
///     VideoFramesConfig::default(),
///     Box::new(RecordingViews::new()),
///     Arc::new(RecordingOpener::new()),
/// );
/// let link = found.as_str(text);
/// let button = frames
///     .insert_button(text.chars().count(), found.website.clone(), link, link.len())
///     .unwrap();
/// assert_eq!(frames.state(button).unwrap(), ToggleState::Collapsed);
///
/// let doc = frames.destroy();
/// assert_eq!(doc.children().len(), 1);
/// ```
pub struct VideoFrames<D: Transcript> {
    document: D,
    registry: ButtonRegistry,
    services: FrameServices,
    config: VideoFramesConfig,
    next_id: u64,
}

impl<D: Transcript> VideoFrames<D> {
    /// Create the context for `document`
    pub fn new(
        document: D,
        config: VideoFramesConfig,
        views: Box<dyn WebViewFactory>,
        opener: Arc<dyn UriOpener>,
    ) -> Self {
        let generator = PageGenerator::new(config.page.clone());
        Self {
            document,
            registry: ButtonRegistry::new(),
            services: FrameServices::new(generator, views, opener),
            config,
            next_id: 1,
        }
    }

    /// The transcript
    pub fn document(&self) -> &D {
        &self.document
    }

    /// The transcript, for edits unrelated to the players
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Configuration in use
    pub fn config(&self) -> &VideoFramesConfig {
        &self.config
    }

    fn next_child(&mut self) -> ChildId {
        let id = self.next_id;
        self.next_id += 1;
        ChildId(id)
    }

    /// Place a collapsed toggle button at `position`
    ///
    /// `matched_text[..matched_length]` is the link `website` matched. The
    /// button takes one transcript position; the surrounding text is not
    /// changed. On failure the transcript is left as it was.
    pub fn insert_button(
        &mut self,
        position: usize,
        website: Arc<WebsitePattern>,
        matched_text: &str,
        matched_length: usize,
    ) -> Result<ButtonId> {
        let child = self.next_child();
        let id = ButtonId(child.0);
        self.document.insert_child(position, child)?;

        let registered = ButtonRegistry::create_entry(
            &mut self.document,
            child,
            website,
            matched_text,
            matched_length,
        )
        .and_then(|info| {
            let site = info.website().id().to_string();
            let button = ToggleButton::new(id, child, &self.config);
            self.registry.register(&mut self.document, button, info).map(|()| site)
        });

        match registered {
            Ok(site) => {
                tracing::debug!(button = %id, position, site = %site, "Inserted video button");
                Ok(id)
            }
            Err(e) => {
                if let Err(undo) = self.document.delete_range(position..position + 1) {
                    tracing::warn!(button = %id, "Failed to roll back button: {}", undo);
                }
                Err(e)
            }
        }
    }

    /// Remove a button, collapsing its player first if it is expanded
    pub fn remove_button(&mut self, id: ButtonId) -> Result<()> {
        if self.state(id)? == ToggleState::Expanded {
            self.collapse(id)?;
        }

        let anchor = self.registry.lookup(id)?.info.anchor();
        let position = self.document.mark_position(anchor)?;
        let entry = self.registry.remove_entry(&mut self.document, id)?;
        self.document.delete_range(position..position + 1)?;

        tracing::debug!(button = %id, child = %entry.button.child(), "Removed video button");
        drop(entry);
        Ok(())
    }

    /// Flip a button, as a click on it would
    pub fn toggle(&mut self, id: ButtonId) -> Result<ToggleState> {
        match self.state(id)? {
            ToggleState::Collapsed => self.expand(id)?,
            ToggleState::Expanded => self.collapse(id)?,
        }
        self.state(id)
    }

    /// Show the player below a button
    pub fn expand(&mut self, id: ButtonId) -> Result<()> {
        self.registry.lookup(id)?;
        let child = self.next_child();
        let entry = self.registry.lookup_mut(id)?;
        VideoToggle::new(entry, &mut self.document, &self.config).activate(&self.services, child)
    }

    /// Remove the player below a button
    pub fn collapse(&mut self, id: ButtonId) -> Result<()> {
        let entry = self.registry.lookup_mut(id)?;
        VideoToggle::new(entry, &mut self.document, &self.config).deactivate()
    }

    /// Current state of a button
    pub fn state(&self, id: ButtonId) -> Result<ToggleState> {
        Ok(self.registry.lookup(id)?.state())
    }

    /// A button widget
    pub fn button(&self, id: ButtonId) -> Result<&ToggleButton> {
        Ok(&self.registry.lookup(id)?.button)
    }

    /// A button's link metadata
    pub fn info(&self, id: ButtonId) -> Result<&ButtonInfo> {
        Ok(&self.registry.lookup(id)?.info)
    }

    /// A button's registry entry
    pub fn entry(&self, id: ButtonId) -> Result<&ButtonEntry> {
        self.registry.lookup(id)
    }

    /// Handles of all live buttons, in ascending order
    pub fn handles(&self) -> Vec<ButtonId> {
        self.registry.handles()
    }

    /// Number of live buttons
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no buttons are live
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Write a player page for a link, without touching the transcript
    pub fn generate_page(&self, website: &WebsitePattern, url: &str) -> Result<GeneratedPage> {
        Ok(self.services.generator.generate_page(website, url)?)
    }

    /// Release every button and return the transcript
    ///
    /// Players are destroyed and marks released; the buttons and players
    /// themselves stay in the returned transcript's content.
    pub fn destroy(mut self) -> D {
        let released = self.registry.release_all(&mut self.document);
        tracing::debug!(released, "Destroyed video frames");
        self.document
    }
}
