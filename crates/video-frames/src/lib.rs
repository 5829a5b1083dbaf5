//! Inline video players for conversation transcripts
//!
//! This crate places a toggle button next to each video link in a
//! conversation and, when the button is toggled, shows an embedded player
//! right below it. It keeps three things in step: the registry of live
//! buttons, their positions in the mutable transcript, and the embedded views
//! created and destroyed as players are expanded and collapsed.
//!
//! # Modules
//!
//! - [`frames`] - Per-transcript context ([`VideoFrames`])
//! - [`registry`] - Button registry and link metadata
//! - [`toggle`] - Expand/collapse state machine
//! - [`button`] - Toggle button widget state
//! - [`view`] - Host integration traits
//! - [`config`] - Configuration
//! - [`test_utils`] - Recording host services for tests

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod button;
pub mod config;
pub mod frames;
pub mod registry;
pub mod test_utils;
pub mod toggle;
pub mod view;

pub use button::{ButtonId, ToggleButton, ToggleIcon, ToggleState};
pub use config::{EndOfTextPolicy, VideoFramesConfig};
pub use frames::VideoFrames;
pub use registry::{ButtonEntry, ButtonInfo, ButtonRegistry, ExpandedFrame};
pub use toggle::{FrameServices, VideoToggle};
pub use view::{
    forward_new_windows, EmbeddedView, NavigationDecision, NewWindowHandler, UriOpener,
    WebViewFactory,
};

use thiserror::Error;

/// Inline video errors
#[derive(Debug, Error)]
pub enum VideoFramesError {
    /// Handle has no registry entry
    #[error("Unknown button: {0}")]
    UnknownButton(ButtonId),

    /// Handle is already registered
    #[error("Button already registered: {0}")]
    DuplicateButton(ButtonId),

    /// Matched length is not a prefix of the matched text
    #[error("Invalid match length {length} for text of {text_len} bytes")]
    InvalidMatchLength {
        /// Requested length
        length: usize,
        /// Length of the matched text
        text_len: usize,
    },

    /// Expand requested while expanded
    #[error("Button already expanded: {0}")]
    AlreadyExpanded(ButtonId),

    /// Collapse requested while collapsed
    #[error("Button not expanded: {0}")]
    NotExpanded(ButtonId),

    /// Transcript operation failed
    #[error("Transcript error: {0}")]
    Transcript(#[from] transcript::TranscriptError),

    /// Link matching or page generation failed
    #[error("Embed error: {0}")]
    Embed(#[from] video_embed::EmbedError),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for inline video operations
pub type Result<T> = std::result::Result<T, VideoFramesError>;
