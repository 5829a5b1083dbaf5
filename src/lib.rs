//! Inline Video
//!
//! Embeds video players inline in instant-messaging conversations. A toggle
//! button is placed next to each recognised video link; toggling it shows or
//! hides a player right below the link.
//!
//! This crate re-exports the workspace crates:
//!
//! - [`transcript`] - Conversation transcript model
//! - [`video_embed`] - Website patterns and player page generation
//! - [`video_frames`] - Button registry and expand/collapse handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use transcript;
pub use video_embed;
pub use video_frames;

pub use transcript::{MemoryTranscript, Transcript};
pub use video_embed::{GeneratedPage, PageConfig, PageGenerator, WebsiteCatalog, WebsitePattern};
pub use video_frames::{
    ButtonId, EmbeddedView, NavigationDecision, ToggleState, UriOpener, VideoFrames,
    VideoFramesConfig, VideoFramesError, WebViewFactory,
};
