//! Video embedding for Inline Video
//!
//! This crate knows which video sites can be embedded, how to pull a video ID
//! out of a link to one of them, and how to turn that ID into a standalone
//! player page that an embedded web view can load.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod page;
pub mod website;

pub use page::{render_page, GeneratedPage, PageConfig, PageGenerator, DEFAULT_PLACEHOLDER};
pub use website::{
    WebsiteCatalog, WebsiteDefinition, WebsiteMatch, WebsitePattern, VIDEO_ID_GROUP,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while matching links or generating pages
#[derive(Debug, Error)]
pub enum EmbedError {
    /// Website regex failed to compile
    #[error("Invalid regex for website {site}: {source}")]
    InvalidRegex {
        /// Website ID
        site: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },

    /// Website regex has no `video_id` group
    #[error("Regex for website {0} has no video_id capture group")]
    MissingCaptureGroup(String),

    /// Two websites share an ID
    #[error("Duplicate website ID: {0}")]
    DuplicateWebsite(String),

    /// Link does not match the website pattern
    #[error("URL does not match website {site}: {url}")]
    UrlMismatch {
        /// Website ID
        site: String,
        /// Offending link
        url: String,
    },

    /// Link matched but the `video_id` group did not participate
    #[error("No video ID captured for website {site}: {url}")]
    MissingVideoId {
        /// Website ID
        site: String,
        /// Offending link
        url: String,
    },

    /// Placeholder token is empty
    #[error("Placeholder token must not be empty")]
    EmptyPlaceholder,

    /// Page file could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Page path cannot be expressed as a file URI
    #[error("Cannot build a file URI for {0}")]
    InvalidPagePath(PathBuf),

    /// Website definitions could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for embed operations
pub type Result<T> = std::result::Result<T, EmbedError>;
