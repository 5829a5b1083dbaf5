//! Player page generation
//!
//! Embedded web views load a URI rather than a markup string, so each player
//! is written to its own temporary HTML file. Files are kept after the
//! generator returns; removing them is up to the caller (see
//! [`GeneratedPage::remove`]) or the operating system's temp directory policy.

use crate::website::WebsitePattern;
use crate::{EmbedError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Write;
use std::path::PathBuf;
use url::Url;

/// Placeholder token replaced by the video ID in player markup
pub const DEFAULT_PLACEHOLDER: &str = "%VIDEO_ID%";

/// Markup written before the player fragment
pub const PAGE_HEADER: &str = "<html>\n<head></head>\n<body>\n";

/// Markup written after the player fragment
pub const PAGE_FOOTER: &str = "\n</body>\n</html>";

/// Wrap a player fragment in a standalone HTML document
pub fn render_page(fragment: &str) -> String {
    let mut page = String::with_capacity(PAGE_HEADER.len() + fragment.len() + PAGE_FOOTER.len());
    page.push_str(PAGE_HEADER);
    page.push_str(fragment);
    page.push_str(PAGE_FOOTER);
    page
}

/// Page generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Token replaced by the video ID, never empty
    #[serde(deserialize_with = "non_empty_placeholder")]
    pub placeholder: String,
    /// Directory for page files (system temp directory if `None`)
    pub temp_dir: Option<PathBuf>,
    /// Page file name prefix
    pub file_prefix: String,
    /// Page file name suffix
    pub file_suffix: String,
}

fn non_empty_placeholder<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<String, D::Error> {
    let placeholder = String::deserialize(deserializer)?;
    if placeholder.is_empty() {
        return Err(serde::de::Error::custom("placeholder must not be empty"));
    }
    Ok(placeholder)
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            temp_dir: None,
            file_prefix: "video-frame-".to_string(),
            file_suffix: ".html".to_string(),
        }
    }
}

impl PageConfig {
    /// Set the placeholder token
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Write pages into `dir` instead of the system temp directory
    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Set the file name prefix
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Set the file name suffix
    pub fn file_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.file_suffix = suffix.into();
        self
    }
}

/// A player page written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Loadable `file://` URI
    pub uri: String,
    /// Path of the page file
    pub path: PathBuf,
    /// Website the page plays from
    pub site_id: String,
    /// Extracted video ID
    pub video_id: String,
}

impl GeneratedPage {
    /// Delete the page file
    pub fn remove(&self) -> Result<()> {
        std::fs::remove_file(&self.path)?;
        Ok(())
    }
}

/// Writes player pages for matched links
#[derive(Debug, Clone, Default)]
pub struct PageGenerator {
    config: PageConfig,
}

impl PageGenerator {
    /// Create a generator
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Generator configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Player markup for `video_id`, every placeholder substituted
    pub fn embed_fragment(&self, website: &WebsitePattern, video_id: &str) -> Result<String> {
        if self.config.placeholder.is_empty() {
            return Err(EmbedError::EmptyPlaceholder);
        }
        Ok(website.embed().replace(&self.config.placeholder, video_id))
    }

    /// Generate a player page for a link that `website` matched
    ///
    /// The link is matched again only to extract the video ID. Nothing is
    /// written if extraction fails.
    pub fn generate_page(&self, website: &WebsitePattern, url: &str) -> Result<GeneratedPage> {
        let video_id = website.extract_video_id(url)?;
        let page = render_page(&self.embed_fragment(website, &video_id)?);

        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.config.file_prefix).suffix(&self.config.file_suffix);
        let mut file = match &self.config.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(page.as_bytes())?;
        file.flush()?;

        let (_, path) = file.keep().map_err(|e| EmbedError::Io(e.error))?;
        let uri = Url::from_file_path(&path).map_err(|_| EmbedError::InvalidPagePath(path.clone()))?;

        tracing::info!(site = %website.id(), video_id = %video_id, "New video found");

        Ok(GeneratedPage {
            uri: uri.to_string(),
            path,
            site_id: website.id().to_string(),
            video_id,
        })
    }
}
