//! Website patterns
//!
//! A website pattern pairs a regex recognising links to one video site with
//! the player markup that site publishes for embedding. The regex must name
//! the video identifier with a `video_id` group; the markup refers to it with
//! a placeholder token that the page generator substitutes.

use crate::{EmbedError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;

/// Name of the capture group holding the video ID
pub const VIDEO_ID_GROUP: &str = "video_id";

/// Serializable description of a website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteDefinition {
    /// Website ID (e.g. "youtube")
    pub id: String,
    /// Link regex with a `video_id` group
    pub regex: String,
    /// Player markup with a placeholder token
    pub embed: String,
}

impl WebsiteDefinition {
    /// Create a new website definition
    pub fn new(id: impl Into<String>, regex: impl Into<String>, embed: impl Into<String>) -> Self {
        Self { id: id.into(), regex: regex.into(), embed: embed.into() }
    }
}

/// Compiled website pattern
#[derive(Debug, Clone)]
pub struct WebsitePattern {
    id: String,
    regex: Regex,
    embed: String,
}

impl WebsitePattern {
    /// Compile a website pattern
    ///
    /// Fails if the regex is invalid or lacks a `video_id` group.
    pub fn new(id: impl Into<String>, regex: &str, embed: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let regex = Regex::new(regex)
            .map_err(|source| EmbedError::InvalidRegex { site: id.clone(), source })?;

        if !regex.capture_names().flatten().any(|name| name == VIDEO_ID_GROUP) {
            return Err(EmbedError::MissingCaptureGroup(id));
        }

        Ok(Self { id, regex, embed: embed.into() })
    }

    /// Website ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Link regex
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Player markup template
    pub fn embed(&self) -> &str {
        &self.embed
    }

    /// Convert back into a serializable definition
    pub fn definition(&self) -> WebsiteDefinition {
        WebsiteDefinition::new(&self.id, self.regex.as_str(), &self.embed)
    }

    /// Byte range of the first link to this site in `text`
    pub fn find(&self, text: &str) -> Option<Range<usize>> {
        self.regex.find(text).map(|m| m.range())
    }

    /// Extract the video ID from a link to this site
    pub fn extract_video_id(&self, url: &str) -> Result<String> {
        let captures = self.regex.captures(url).ok_or_else(|| EmbedError::UrlMismatch {
            site: self.id.clone(),
            url: url.to_string(),
        })?;

        captures
            .name(VIDEO_ID_GROUP)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| EmbedError::MissingVideoId { site: self.id.clone(), url: url.to_string() })
    }
}

impl TryFrom<WebsiteDefinition> for WebsitePattern {
    type Error = EmbedError;

    fn try_from(definition: WebsiteDefinition) -> Result<Self> {
        WebsitePattern::new(definition.id, &definition.regex, definition.embed)
    }
}

/// A link found in message text
#[derive(Debug, Clone)]
pub struct WebsiteMatch {
    /// Website the link belongs to
    pub website: Arc<WebsitePattern>,
    /// Byte range of the link within the scanned text
    pub range: Range<usize>,
}

impl WebsiteMatch {
    /// The matched link text
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.range.clone()]
    }
}

/// Known websites
///
/// Patterns are shared via `Arc` so that button entries can keep a reference
/// to the website that matched for as long as they live.
#[derive(Debug, Clone, Default)]
pub struct WebsiteCatalog {
    websites: Vec<Arc<WebsitePattern>>,
}

impl WebsiteCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in websites
    pub fn with_defaults() -> Result<Self> {
        let mut catalog = Self::new();
        for definition in Self::default_definitions() {
            catalog.add(definition.try_into()?)?;
        }
        Ok(catalog)
    }

    /// Built-in website definitions
    pub fn default_definitions() -> Vec<WebsiteDefinition> {
        vec![
            WebsiteDefinition::new(
                "youtube",
                r"(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/watch\?(?:[^\s&#]*&)*v=|youtu\.be/)(?P<video_id>[A-Za-z0-9_-]{11})",
                r#"<iframe width="420" height="315" src="https://www.youtube.com/embed/%VIDEO_ID%" frameborder="0" allowfullscreen></iframe>"#,
            ),
            WebsiteDefinition::new(
                "dailymotion",
                r"(?:https?://)?(?:www\.)?(?:dailymotion\.com/video/|dai\.ly/)(?P<video_id>[A-Za-z0-9]+)",
                r#"<iframe frameborder="0" width="480" height="270" src="https://www.dailymotion.com/embed/video/%VIDEO_ID%" allowfullscreen></iframe>"#,
            ),
            WebsiteDefinition::new(
                "vimeo",
                r"(?:https?://)?(?:www\.)?vimeo\.com/(?P<video_id>[0-9]+)",
                r#"<iframe src="https://player.vimeo.com/video/%VIDEO_ID%" width="500" height="281" frameborder="0" allowfullscreen></iframe>"#,
            ),
        ]
    }

    /// Load websites from a JSON array of definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<WebsiteDefinition> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.add(definition.try_into()?)?;
        }
        Ok(catalog)
    }

    /// Add a website, rejecting duplicate IDs
    pub fn add(&mut self, website: WebsitePattern) -> Result<Arc<WebsitePattern>> {
        if self.get(website.id()).is_some() {
            return Err(EmbedError::DuplicateWebsite(website.id().to_string()));
        }
        let website = Arc::new(website);
        self.websites.push(Arc::clone(&website));
        Ok(website)
    }

    /// Look up a website by ID
    pub fn get(&self, id: &str) -> Option<Arc<WebsitePattern>> {
        self.websites.iter().find(|w| w.id() == id).cloned()
    }

    /// Iterate over all websites
    pub fn iter(&self) -> impl Iterator<Item = &Arc<WebsitePattern>> {
        self.websites.iter()
    }

    /// Number of websites
    pub fn len(&self) -> usize {
        self.websites.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.websites.is_empty()
    }

    /// Earliest video link in `text` across all websites
    pub fn find_match(&self, text: &str) -> Option<WebsiteMatch> {
        self.websites
            .iter()
            .filter_map(|website| {
                website.find(text).map(|range| WebsiteMatch { website: Arc::clone(website), range })
            })
            .min_by_key(|m| m.range.start)
    }
}
