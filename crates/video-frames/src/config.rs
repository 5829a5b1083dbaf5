//! Inline video configuration

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use video_embed::PageConfig;

/// When to decide whether a button sits at the end of the transcript
///
/// A player inserted below a button that is not the last thing in the
/// transcript gets a trailing newline separating it from the text after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfTextPolicy {
    /// Use the flag recorded when the button was inserted
    Insertion,
    /// Check the transcript again each time the player is expanded
    #[default]
    Expansion,
}

/// Inline video configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VideoFramesConfig {
    /// Widget name given to toggle buttons
    pub button_name: String,
    /// Icon shown while collapsed
    pub collapsed_icon: String,
    /// Icon shown while expanded
    pub expanded_icon: String,
    /// Icon size in pixels
    pub icon_size: u32,
    /// End-of-text policy for the trailing newline
    pub end_of_text: EndOfTextPolicy,
    /// Delete a player's page file when it is collapsed
    pub remove_pages_on_collapse: bool,
    /// Page generator settings
    pub page: PageConfig,
}

impl Default for VideoFramesConfig {
    fn default() -> Self {
        Self {
            button_name: "video-toggle-button".to_string(),
            collapsed_icon: "gtk-go-forward-ltr".to_string(),
            expanded_icon: "gtk-go-down".to_string(),
            icon_size: 16,
            end_of_text: EndOfTextPolicy::default(),
            remove_pages_on_collapse: false,
            page: PageConfig::default(),
        }
    }
}

impl VideoFramesConfig {
    /// Parse a configuration from JSON, missing fields taking defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Set the collapsed and expanded icon names
    pub fn icons(mut self, collapsed: impl Into<String>, expanded: impl Into<String>) -> Self {
        self.collapsed_icon = collapsed.into();
        self.expanded_icon = expanded.into();
        self
    }

    /// Set the icon size in pixels
    pub fn icon_size(mut self, pixels: u32) -> Self {
        self.icon_size = pixels;
        self
    }

    /// Set the end-of-text policy
    pub fn end_of_text(mut self, policy: EndOfTextPolicy) -> Self {
        self.end_of_text = policy;
        self
    }

    /// Enable or disable page removal on collapse
    pub fn remove_pages_on_collapse(mut self, enabled: bool) -> Self {
        self.remove_pages_on_collapse = enabled;
        self
    }

    /// Set the page generator settings
    pub fn page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }
}
