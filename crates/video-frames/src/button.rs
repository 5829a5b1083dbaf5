//! Toggle button widget state
//!
//! The button is placed inline next to a video link. Its own data carries the
//! [`ButtonId`] that keys the registry, so events coming back from the host
//! toolkit can be routed without relying on widget identity.

use crate::config::VideoFramesConfig;
use serde::{Deserialize, Serialize};
use transcript::ChildId;

/// Stable handle of an inline video button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ButtonId(pub u64);

impl std::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "button#{}", self.0)
    }
}

/// Toggle state of an inline video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleState {
    /// Only the button is shown
    #[default]
    Collapsed,
    /// The player is shown below the button
    Expanded,
}

impl ToggleState {
    /// The state a toggle leads to
    pub fn toggled(self) -> Self {
        match self {
            ToggleState::Collapsed => ToggleState::Expanded,
            ToggleState::Expanded => ToggleState::Collapsed,
        }
    }
}

/// Icon shown on the button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleIcon {
    /// Icon name (from the host's icon theme)
    pub name: String,
    /// Icon size in pixels
    pub pixel_size: u32,
}

impl ToggleIcon {
    /// Create a new icon
    pub fn new(name: impl Into<String>, pixel_size: u32) -> Self {
        Self { name: name.into(), pixel_size }
    }
}

/// Inline toggle button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleButton {
    id: ButtonId,
    child: ChildId,
    name: String,
    icon: ToggleIcon,
    active: bool,
}

impl ToggleButton {
    /// Create an inactive button showing the collapsed icon
    pub fn new(id: ButtonId, child: ChildId, config: &VideoFramesConfig) -> Self {
        Self {
            id,
            child,
            name: config.button_name.clone(),
            icon: ToggleIcon::new(&config.collapsed_icon, config.icon_size),
            active: false,
        }
    }

    /// Registry handle
    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Child object occupying the button's transcript position
    pub fn child(&self) -> ChildId {
        self.child
    }

    /// Widget name used for styling
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current icon
    pub fn icon(&self) -> &ToggleIcon {
        &self.icon
    }

    /// Whether the button is pressed in
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle state implied by the button
    pub fn state(&self) -> ToggleState {
        if self.active {
            ToggleState::Expanded
        } else {
            ToggleState::Collapsed
        }
    }

    pub(crate) fn show_expanded(&mut self, config: &VideoFramesConfig) {
        self.active = true;
        self.icon = ToggleIcon::new(&config.expanded_icon, config.icon_size);
    }

    pub(crate) fn show_collapsed(&mut self, config: &VideoFramesConfig) {
        self.active = false;
        self.icon = ToggleIcon::new(&config.collapsed_icon, config.icon_size);
    }
}
