use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ICON_ZONE_PX: u32 = 25;
pub const DEFAULT_STORAGE_KEY: &str = "book-sidebar.expanded";

/// Tunables for the sidebar toggle behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// Width of the arrow icon at the left of a chapter link. Clicks closer
    /// than this to the link's left edge toggle instead of navigating.
    pub icon_zone_px: u32,
    pub storage_key: String,
    pub markers: Markers,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self {
            icon_zone_px: DEFAULT_ICON_ZONE_PX,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            markers: Markers::default(),
        }
    }
}

impl ToggleConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&yaml)
            .with_context(|| format!("parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Class and attribute names of the rendered sidebar markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub root: String,
    pub chapter: String,
    pub expandable: String,
    pub expanded: String,
    pub active: String,
    pub articles: String,
    pub title: String,
    pub bound_attribute: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            root: "book-summary".to_owned(),
            chapter: "chapter".to_owned(),
            expandable: "expandable".to_owned(),
            expanded: "expanded".to_owned(),
            active: "active".to_owned(),
            articles: "articles".to_owned(),
            title: "chapter-title".to_owned(),
            bound_attribute: "data-sidebar-toggle".to_owned(),
        }
    }
}
