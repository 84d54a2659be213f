use serde::{Deserialize, Serialize};

/// Table of contents the sidebar is rendered from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidebarToc {
    pub title: String,
    pub chapters: Vec<TocEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TocEntry {
    pub title: String,
    /// Page path. Entries without one render as a bare title label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Rendered expanded before any persisted state is applied.
    #[serde(default)]
    pub expanded: bool,
    #[serde(default)]
    pub chapters: Vec<TocEntry>,
}
