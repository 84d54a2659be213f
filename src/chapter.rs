use crate::config::Markers;
use crate::dom::SidebarDom;

/// Prefix of identities derived from a bare title label.
pub const TITLE_IDENTITY_PREFIX: &str = "title:";

/// A chapter element as seen through the sidebar markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter<N> {
    pub node: N,
    pub identity: Option<String>,
    pub expandable: bool,
    pub expanded: bool,
    pub on_active_path: bool,
}

impl<N: Clone> Chapter<N> {
    pub fn read<D>(dom: &D, markers: &Markers, node: &N) -> Self
    where
        D: SidebarDom<Node = N>,
    {
        Self {
            node: node.clone(),
            identity: chapter_identity(dom, markers, node),
            expandable: dom.has_class(node, &markers.expandable),
            expanded: dom.has_class(node, &markers.expanded),
            on_active_path: is_on_active_path(dom, markers, node),
        }
    }
}

/// Stable identity of a chapter across page loads.
///
/// The chapter's own link destination when it has one, otherwise its
/// trimmed title label text behind [`TITLE_IDENTITY_PREFIX`].
pub fn chapter_identity<D: SidebarDom>(
    dom: &D,
    markers: &Markers,
    chapter: &D::Node,
) -> Option<String> {
    if let Some(link) = dom.first_child_link(chapter) {
        return dom
            .link_destination(&link)
            .filter(|destination| !destination.is_empty());
    }

    let title = dom.child_with_class(chapter, &markers.title)?;
    let text = dom.text_content(&title);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(format!("{TITLE_IDENTITY_PREFIX}{text}"))
}

/// Active itself, or holding an active descendant.
pub fn is_on_active_path<D: SidebarDom>(dom: &D, markers: &Markers, chapter: &D::Node) -> bool {
    dom.has_class(chapter, &markers.active)
        || !dom
            .descendants_by_class(chapter, &markers.active)
            .is_empty()
}

/// Every chapter under `root` marked expandable, in document order.
pub fn expandable_chapters<D: SidebarDom>(
    dom: &D,
    markers: &Markers,
    root: &D::Node,
) -> Vec<Chapter<D::Node>> {
    dom.descendants_by_class(root, &markers.chapter)
        .iter()
        .filter(|node| dom.has_class(node, &markers.expandable))
        .map(|node| Chapter::read(dom, markers, node))
        .collect()
}
