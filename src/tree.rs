use std::collections::BTreeMap;

use crate::chapter::chapter_identity;
use crate::config::Markers;
use crate::dom::{ClickEvent, SidebarDom};
use crate::formats::{SidebarToc, TocEntry};

const INDENT_PX: f64 = 16.0;
const PADDING_PX: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Body,
    Div,
    Ul,
    Li,
    A,
    Span,
    I,
}

#[derive(Debug, Clone)]
struct Element {
    tag: Tag,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    left: f64,
}

impl Element {
    fn new(tag: Tag, left: f64) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
            left,
        }
    }
}

/// Part of a chapter entry a simulated click lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The link element itself.
    Link,
    /// The arrow icon nested in the link.
    Arrow,
    /// The bare title label of a chapter without a link.
    Title,
}

/// In-memory sidebar document, laid out the way the book renderer emits the
/// summary markup:
///
/// ```text
/// body
/// └─ div.book-summary
///    └─ ul.summary
///       └─ li.chapter[.expandable][.expanded][.active]
///          ├─ a[href] > i.arrow        (or span.chapter-title)
///          └─ ul.articles > li.chapter …
/// ```
#[derive(Debug, Clone)]
pub struct SidebarTree {
    nodes: Vec<Element>,
    body: NodeId,
    sidebar: Option<NodeId>,
    markers: Markers,
}

impl SidebarTree {
    /// A page with no sidebar at all.
    pub fn without_sidebar(markers: &Markers) -> Self {
        Self {
            nodes: vec![Element::new(Tag::Body, 0.0)],
            body: NodeId(0),
            sidebar: None,
            markers: markers.clone(),
        }
    }

    pub fn from_toc(toc: &SidebarToc, active: Option<&str>, markers: &Markers) -> Self {
        let mut tree = Self::without_sidebar(markers);
        tree.rerender(toc, active);
        tree
    }

    /// Replaces the sidebar with a freshly rendered one, the way a route
    /// change rebuilds it. Nodes of the previous sidebar become detached.
    pub fn rerender(&mut self, toc: &SidebarToc, active: Option<&str>) {
        if let Some(old) = self.sidebar.take() {
            self.nodes[self.body.0].children.retain(|child| *child != old);
            self.nodes[old.0].parent = None;
        }

        let root_class = self.markers.root.clone();
        let root = self.append(self.body, Tag::Div, 0.0);
        self.add_class(root, &root_class);
        let summary = self.append(root, Tag::Ul, 0.0);
        self.add_class(summary, "summary");

        for (index, entry) in toc.chapters.iter().enumerate() {
            let level = format!("1.{}", index + 1);
            self.render_entry(summary, entry, &level, 0, active);
        }
        self.sidebar = Some(root);
    }

    pub fn sidebar_root(&self) -> Option<NodeId> {
        self.sidebar
    }

    pub fn find_chapter(&self, identity: &str) -> Option<NodeId> {
        let root = self.sidebar?;
        self.descendants_by_class(&root, &self.markers.chapter)
            .into_iter()
            .find(|chapter| {
                chapter_identity(self, &self.markers, chapter).as_deref() == Some(identity)
            })
    }

    pub fn hit_target(&self, chapter: NodeId, part: HitPart) -> Option<NodeId> {
        match part {
            HitPart::Link => self.first_child_link(&chapter),
            HitPart::Arrow => {
                let link = self.first_child_link(&chapter)?;
                self.child_with_class(&link, "arrow")
            }
            HitPart::Title => self.child_with_class(&chapter, &self.markers.title),
        }
    }

    /// A click `offset_x` pixels right of the hit element's left edge.
    pub fn click(
        &self,
        chapter: NodeId,
        part: HitPart,
        offset_x: f64,
    ) -> Option<ClickEvent<NodeId>> {
        let target = self.hit_target(chapter, part)?;
        Some(ClickEvent {
            target,
            client_x: self.nodes[target.0].left + offset_x,
        })
    }

    pub fn is_expanded(&self, chapter: NodeId) -> bool {
        self.has_class(&chapter, &self.markers.expanded)
    }

    /// One line per chapter: `[+]` collapsed, `[-]` expanded, `[ ]` leaf,
    /// trailing `*` for the active page.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.sidebar {
            for chapter in self.children_with_class(root) {
                self.outline_chapter(chapter, 0, &mut out);
            }
        }
        out
    }

    fn outline_chapter(&self, chapter: NodeId, depth: usize, out: &mut String) {
        let markers = &self.markers;
        let mark = if !self.has_class(&chapter, &markers.expandable) {
            "[ ]"
        } else if self.has_class(&chapter, &markers.expanded) {
            "[-]"
        } else {
            "[+]"
        };

        let (title, path) = match self.first_child_link(&chapter) {
            Some(link) => (self.text_content(&link), self.link_destination(&link)),
            None => match self.child_with_class(&chapter, &markers.title) {
                Some(label) => (self.text_content(&label), None),
                None => (String::new(), None),
            },
        };

        out.push_str(&"  ".repeat(depth));
        out.push_str(mark);
        out.push(' ');
        out.push_str(title.trim());
        if let Some(path) = path {
            out.push_str(&format!(" ({path})"));
        }
        if self.has_class(&chapter, &markers.active) {
            out.push_str(" *");
        }
        out.push('\n');

        if let Some(articles) = self.child_with_class(&chapter, &markers.articles) {
            for child in self.children_with_class(articles) {
                self.outline_chapter(child, depth + 1, out);
            }
        }
    }

    /// Chapters directly under `list`, or under the `ul.summary` of a root.
    fn children_with_class(&self, list: NodeId) -> Vec<NodeId> {
        let list = if Some(list) == self.sidebar {
            match self.child_with_class(&list, "summary") {
                Some(summary) => summary,
                None => return Vec::new(),
            }
        } else {
            list
        };
        self.children(&list)
            .into_iter()
            .filter(|child| self.has_class(child, &self.markers.chapter))
            .collect()
    }

    /// Renders `entry` under `list`. Returns whether the entry or one of its
    /// descendants is the active page.
    fn render_entry(
        &mut self,
        list: NodeId,
        entry: &TocEntry,
        level: &str,
        depth: usize,
        active: Option<&str>,
    ) -> bool {
        let left = PADDING_PX + INDENT_PX * depth as f64;
        let markers = self.markers.clone();

        let item = self.append(list, Tag::Li, left);
        self.add_class(item, &markers.chapter);
        self.set_attribute(&item, "data-level", level);

        match &entry.path {
            Some(path) => {
                self.set_attribute(&item, "data-path", path);
                let link = self.append(item, Tag::A, left);
                self.set_attribute(&link, "href", path);
                if !entry.chapters.is_empty() {
                    let arrow = self.append(link, Tag::I, left);
                    self.add_class(arrow, "arrow");
                }
                self.nodes[link.0].text = entry.title.clone();
            }
            None => {
                let label = self.append(item, Tag::Span, left);
                self.add_class(label, &markers.title);
                self.nodes[label.0].text = entry.title.clone();
            }
        }

        let is_active = active.is_some() && entry.path.as_deref() == active;
        let mut holds_active = false;
        if !entry.chapters.is_empty() {
            let articles = self.append(item, Tag::Ul, left);
            self.add_class(articles, &markers.articles);
            for (index, child) in entry.chapters.iter().enumerate() {
                let child_level = format!("{level}.{}", index + 1);
                holds_active |=
                    self.render_entry(articles, child, &child_level, depth + 1, active);
            }
            self.add_class(item, &markers.expandable);
            if entry.expanded || is_active || holds_active {
                self.add_class(item, &markers.expanded);
            }
        }
        if is_active {
            self.add_class(item, &markers.active);
        }

        is_active || holds_active
    }

    fn append(&mut self, parent: NodeId, tag: Tag, left: f64) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut element = Element::new(tag, left);
        element.parent = Some(parent);
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Drops the articles container of `chapter` while keeping its
    /// `expandable` class, as a stale or hand-written sidebar might.
    #[cfg(test)]
    pub(crate) fn remove_articles(&mut self, chapter: NodeId) {
        if let Some(articles) = self.child_with_class(&chapter, &self.markers.articles) {
            self.nodes[chapter.0].children.retain(|child| *child != articles);
            self.nodes[articles.0].parent = None;
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        self.set_class(&node, class, true);
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node.0].children {
            out.push(*child);
            self.collect_descendants(*child, out);
        }
    }
}

impl SidebarDom for SidebarTree {
    type Node = NodeId;

    fn root_by_class(&self, class: &str) -> Option<NodeId> {
        if self.has_class(&self.body, class) {
            return Some(self.body);
        }
        self.descendants_by_class(&self.body, class).into_iter().next()
    }

    fn descendants_by_class(&self, scope: &NodeId, class: &str) -> Vec<NodeId> {
        let mut all = Vec::new();
        self.collect_descendants(*scope, &mut all);
        all.retain(|node| self.has_class(node, class));
        all
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn is_link(&self, node: &NodeId) -> bool {
        self.nodes[node.0].tag == Tag::A
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn set_class(&mut self, node: &NodeId, class: &str, on: bool) {
        let classes = &mut self.nodes[node.0].classes;
        let present = classes.iter().any(|c| c == class);
        if on && !present {
            classes.push(class.to_owned());
        } else if !on && present {
            classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        self.nodes[node.0].attributes.remove(name);
    }

    fn text_content(&self, node: &NodeId) -> String {
        let mut text = self.nodes[node.0].text.clone();
        let mut descendants = Vec::new();
        self.collect_descendants(*node, &mut descendants);
        for descendant in descendants {
            text.push_str(&self.nodes[descendant.0].text);
        }
        text
    }

    fn link_destination(&self, link: &NodeId) -> Option<String> {
        self.attribute(link, "href")
    }

    fn left_edge(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].left
    }
}
