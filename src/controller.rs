use crate::chapter::{Chapter, expandable_chapters};
use crate::config::ToggleConfig;
use crate::dom::{ClickEvent, SidebarDom};
use crate::store::{ExpansionRecord, ExpansionStore, load_record, save_record};

/// Result of [`SidebarToggleController::initialize`].
#[derive(Debug, Clone, PartialEq)]
pub enum Init<N> {
    /// The page has no sidebar.
    NoSidebar,
    /// First initialization of this root. The host attaches its listener.
    Bound { root: N, restored: RestoreReport },
    /// The root already carries a listener. The host must not add another.
    AlreadyBound { root: N, restored: RestoreReport },
}

impl<N> Init<N> {
    pub fn root(&self) -> Option<&N> {
        match self {
            Init::NoSidebar => None,
            Init::Bound { root, .. } | Init::AlreadyBound { root, .. } => Some(root),
        }
    }

    pub fn needs_listener(&self) -> bool {
        matches!(self, Init::Bound { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub expanded: usize,
    pub collapsed: usize,
    /// Chapters recorded as collapsed but left open for the active page.
    pub kept_active: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Toggled {
        identity: Option<String>,
        expanded: bool,
    },
    /// A click on the link body. The browser navigates.
    Navigate,
    /// Not on an expandable chapter.
    Ignored,
}

impl ClickOutcome {
    /// Whether the host must prevent the default action and stop the event
    /// from reaching other handlers.
    pub fn suppresses_default(&self) -> bool {
        matches!(self, ClickOutcome::Toggled { .. })
    }
}

/// Collapsible chapters for the book sidebar.
///
/// The live DOM classes are the only in-memory expansion state. They are
/// restored from the persisted record on each page or route render and the
/// whole snapshot is written back after every toggle. Concurrent tabs each
/// keep their own view and the last one to write wins.
#[derive(Debug, Clone)]
pub struct SidebarToggleController<S> {
    config: ToggleConfig,
    store: S,
}

impl<S: ExpansionStore> SidebarToggleController<S> {
    pub fn new(config: ToggleConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ToggleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs once per page or route render: restores persisted expansion
    /// state, then marks the root as bound the first time it is seen.
    pub fn initialize<D: SidebarDom>(&self, dom: &mut D) -> Init<D::Node> {
        let markers = &self.config.markers;
        let Some(root) = dom.root_by_class(&markers.root) else {
            tracing::debug!(root_class = %markers.root, "no sidebar on page");
            return Init::NoSidebar;
        };

        let restored = self.restore(dom, &root);

        if dom.attribute(&root, &markers.bound_attribute).is_some() {
            tracing::debug!("sidebar listener already bound");
            return Init::AlreadyBound { root, restored };
        }
        dom.set_attribute(&root, &markers.bound_attribute, "");
        tracing::debug!(?restored, "sidebar listener bound");
        Init::Bound { root, restored }
    }

    /// Clears the bound marker so the next [`Self::initialize`] reports
    /// [`Init::Bound`] again. Hosts call this when attaching the listener
    /// failed.
    pub fn unbind<D: SidebarDom>(&self, dom: &mut D, root: &D::Node) {
        dom.remove_attribute(root, &self.config.markers.bound_attribute);
        tracing::debug!("sidebar listener unbound");
    }

    /// Applies the persisted record to every expandable chapter under `root`.
    ///
    /// Chapters missing from the record keep their rendered state. A chapter
    /// on the active path is never collapsed here.
    pub fn restore<D: SidebarDom>(&self, dom: &mut D, root: &D::Node) -> RestoreReport {
        let record = load_record(&self.store, &self.config.storage_key);
        let mut report = RestoreReport::default();
        if record.is_empty() {
            return report;
        }

        let markers = &self.config.markers;
        for chapter in expandable_chapters(dom, markers, root) {
            let Some(identity) = chapter.identity.as_deref() else {
                continue;
            };
            match record.get(identity) {
                Some(true) => {
                    dom.set_class(&chapter.node, &markers.expanded, true);
                    report.expanded += 1;
                }
                Some(false) if chapter.on_active_path => {
                    report.kept_active += 1;
                }
                Some(false) => {
                    dom.set_class(&chapter.node, &markers.expanded, false);
                    report.collapsed += 1;
                }
                None => {}
            }
        }
        report
    }

    /// Classifies a click on or inside `root` and toggles when it hits a
    /// chapter's title label or the arrow zone of its link.
    pub fn handle_click<D: SidebarDom>(
        &self,
        dom: &mut D,
        root: &D::Node,
        event: &ClickEvent<D::Node>,
    ) -> ClickOutcome {
        let markers = &self.config.markers;
        let link = dom.closest_link(&event.target, root);
        let title = dom.closest_with_class(&event.target, root, &markers.title);

        let (hit, on_title) = match (link, title) {
            (Some(link), _) => (link, false),
            (None, Some(title)) => (title, true),
            (None, None) => return ClickOutcome::Ignored,
        };

        let Some(node) = dom.closest_with_class(&hit, root, &markers.chapter) else {
            return ClickOutcome::Ignored;
        };
        if !dom.has_class(&node, &markers.expandable)
            || dom.child_with_class(&node, &markers.articles).is_none()
        {
            return ClickOutcome::Ignored;
        }

        if !on_title {
            let offset = event.client_x - dom.left_edge(&hit);
            if offset >= f64::from(self.config.icon_zone_px) {
                return ClickOutcome::Navigate;
            }
        }

        let expanded = !dom.has_class(&node, &markers.expanded);
        dom.set_class(&node, &markers.expanded, expanded);
        let chapter = Chapter::read(dom, markers, &node);
        tracing::debug!(identity = ?chapter.identity, expanded, "toggled chapter");

        self.persist(dom, root);
        ClickOutcome::Toggled {
            identity: chapter.identity,
            expanded,
        }
    }

    /// Expanded flag of every expandable chapter with an identity.
    pub fn snapshot<D: SidebarDom>(&self, dom: &D, root: &D::Node) -> ExpansionRecord {
        expandable_chapters(dom, &self.config.markers, root)
            .into_iter()
            .filter_map(|chapter| Some((chapter.identity?, chapter.expanded)))
            .collect()
    }

    /// Replaces the persisted record with the current snapshot.
    pub fn persist<D: SidebarDom>(&self, dom: &D, root: &D::Node) -> bool {
        let record = self.snapshot(dom, root);
        save_record(&self.store, &self.config.storage_key, &record)
    }
}
