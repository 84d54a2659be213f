/// Element access used by the toggle controller.
///
/// The browser build implements this over `web_sys::Element`; the CLI and
/// the tests use the in-memory [`crate::tree::SidebarTree`]. Mutations take
/// `&mut self` so that in-memory hosts need no interior mutability; the
/// browser implementation is a zero-sized handle.
pub trait SidebarDom {
    type Node: Clone + PartialEq + std::fmt::Debug;

    /// First element in document order carrying `class`.
    fn root_by_class(&self, class: &str) -> Option<Self::Node>;

    /// Descendants of `scope` (excluding `scope`) carrying `class`, in
    /// document order.
    fn descendants_by_class(&self, scope: &Self::Node, class: &str) -> Vec<Self::Node>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Element children of `node`, in order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is a navigable link (`<a>`).
    fn is_link(&self, node: &Self::Node) -> bool;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn set_class(&mut self, node: &Self::Node, class: &str, on: bool);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    fn text_content(&self, node: &Self::Node) -> String;

    /// Destination path of a link element.
    fn link_destination(&self, link: &Self::Node) -> Option<String>;

    /// Left edge of the element's bounding box, in client coordinates.
    fn left_edge(&self, node: &Self::Node) -> f64;

    /// Nearest node, starting at `node` itself, matching `pred`. The walk
    /// stops after `boundary` so nothing outside it is ever returned.
    fn closest<F>(&self, node: &Self::Node, boundary: &Self::Node, pred: F) -> Option<Self::Node>
    where
        F: Fn(&Self, &Self::Node) -> bool,
    {
        let mut cursor = Some(node.clone());
        while let Some(current) = cursor {
            if pred(self, &current) {
                return Some(current);
            }
            if &current == boundary {
                return None;
            }
            cursor = self.parent(&current);
        }
        None
    }

    fn closest_link(&self, node: &Self::Node, boundary: &Self::Node) -> Option<Self::Node> {
        self.closest(node, boundary, |dom, n| dom.is_link(n))
    }

    fn closest_with_class(
        &self,
        node: &Self::Node,
        boundary: &Self::Node,
        class: &str,
    ) -> Option<Self::Node> {
        self.closest(node, boundary, |dom, n| dom.has_class(n, class))
    }

    fn child_with_class(&self, node: &Self::Node, class: &str) -> Option<Self::Node> {
        self.children(node)
            .into_iter()
            .find(|child| self.has_class(child, class))
    }

    fn first_child_link(&self, node: &Self::Node) -> Option<Self::Node> {
        self.children(node)
            .into_iter()
            .find(|child| self.is_link(child))
    }
}

/// A click delivered to the sidebar root.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent<N> {
    pub target: N,
    pub client_x: f64,
}
