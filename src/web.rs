use std::rc::Rc;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlAnchorElement, HtmlCollection, MouseEvent, Storage};

use crate::config::ToggleConfig;
use crate::controller::{Init, SidebarToggleController};
use crate::dom::{ClickEvent, SidebarDom};
use crate::store::ExpansionStore;

/// The live page DOM.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDom;

fn collect(collection: HtmlCollection) -> Vec<Element> {
    (0..collection.length())
        .filter_map(|index| collection.item(index))
        .collect()
}

impl SidebarDom for WebDom {
    type Node = Element;

    fn root_by_class(&self, class: &str) -> Option<Element> {
        let document = web_sys::window()?.document()?;
        document.get_elements_by_class_name(class).item(0)
    }

    fn descendants_by_class(&self, scope: &Element, class: &str) -> Vec<Element> {
        collect(scope.get_elements_by_class_name(class))
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        collect(node.children())
    }

    fn is_link(&self, node: &Element) -> bool {
        node.tag_name().eq_ignore_ascii_case("a")
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn set_class(&mut self, node: &Element, class: &str, on: bool) {
        let _ = node.class_list().toggle_with_force(class, on);
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn link_destination(&self, link: &Element) -> Option<String> {
        link.dyn_ref::<HtmlAnchorElement>()
            .map(HtmlAnchorElement::pathname)
    }

    fn left_edge(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().left()
    }
}

/// `window.localStorage` of the page origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> anyhow::Result<Storage> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| anyhow::anyhow!("localStorage unavailable"))
    }
}

impl ExpansionStore for LocalStorageStore {
    fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{err:?}")
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    install();
}

/// Restores the sidebar and binds its click listener. Safe to call again
/// after every route change.
#[wasm_bindgen]
pub fn install() {
    install_with_config(ToggleConfig::default());
}

/// [`install`] with a different arrow icon width.
#[wasm_bindgen(js_name = installWithIconZone)]
pub fn install_with_icon_zone(icon_zone_px: u32) {
    install_with_config(ToggleConfig {
        icon_zone_px,
        ..ToggleConfig::default()
    });
}

pub fn install_with_config(config: ToggleConfig) {
    let controller = Rc::new(SidebarToggleController::new(config, LocalStorageStore));
    let Init::Bound { root, .. } = controller.initialize(&mut WebDom) else {
        return;
    };

    let listener = Rc::clone(&controller);
    let listener_root = root.clone();
    let on_click = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        let click = ClickEvent {
            target,
            client_x: f64::from(event.client_x()),
        };
        let outcome = listener.handle_click(&mut WebDom, &listener_root, &click);
        if outcome.suppresses_default() {
            event.prevent_default();
            event.stop_immediate_propagation();
        }
    });

    if root
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .is_err()
    {
        controller.unbind(&mut WebDom, &root);
        return;
    }
    // The listener lives as long as the sidebar element.
    on_click.forget();
}
