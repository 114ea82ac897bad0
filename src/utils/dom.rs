//! Browser implementation of the scroller's rendering seam.
//!
//! [`DomSurface`] owns the row/cell elements inside the scroll container and
//! an `IntersectionObserver` that reports thumbnails entering the lookahead
//! band. [`DomImageSink`] shares the node table so loaded thumbnails can be
//! written into whatever element currently holds the slot.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Window,
};

use crate::config::{FALLBACK_THUMBNAIL, THUMBNAIL_ROOT_MARGIN};
use crate::core::error::MountError;
use crate::core::image_loader::ImageSink;
use crate::core::layout::ItemRect;
use crate::core::pool::SlotId;
use crate::core::surface::Surface;
use crate::models::{FileEntry, ViewMode};

/// Attribute carrying the slot number on every item element.
pub const SLOT_ATTR: &str = "data-slot";
/// Attribute carrying the bound dataset index, read by click delegation.
pub const INDEX_ATTR: &str = "data-index";

#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Open `url` in a new browser tab.
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window()
        && window.open_with_url_and_target(url, "_blank").is_err()
    {
        log::warn!("could not open {}", url);
    }
}

/// Ask the user for a line of text; `None` when cancelled.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Dataset index of the item element under an event target, if any.
pub fn index_from_target(target: Option<web_sys::EventTarget>) -> Option<usize> {
    let element = target?.dyn_into::<web_sys::Element>().ok()?;
    let item = element.closest(&format!("[{}]", INDEX_ATTR)).ok()??;
    item.get_attribute(INDEX_ATTR)?.parse().ok()
}

// =============================================================================
// Nodes
// =============================================================================

/// One reusable item element and its parts.
#[derive(Clone)]
pub struct DomNode {
    root: HtmlElement,
    icon: HtmlImageElement,
    name: HtmlElement,
    meta: HtmlElement,
}

type NodeTable = Rc<RefCell<HashMap<SlotId, DomNode>>>;

fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, MountError> {
    let element = document
        .create_element(tag)
        .map_err(|e| MountError::ElementCreation(format!("{tag}: {e:?}")))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| MountError::ElementCreation(tag.to_string()))?;
    element.set_class_name(class);
    Ok(element)
}

impl DomNode {
    fn create(document: &Document, slot: SlotId) -> Result<Self, MountError> {
        let root = create_html(document, "div", "item")?;
        let icon = create_html(document, "img", "item-icon")?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| MountError::ElementCreation("img".to_string()))?;
        icon.set_draggable(false);
        let name = create_html(document, "span", "item-name")?;
        let meta = create_html(document, "span", "item-meta")?;

        let _ = root.set_attribute(SLOT_ATTR, &slot.0.to_string());
        let _ = icon.set_attribute(SLOT_ATTR, &slot.0.to_string());
        for part in [icon.unchecked_ref::<HtmlElement>(), &name, &meta] {
            let _ = root.append_child(part);
        }
        Ok(Self {
            root,
            icon,
            name,
            meta,
        })
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.root.style().set_property(property, value);
    }
}

// =============================================================================
// Surface
// =============================================================================

pub struct DomSurface {
    document: Document,
    container: HtmlElement,
    content: HtmlElement,
    empty: HtmlElement,
    nodes: NodeTable,
    observer: IntersectionObserver,
    _on_intersect: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl DomSurface {
    /// Build over existing elements: the scroll `container`, the sized
    /// `content` layer inside it, and the `empty` placeholder.
    ///
    /// `on_visible` is called with the slot of every watched thumbnail that
    /// enters the container's lookahead band.
    pub fn new(
        container: HtmlElement,
        content: HtmlElement,
        empty: HtmlElement,
        on_visible: impl Fn(SlotId) + 'static,
    ) -> Result<Self, MountError> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or(MountError::MissingElement("document"))?;

        let on_intersect = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::wrap(
            Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);
                    if let Some(slot) = target
                        .get_attribute(SLOT_ATTR)
                        .and_then(|s| s.parse().ok())
                    {
                        on_visible(SlotId(slot));
                    }
                }
            }),
        );

        let options = IntersectionObserverInit::new();
        options.set_root(Some(&container));
        options.set_root_margin(THUMBNAIL_ROOT_MARGIN);
        let observer =
            IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)
                .map_err(|_| MountError::Observer)?;

        Ok(Self {
            document,
            container,
            content,
            empty,
            nodes: Rc::new(RefCell::new(HashMap::new())),
            observer,
            _on_intersect: on_intersect,
        })
    }

    /// Sink writing loaded thumbnails into this surface's nodes.
    pub fn image_sink(&self) -> DomImageSink {
        DomImageSink {
            nodes: Rc::clone(&self.nodes),
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl Surface for DomSurface {
    type Node = DomNode;

    fn create_node(&mut self, slot: SlotId) -> Result<DomNode, MountError> {
        let node = DomNode::create(&self.document, slot)?;
        self.nodes.borrow_mut().insert(slot, node.clone());
        Ok(node)
    }

    fn bind_node(&mut self, node: &DomNode, index: usize, entry: &FileEntry, mode: ViewMode) {
        let _ = node.root.set_attribute(INDEX_ATTR, &index.to_string());
        node.root.set_title(&entry.name);
        node.name.set_text_content(Some(&entry.name));
        let meta = if mode.is_grid() { "" } else { entry.size.as_str() };
        node.meta.set_text_content(Some(meta));
        node.icon.set_src(entry.static_icon());
        node.icon.set_alt(&entry.name);
    }

    fn place_node(&mut self, node: &DomNode, rect: ItemRect, selected: bool) {
        node.set_style("top", &format!("{}px", rect.top));
        node.set_style("left", &format!("{}px", rect.left));
        node.set_style("width", &format!("{}px", rect.width));
        node.set_style("height", &format!("{}px", rect.height));
        let _ = node.root.class_list().toggle_with_force("selected", selected);
    }

    fn attach_node(&mut self, node: &DomNode) {
        let _ = self.content.append_child(&node.root);
    }

    fn detach_node(&mut self, node: &DomNode) {
        node.root.remove();
    }

    fn destroy_node(&mut self, slot: SlotId, node: DomNode) {
        self.observer.unobserve(&node.icon);
        node.root.remove();
        self.nodes.borrow_mut().remove(&slot);
    }

    fn watch_thumbnail(&mut self, node: &DomNode, entry: &FileEntry) {
        node.icon.set_src(entry.static_icon());
        self.observer.observe(&node.icon);
    }

    fn unwatch_thumbnail(&mut self, node: &DomNode) {
        self.observer.unobserve(&node.icon);
    }

    fn set_total_extent(&mut self, extent: f64) {
        let _ = self
            .content
            .style()
            .set_property("height", &format!("{}px", extent));
    }

    fn scroll_to(&mut self, offset: f64) {
        self.container.set_scroll_top(offset.round() as i32);
    }

    fn set_empty(&mut self, empty: bool) {
        let display = if empty { "flex" } else { "none" };
        let _ = self.empty.style().set_property("display", display);
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        let classes = self.container.class_list();
        for other in ViewMode::ALL {
            let _ = classes.remove_1(other.class_name());
        }
        let _ = classes.add_1(mode.class_name());
    }
}

// =============================================================================
// Image sink
// =============================================================================

pub struct DomImageSink {
    nodes: NodeTable,
}

impl ImageSink for DomImageSink {
    fn show(&self, slot: SlotId, handle: &str) {
        if let Some(node) = self.nodes.borrow().get(&slot) {
            node.icon.set_src(handle);
        }
    }

    fn show_fallback(&self, slot: SlotId) {
        if let Some(node) = self.nodes.borrow().get(&slot) {
            node.icon.set_src(FALLBACK_THUMBNAIL);
        }
    }
}
