//! Virtualized file view.
//!
//! Renders nothing reactive itself: once its elements exist it builds a
//! [`DomSurface`] over them, creates the controller and attaches it to the
//! context. From then on the scroller owns the content layer. Scroll events
//! are coalesced to one render per animation frame and container resizes are
//! forwarded as new viewports.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::ev::{Event, KeyboardEvent, MouseEvent};
use leptos::html::Div;
use leptos::prelude::*;
use leptos_use::{UseElementSizeReturn, use_element_size};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::app::{AppContext, WebExplorer};
use crate::config::{EMPTY_PLACEHOLDER_TEXT, LayoutConfig, ROOT_PATH, THUMBNAIL_CACHE_SLACK};
use crate::core::backend::Api;
use crate::core::error::MountError;
use crate::core::explorer::Explorer;
use crate::core::image_loader::ImageLoader;
use crate::core::pool::SlotId;
use crate::models::Viewport;
use crate::utils::dom::{confirm, index_from_target};
use crate::utils::{BlobFetcher, DomSurface, HttpTransport};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn FileView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let container_ref = NodeRef::<Div>::new();
    let content_ref = NodeRef::<Div>::new();
    let empty_ref = NodeRef::<Div>::new();

    Effect::new(move |_| {
        if ctx.is_attached() {
            return;
        }
        let (Some(container), Some(content), Some(empty)) =
            (container_ref.get(), content_ref.get(), empty_ref.get())
        else {
            return;
        };
        match mount(ctx, container.into(), content.into(), empty.into()) {
            Ok(explorer) => {
                ctx.attach(explorer);
                ctx.sync();
                ctx.run(|ex| ex.refresh());
                ctx.run(|ex| ex.load_tree());
            }
            Err(err) => {
                log::error!("file view mount failed: {}", err);
                ctx.report(err);
            }
        }
    });

    let UseElementSizeReturn { width, height } = use_element_size(container_ref);
    Effect::new(move |_| {
        let (width, height) = (width.get(), height.get());
        if width > 0.0 && height > 0.0 {
            ctx.with_explorer(|ex| ex.resize(Viewport::new(width, height)));
        }
    });

    on_cleanup(move || {
        ctx.with_explorer(|ex| ex.dispose());
    });

    let on_scroll = move |_: Event| {
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let offset = f64::from(container.scroll_top());
        if ctx.with_explorer(|ex| ex.on_scroll(offset)).unwrap_or(false) {
            request_animation_frame(move || {
                ctx.with_explorer(|ex| ex.on_frame());
            });
        }
    };

    let on_click = move |ev: MouseEvent| {
        match index_from_target(ev.target()) {
            Some(index) => ctx.apply(|ex| ex.click(index)),
            None => ctx.apply(|ex| ex.clear_selection()),
        };
    };

    let on_dblclick = move |ev: MouseEvent| {
        if let Some(index) = index_from_target(ev.target()) {
            ctx.open(index);
        }
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let handled = match ev.key().as_str() {
            "a" | "A" if ev.ctrl_key() || ev.meta_key() => {
                ctx.apply(|ex| ex.select_all());
                true
            }
            "Escape" => {
                ctx.apply(|ex| ex.clear_selection());
                true
            }
            "Home" => {
                ctx.with_explorer(|ex| ex.scroll_to_top());
                true
            }
            "End" => {
                ctx.with_explorer(|ex| ex.scroll_to_bottom());
                true
            }
            "Backspace" => {
                ctx.run(|ex| ex.up());
                true
            }
            "Delete" => {
                let count = ctx.explorer.status.get_untracked().selected;
                if count > 0 && confirm(&format!("Delete {} item(s)?", count)) {
                    ctx.run(|ex| ex.delete());
                }
                true
            }
            _ => false,
        };
        if handled {
            ev.prevent_default();
        }
    };

    view! {
        <div
            class=css::viewport
            node_ref=container_ref
            tabindex="0"
            on:scroll=on_scroll
            on:keydown=on_keydown
        >
            <div
                class=css::content
                node_ref=content_ref
                on:click=on_click
                on:dblclick=on_dblclick
            ></div>
            <div class=css::empty node_ref=empty_ref style="display: none">
                {EMPTY_PLACEHOLDER_TEXT}
            </div>
        </div>
    }
}

/// Build the controller over the mounted elements.
///
/// The surface's visibility callback only holds a weak handle, filled in
/// once the controller exists, so dropping the context's handle frees both.
fn mount(
    ctx: AppContext,
    container: HtmlElement,
    content: HtmlElement,
    empty: HtmlElement,
) -> Result<Rc<WebExplorer>, MountError> {
    let handle: Rc<RefCell<Weak<WebExplorer>>> = Rc::new(RefCell::new(Weak::new()));

    let on_visible = {
        let handle = Rc::clone(&handle);
        move |slot: SlotId| {
            let Some(explorer) = handle.borrow().upgrade() else {
                return;
            };
            if let Some(task) = explorer.image_visible(slot) {
                spawn_local(task);
            }
        }
    };

    let viewport = Viewport::new(
        f64::from(container.client_width()),
        f64::from(container.client_height()),
    );
    let surface = DomSurface::new(container, content, empty, on_visible)?;
    let images = ImageLoader::new(BlobFetcher::new(), surface.image_sink(), THUMBNAIL_CACHE_SLACK);
    let explorer = Explorer::new(
        Api::new(HttpTransport::default()),
        surface,
        images,
        LayoutConfig::default(),
        ROOT_PATH,
    );
    *handle.borrow_mut() = Rc::downgrade(&explorer);

    explorer.initialize(viewport, ctx.explorer.view_mode.get_untracked());
    log::debug!("file view mounted at {}x{}", viewport.width, viewport.height);
    Ok(explorer)
}
