//! Media viewer overlay.
//!
//! Covers the file view while an image or video is open. Left/Right step to
//! the neighbouring media entry, Escape or a double click closes.

use leptos::ev::KeyboardEvent;
use leptos::html::Div;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::viewer::{MediaItem, MediaKind, Step};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn MediaViewerOverlay() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let viewer = ctx.explorer.viewer;
    let overlay_ref = NodeRef::<Div>::new();
    let (loading, set_loading) = signal(true);
    let (failed, set_failed) = signal(false);

    Effect::new(move |_| {
        let showing = viewer.with(|v| v.as_ref().map(|item| item.url.clone()));
        if showing.is_none() {
            return;
        }
        set_loading.set(true);
        set_failed.set(false);
        if let Some(overlay) = overlay_ref.get() {
            let _ = overlay.focus();
        }
    });

    let on_keydown = move |ev: KeyboardEvent| {
        match ev.key().as_str() {
            "ArrowLeft" => ctx.step_viewer(Step::Previous),
            "ArrowRight" => ctx.step_viewer(Step::Next),
            "Escape" => ctx.close_viewer(),
            _ => return,
        }
        ev.prevent_default();
    };

    let has = move |pick: fn(&MediaItem) -> bool| {
        Signal::derive(move || viewer.with(|v| v.as_ref().is_some_and(pick)))
    };
    let has_previous = has(|item| item.has_previous);
    let has_next = has(|item| item.has_next);

    let loaded = move || set_loading.set(false);
    let broken = move || {
        set_loading.set(false);
        set_failed.set(true);
    };

    let media = move || {
        viewer.get().map(|item| match item.kind {
            MediaKind::Image => view! {
                <img
                    class=css::viewerMedia
                    src=item.url
                    alt=item.name
                    on:load=move |_| loaded()
                    on:error=move |_| broken()
                />
            }
            .into_any(),
            MediaKind::Video => view! {
                <video
                    class=css::viewerMedia
                    src=item.url
                    controls=true
                    autoplay=true
                    on:loadeddata=move |_| loaded()
                    on:error=move |_| broken()
                ></video>
            }
            .into_any(),
        })
    };

    view! {
        <Show when=move || viewer.with(|v| v.is_some())>
            <div class=css::viewer node_ref=overlay_ref tabindex="0" on:keydown=on_keydown>
                <div
                    class=css::viewerStage
                    title="Double-click or press Esc to close"
                    on:dblclick=move |_| ctx.close_viewer()
                >
                    {media}
                    <Show when=move || loading.get() || failed.get()>
                        <div class=css::viewerStatus>
                            {move || if failed.get() { "Failed to load" } else { "Loading..." }}
                        </div>
                    </Show>
                </div>
                <button
                    class=css::viewerClose
                    title="Close (Esc)"
                    on:click=move |_| ctx.close_viewer()
                >
                    <Icon icon=ic::CLOSE />
                </button>
                <button
                    class=css::viewerPrevious
                    title="Previous (Left arrow)"
                    disabled=move || !has_previous.get()
                    on:click=move |_| ctx.step_viewer(Step::Previous)
                >
                    <Icon icon=ic::BACK />
                </button>
                <button
                    class=css::viewerNext
                    title="Next (Right arrow)"
                    disabled=move || !has_next.get()
                    on:click=move |_| ctx.step_viewer(Step::Next)
                >
                    <Icon icon=ic::FORWARD />
                </button>
            </div>
        </Show>
    }
}
