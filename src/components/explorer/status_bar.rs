//! Status bar: item counts, selection size, clipboard state, the last
//! error and jump buttons.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::ClipboardOp;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn StatusBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let selection_label = move || {
        let status = state.status.get();
        (status.selected > 0)
            .then(|| format!("{} selected ({})", status.selected, status.selected_size))
    };

    let clipboard_label = move || {
        state.clipboard.get().map(|op| match op {
            ClipboardOp::Copy => "Copied to clipboard",
            ClipboardOp::Cut => "Cut to clipboard",
        })
    };

    view! {
        <footer class=css::statusBar>
            <span class=css::statusItem>{move || format!("{} items", state.status.get().total)}</span>
            {move || selection_label().map(|label| view! { <span class=css::statusItem>{label}</span> })}
            {move || clipboard_label().map(|label| view! { <span class=css::statusItem>{label}</span> })}
            <Show when=move || state.error.with(|e| e.is_some())>
                <span class=css::statusError>
                    {move || state.error.get().unwrap_or_default()}
                    <button
                        class=css::toolButton
                        title="Dismiss"
                        on:click=move |_| state.error.set(None)
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </span>
            </Show>
            <span class=css::spacer></span>
            <button
                class=css::toolButton
                title="Scroll to top"
                on:click=move |_| {
                    ctx.with_explorer(|ex| ex.scroll_to_top());
                }
            >
                <Icon icon=ic::TO_TOP />
            </button>
            <button
                class=css::toolButton
                title="Scroll to bottom"
                on:click=move |_| {
                    ctx.with_explorer(|ex| ex.scroll_to_bottom());
                }
            >
                <Icon icon=ic::TO_BOTTOM />
            </button>
        </footer>
    }
}
