//! Explorer toolbar.
//!
//! Navigation buttons, the editable address bar, the search box, view mode
//! switches and the file operation buttons. Names for new and renamed items
//! come from the browser's prompt dialog.

use leptos::ev::KeyboardEvent;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{DEFAULT_DIR_NAME, DEFAULT_FILE_NAME};
use crate::core::backend::CreateKind;
use crate::core::error::ValidationError;
use crate::models::{ClipboardOp, ViewMode};
use crate::utils::dom::{confirm, prompt};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    view! {
        <header class=css::toolbar>
            <div class=css::group>
                <ToolButton
                    icon=ic::BACK
                    title="Back"
                    disabled=Signal::derive(move || !state.can_back.get())
                    on_press=move || ctx.run(|ex| ex.back())
                />
                <ToolButton
                    icon=ic::FORWARD
                    title="Forward"
                    disabled=Signal::derive(move || !state.can_forward.get())
                    on_press=move || ctx.run(|ex| ex.forward())
                />
                <ToolButton icon=ic::UP title="Up" on_press=move || ctx.run(|ex| ex.up()) />
                <ToolButton
                    icon=ic::REFRESH
                    title="Refresh"
                    on_press=move || ctx.run(|ex| ex.refresh())
                />
            </div>
            <AddressBar />
            <SearchBox />
            <ViewModes />
            <Operations />
        </header>
    }
}

/// Icon button with an optional active/disabled look.
#[component]
fn ToolButton(
    icon: icondata::Icon,
    title: &'static str,
    on_press: impl Fn() + 'static,
    #[prop(into, default = Signal::stored(false))] disabled: Signal<bool>,
    #[prop(into, default = Signal::stored(false))] active: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            class=move || button_class(active.get())
            title=title
            disabled=move || disabled.get()
            on:click=move |_| on_press()
        >
            <Icon icon=icon />
        </button>
    }
}

fn button_class(active: bool) -> String {
    if active {
        format!("{} {}", css::toolButton, css::toolButtonActive)
    } else {
        css::toolButton.to_string()
    }
}

// ============================================================================
// Address and search
// ============================================================================

/// Shows the current location; Enter navigates to whatever was typed.
#[component]
fn AddressBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let location = ctx.explorer.location;
    let (draft, set_draft) = signal(String::new());

    Effect::new(move |_| set_draft.set(location.get()));

    let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            let target = draft.get_untracked();
            ctx.run(move |ex| ex.navigate(&target));
        }
        "Escape" => set_draft.set(location.get_untracked()),
        _ => {}
    };

    view! {
        <input
            class=css::address
            type="text"
            spellcheck="false"
            prop:value=move || draft.get()
            on:input=move |ev| set_draft.set(event_target_value(&ev))
            on:keydown=on_keydown
        />
    }
}

#[component]
fn SearchBox() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let search_term = ctx.explorer.search_term;
    let (draft, set_draft) = signal(String::new());

    Effect::new(move |_| set_draft.set(search_term.get()));

    let submit = move || {
        let term = draft.get_untracked();
        ctx.run(move |ex| ex.search(&term));
    };

    view! {
        <div class=css::search>
            <input
                class=css::searchInput
                type="search"
                placeholder="Search"
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=move |ev: KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit();
                    }
                }
            />
            <ToolButton icon=ic::SEARCH title="Search" on_press=submit />
        </div>
    }
}

// ============================================================================
// View modes
// ============================================================================

#[component]
fn ViewModes() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let view_mode = ctx.explorer.view_mode;

    let buttons = ViewMode::ALL
        .into_iter()
        .map(|mode| {
            let (icon, title) = match mode {
                ViewMode::CompactList => (ic::COMPACT_LIST, "List"),
                ViewMode::MediumGrid => (ic::MEDIUM_GRID, "Medium icons"),
                ViewMode::LargeGrid => (ic::LARGE_GRID, "Large icons"),
            };
            view! {
                <ToolButton
                    icon=icon
                    title=title
                    active=Signal::derive(move || view_mode.get() == mode)
                    on_press=move || ctx.set_view_mode(mode)
                />
            }
        })
        .collect_view();

    view! { <div class=css::group>{buttons}</div> }
}

// ============================================================================
// Operations
// ============================================================================

#[component]
fn Operations() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let state = ctx.explorer;

    let create = move |kind: CreateKind| {
        let (message, default) = match kind {
            CreateKind::File => ("New file name", DEFAULT_FILE_NAME),
            CreateKind::Directory => ("New folder name", DEFAULT_DIR_NAME),
        };
        if let Some(name) = prompt(message, default) {
            ctx.run(move |ex| ex.create(kind, &name));
        }
    };

    let rename = move || {
        let Some(entry) = ctx.with_explorer(|ex| ex.focused_entry()).flatten() else {
            ctx.report(ValidationError::NoSelection);
            return;
        };
        if let Some(name) = prompt("Rename to", &entry.name) {
            ctx.run(move |ex| ex.rename(&name));
        }
    };

    let delete = move || {
        let count = state.status.get_untracked().selected;
        if count == 0 {
            ctx.report(ValidationError::NoSelection);
            return;
        }
        if confirm(&format!("Delete {} item(s)?", count)) {
            ctx.run(|ex| ex.delete());
        }
    };

    let set_clipboard = move |op: ClipboardOp| {
        if let Some(Err(err)) = ctx.apply(|ex| ex.set_clipboard(op)) {
            ctx.report(err);
        }
    };

    let clipboard_is = move |op: ClipboardOp| Signal::derive(move || state.clipboard.get() == Some(op));

    view! {
        <div class=css::group>
            <ToolButton icon=ic::NEW_FILE title="New file" on_press=move || create(CreateKind::File) />
            <ToolButton
                icon=ic::NEW_FOLDER
                title="New folder"
                on_press=move || create(CreateKind::Directory)
            />
            <ToolButton icon=ic::RENAME title="Rename" on_press=rename />
            <ToolButton icon=ic::DELETE title="Delete" on_press=delete />
        </div>
        <div class=css::group>
            <ToolButton
                icon=ic::COPY
                title="Copy"
                active=clipboard_is(ClipboardOp::Copy)
                on_press=move || set_clipboard(ClipboardOp::Copy)
            />
            <ToolButton
                icon=ic::CUT
                title="Cut"
                active=clipboard_is(ClipboardOp::Cut)
                on_press=move || set_clipboard(ClipboardOp::Cut)
            />
            <ToolButton
                icon=ic::PASTE
                title="Paste"
                disabled=Signal::derive(move || state.clipboard.get().is_none())
                on_press=move || ctx.run(|ex| ex.paste())
            />
        </div>
        <div class=css::group>
            <ToolButton
                icon=ic::MULTI_SELECT
                title="Multi-select"
                active=Signal::derive(move || state.multi_select.get())
                on_press=move || {
                    let enabled = !state.multi_select.get_untracked();
                    ctx.apply(|ex| ex.set_multi_select(enabled));
                }
            />
            <ToolButton
                icon=ic::SELECT_ALL
                title="Select all"
                on_press=move || {
                    ctx.apply(|ex| ex.select_all());
                }
            />
        </div>
    }
}
