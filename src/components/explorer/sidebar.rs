//! Directory tree sidebar.
//!
//! Disks are listed at the top level. Expanding a node fetches its
//! subdirectories once; clicking a name navigates there.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::core::dir_tree::TreeRow;

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let rows = ctx.explorer.tree;
    let location = ctx.explorer.location;

    view! {
        <nav class=css::sidebar>
            <For
                each=move || rows.get()
                key=|row| (row.full_path.clone(), row.expanded)
                children=move |row| {
                    let current = Signal::derive({
                        let path = row.full_path.clone();
                        move || location.get() == path
                    });
                    view! { <TreeItem row=row current=current /> }
                }
            />
        </nav>
    }
}

#[component]
fn TreeItem(row: TreeRow, current: Signal<bool>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let toggle_path = row.full_path.clone();
    let open_path = row.full_path.clone();
    let indent = format!("padding-left: {}rem", 0.5 + row.depth as f64);
    let chevron = if row.expanded { ic::EXPANDED } else { ic::COLLAPSED };
    let icon = if row.depth == 0 { ic::DISK } else { ic::FOLDER };

    let on_toggle = move |_: leptos::ev::MouseEvent| {
        let path = toggle_path.clone();
        ctx.run(move |ex| ex.toggle_dir(&path));
    };

    let on_open = move |_: leptos::ev::MouseEvent| {
        let path = open_path.clone();
        ctx.run(move |ex| ex.navigate(&path));
    };

    view! {
        <div
            class=move || {
                if current.get() {
                    format!("{} {}", css::treeRow, css::treeRowCurrent)
                } else {
                    css::treeRow.to_string()
                }
            }
            style=indent
        >
            <button class=css::treeToggle on:click=on_toggle>
                <Icon icon=chevron />
            </button>
            <span class=css::treeLabel title=row.full_path.clone() on:click=on_open>
                <span class=css::treeIcon><Icon icon=icon /></span>
                {row.name}
            </span>
        </div>
    }
}
