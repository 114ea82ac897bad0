//! Details panel for the focused entry.
//!
//! Shows a preview and the common fields of whatever is selected. Artwork
//! names (`artist#character#copyright#source#id`) add labelled tag fields;
//! clicking one searches the current location for it.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::core::details::{ArtworkDetails, EntryDetails};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn DetailsPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let details = ctx.explorer.details;

    view! {
        <Show when=move || details.with(|d| d.is_some())>
            <aside class=css::details>
                {move || details.get().map(|d| view! { <EntryFields details=d /> })}
            </aside>
        </Show>
    }
}

#[component]
fn EntryFields(details: EntryDetails) -> impl IntoView {
    let common = details
        .fields()
        .into_iter()
        .map(|(label, value)| {
            view! {
                <div class=css::detailsField>
                    <span class=css::detailsLabel>{label}</span>
                    <span class=css::detailsText>{value.to_string()}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <img class=css::detailsPreview src=details.preview.clone() alt=details.name.clone() />
        {common}
        {details.artwork.map(|artwork| view! { <ArtworkFields artwork=artwork /> })}
    }
}

#[component]
fn ArtworkFields(artwork: ArtworkDetails) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    artwork
        .fields()
        .into_iter()
        .map(|(label, value)| {
            let term = value.to_string();
            view! {
                <div class=css::detailsField>
                    <span class=css::detailsLabel>{label}</span>
                    <button
                        class=css::detailsValue
                        title="Search for this"
                        on:click=move |_| {
                            let term = term.clone();
                            ctx.run(move |ex| ex.search(&term));
                        }
                    >
                        {value.to_string()}
                    </button>
                </div>
            }
        })
        .collect_view()
}
