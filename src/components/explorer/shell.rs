//! Explorer layout.

use leptos::prelude::*;

use super::{DetailsPanel, FileView, MediaViewerOverlay, Sidebar, StatusBar, Toolbar};

stylance::import_crate_style!(css, "src/components/explorer/explorer.module.css");

#[component]
pub fn ExplorerShell() -> impl IntoView {
    view! {
        <div class=css::shell>
            <Toolbar />
            <div class=css::body>
                <Sidebar />
                <main class=css::main>
                    <FileView />
                    <MediaViewerOverlay />
                    <DetailsPanel />
                </main>
            </div>
            <StatusBar />
        </div>
    }
}
