//! Root application module.
//!
//! Contains the App component and the AppContext shared by every component.
//! The explorer controller itself is not reactive; components call into it
//! through [`AppContext::with_explorer`] and then [`AppContext::sync`] copies
//! what the UI displays into signals.

use std::fmt::Display;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::ExplorerShell;
use crate::core::details::EntryDetails;
use crate::core::dir_tree::TreeRow;
use crate::core::explorer::Explorer;
use crate::core::operations::OpenTarget;
use crate::core::status::StatusSummary;
use crate::core::viewer::{MediaItem, Step};
use crate::models::{ClipboardOp, ViewMode};
use crate::utils::dom::open_in_new_tab;
use crate::utils::{BlobFetcher, DomImageSink, DomSurface, HttpTransport};

/// The controller as wired in the browser.
pub type WebExplorer = Explorer<HttpTransport, DomSurface, BlobFetcher, DomImageSink>;

// ============================================================================
// ExplorerState
// ============================================================================

/// Displayed explorer state, refreshed from the controller by
/// [`AppContext::sync`].
#[derive(Clone, Copy)]
pub struct ExplorerState {
    pub location: RwSignal<String>,
    pub search_term: RwSignal<String>,
    pub view_mode: RwSignal<ViewMode>,
    pub can_back: RwSignal<bool>,
    pub can_forward: RwSignal<bool>,
    pub status: RwSignal<StatusSummary>,
    pub details: RwSignal<Option<EntryDetails>>,
    /// Pending clipboard operation, if any.
    pub clipboard: RwSignal<Option<ClipboardOp>>,
    pub multi_select: RwSignal<bool>,
    pub tree: RwSignal<Vec<TreeRow>>,
    /// Media shown in the viewer overlay, if open.
    pub viewer: RwSignal<Option<MediaItem>>,
    /// Last error message, shown until dismissed or the next success.
    pub error: RwSignal<Option<String>>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self {
            location: RwSignal::new(String::new()),
            search_term: RwSignal::new(String::new()),
            view_mode: RwSignal::new(ViewMode::default()),
            can_back: RwSignal::new(false),
            can_forward: RwSignal::new(false),
            status: RwSignal::new(StatusSummary::default()),
            details: RwSignal::new(None),
            clipboard: RwSignal::new(None),
            multi_select: RwSignal::new(false),
            tree: RwSignal::new(Vec::new()),
            viewer: RwSignal::new(None),
            error: RwSignal::new(None),
        }
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// AppContext
// ============================================================================

/// Global application context provided to all components.
#[derive(Clone, Copy)]
pub struct AppContext {
    pub explorer: ExplorerState,
    /// Set once the file view has mounted its scroll container.
    handle: StoredValue<Option<Rc<WebExplorer>>, LocalStorage>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            explorer: ExplorerState::new(),
            handle: StoredValue::new_local(None),
        }
    }

    pub fn attach(&self, explorer: Rc<WebExplorer>) {
        self.handle.set_value(Some(explorer));
    }

    pub fn is_attached(&self) -> bool {
        self.handle.with_value(|h| h.is_some())
    }

    /// Run `f` against the controller; `None` before the view mounted.
    pub fn with_explorer<R>(&self, f: impl FnOnce(&Rc<WebExplorer>) -> R) -> Option<R> {
        self.handle.with_value(|h| h.as_ref().map(f))
    }

    /// Copy displayed state out of the controller.
    pub fn sync(&self) {
        let state = self.explorer;
        self.with_explorer(|ex| {
            let current = ex.current();
            state.location.set(current.location);
            state.search_term.set(current.search_term);
            state.can_back.set(ex.navigator().can_back());
            state.can_forward.set(ex.navigator().can_forward());
            state.status.set(ex.status());
            state.details.set(ex.details());
            state.clipboard.set(ex.clipboard().op());
            state.multi_select.set(ex.selection().multi_select());
            state.tree.set(ex.tree().rows());
            state.viewer.set(ex.viewer());
            if let Some(fault) = ex.fault() {
                log::error!("file view stopped rendering: {}", fault);
                state.error.set(Some(fault.to_string()));
            }
        });
    }

    pub fn report(&self, message: impl Display) {
        let message = message.to_string();
        log::warn!("{}", message);
        self.explorer.error.set(Some(message));
    }

    /// Start an async controller action and sync when it settles.
    pub fn run<T, E>(
        &self,
        action: impl FnOnce(&Rc<WebExplorer>) -> LocalBoxFuture<'static, Result<T, E>>,
    ) where
        T: 'static,
        E: Display + 'static,
    {
        let Some(request) = self.with_explorer(action) else {
            return;
        };
        let ctx = *self;
        spawn_local(async move {
            match request.await {
                Ok(_) => ctx.explorer.error.set(None),
                Err(err) => ctx.report(err),
            }
            ctx.sync();
        });
    }

    /// Run a synchronous controller action, then sync.
    pub fn apply<R>(&self, action: impl FnOnce(&Rc<WebExplorer>) -> R) -> Option<R> {
        let result = self.with_explorer(action);
        self.sync();
        result
    }

    /// Activate the entry at `index`: enter directories, show images and
    /// videos in the viewer, open other files in a new tab.
    pub fn open(&self, index: usize) {
        match self.with_explorer(|ex| ex.open_target(index)).flatten() {
            Some(OpenTarget::Directory(path)) => self.run(move |ex| ex.navigate(&path)),
            Some(OpenTarget::Media(_)) => {
                self.apply(|ex| ex.open_viewer(index));
            }
            Some(OpenTarget::File { url, .. }) => open_in_new_tab(&url),
            None => {}
        }
    }

    pub fn step_viewer(&self, step: Step) {
        self.apply(|ex| ex.viewer_step(step));
    }

    pub fn close_viewer(&self) {
        self.apply(|ex| ex.close_viewer());
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.explorer.view_mode.set(mode);
        self.with_explorer(|ex| ex.set_view_mode(mode));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="fatal">
                    <h1>"Something went wrong"</h1>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }>
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <ExplorerShell />
        </ErrorBoundary>
    }
}
