//! Explorer controller.
//!
//! Ties navigation, the virtual scroller, selection, the clipboard and the
//! sidebar tree together behind one handle that the UI shell drives. Every
//! listing that navigation applies replaces the scroller's dataset; anything
//! superseded or failed leaves the view untouched.
//!
//! Async operations take `self: &Rc<Self>` so the returned futures own what
//! they need and can be spawned on the local executor.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::config::LayoutConfig;
use crate::core::backend::{Api, CreateKind, Transport};
use crate::core::clipboard::Clipboard;
use crate::core::details::EntryDetails;
use crate::core::dir_tree::{DirTree, Toggle};
use crate::core::error::{FetchError, MountError, NavigationError, ValidationError};
use crate::core::history::HistoryEntry;
use crate::core::image_loader::{ImageFetcher, ImageLoader, ImageSink, LoadTask};
use crate::core::navigation::{NavFuture, NavOutcome, Navigator};
use crate::core::operations::{self, OpenTarget};
use crate::core::paths;
use crate::core::pool::SlotId;
use crate::core::scroller::VirtualScroller;
use crate::core::selection::SelectionStore;
use crate::core::status::StatusSummary;
use crate::core::surface::Surface;
use crate::core::viewer::{MediaItem, MediaViewer, Step};
use crate::models::{ClipboardOp, FileEntry, ViewMode, Viewport};

pub struct Explorer<T, S: Surface, F, K> {
    navigator: Navigator<T>,
    scroller: RefCell<VirtualScroller<S, F, K>>,
    selection: RefCell<SelectionStore>,
    clipboard: RefCell<Clipboard>,
    tree: RefCell<DirTree>,
    viewer: RefCell<MediaViewer>,
}

impl<T, S, F, K> Explorer<T, S, F, K>
where
    T: Transport + 'static,
    S: Surface + 'static,
    F: ImageFetcher + 'static,
    K: ImageSink + 'static,
{
    pub fn new(
        api: Api<T>,
        surface: S,
        images: ImageLoader<F, K>,
        config: LayoutConfig,
        start: &str,
    ) -> Rc<Self> {
        Rc::new(Self {
            navigator: Navigator::new(api, start),
            scroller: RefCell::new(VirtualScroller::new(surface, images, config)),
            selection: RefCell::new(SelectionStore::new()),
            clipboard: RefCell::new(Clipboard::new()),
            tree: RefCell::new(DirTree::new()),
            viewer: RefCell::new(MediaViewer::new()),
        })
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn navigator(&self) -> &Navigator<T> {
        &self.navigator
    }

    pub fn scroller(&self) -> Ref<'_, VirtualScroller<S, F, K>> {
        self.scroller.borrow()
    }

    pub fn selection(&self) -> Ref<'_, SelectionStore> {
        self.selection.borrow()
    }

    pub fn clipboard(&self) -> Ref<'_, Clipboard> {
        self.clipboard.borrow()
    }

    pub fn tree(&self) -> Ref<'_, DirTree> {
        self.tree.borrow()
    }

    pub fn current(&self) -> HistoryEntry {
        self.navigator.current()
    }

    pub fn status(&self) -> StatusSummary {
        let entries = self.scroller.borrow().dataset();
        StatusSummary::compute(&entries, &self.selection.borrow())
    }

    /// First selected entry, if any.
    pub fn focused_entry(&self) -> Option<FileEntry> {
        let index = self.selection.borrow().first()?;
        self.scroller.borrow().entry(index).cloned()
    }

    /// Details panel contents for the focused entry.
    pub fn details(&self) -> Option<EntryDetails> {
        self.focused_entry().as_ref().map(EntryDetails::of)
    }

    /// Set once the scroller stopped rendering because a node could not be
    /// created.
    pub fn fault(&self) -> Option<MountError> {
        self.scroller.borrow().fault().cloned()
    }

    fn top_index(&self) -> usize {
        self.scroller.borrow().visible_top_index()
    }

    fn selected_entries(&self) -> Vec<FileEntry> {
        let entries = self.scroller.borrow().dataset();
        self.selection.borrow().selected_entries(&entries)
    }

    fn apply(&self, outcome: &NavOutcome) {
        if let NavOutcome::Applied(listing) = outcome {
            self.viewer.borrow_mut().close();
            let mut selection = self.selection.borrow_mut();
            selection.clear();
            self.scroller.borrow_mut().set_data(
                Rc::clone(&listing.entries),
                listing.anchor,
                &mut selection,
            );
        }
    }

    fn settle(self: &Rc<Self>, request: NavFuture) -> NavFuture {
        let this = Rc::clone(self);
        async move {
            let outcome = request.await?;
            this.apply(&outcome);
            Ok(outcome)
        }
        .boxed_local()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn navigate(self: &Rc<Self>, location: &str) -> NavFuture {
        let top = self.top_index();
        self.settle(self.navigator.navigate(location, top))
    }

    pub fn search(self: &Rc<Self>, term: &str) -> NavFuture {
        let top = self.top_index();
        self.settle(self.navigator.search(term, top))
    }

    pub fn back(self: &Rc<Self>) -> NavFuture {
        let top = self.top_index();
        self.settle(self.navigator.back(top))
    }

    pub fn forward(self: &Rc<Self>) -> NavFuture {
        let top = self.top_index();
        self.settle(self.navigator.forward(top))
    }

    pub fn up(self: &Rc<Self>) -> NavFuture {
        let top = self.top_index();
        self.settle(self.navigator.up(top))
    }

    pub fn refresh(self: &Rc<Self>) -> NavFuture {
        let top = self.top_index();
        self.settle(self.navigator.refresh(top))
    }

    /// What activating the entry at `index` should do. Directories are
    /// navigated by the caller through [`Explorer::navigate`].
    pub fn open_target(&self, index: usize) -> Option<OpenTarget> {
        self.scroller.borrow().entry(index).map(operations::open_target)
    }

    // =========================================================================
    // File operations
    // =========================================================================

    fn rejected(err: ValidationError) -> NavFuture {
        future::ready(Err(NavigationError::from(err))).boxed_local()
    }

    fn location(&self) -> String {
        self.navigator.current().location
    }

    pub fn create(self: &Rc<Self>, kind: CreateKind, name: &str) -> NavFuture {
        let request = match operations::create_request(kind, name, &self.location()) {
            Ok(request) => request,
            Err(err) => return Self::rejected(err),
        };
        log::info!("create {:?} {} in {}", kind, request.name, request.path);
        let response = self.navigator.api().create(kind, &request);
        self.settle(self.navigator.reload_with(response, self.top_index()))
    }

    /// Rename the first selected entry.
    pub fn rename(self: &Rc<Self>, new_name: &str) -> NavFuture {
        let Some(entry) = self.focused_entry() else {
            return Self::rejected(ValidationError::NoSelection);
        };
        let request = match operations::rename_request(&entry.name, new_name, &self.location()) {
            Ok(Some(request)) => request,
            Ok(None) => return future::ready(Ok(NavOutcome::Unchanged)).boxed_local(),
            Err(err) => return Self::rejected(err),
        };
        log::info!("rename {} -> {}", request.old_name, request.new_name);
        let response = self.navigator.api().rename(&request);
        self.settle(self.navigator.reload_with(response, self.top_index()))
    }

    pub fn delete(self: &Rc<Self>) -> NavFuture {
        let request = match operations::delete_request(&self.location(), self.selected_entries()) {
            Ok(request) => request,
            Err(err) => return Self::rejected(err),
        };
        log::info!("delete {} entries in {}", request.file_list.len(), request.path);
        let response = self.navigator.api().delete(&request);
        self.settle(self.navigator.reload_with(response, self.top_index()))
    }

    /// Put the selection on the clipboard. The same operation twice in a row
    /// clears it; returns the pending operation afterwards.
    pub fn set_clipboard(&self, op: ClipboardOp) -> Result<Option<ClipboardOp>, ValidationError> {
        let items = self.selected_entries();
        let location = self.location();
        self.clipboard.borrow_mut().set(op, &location, items)
    }

    pub fn paste(self: &Rc<Self>) -> NavFuture {
        let request = match self.clipboard.borrow().paste_request(&self.location()) {
            Ok(request) => request,
            Err(err) => return Self::rejected(err),
        };
        log::info!(
            "paste ({:?}) {} entries {} -> {}",
            request.operation,
            request.items.len(),
            request.source_path,
            request.destination_path
        );
        let response = self.navigator.api().paste(&request);
        let settled = self.settle(self.navigator.reload_with(response, self.top_index()));
        let this = Rc::clone(self);
        async move {
            let outcome = settled.await?;
            if matches!(outcome, NavOutcome::Applied(_)) {
                this.clipboard.borrow_mut().clear();
            }
            Ok(outcome)
        }
        .boxed_local()
    }

    // =========================================================================
    // Sidebar tree
    // =========================================================================

    pub fn load_tree(self: &Rc<Self>) -> LocalBoxFuture<'static, Result<(), FetchError>> {
        let request = self.navigator.api().list_subdirs(&paths::root());
        let this = Rc::clone(self);
        async move {
            let records = request.await?.unwrap_or_default();
            this.tree.borrow_mut().set_roots(records);
            Ok(())
        }
        .boxed_local()
    }

    /// Expand or collapse a tree node, fetching its children on first use.
    pub fn toggle_dir(self: &Rc<Self>, full_path: &str) -> LocalBoxFuture<'static, Result<(), FetchError>> {
        let toggle = self.tree.borrow_mut().toggle(full_path);
        let Toggle::Load(path) = toggle else {
            return future::ready(Ok(())).boxed_local();
        };
        let request = self.navigator.api().list_subdirs(&path);
        let this = Rc::clone(self);
        async move {
            let records = request.await?.unwrap_or_default();
            this.tree.borrow_mut().insert_children(&path, records);
            Ok(())
        }
        .boxed_local()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn click(&self, index: usize) {
        if index >= self.scroller.borrow().len() {
            return;
        }
        let mut selection = self.selection.borrow_mut();
        selection.apply_click(index);
        self.scroller.borrow_mut().refresh_selection(&selection);
    }

    pub fn set_multi_select(&self, enabled: bool) {
        let mut selection = self.selection.borrow_mut();
        selection.set_multi_select(enabled);
        self.scroller.borrow_mut().refresh_selection(&selection);
    }

    pub fn select_all(&self) {
        let mut selection = self.selection.borrow_mut();
        let len = self.scroller.borrow().len();
        selection.select_all(len);
        self.scroller.borrow_mut().refresh_selection(&selection);
    }

    pub fn clear_selection(&self) {
        let mut selection = self.selection.borrow_mut();
        selection.clear();
        self.scroller.borrow_mut().refresh_selection(&selection);
    }

    // =========================================================================
    // Media viewer
    // =========================================================================

    pub fn viewer(&self) -> Option<MediaItem> {
        let entries = self.scroller.borrow().dataset();
        self.viewer.borrow().item(&entries)
    }

    /// Show the image or video at `index` in the viewer and focus it in the
    /// listing. `None` for any other entry.
    pub fn open_viewer(&self, index: usize) -> Option<MediaItem> {
        let entries = self.scroller.borrow().dataset();
        let item = self.viewer.borrow_mut().open(&entries, index)?;
        self.focus(index);
        Some(item)
    }

    /// Move the viewer to the nearest image or video in `step`'s direction.
    pub fn viewer_step(&self, step: Step) -> Option<MediaItem> {
        let entries = self.scroller.borrow().dataset();
        let index = self.viewer.borrow_mut().step(&entries, step)?;
        self.focus(index);
        self.viewer.borrow().item(&entries)
    }

    pub fn close_viewer(&self) {
        self.viewer.borrow_mut().close();
    }

    /// Select only `index` and bring it into view.
    fn focus(&self, index: usize) {
        self.selection.borrow_mut().select_only(index);
        if !self.scroll_to_index(index) {
            let selection = self.selection.borrow();
            self.scroller.borrow_mut().refresh_selection(&selection);
        }
    }

    // =========================================================================
    // Scroller
    // =========================================================================

    pub fn initialize(&self, viewport: Viewport, mode: ViewMode) {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().initialize(viewport, mode, &selection);
    }

    /// Returns `true` when the host must schedule [`Explorer::on_frame`].
    pub fn on_scroll(&self, offset: f64) -> bool {
        self.scroller.borrow_mut().on_scroll(offset)
    }

    pub fn on_frame(&self) {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().on_frame(&selection);
    }

    pub fn resize(&self, viewport: Viewport) {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().resize(viewport, &selection);
    }

    pub fn set_view_mode(&self, mode: ViewMode) -> bool {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().set_view_mode(mode, &selection)
    }

    pub fn scroll_to_index(&self, index: usize) -> bool {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().scroll_to_index(index, &selection)
    }

    pub fn scroll_to_top(&self) {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().scroll_to_top(&selection);
    }

    pub fn scroll_to_bottom(&self) {
        let selection = self.selection.borrow();
        self.scroller.borrow_mut().scroll_to_bottom(&selection);
    }

    pub fn image_visible(&self, slot: SlotId) -> Option<LoadTask> {
        self.scroller.borrow().image_visible(slot)
    }

    pub fn dispose(&self) {
        self.scroller.borrow_mut().dispose();
    }
}
