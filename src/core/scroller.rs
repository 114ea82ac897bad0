//! Virtual scroller: one stateful unit per scroll container.
//!
//! Composes the layout engine, the node pool and the image loader. The
//! scroller starts `Uninitialized` (no viewport measured yet) and becomes
//! `Ready` on [`VirtualScroller::initialize`]. While ready, a render pass runs
//! on data replacement, resize, view-mode change, explicit scrolls, and on
//! the animation frame following one or more scroll events.
//!
//! Scroll events never render directly: [`VirtualScroller::on_scroll`] only
//! records the latest offset and reports whether a frame must be requested,
//! so any number of events before the next frame collapse into one pass.

use std::collections::HashSet;
use std::rc::Rc;

use crate::config::LayoutConfig;
use crate::core::error::MountError;
use crate::core::image_loader::{ImageFetcher, ImageLoader, ImageSink, LoadTask};
use crate::core::layout::{Layout, VisibleRange};
use crate::core::pool::{NodePool, SlotId};
use crate::core::selection::SelectionStore;
use crate::core::surface::Surface;
use crate::models::{FileEntry, ViewMode, Viewport};

/// Offsets closer than this are treated as the same position.
const SCROLL_EPSILON: f64 = 0.5;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollerState {
    #[default]
    Uninitialized,
    Ready,
    /// The surface could not create a node; rendering has stopped until the
    /// next [`VirtualScroller::initialize`].
    Failed,
}

/// Summary of the most recent render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderReport {
    pub range: VisibleRange,
    /// Nodes attached to the content layer after the pass.
    pub attached: usize,
    /// Nodes held by the pool, attached or not.
    pub pooled: usize,
    pub empty: bool,
}

pub struct VirtualScroller<S: Surface, F, K> {
    surface: S,
    pool: NodePool<S::Node>,
    images: ImageLoader<F, K>,
    config: LayoutConfig,
    state: ScrollerState,
    viewport: Viewport,
    mode: ViewMode,
    entries: Rc<[FileEntry]>,
    offset: f64,
    frame_pending: bool,
    showing_empty: bool,
    passes: usize,
    last_report: Option<RenderReport>,
    fault: Option<MountError>,
}

impl<S, F, K> VirtualScroller<S, F, K>
where
    S: Surface,
    F: ImageFetcher + 'static,
    K: ImageSink + 'static,
{
    pub fn new(surface: S, images: ImageLoader<F, K>, config: LayoutConfig) -> Self {
        Self {
            surface,
            pool: NodePool::new(),
            images,
            config,
            state: ScrollerState::Uninitialized,
            viewport: Viewport::default(),
            mode: ViewMode::default(),
            entries: Rc::from(Vec::new()),
            offset: 0.0,
            frame_pending: false,
            showing_empty: false,
            passes: 0,
            last_report: None,
            fault: None,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn state(&self) -> ScrollerState {
        self.state
    }

    /// Why rendering stopped, once the scroller has [`ScrollerState::Failed`].
    pub fn fault(&self) -> Option<&MountError> {
        self.fault.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> f64 {
        self.offset
    }

    pub fn dataset(&self) -> Rc<[FileEntry]> {
        Rc::clone(&self.entries)
    }

    pub fn entry(&self, index: usize) -> Option<&FileEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn images(&self) -> &ImageLoader<F, K> {
        &self.images
    }

    pub fn pool(&self) -> &NodePool<S::Node> {
        &self.pool
    }

    pub fn last_report(&self) -> Option<RenderReport> {
        self.last_report
    }

    /// Number of render passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn frame_pending(&self) -> bool {
        self.frame_pending
    }

    fn layout(&self) -> Layout {
        Layout::new(self.mode, self.viewport, &self.config)
    }

    /// First index of the row at the top of the viewport.
    pub fn visible_top_index(&self) -> usize {
        self.layout().top_index(self.entries.len(), self.offset)
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Measure the container and render whatever data is already set.
    pub fn initialize(&mut self, viewport: Viewport, mode: ViewMode, selection: &SelectionStore) {
        self.viewport = viewport;
        self.mode = mode;
        self.surface.set_view_mode(mode);
        self.state = ScrollerState::Ready;
        self.fault = None;
        log::debug!("scroller ready: {:?} {:?}", mode, viewport);
        let offset = self.offset;
        self.jump(offset, selection);
    }

    /// Replace the dataset and render from the top or from `anchor`.
    ///
    /// The pool is cleared: bindings made against the previous dataset are
    /// meaningless for the new one.
    pub fn set_data(
        &mut self,
        entries: Rc<[FileEntry]>,
        anchor: Option<usize>,
        selection: &mut SelectionStore,
    ) {
        selection.prune(entries.len());
        self.images.reset();
        self.pool.dispose(&mut self.surface);
        self.entries = entries;
        self.frame_pending = false;

        let len = self.entries.len();
        self.offset = anchor
            .map(|index| self.layout().anchor_offset(len, index))
            .unwrap_or(0.0);
        log::debug!("dataset replaced: {} entries, anchor {:?}", len, anchor);

        if self.state == ScrollerState::Ready {
            let offset = self.offset;
            self.jump(offset, selection);
        }
    }

    /// Record a scroll position reported by the container.
    ///
    /// Returns `true` when the caller must schedule [`Self::on_frame`];
    /// further events before that frame only update the offset.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        if self.state != ScrollerState::Ready {
            return false;
        }
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        let offset = offset.min(self.layout().max_scroll(self.entries.len()));
        if (offset - self.offset).abs() < SCROLL_EPSILON {
            return false;
        }
        self.offset = offset;
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Animation-frame callback following [`Self::on_scroll`].
    pub fn on_frame(&mut self, selection: &SelectionStore) {
        if !self.frame_pending {
            return;
        }
        self.frame_pending = false;
        self.render(selection);
    }

    /// The container changed size. Keeps the top-visible item in place.
    pub fn resize(&mut self, viewport: Viewport, selection: &SelectionStore) {
        if viewport == self.viewport {
            return;
        }
        let top = (self.offset > 0.0).then(|| self.visible_top_index());
        self.viewport = viewport;
        if self.state != ScrollerState::Ready {
            return;
        }
        let len = self.entries.len();
        let offset = top
            .map(|index| self.layout().anchor_offset(len, index))
            .unwrap_or(0.0);
        self.jump(offset, selection);
    }

    /// Switch density. Pool and image cache are rebuilt from scratch and the
    /// top-visible item stays at the top.
    pub fn set_view_mode(&mut self, mode: ViewMode, selection: &SelectionStore) -> bool {
        if mode == self.mode {
            return false;
        }
        let top = self.visible_top_index();
        self.images.clear();
        self.pool.dispose(&mut self.surface);
        self.mode = mode;
        self.surface.set_view_mode(mode);
        log::debug!("view mode -> {:?}, keeping index {}", mode, top);

        let len = self.entries.len();
        self.offset = if self.offset > 0.0 {
            self.layout().anchor_offset(len, top)
        } else {
            0.0
        };
        if self.state == ScrollerState::Ready {
            let offset = self.offset;
            self.jump(offset, selection);
        }
        true
    }

    /// Scroll the minimum distance that shows `index` fully.
    ///
    /// Returns `false` when it was already visible (nothing rendered).
    pub fn scroll_to_index(&mut self, index: usize, selection: &SelectionStore) -> bool {
        if self.state != ScrollerState::Ready {
            return false;
        }
        match self
            .layout()
            .reveal_offset(self.entries.len(), index, self.offset)
        {
            Some(offset) => {
                self.jump(offset, selection);
                true
            }
            None => false,
        }
    }

    pub fn scroll_to_top(&mut self, selection: &SelectionStore) {
        if self.state == ScrollerState::Ready {
            self.jump(0.0, selection);
        }
    }

    pub fn scroll_to_bottom(&mut self, selection: &SelectionStore) {
        if self.state == ScrollerState::Ready {
            let offset = self.layout().max_scroll(self.entries.len());
            self.jump(offset, selection);
        }
    }

    /// Re-render so selected markers follow `selection`.
    pub fn refresh_selection(&mut self, selection: &SelectionStore) {
        self.render(selection);
    }

    /// A thumbnail placeholder entered the lookahead area.
    pub fn image_visible(&self, slot: SlotId) -> Option<LoadTask> {
        self.images.on_visible(slot)
    }

    /// Tear down: abort fetches, release handles and drop every node.
    pub fn dispose(&mut self) {
        self.images.clear();
        self.pool.dispose(&mut self.surface);
        if self.showing_empty {
            self.surface.set_empty(false);
            self.showing_empty = false;
        }
        self.frame_pending = false;
        self.state = ScrollerState::Uninitialized;
        self.last_report = None;
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn jump(&mut self, offset: f64, selection: &SelectionStore) {
        let max = self.layout().max_scroll(self.entries.len());
        self.offset = offset.clamp(0.0, max);
        self.render(selection);
        self.surface.scroll_to(self.offset);
    }

    fn render(&mut self, selection: &SelectionStore) {
        if self.state != ScrollerState::Ready {
            return;
        }
        let layout = self.layout();
        let len = self.entries.len();
        self.surface.set_total_extent(layout.total_extent(len));
        self.offset = self.offset.min(layout.max_scroll(len));
        let range = layout.compute(len, self.offset);

        if len == 0 {
            if !self.showing_empty {
                self.surface.set_empty(true);
                self.showing_empty = true;
            }
        } else if self.showing_empty {
            self.surface.set_empty(false);
            self.showing_empty = false;
        }

        self.pool.begin_pass(range.indices());
        let mut active_keys = HashSet::new();
        for index in range.indices() {
            let acquired = match self.pool.acquire(index, &mut self.surface) {
                Ok(acquired) => acquired,
                Err(err) => {
                    log::error!("render stopped at index {}: {}", index, err);
                    self.state = ScrollerState::Failed;
                    self.fault = Some(err);
                    return;
                }
            };
            let slot = acquired.slot;
            let entry = &self.entries[index];
            let node = self.pool.node(slot);

            if acquired.rebound {
                self.surface.bind_node(node, index, entry, self.mode);
                if self.images.unregister(slot) {
                    self.surface.unwatch_thumbnail(node);
                }
            }
            match entry.thumbnail_key(self.mode) {
                Some(key) => {
                    if self.images.register(slot, &key) {
                        self.surface.watch_thumbnail(node, entry);
                    }
                    active_keys.insert(key);
                }
                None => {
                    if self.images.unregister(slot) {
                        self.surface.unwatch_thumbnail(node);
                    }
                }
            }

            self.surface
                .place_node(node, layout.rect(index), selection.contains(index));
            self.pool.attach(slot, &mut self.surface);
        }

        for slot in self.pool.release_inactive(&mut self.surface) {
            if self.images.unregister(slot) {
                self.surface.unwatch_thumbnail(self.pool.node(slot));
            }
        }
        self.images.reclaim(&active_keys);

        self.passes += 1;
        self.last_report = Some(RenderReport {
            range,
            attached: self.pool.attached_count(),
            pooled: self.pool.len(),
            empty: len == 0,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::static_icons;
    use crate::core::mock::{MockFetcher, MockSurface, RecordingSink, Shown, sample_entries};

    type TestScroller = VirtualScroller<MockSurface, MockFetcher, RecordingSink>;

    fn scroller() -> TestScroller {
        let images = ImageLoader::new(MockFetcher::default(), RecordingSink::default(), 0);
        VirtualScroller::new(MockSurface::default(), images, LayoutConfig::default())
    }

    fn ready(len: usize, mode: ViewMode) -> (TestScroller, SelectionStore) {
        let mut s = scroller();
        let mut sel = SelectionStore::new();
        s.set_data(sample_entries(len).into(), None, &mut sel);
        s.initialize(Viewport::new(1024.0, 720.0), mode, &sel);
        (s, sel)
    }

    fn scroll(s: &mut TestScroller, sel: &SelectionStore, offset: f64) {
        if s.on_scroll(offset) {
            s.on_frame(sel);
        }
    }

    #[test]
    fn test_uninitialized_does_not_render() {
        let mut s = scroller();
        let mut sel = SelectionStore::new();
        s.set_data(sample_entries(10).into(), None, &mut sel);
        assert_eq!(s.state(), ScrollerState::Uninitialized);
        assert_eq!(s.passes(), 0);
        assert!(!s.on_scroll(100.0));
        assert!(s.surface().attached.is_empty());
    }

    #[test]
    fn test_initial_render_list() {
        let (s, _) = ready(1000, ViewMode::CompactList);
        let report = s.last_report().unwrap();
        // 20 visible rows + 5 buffer rows below
        assert_eq!(report.range.start, 0);
        assert_eq!(report.range.end, 26);
        assert_eq!(report.attached, 26);
        assert_eq!(s.surface().extent, 36_000.0);
        assert_eq!(s.surface().mode, Some(ViewMode::CompactList));
    }

    #[test]
    fn test_scroll_events_coalesce_to_one_frame() {
        let (mut s, sel) = ready(1000, ViewMode::CompactList);
        let before = s.passes();

        assert!(s.on_scroll(100.0));
        assert!(!s.on_scroll(200.0));
        assert!(!s.on_scroll(3600.0));
        assert_eq!(s.passes(), before);

        s.on_frame(&sel);
        assert_eq!(s.passes(), before + 1);
        // The single pass reflects the latest offset
        assert_eq!(s.last_report().unwrap().range.start, 95);

        // A stray frame without new scrolls does nothing
        s.on_frame(&sel);
        assert_eq!(s.passes(), before + 1);
    }

    #[test]
    fn test_scroll_to_same_offset_is_ignored() {
        let (mut s, sel) = ready(1000, ViewMode::CompactList);
        scroll(&mut s, &sel, 360.0);
        assert!(!s.on_scroll(360.0));
    }

    #[test]
    fn test_pool_bounded_over_large_dataset() {
        let mut s = scroller();
        let mut sel = SelectionStore::new();
        s.set_data(sample_entries(100_000).into(), None, &mut sel);
        // 40 visible rows
        s.initialize(Viewport::new(800.0, 1440.0), ViewMode::CompactList, &sel);

        // Visible rows, one partial row at each edge, plus buffer on both sides
        let bound = 40 + 2 + 2 * LayoutConfig::default().list_buffer_rows;
        let max = 100_000.0 * 36.0 - 1440.0;
        let mut offset = 0.0;
        for step in 0..2_000 {
            offset = (offset + 1_777.0 * (step % 7) as f64) % max;
            scroll(&mut s, &sel, offset);
            assert!(s.last_report().unwrap().attached <= bound);
            assert!(s.surface().attached.len() <= bound);
        }
        scroll(&mut s, &sel, max);
        assert!(s.pool().len() <= bound);
        assert_eq!(s.last_report().unwrap().range.end, 100_000);
    }

    #[test]
    fn test_selection_survives_recycling() {
        let (mut s, mut sel) = ready(5000, ViewMode::CompactList);
        sel.select_only(5);
        s.refresh_selection(&sel);
        assert_eq!(s.surface().selected_indices(), vec![5]);

        scroll(&mut s, &sel, 36.0 * 3000.0);
        assert!(s.surface().selected_indices().is_empty());
        assert!(sel.contains(5));

        scroll(&mut s, &sel, 0.0);
        assert_eq!(s.surface().selected_indices(), vec![5]);
    }

    #[test]
    fn test_empty_round_trip() {
        let (mut s, mut sel) = ready(50, ViewMode::LargeGrid);
        s.set_data(Vec::new().into(), None, &mut sel);
        assert!(s.surface().empty);
        assert!(s.surface().attached.is_empty());
        assert!(s.last_report().unwrap().empty);

        s.set_data(sample_entries(12).into(), None, &mut sel);
        assert!(!s.surface().empty);
        assert_eq!(s.surface().attached.len(), 12);
        assert_eq!(s.surface().attached_indices(), (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_set_data_prunes_selection() {
        let (mut s, mut sel) = ready(50, ViewMode::CompactList);
        sel.select_all(50);
        s.set_data(sample_entries(10).into(), None, &mut sel);
        assert_eq!(sel.len(), 10);
        assert!(!sel.contains(10));
    }

    #[test]
    fn test_set_data_with_anchor() {
        let (mut s, mut sel) = ready(10, ViewMode::CompactList);
        s.set_data(sample_entries(1000).into(), Some(300), &mut sel);
        assert_eq!(s.visible_top_index(), 300);
        assert_eq!(s.surface().scrolled_to.last().copied(), Some(300.0 * 36.0));
    }

    #[test]
    fn test_scroll_to_index_minimal() {
        let (mut s, sel) = ready(1000, ViewMode::CompactList);
        assert!(!s.scroll_to_index(3, &sel));
        assert!(s.scroll_to_index(100, &sel));
        assert_eq!(s.scroll_offset(), 101.0 * 36.0 - 720.0);
        assert!(s.scroll_to_index(0, &sel));
        assert_eq!(s.scroll_offset(), 0.0);
    }

    #[test]
    fn test_scroll_to_bottom_and_top() {
        let (mut s, sel) = ready(1000, ViewMode::CompactList);
        s.scroll_to_bottom(&sel);
        assert_eq!(s.scroll_offset(), 36_000.0 - 720.0);
        assert_eq!(s.last_report().unwrap().range.end, 1000);
        s.scroll_to_top(&sel);
        assert_eq!(s.visible_top_index(), 0);
    }

    #[test]
    fn test_view_mode_switch_disposes_and_keeps_top() {
        let (mut s, sel) = ready(1000, ViewMode::CompactList);
        scroll(&mut s, &sel, 36.0 * 400.0);
        assert_eq!(s.visible_top_index(), 400);
        let destroyed_before = s.surface().destroyed;

        assert!(s.set_view_mode(ViewMode::LargeGrid, &sel));
        assert!(s.surface().destroyed > destroyed_before);
        // 4 columns at 1024px: index 400 starts row 100
        assert_eq!(s.visible_top_index(), 400);
        assert_eq!(s.surface().mode, Some(ViewMode::LargeGrid));
        assert!(!s.set_view_mode(ViewMode::LargeGrid, &sel));
    }

    #[test]
    fn test_resize_keeps_top_item() {
        let (mut s, sel) = ready(1000, ViewMode::LargeGrid);
        scroll(&mut s, &sel, 256.0 * 10.0);
        assert_eq!(s.visible_top_index(), 40);

        s.resize(Viewport::new(1536.0, 720.0), &sel);
        // 6 columns now; index 40 sits in row 6
        assert_eq!(s.visible_top_index(), 36);
        assert_eq!(s.last_report().unwrap().range.columns, 6);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_grid_registers_thumbnails_list_does_not() {
        let (mut s, sel) = ready(8, ViewMode::CompactList);
        assert!(s.surface().watched.is_empty());

        s.set_view_mode(ViewMode::LargeGrid, &sel);
        // sample_entries makes every fourth entry an image
        assert_eq!(s.surface().watched.len(), 2);

        let slot = s.surface().watched_slots()[0];
        let task = s.image_visible(slot).unwrap();
        let key = s.images().key_of(slot).unwrap();
        s.images().fetcher().resolve(&key, Ok("blob:x".into()));
        task.await;
        assert_eq!(s.images().sink().last(slot), Some(Shown::Image("blob:x".into())));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_thumbnails_reclaimed_when_scrolled_away() {
        let mut s = scroller();
        let mut sel = SelectionStore::new();
        s.set_data(sample_entries(4000).into(), None, &mut sel);
        s.initialize(Viewport::new(1024.0, 720.0), ViewMode::LargeGrid, &sel);

        let slot = s.surface().watched_slots()[0];
        let key = s.images().key_of(slot).unwrap();
        let task = s.image_visible(slot).unwrap();
        s.images().fetcher().resolve(&key, Ok("blob:first".into()));
        task.await;
        assert!(s.images().is_cached(&key));

        scroll(&mut s, &sel, 256.0 * 500.0);
        assert!(!s.images().is_cached(&key));
        assert_eq!(s.images().fetcher().released(), vec!["blob:first".to_string()]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_new_data_aborts_pending_thumbnails() {
        let (mut s, mut sel) = ready(8, ViewMode::LargeGrid);
        let slot = s.surface().watched_slots()[0];
        let key = s.images().key_of(slot).unwrap();
        let task = s.image_visible(slot).unwrap();
        let aborts = s.images().fetcher().aborts();

        s.set_data(sample_entries(12).into(), None, &mut sel);
        assert!(s.images().fetcher().aborts() > aborts);

        s.images().fetcher().resolve(&key, Ok("blob:stale".into()));
        task.await;
        assert!(s.images().sink().shown().is_empty());
        assert!(!s.images().is_cached(&key));
        assert_eq!(s.images().in_flight_len(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_view_mode_switch_aborts_pending_thumbnails() {
        let (mut s, sel) = ready(8, ViewMode::LargeGrid);
        let slot = s.surface().watched_slots()[0];
        let key = s.images().key_of(slot).unwrap();
        let task = s.image_visible(slot).unwrap();
        let aborts = s.images().fetcher().aborts();

        assert!(s.set_view_mode(ViewMode::MediumGrid, &sel));
        assert!(s.images().fetcher().aborts() > aborts);

        s.images().fetcher().resolve(&key, Ok("blob:stale".into()));
        task.await;
        assert!(s.images().sink().shown().is_empty());
        assert!(!s.images().is_cached(&key));
    }

    #[test]
    fn test_scroll_past_end_clamps_to_last_row() {
        let (mut s, sel) = ready(1000, ViewMode::LargeGrid);
        scroll(&mut s, &sel, 1e300);
        let max = 250.0 * 256.0 - 720.0;
        assert_eq!(s.scroll_offset(), max);
        // 4 columns; the top row at max scroll is row 247
        assert_eq!(s.visible_top_index(), 988);
        assert_eq!(s.last_report().unwrap().range.end, 1000);

        assert!(!s.on_scroll(f64::MAX));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_reattached_node_resets_released_thumbnail() {
        // 20 rows of 4; the bottom window needs fewer nodes than the top one
        let (mut s, sel) = ready(80, ViewMode::LargeGrid);
        let slot = SlotId(24);
        assert_eq!(s.pool().bound_index(slot), Some(24));

        let key = s.images().key_of(slot).unwrap();
        let task = s.image_visible(slot).unwrap();
        s.images().fetcher().resolve(&key, Ok("blob:24".into()));
        task.await;
        assert_eq!(s.images().sink().last(slot), Some(Shown::Image("blob:24".into())));

        scroll(&mut s, &sel, 20.0 * 256.0);
        assert!(!s.surface().attached.contains(&24));
        assert_eq!(s.pool().bound_index(slot), Some(24));
        assert!(s.images().fetcher().released().contains(&"blob:24".to_string()));

        s.surface.placeholders.clear();
        scroll(&mut s, &sel, 0.0);
        assert!(s.surface().attached.contains(&24));
        assert_eq!(s.surface().bound.get(&24), Some(&24));
        assert_eq!(s.surface().placeholders.get(&24), Some(&static_icons::IMAGE));
    }

    #[test]
    fn test_node_creation_failure_stops_rendering() {
        let images = ImageLoader::new(MockFetcher::default(), RecordingSink::default(), 0);
        let surface = MockSurface {
            fail_create: true,
            ..MockSurface::default()
        };
        let mut s = VirtualScroller::new(surface, images, LayoutConfig::default());
        let mut sel = SelectionStore::new();
        s.set_data(sample_entries(100).into(), None, &mut sel);
        s.initialize(Viewport::new(1024.0, 720.0), ViewMode::CompactList, &sel);

        assert_eq!(s.state(), ScrollerState::Failed);
        assert!(matches!(s.fault(), Some(MountError::ElementCreation(_))));
        assert!(s.surface().attached.is_empty());
        assert_eq!(s.pool().len(), 0);
        assert!(s.last_report().is_none());
        assert!(!s.on_scroll(360.0));

        s.surface.fail_create = false;
        s.initialize(Viewport::new(1024.0, 720.0), ViewMode::CompactList, &sel);
        assert_eq!(s.state(), ScrollerState::Ready);
        assert!(s.fault().is_none());
        assert_eq!(s.surface().attached_indices().len(), 26);
    }

    #[test]
    fn test_dispose_returns_to_uninitialized() {
        let (mut s, _) = ready(100, ViewMode::MediumGrid);
        s.dispose();
        assert_eq!(s.state(), ScrollerState::Uninitialized);
        assert!(s.surface().attached.is_empty());
        assert_eq!(s.pool().len(), 0);
    }
}
