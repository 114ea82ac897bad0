//! Scriptable stand-ins for the browser seams.
//!
//! Compiled for unit tests and, behind the `mock` feature, for the
//! integration tests under `tests/`.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{self, LocalBoxFuture};
use serde_json::Value;

use crate::core::backend::Transport;
use crate::core::error::{FetchError, MountError};
use crate::core::image_loader::{ImageFetcher, ImageSink};
use crate::core::layout::ItemRect;
use crate::core::pool::SlotId;
use crate::core::surface::Surface;
use crate::models::{FOLDER_TAG, FileEntry, ViewMode};

// =============================================================================
// Fixtures
// =============================================================================

/// `n` entries under `C:\data`. Every fourth entry (index % 4 == 0) is an
/// image with its own thumbnail; index % 4 == 2 is a folder.
pub fn sample_entries(n: usize) -> Vec<FileEntry> {
    (0..n)
        .map(|i| match i % 4 {
            0 => FileEntry {
                name: format!("file{i}.png"),
                path: "C:\\data".to_string(),
                kind: "png".to_string(),
                size: "2.00KB".to_string(),
                icon: format!("C:\\data\\file{i}.png"),
                ..Default::default()
            },
            2 => FileEntry {
                name: format!("folder{i}"),
                path: "C:\\data".to_string(),
                kind: FOLDER_TAG.to_string(),
                size: "-".to_string(),
                ..Default::default()
            },
            _ => FileEntry {
                name: format!("file{i}.txt"),
                path: "C:\\data".to_string(),
                kind: "txt".to_string(),
                size: "512B".to_string(),
                ..Default::default()
            },
        })
        .collect()
}

/// Backend listing JSON of `n` plain files under `location`.
pub fn listing_json(location: &str, n: usize) -> Value {
    let entries: Vec<Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "name": format!("item{i}.txt"),
                "path": location,
                "type": "txt",
                "modified": "2024-01-01 00:00",
                "size": "1B",
            })
        })
        .collect();
    Value::Array(entries)
}

// =============================================================================
// Transport
// =============================================================================

enum Scripted {
    Ready(Result<Value, FetchError>),
    Held(oneshot::Receiver<Result<Value, FetchError>>),
}

/// Response held open until the test releases it.
pub struct HeldResponse {
    sender: oneshot::Sender<Result<Value, FetchError>>,
}

impl HeldResponse {
    pub fn release(self, result: Result<Value, FetchError>) {
        let _ = self.sender.send(result);
    }
}

/// Answers each endpoint from a FIFO of scripted responses. Unscripted
/// calls fail with a network error.
#[derive(Default)]
pub struct MockTransport {
    queues: RefCell<HashMap<&'static str, VecDeque<Scripted>>>,
    calls: RefCell<Vec<(&'static str, Value)>>,
}

impl MockTransport {
    fn enqueue(&self, endpoint: &'static str, scripted: Scripted) {
        self.queues
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, endpoint: &'static str, value: Value) {
        self.enqueue(endpoint, Scripted::Ready(Ok(value)));
    }

    pub fn fail(&self, endpoint: &'static str, error: FetchError) {
        self.enqueue(endpoint, Scripted::Ready(Err(error)));
    }

    pub fn hold(&self, endpoint: &'static str) -> HeldResponse {
        let (sender, receiver) = oneshot::channel();
        self.enqueue(endpoint, Scripted::Held(receiver));
        HeldResponse { sender }
    }

    pub fn calls(&self) -> Vec<(&'static str, Value)> {
        self.calls.borrow().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls.borrow().iter().filter(|(e, _)| *e == endpoint).count()
    }
}

impl Transport for MockTransport {
    fn post(
        &self,
        endpoint: &'static str,
        body: Value,
    ) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        self.calls.borrow_mut().push((endpoint, body));
        let next = self
            .queues
            .borrow_mut()
            .get_mut(endpoint)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(Scripted::Ready(result)) => future::ready(result).boxed_local(),
            Some(Scripted::Held(receiver)) => async move {
                receiver.await.unwrap_or(Err(FetchError::Aborted))
            }
            .boxed_local(),
            None => future::ready(Err(FetchError::NetworkError(format!(
                "no scripted response for {endpoint}"
            ))))
            .boxed_local(),
        }
    }
}

// =============================================================================
// Surface
// =============================================================================

/// Records what the scroller asked of the document. Nodes are the slot
/// numbers they were created for.
#[derive(Default)]
pub struct MockSurface {
    pub created: usize,
    pub destroyed: usize,
    pub attached: BTreeSet<usize>,
    pub watched: BTreeSet<usize>,
    pub bound: HashMap<usize, usize>,
    pub selected: HashSet<usize>,
    pub rects: HashMap<usize, ItemRect>,
    pub extent: f64,
    pub mode: Option<ViewMode>,
    pub empty: bool,
    pub scrolled_to: Vec<f64>,
    /// Refuse to create nodes, as a document that rejects new elements would.
    pub fail_create: bool,
    /// Static icon each node was last reset to when watched.
    pub placeholders: HashMap<usize, &'static str>,
}

impl MockSurface {
    fn indices_where(&self, keep: impl Fn(usize) -> bool) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .attached
            .iter()
            .filter(|&&node| keep(node))
            .filter_map(|node| self.bound.get(node).copied())
            .collect();
        indices.sort_unstable();
        indices
    }

    /// Dataset indices of attached nodes, ascending.
    pub fn attached_indices(&self) -> Vec<usize> {
        self.indices_where(|_| true)
    }

    /// Dataset indices of attached nodes marked selected, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.indices_where(|node| self.selected.contains(&node))
    }

    pub fn watched_slots(&self) -> Vec<SlotId> {
        self.watched.iter().map(|&node| SlotId(node)).collect()
    }

    pub fn rect_of_index(&self, index: usize) -> Option<ItemRect> {
        self.attached
            .iter()
            .find(|node| self.bound.get(node) == Some(&index))
            .and_then(|node| self.rects.get(node).copied())
    }
}

impl Surface for MockSurface {
    type Node = usize;

    fn create_node(&mut self, slot: SlotId) -> Result<usize, MountError> {
        if self.fail_create {
            return Err(MountError::ElementCreation(format!("item {}", slot.0)));
        }
        self.created += 1;
        Ok(slot.0)
    }

    fn bind_node(&mut self, node: &usize, index: usize, _entry: &FileEntry, _mode: ViewMode) {
        self.bound.insert(*node, index);
    }

    fn place_node(&mut self, node: &usize, rect: ItemRect, selected: bool) {
        self.rects.insert(*node, rect);
        if selected {
            self.selected.insert(*node);
        } else {
            self.selected.remove(node);
        }
    }

    fn attach_node(&mut self, node: &usize) {
        self.attached.insert(*node);
    }

    fn detach_node(&mut self, node: &usize) {
        self.attached.remove(node);
    }

    fn destroy_node(&mut self, _slot: SlotId, node: usize) {
        self.destroyed += 1;
        self.attached.remove(&node);
        self.watched.remove(&node);
        self.bound.remove(&node);
        self.selected.remove(&node);
        self.rects.remove(&node);
        self.placeholders.remove(&node);
    }

    fn watch_thumbnail(&mut self, node: &usize, entry: &FileEntry) {
        self.watched.insert(*node);
        self.placeholders.insert(*node, entry.static_icon());
    }

    fn unwatch_thumbnail(&mut self, node: &usize) {
        self.watched.remove(node);
    }

    fn set_total_extent(&mut self, extent: f64) {
        self.extent = extent;
    }

    fn scroll_to(&mut self, offset: f64) {
        self.scrolled_to.push(offset);
    }

    fn set_empty(&mut self, empty: bool) {
        self.empty = empty;
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        self.mode = Some(mode);
    }
}

// =============================================================================
// Images
// =============================================================================

/// Thumbnail fetcher resolved by hand from the test.
#[derive(Default)]
pub struct MockFetcher {
    calls: RefCell<HashMap<String, usize>>,
    pending: RefCell<HashMap<String, Vec<oneshot::Sender<Result<String, FetchError>>>>>,
    released: RefCell<Vec<String>>,
    aborts: RefCell<usize>,
}

impl MockFetcher {
    pub fn calls(&self, key: &str) -> usize {
        self.calls.borrow().get(key).copied().unwrap_or(0)
    }

    /// Complete every pending fetch of `key`.
    pub fn resolve(&self, key: &str, result: Result<String, FetchError>) {
        let senders = self.pending.borrow_mut().remove(key).unwrap_or_default();
        for sender in senders {
            let _ = sender.send(result.clone());
        }
    }

    pub fn released(&self) -> Vec<String> {
        self.released.borrow().clone()
    }

    pub fn aborts(&self) -> usize {
        *self.aborts.borrow()
    }
}

impl ImageFetcher for MockFetcher {
    fn fetch(&self, key: &str) -> LocalBoxFuture<'static, Result<String, FetchError>> {
        *self.calls.borrow_mut().entry(key.to_string()).or_default() += 1;
        let (sender, receiver) = oneshot::channel();
        self.pending
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push(sender);
        async move { receiver.await.unwrap_or(Err(FetchError::Aborted)) }.boxed_local()
    }

    fn release(&self, handle: &str) {
        self.released.borrow_mut().push(handle.to_string());
    }

    fn abort_all(&self) {
        *self.aborts.borrow_mut() += 1;
        self.pending.borrow_mut().clear();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shown {
    Image(String),
    Fallback,
}

#[derive(Default)]
pub struct RecordingSink {
    shown: RefCell<Vec<(SlotId, Shown)>>,
}

impl RecordingSink {
    pub fn shown(&self) -> Vec<(SlotId, Shown)> {
        self.shown.borrow().clone()
    }

    pub fn last(&self, slot: SlotId) -> Option<Shown> {
        self.shown
            .borrow()
            .iter()
            .rev()
            .find(|(s, _)| *s == slot)
            .map(|(_, shown)| shown.clone())
    }
}

impl ImageSink for RecordingSink {
    fn show(&self, slot: SlotId, handle: &str) {
        self.shown
            .borrow_mut()
            .push((slot, Shown::Image(handle.to_string())));
    }

    fn show_fallback(&self, slot: SlotId) {
        self.shown.borrow_mut().push((slot, Shown::Fallback));
    }
}
