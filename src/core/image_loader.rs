//! Lazy thumbnail loading with keyed de-duplication.
//!
//! Placeholders are registered per pool slot with a source key. Nothing is
//! fetched until the host reports the slot visible; then a cached handle is
//! bound immediately, or exactly one fetch per key is started and every
//! visible placeholder waiting on that key is bound from its single result.
//!
//! Fetches run as [`LoadTask`]s that the host spawns. A generation counter
//! is bumped by [`ImageLoader::abort_all`] and [`ImageLoader::clear`]; a task
//! finishing under an older generation releases its handle and binds nothing.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::core::error::FetchError;
use crate::core::pool::SlotId;

/// Fetches thumbnail bytes and turns them into a displayable handle
/// (an object URL in the browser).
pub trait ImageFetcher {
    fn fetch(&self, key: &str) -> LocalBoxFuture<'static, Result<String, FetchError>>;

    /// Free a handle previously returned by [`ImageFetcher::fetch`].
    fn release(&self, handle: &str);

    /// Cancel every in-flight fetch.
    fn abort_all(&self);
}

/// Applies loaded handles to placeholders.
pub trait ImageSink {
    fn show(&self, slot: SlotId, handle: &str);
    fn show_fallback(&self, slot: SlotId);
}

/// Future driving one thumbnail fetch to completion.
pub type LoadTask = LocalBoxFuture<'static, ()>;

#[derive(Debug)]
struct Placeholder {
    key: String,
    visible: bool,
    bound: bool,
}

#[derive(Debug)]
struct CacheEntry {
    handle: String,
    last_used: u64,
}

#[derive(Default)]
struct LoaderState {
    generation: u64,
    clock: u64,
    placeholders: HashMap<SlotId, Placeholder>,
    cache: HashMap<String, CacheEntry>,
    in_flight: HashSet<String>,
}

impl LoaderState {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

pub struct ImageLoader<F, K> {
    state: Rc<RefCell<LoaderState>>,
    fetcher: Rc<F>,
    sink: Rc<K>,
    cache_slack: usize,
}

impl<F, K> Clone for ImageLoader<F, K> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            fetcher: Rc::clone(&self.fetcher),
            sink: Rc::clone(&self.sink),
            cache_slack: self.cache_slack,
        }
    }
}

impl<F, K> ImageLoader<F, K>
where
    F: ImageFetcher + 'static,
    K: ImageSink + 'static,
{
    /// `cache_slack` unreferenced handles survive each [`reclaim`](Self::reclaim).
    pub fn new(fetcher: F, sink: K, cache_slack: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(LoaderState::default())),
            fetcher: Rc::new(fetcher),
            sink: Rc::new(sink),
            cache_slack,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Register `slot` as a pending placeholder for `key`.
    ///
    /// Returns `true` when the host must (re)start observing the slot, i.e.
    /// the slot was unregistered or held a different key.
    pub fn register(&self, slot: SlotId, key: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if let Some(existing) = state.placeholders.get(&slot)
            && existing.key == key
        {
            return false;
        }
        state.placeholders.insert(
            slot,
            Placeholder {
                key: key.to_string(),
                visible: false,
                bound: false,
            },
        );
        true
    }

    pub fn unregister(&self, slot: SlotId) -> bool {
        self.state.borrow_mut().placeholders.remove(&slot).is_some()
    }

    pub fn key_of(&self, slot: SlotId) -> Option<String> {
        self.state
            .borrow()
            .placeholders
            .get(&slot)
            .map(|p| p.key.clone())
    }

    /// The placeholder in `slot` scrolled into the lookahead area.
    ///
    /// Binds from cache when possible. Otherwise returns the task that
    /// fetches the key, unless a fetch for it is already running.
    pub fn on_visible(&self, slot: SlotId) -> Option<LoadTask> {
        let mut state = self.state.borrow_mut();
        let now = state.tick();
        let generation = state.generation;

        let key = {
            let placeholder = state.placeholders.get_mut(&slot)?;
            if placeholder.bound {
                return None;
            }
            placeholder.visible = true;
            placeholder.key.clone()
        };

        let cached = state.cache.get_mut(&key).map(|entry| {
            entry.last_used = now;
            entry.handle.clone()
        });
        if let Some(handle) = cached {
            if let Some(placeholder) = state.placeholders.get_mut(&slot) {
                placeholder.bound = true;
            }
            drop(state);
            self.sink.show(slot, &handle);
            return None;
        }

        if !state.in_flight.insert(key.clone()) {
            return None;
        }
        drop(state);

        log::debug!("thumbnail fetch: {}", key);
        let request = self.fetcher.fetch(&key);
        let loader = self.clone();
        Some(
            async move {
                let result = request.await;
                loader.complete(generation, &key, result);
            }
            .boxed_local(),
        )
    }

    fn complete(&self, generation: u64, key: &str, result: Result<String, FetchError>) {
        let mut state = self.state.borrow_mut();
        if generation != state.generation {
            drop(state);
            if let Ok(handle) = result {
                self.fetcher.release(&handle);
            }
            return;
        }
        state.in_flight.remove(key);

        let waiting: Vec<SlotId> = state
            .placeholders
            .iter_mut()
            .filter(|(_, p)| p.key == key && p.visible && !p.bound)
            .map(|(slot, p)| {
                p.bound = true;
                *slot
            })
            .collect();

        match result {
            Ok(handle) => {
                let now = state.tick();
                if let Some(previous) = state.cache.insert(
                    key.to_string(),
                    CacheEntry {
                        handle: handle.clone(),
                        last_used: now,
                    },
                ) {
                    self.fetcher.release(&previous.handle);
                }
                drop(state);
                for slot in waiting {
                    self.sink.show(slot, &handle);
                }
            }
            Err(err) => {
                drop(state);
                log::warn!("thumbnail {} failed: {}", key, err);
                for slot in waiting {
                    self.sink.show_fallback(slot);
                }
            }
        }
    }

    /// Release cached handles whose key is not in `active`, keeping at most
    /// `cache_slack` of the most recently used ones.
    pub fn reclaim(&self, active: &HashSet<String>) {
        let mut state = self.state.borrow_mut();
        let mut idle: Vec<(u64, String)> = state
            .cache
            .iter()
            .filter(|(key, _)| !active.contains(*key))
            .map(|(key, entry)| (entry.last_used, key.clone()))
            .collect();
        if idle.len() <= self.cache_slack {
            return;
        }

        idle.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        let evicted: Vec<String> = idle
            .into_iter()
            .skip(self.cache_slack)
            .filter_map(|(_, key)| state.cache.remove(&key).map(|e| e.handle))
            .collect();
        drop(state);

        for handle in &evicted {
            self.fetcher.release(handle);
        }
        log::debug!("reclaimed {} thumbnails", evicted.len());
    }

    /// Cancel every in-flight fetch; late results are discarded.
    pub fn abort_all(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.in_flight.clear();
            for placeholder in state.placeholders.values_mut() {
                if !placeholder.bound {
                    placeholder.visible = false;
                }
            }
        }
        self.fetcher.abort_all();
    }

    /// Abort fetches and forget every placeholder, keeping the cache.
    pub fn reset(&self) {
        self.abort_all();
        self.state.borrow_mut().placeholders.clear();
    }

    /// Abort fetches, forget placeholders and release every cached handle.
    pub fn clear(&self) {
        self.reset();
        let handles: Vec<String> = self
            .state
            .borrow_mut()
            .cache
            .drain()
            .map(|(_, entry)| entry.handle)
            .collect();
        for handle in &handles {
            self.fetcher.release(handle);
        }
    }

    pub fn cached_len(&self) -> usize {
        self.state.borrow().cache.len()
    }

    pub fn is_cached(&self, key: &str) -> bool {
        self.state.borrow().cache.contains_key(key)
    }

    pub fn in_flight_len(&self) -> usize {
        self.state.borrow().in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::{MockFetcher, RecordingSink, Shown};

    fn loader(slack: usize) -> ImageLoader<MockFetcher, RecordingSink> {
        ImageLoader::new(MockFetcher::default(), RecordingSink::default(), slack)
    }

    fn keys(list: &[&str]) -> HashSet<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_five_placeholders_one_fetch() {
        let loader = loader(0);
        let tasks: Vec<LoadTask> = (0..5)
            .filter_map(|i| {
                loader.register(SlotId(i), "/get_thumbnail/a.png");
                loader.on_visible(SlotId(i))
            })
            .collect();

        assert_eq!(tasks.len(), 1);
        assert_eq!(loader.fetcher().calls("/get_thumbnail/a.png"), 1);

        loader.fetcher().resolve("/get_thumbnail/a.png", Ok("blob:a".into()));
        futures::future::join_all(tasks).await;

        let shown = loader.sink().shown();
        assert_eq!(shown.len(), 5);
        assert!(shown.iter().all(|(_, s)| *s == Shown::Image("blob:a".into())));
        assert!(loader.is_cached("/get_thumbnail/a.png"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_cache_hit_binds_without_network() {
        let loader = loader(0);
        loader.register(SlotId(0), "k");
        let task = loader.on_visible(SlotId(0)).unwrap();
        loader.fetcher().resolve("k", Ok("blob:k".into()));
        task.await;

        loader.register(SlotId(1), "k");
        assert!(loader.on_visible(SlotId(1)).is_none());
        assert_eq!(loader.fetcher().calls("k"), 1);
        assert_eq!(loader.sink().last(SlotId(1)), Some(Shown::Image("blob:k".into())));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_failure_shows_fallback_and_is_not_cached() {
        let loader = loader(0);
        loader.register(SlotId(0), "bad");
        let task = loader.on_visible(SlotId(0)).unwrap();
        loader.fetcher().resolve("bad", Err(FetchError::HttpError(404)));
        task.await;

        assert_eq!(loader.sink().last(SlotId(0)), Some(Shown::Fallback));
        assert!(!loader.is_cached("bad"));

        // A later registration retries
        loader.register(SlotId(3), "bad");
        assert!(loader.on_visible(SlotId(3)).is_some());
        assert_eq!(loader.fetcher().calls("bad"), 2);
    }

    #[test]
    fn test_invisible_placeholder_does_not_fetch() {
        let loader = loader(0);
        assert!(loader.register(SlotId(0), "k"));
        assert!(!loader.register(SlotId(0), "k"));
        assert_eq!(loader.fetcher().calls("k"), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_rebound_slot_ignores_old_result() {
        let loader = loader(0);
        loader.register(SlotId(0), "old");
        let task = loader.on_visible(SlotId(0)).unwrap();
        // Slot recycled for another entry before the fetch lands
        assert!(loader.register(SlotId(0), "new"));

        loader.fetcher().resolve("old", Ok("blob:old".into()));
        task.await;
        assert_eq!(loader.sink().last(SlotId(0)), None);
        assert!(loader.is_cached("old"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_reclaim_releases_inactive_keys() {
        let loader = loader(0);
        for (i, key) in ["a", "b", "c"].iter().enumerate() {
            loader.register(SlotId(i), key);
            let task = loader.on_visible(SlotId(i)).unwrap();
            loader.fetcher().resolve(key, Ok(format!("blob:{key}")));
            task.await;
        }

        loader.reclaim(&keys(&["b"]));
        assert_eq!(loader.cached_len(), 1);
        assert!(loader.is_cached("b"));
        let mut released = loader.fetcher().released();
        released.sort();
        assert_eq!(released, vec!["blob:a".to_string(), "blob:c".to_string()]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_reclaim_keeps_recent_slack() {
        let loader = loader(1);
        for (i, key) in ["a", "b", "c"].iter().enumerate() {
            loader.register(SlotId(i), key);
            let task = loader.on_visible(SlotId(i)).unwrap();
            loader.fetcher().resolve(key, Ok(format!("blob:{key}")));
            task.await;
        }

        loader.reclaim(&HashSet::new());
        assert_eq!(loader.cached_len(), 1);
        assert!(loader.is_cached("c"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_abort_all_discards_late_results() {
        let loader = loader(0);
        loader.register(SlotId(0), "k");
        let task = loader.on_visible(SlotId(0)).unwrap();

        loader.abort_all();
        assert_eq!(loader.fetcher().aborts(), 1);
        assert_eq!(loader.in_flight_len(), 0);

        task.await;
        assert_eq!(loader.sink().last(SlotId(0)), None);
        assert!(!loader.is_cached("k"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_clear_releases_cache() {
        let loader = loader(8);
        loader.register(SlotId(0), "k");
        let task = loader.on_visible(SlotId(0)).unwrap();
        loader.fetcher().resolve("k", Ok("blob:k".into()));
        task.await;

        loader.clear();
        assert_eq!(loader.cached_len(), 0);
        assert_eq!(loader.fetcher().released(), vec!["blob:k".to_string()]);
        assert_eq!(loader.key_of(SlotId(0)), None);
    }
}
