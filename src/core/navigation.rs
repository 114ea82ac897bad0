//! Navigation controller.
//!
//! Owns the [`HistoryStack`] and turns user intents into backend requests.
//! Each method takes its staleness token synchronously when called and
//! returns a future that resolves the request. On completion the response
//! is applied only if no newer request was issued meanwhile; otherwise the
//! future resolves to [`NavOutcome::Superseded`] and nothing changes.
//!
//! The stack cursor may run ahead of what is on screen while back/forward
//! requests are in flight; `displayed` always marks the entry whose listing
//! is currently shown, and every applied or failed response first rolls the
//! cursor back to it.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use crate::core::backend::{Api, ListingResult, Transport};
use crate::core::error::{FetchError, NavigationError, ValidationError};
use crate::core::history::{HistoryEntry, HistoryStack};
use crate::core::paths;
use crate::models::FileEntry;

/// A listing ready to be handed to the scroller.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub location: String,
    pub search_term: String,
    pub entries: Rc<[FileEntry]>,
    /// Index to restore at the top, or `None` to start from the top.
    pub anchor: Option<usize>,
}

impl Listing {
    fn new(entry: &HistoryEntry, entries: Vec<FileEntry>, anchor: Option<usize>) -> Self {
        Self {
            location: entry.location.clone(),
            search_term: entry.search_term.clone(),
            entries: entries.into(),
            anchor,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NavOutcome {
    /// The response was current and history now reflects it.
    Applied(Listing),
    /// A newer request was issued before this one completed.
    Superseded,
    /// Nothing to do (boundary, root, same location, empty search).
    Unchanged,
}

pub type NavFuture = LocalBoxFuture<'static, Result<NavOutcome, NavigationError>>;

/// Resolved target of a request that pushes a new history entry.
type PushResult = Result<Option<(HistoryEntry, Vec<FileEntry>)>, FetchError>;

struct NavState {
    history: HistoryStack,
    displayed: usize,
    latest: u64,
}

impl NavState {
    fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn displayed_entry(&self) -> &HistoryEntry {
        self.history
            .get(self.displayed)
            .unwrap_or_else(|| self.history.current())
    }

    fn save_anchor(&mut self, top: usize) {
        let displayed = self.displayed;
        self.history.set_anchor(displayed, top);
    }

    fn roll_back(&mut self) {
        let displayed = self.displayed;
        self.history.move_to(displayed);
    }
}

fn ready(outcome: Result<NavOutcome, NavigationError>) -> NavFuture {
    future::ready(outcome).boxed_local()
}

pub struct Navigator<T> {
    api: Api<T>,
    state: Rc<RefCell<NavState>>,
}

impl<T: Transport + 'static> Navigator<T> {
    /// Start with a single history entry at `start`. Nothing is fetched
    /// until [`Navigator::refresh`] or another request.
    pub fn new(api: Api<T>, start: &str) -> Self {
        Self {
            api,
            state: Rc::new(RefCell::new(NavState {
                history: HistoryStack::new(HistoryEntry::browse(start)),
                displayed: 0,
                latest: 0,
            })),
        }
    }

    pub fn api(&self) -> &Api<T> {
        &self.api
    }

    /// Entry whose listing is on screen.
    pub fn current(&self) -> HistoryEntry {
        self.state.borrow().displayed_entry().clone()
    }

    pub fn history(&self) -> HistoryStack {
        self.state.borrow().history.clone()
    }

    pub fn can_back(&self) -> bool {
        self.state.borrow().history.can_back()
    }

    pub fn can_forward(&self) -> bool {
        self.state.borrow().history.can_forward()
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Browse `location`. History changes only once the listing arrives.
    pub fn navigate(&self, location: &str, top: usize) -> NavFuture {
        let location = location.trim().to_string();
        if location.is_empty() {
            return ready(Err(ValidationError::EmptyLocation.into()));
        }

        let token = {
            let mut state = self.state.borrow_mut();
            let current = state.displayed_entry();
            if !current.is_search() && current.location == location {
                return ready(Ok(NavOutcome::Unchanged));
            }
            state.save_anchor(top);
            state.issue()
        };
        log::debug!("navigate #{} -> {}", token, location);

        let entry = HistoryEntry::browse(location.clone());
        let request = self
            .api
            .list_directory(&location)
            .map(move |result| result.map(|found| found.map(|entries| (entry, entries))));
        self.commit_push(token, location, request.boxed_local())
    }

    /// Search the current directory for `term`.
    pub fn search(&self, term: &str, top: usize) -> NavFuture {
        let term = term.trim().to_string();
        if term.is_empty() || term.chars().all(|c| c == '/' || c == '\\') {
            return ready(Ok(NavOutcome::Unchanged));
        }

        let (token, location) = {
            let mut state = self.state.borrow_mut();
            let location = state.displayed_entry().location.clone();
            if paths::is_root(&location) {
                return ready(Err(ValidationError::InvalidSearch.into()));
            }
            state.save_anchor(top);
            (state.issue(), location)
        };
        log::debug!("search #{} {:?} in {}", token, term, location);

        let entry = HistoryEntry::search(location.clone(), term.clone());
        let request = self
            .api
            .search(&location, &term)
            .map(move |result| result.map(|found| found.map(|entries| (entry, entries))));
        self.commit_push(token, location, request.boxed_local())
    }

    pub fn back(&self, top: usize) -> NavFuture {
        self.step(-1, top)
    }

    pub fn forward(&self, top: usize) -> NavFuture {
        self.step(1, top)
    }

    /// Go to the parent directory. The virtual root has no parent; a drive
    /// root's parent is the virtual root.
    pub fn up(&self, top: usize) -> NavFuture {
        let (token, location) = {
            let mut state = self.state.borrow_mut();
            let location = state.displayed_entry().location.clone();
            if paths::is_root(&location) {
                return ready(Ok(NavOutcome::Unchanged));
            }
            state.save_anchor(top);
            (state.issue(), location)
        };

        if paths::is_drive_root(&location) {
            log::debug!("up #{} {} -> disk list", token, location);
            let entry = HistoryEntry::browse(paths::root());
            let request = self
                .api
                .list_directory(&paths::root())
                .map(move |result| result.map(|found| found.map(|entries| (entry, entries))));
            return self.commit_push(token, paths::root(), request.boxed_local());
        }

        log::debug!("up #{} from {}", token, location);
        let request = self.api.parent(&location).map(|result| {
            result.map(|found| {
                found.map(|parent| (HistoryEntry::browse(parent.path), parent.file_list))
            })
        });
        self.commit_push(token, location, request.boxed_local())
    }

    /// Re-fetch the entry on screen, keeping `top` in place.
    pub fn refresh(&self, top: usize) -> NavFuture {
        let (token, entry) = {
            let mut state = self.state.borrow_mut();
            state.save_anchor(top);
            (state.issue(), state.displayed_entry().clone())
        };
        let request = self.fetch_entry(&entry);
        self.commit_reload(token, entry, request, Some(top), false)
    }

    /// Apply the refreshed listing returned by a file operation on the
    /// current directory. Search results are replaced by the directory.
    pub fn reload_with(&self, request: LocalBoxFuture<'static, ListingResult>, top: usize) -> NavFuture {
        let (token, entry) = {
            let mut state = self.state.borrow_mut();
            state.save_anchor(top);
            let location = state.displayed_entry().location.clone();
            (state.issue(), HistoryEntry::browse(location))
        };
        self.commit_reload(token, entry, request, Some(top), true)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn fetch_entry(&self, entry: &HistoryEntry) -> LocalBoxFuture<'static, ListingResult> {
        if entry.is_search() {
            self.api.search(&entry.location, &entry.search_term)
        } else {
            self.api.list_directory(&entry.location)
        }
    }

    /// Move the cursor by `delta` now; confirm or roll back on response.
    fn step(&self, delta: isize, top: usize) -> NavFuture {
        let (token, target, entry) = {
            let mut state = self.state.borrow_mut();
            let cursor = state.history.cursor();
            let Some(target) = cursor.checked_add_signed(delta) else {
                return ready(Ok(NavOutcome::Unchanged));
            };
            if target >= state.history.len() {
                return ready(Ok(NavOutcome::Unchanged));
            }
            state.save_anchor(top);
            state.history.move_to(target);
            (state.issue(), target, state.history.current().clone())
        };
        log::debug!("history #{} -> [{}] {}", token, target, entry.location);

        let request = self.fetch_entry(&entry);
        let state = Rc::clone(&self.state);
        async move {
            let result = request.await;
            let mut state = state.borrow_mut();
            if state.latest != token {
                log::debug!("history #{} superseded", token);
                return Ok(NavOutcome::Superseded);
            }
            match result {
                Ok(Some(entries)) => {
                    state.history.move_to(target);
                    state.displayed = target;
                    let anchor = Some(entry.scroll_anchor);
                    Ok(NavOutcome::Applied(Listing::new(&entry, entries, anchor)))
                }
                Ok(None) => {
                    state.roll_back();
                    Err(NavigationError::NotFound(entry.location))
                }
                Err(err) => {
                    log::warn!("history #{} failed: {}", token, err);
                    state.roll_back();
                    Err(err.into())
                }
            }
        }
        .boxed_local()
    }

    /// Push the resolved entry on success.
    fn commit_push(
        &self,
        token: u64,
        requested: String,
        request: LocalBoxFuture<'static, PushResult>,
    ) -> NavFuture {
        let state = Rc::clone(&self.state);
        async move {
            let result = request.await;
            let mut state = state.borrow_mut();
            if state.latest != token {
                log::debug!("request #{} superseded", token);
                return Ok(NavOutcome::Superseded);
            }
            state.roll_back();
            match result {
                Ok(Some((entry, entries))) => {
                    state.history.push(entry.clone());
                    state.displayed = state.history.cursor();
                    Ok(NavOutcome::Applied(Listing::new(&entry, entries, None)))
                }
                Ok(None) => Err(NavigationError::NotFound(requested)),
                Err(err) => {
                    log::warn!("request #{} failed: {}", token, err);
                    Err(err.into())
                }
            }
        }
        .boxed_local()
    }

    /// Apply a listing of the current location without moving in history
    /// (unless `leave_search` replaces search results with the directory).
    fn commit_reload(
        &self,
        token: u64,
        entry: HistoryEntry,
        request: LocalBoxFuture<'static, ListingResult>,
        anchor: Option<usize>,
        leave_search: bool,
    ) -> NavFuture {
        let state = Rc::clone(&self.state);
        async move {
            let result = request.await;
            let mut state = state.borrow_mut();
            if state.latest != token {
                log::debug!("reload #{} superseded", token);
                return Ok(NavOutcome::Superseded);
            }
            state.roll_back();
            match result {
                Ok(Some(entries)) => {
                    if leave_search && state.history.current().is_search() {
                        state.history.push(entry.clone());
                        state.displayed = state.history.cursor();
                    }
                    Ok(NavOutcome::Applied(Listing::new(&entry, entries, anchor)))
                }
                Ok(None) => Err(NavigationError::NotFound(entry.location)),
                Err(err) => {
                    log::warn!("reload #{} failed: {}", token, err);
                    Err(err.into())
                }
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::endpoints;
    use crate::core::mock::{MockTransport, listing_json};
    use futures::poll;
    use serde_json::json;
    use std::task::Poll;

    fn navigator(start: &str) -> Navigator<MockTransport> {
        Navigator::new(Api::new(MockTransport::default()), start)
    }

    fn transport(nav: &Navigator<MockTransport>) -> &MockTransport {
        nav.api().transport()
    }

    fn applied(outcome: NavOutcome) -> Listing {
        match outcome {
            NavOutcome::Applied(listing) => listing,
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    fn locations(nav: &Navigator<MockTransport>) -> Vec<String> {
        nav.history()
            .entries()
            .iter()
            .map(|e| e.location.clone())
            .collect()
    }

    async fn visit(nav: &Navigator<MockTransport>, location: &str) {
        transport(nav).respond(endpoints::LIST_DIRECTORY, listing_json(location, 3));
        applied(nav.navigate(location, 0).await.unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_navigate_appends_and_applies() {
        let nav = navigator("\\");
        visit(&nav, "C:\\").await;
        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\a", 7));
        let listing = applied(nav.navigate("C:\\a", 0).await.unwrap());

        assert_eq!(listing.location, "C:\\a");
        assert_eq!(listing.entries.len(), 7);
        assert_eq!(listing.anchor, None);
        assert_eq!(locations(&nav), vec!["\\", "C:\\", "C:\\a"]);
        assert_eq!(nav.history().cursor(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_navigate_failure_commits_nothing() {
        let nav = navigator("\\");
        visit(&nav, "C:\\").await;
        transport(&nav).fail(endpoints::LIST_DIRECTORY, FetchError::HttpError(500));

        let err = nav.navigate("C:\\broken", 0).await.unwrap_err();
        assert_eq!(err, NavigationError::Fetch(FetchError::HttpError(500)));
        assert_eq!(locations(&nav), vec!["\\", "C:\\"]);
        assert_eq!(nav.current().location, "C:\\");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_navigate_missing_path() {
        let nav = navigator("\\");
        transport(&nav).respond(endpoints::LIST_DIRECTORY, serde_json::Value::Null);
        let err = nav.navigate("Q:\\nope", 0).await.unwrap_err();
        assert_eq!(err, NavigationError::NotFound("Q:\\nope".to_string()));
        assert_eq!(nav.history().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_navigate_same_location_unchanged() {
        let nav = navigator("\\");
        visit(&nav, "C:\\").await;
        assert_eq!(nav.navigate(" C:\\ ", 0).await, Ok(NavOutcome::Unchanged));
        assert!(transport(&nav).calls().len() == 1);
        assert_eq!(
            nav.navigate("  ", 0).await,
            Err(NavigationError::Validation(ValidationError::EmptyLocation))
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_back_then_navigate_truncates_branch() {
        let nav = navigator("A");
        visit(&nav, "B").await;
        visit(&nav, "C").await;

        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("B", 3));
        applied(nav.back(0).await.unwrap());
        assert_eq!(nav.history().cursor(), 1);

        visit(&nav, "E").await;
        assert_eq!(locations(&nav), vec!["A", "B", "E"]);
        assert_eq!(nav.history().cursor(), 2);
        assert!(!nav.can_forward());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_back_restores_scroll_anchor() {
        let nav = navigator("A");
        visit(&nav, "B").await;

        // Leaving B at index 120 saves the anchor on B
        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("A", 3));
        applied(nav.back(120).await.unwrap());
        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("B", 3));
        let forward = applied(nav.forward(0).await.unwrap());
        assert_eq!(forward.location, "B");
        assert_eq!(forward.anchor, Some(120));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_back_failure_rolls_back_cursor() {
        let nav = navigator("A");
        visit(&nav, "B").await;
        transport(&nav).fail(endpoints::LIST_DIRECTORY, FetchError::Timeout);

        assert!(nav.back(0).await.is_err());
        assert_eq!(nav.history().cursor(), 1);
        assert_eq!(nav.current().location, "B");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_back_forward_boundaries() {
        let nav = navigator("A");
        assert_eq!(nav.back(0).await, Ok(NavOutcome::Unchanged));
        assert_eq!(nav.forward(0).await, Ok(NavOutcome::Unchanged));
        assert!(transport(&nav).calls().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_stale_navigation_is_dropped() {
        let nav = navigator("\\");
        let slow = transport(&nav).hold(endpoints::LIST_DIRECTORY);
        let fast = transport(&nav).hold(endpoints::LIST_DIRECTORY);

        let mut to_x = nav.navigate("X:\\", 0);
        let mut to_y = nav.navigate("Y:\\", 0);
        assert!(matches!(poll!(&mut to_x), Poll::Pending));
        assert!(matches!(poll!(&mut to_y), Poll::Pending));

        fast.release(Ok(listing_json("Y:\\", 2)));
        let listing = applied(to_y.await.unwrap());
        assert_eq!(listing.location, "Y:\\");

        slow.release(Ok(listing_json("X:\\", 9)));
        assert_eq!(to_x.await, Ok(NavOutcome::Superseded));
        assert_eq!(nav.current().location, "Y:\\");
        assert_eq!(locations(&nav), vec!["\\", "Y:\\"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_rapid_back_back_applies_last() {
        let nav = navigator("A");
        visit(&nav, "B").await;
        visit(&nav, "C").await;

        let first = transport(&nav).hold(endpoints::LIST_DIRECTORY);
        let second = transport(&nav).hold(endpoints::LIST_DIRECTORY);
        let to_b = nav.back(0);
        let to_a = nav.back(0);

        second.release(Ok(listing_json("A", 1)));
        first.release(Ok(listing_json("B", 1)));
        assert_eq!(applied(to_a.await.unwrap()).location, "A");
        assert_eq!(to_b.await, Ok(NavOutcome::Superseded));
        assert_eq!(nav.history().cursor(), 0);
        assert_eq!(locations(&nav), vec!["A", "B", "C"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_navigate_during_back_branches_from_displayed() {
        let nav = navigator("A");
        visit(&nav, "B").await;
        visit(&nav, "C").await;

        let pending_back = transport(&nav).hold(endpoints::LIST_DIRECTORY);
        let to_b = nav.back(0);
        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("D", 1));
        applied(nav.navigate("D", 0).await.unwrap());

        pending_back.release(Ok(listing_json("B", 1)));
        assert_eq!(to_b.await, Ok(NavOutcome::Superseded));
        assert_eq!(locations(&nav), vec!["A", "B", "C", "D"]);
        assert_eq!(nav.history().cursor(), 3);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_search_pushes_entry_and_back_refetches_listing() {
        let nav = navigator("C:\\");
        transport(&nav).respond(endpoints::SEARCH, listing_json("C:\\", 4));
        let listing = applied(nav.search(" cat ", 0).await.unwrap());
        assert_eq!(listing.search_term, "cat");
        assert_eq!(listing.location, "C:\\");
        assert_eq!(
            transport(&nav).calls()[0].1,
            json!({"path": "C:\\", "search_term": "cat"})
        );

        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\", 2));
        let back = applied(nav.back(0).await.unwrap());
        assert!(back.search_term.is_empty());

        transport(&nav).respond(endpoints::SEARCH, listing_json("C:\\", 4));
        let forward = applied(nav.forward(0).await.unwrap());
        assert_eq!(forward.search_term, "cat");
        assert_eq!(transport(&nav).calls().last().unwrap().0, endpoints::SEARCH);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_search_rejections() {
        let nav = navigator("\\");
        assert_eq!(nav.search("   ", 0).await, Ok(NavOutcome::Unchanged));
        assert_eq!(nav.search("\\", 0).await, Ok(NavOutcome::Unchanged));
        assert_eq!(
            nav.search("cat", 0).await,
            Err(NavigationError::Validation(ValidationError::InvalidSearch))
        );
        assert!(transport(&nav).calls().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_up_at_root_is_noop() {
        let nav = navigator("\\");
        assert_eq!(nav.up(0).await, Ok(NavOutcome::Unchanged));
        assert!(transport(&nav).calls().is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_up_from_drive_root_lists_disks() {
        let nav = navigator("C:\\");
        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("", 2));
        let listing = applied(nav.up(0).await.unwrap());
        assert_eq!(listing.location, "\\");
        assert_eq!(transport(&nav).calls()[0].1, json!({"path": "\\"}));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_up_resolves_parent_via_backend() {
        let nav = navigator("C:\\a\\b");
        transport(&nav).respond(
            endpoints::PARENT,
            json!({"path": "C:\\a", "fileList": listing_json("C:\\a", 5)}),
        );
        let listing = applied(nav.up(0).await.unwrap());
        assert_eq!(listing.location, "C:\\a");
        assert_eq!(listing.entries.len(), 5);
        assert_eq!(locations(&nav), vec!["C:\\a\\b", "C:\\a"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_refresh_keeps_history_and_anchor() {
        let nav = navigator("C:\\");
        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\", 3));
        let listing = applied(nav.refresh(17).await.unwrap());
        assert_eq!(listing.anchor, Some(17));
        assert_eq!(nav.history().len(), 1);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_reload_with_is_stale_checked() {
        let nav = navigator("C:\\");
        let held = transport(&nav).hold(endpoints::RENAME);
        let request = nav.api().rename(&crate::models::RenameRequest {
            old_name: "a".to_string(),
            new_name: "b".to_string(),
            path: "C:\\".to_string(),
        });
        let reload = nav.reload_with(request, 0);

        transport(&nav).respond(endpoints::LIST_DIRECTORY, listing_json("D:\\", 1));
        applied(nav.navigate("D:\\", 0).await.unwrap());

        held.release(Ok(listing_json("C:\\", 3)));
        assert_eq!(reload.await, Ok(NavOutcome::Superseded));
        assert_eq!(nav.current().location, "D:\\");
    }
}
