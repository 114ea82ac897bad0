//! End-to-end explorer flows over the mock transport, surface and fetcher.
//!
//! Run with `cargo test --features mock`.

use std::rc::Rc;

use futures::future::join_all;
use gridshell::config::{LayoutConfig, endpoints};
use gridshell::core::Explorer;
use gridshell::core::backend::Api;
use gridshell::core::image_loader::{ImageLoader, LoadTask};
use gridshell::core::layout::Layout;
use gridshell::core::mock::{
    MockFetcher, MockSurface, MockTransport, RecordingSink, Shown, listing_json, sample_entries,
};
use gridshell::core::navigation::NavOutcome;
use gridshell::models::{ViewMode, Viewport};
use serde_json::{Value, json};

const VIEWPORT: Viewport = Viewport {
    width: 1024.0,
    height: 720.0,
};

type TestExplorer = Explorer<MockTransport, MockSurface, MockFetcher, RecordingSink>;

fn explorer(mode: ViewMode) -> Rc<TestExplorer> {
    let images = ImageLoader::new(MockFetcher::default(), RecordingSink::default(), 16);
    let explorer = Explorer::new(
        Api::new(MockTransport::default()),
        MockSurface::default(),
        images,
        LayoutConfig::default(),
        "C:\\data",
    );
    explorer.initialize(VIEWPORT, mode);
    explorer
}

fn transport(explorer: &TestExplorer) -> &MockTransport {
    explorer.navigator().api().transport()
}

fn sample_listing(n: usize) -> Value {
    serde_json::to_value(sample_entries(n)).expect("entries serialize")
}

fn scroll(explorer: &TestExplorer, offset: f64) {
    if explorer.on_scroll(offset) {
        explorer.on_frame();
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_large_grid_stays_windowed_and_recycles_nodes() {
    let ex = explorer(ViewMode::MediumGrid);
    transport(&ex).respond(endpoints::LIST_DIRECTORY, sample_listing(10_000));
    ex.refresh().await.unwrap();

    let layout = Layout::new(ViewMode::MediumGrid, VIEWPORT, &LayoutConfig::default());
    let first_window = ex.scroller().surface().attached_indices();
    assert_eq!(first_window[0], 0);
    assert!(first_window.len() < 200);

    scroll(&ex, 300.0 * layout.row_height());
    let window = ex.scroller().surface().attached_indices();
    assert!(window.contains(&(300 * layout.columns())));
    assert!(!window.contains(&0));
    let created = ex.scroller().surface().created;

    scroll(&ex, 600.0 * layout.row_height());
    let later = ex.scroller().surface().attached_indices();
    assert_eq!(later.len(), window.len());
    assert!(later.contains(&(600 * layout.columns())));
    assert_eq!(ex.scroller().surface().created, created);
}

#[tokio::test(flavor = "current_thread")]
async fn test_visible_thumbnails_load_once_and_bind() {
    let ex = explorer(ViewMode::MediumGrid);
    transport(&ex).respond(endpoints::LIST_DIRECTORY, sample_listing(200));
    ex.refresh().await.unwrap();

    let watched = ex.scroller().surface().watched_slots();
    assert!(!watched.is_empty());

    let tasks: Vec<LoadTask> = watched
        .iter()
        .filter_map(|&slot| ex.image_visible(slot))
        .collect();
    assert_eq!(tasks.len(), watched.len());

    let keys: Vec<String> = watched
        .iter()
        .filter_map(|&slot| ex.scroller().images().key_of(slot))
        .collect();
    for (i, key) in keys.iter().enumerate() {
        ex.scroller().images().fetcher().resolve(key, Ok(format!("blob:{i}")));
    }
    join_all(tasks).await;

    let scroller = ex.scroller();
    let sink = scroller.images().sink();
    for (i, slot) in watched.iter().enumerate() {
        assert_eq!(sink.last(*slot), Some(Shown::Image(format!("blob:{i}"))));
    }
    for key in &keys {
        assert_eq!(scroller.images().fetcher().calls(key), 1);
        assert!(scroller.images().is_cached(key));
    }
}

#[tokio::test(flavor = "current_thread")]
async fn test_back_restores_scroll_position() {
    let ex = explorer(ViewMode::CompactList);
    transport(&ex).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\data", 1000));
    ex.refresh().await.unwrap();

    scroll(&ex, 500.0 * LayoutConfig::default().list_row_height);
    assert_eq!(ex.scroller().visible_top_index(), 500);

    transport(&ex).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\other", 5));
    ex.navigate("C:\\other").await.unwrap();
    assert_eq!(ex.scroller().visible_top_index(), 0);

    transport(&ex).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\data", 1000));
    ex.back().await.unwrap();
    assert_eq!(ex.current().location, "C:\\data");
    assert_eq!(ex.scroller().visible_top_index(), 500);
    assert!(ex.navigator().can_forward());
}

#[tokio::test(flavor = "current_thread")]
async fn test_slow_response_is_superseded_by_later_navigation() {
    let ex = explorer(ViewMode::CompactList);
    let held = transport(&ex).hold(endpoints::LIST_DIRECTORY);
    transport(&ex).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\fast", 3));

    let mut slow = ex.navigate("C:\\slow");
    assert!(futures::poll!(&mut slow).is_pending());

    assert!(matches!(
        ex.navigate("C:\\fast").await,
        Ok(NavOutcome::Applied(_))
    ));

    held.release(Ok(listing_json("C:\\slow", 50)));
    assert_eq!(slow.await, Ok(NavOutcome::Superseded));
    assert_eq!(ex.current().location, "C:\\fast");
    assert_eq!(ex.scroller().len(), 3);
}

#[tokio::test(flavor = "current_thread")]
async fn test_multi_select_delete_sends_every_selected_entry() {
    let ex = explorer(ViewMode::CompactList);
    transport(&ex).respond(endpoints::LIST_DIRECTORY, listing_json("C:\\data", 6));
    ex.refresh().await.unwrap();

    ex.set_multi_select(true);
    ex.click(1);
    ex.click(4);
    assert_eq!(ex.status().selected, 2);
    assert_eq!(ex.scroller().surface().selected_indices(), vec![1, 4]);

    transport(&ex).respond(endpoints::DELETE, listing_json("C:\\data", 4));
    ex.delete().await.unwrap();

    let (_, body) = transport(&ex)
        .calls()
        .into_iter()
        .find(|(endpoint, _)| *endpoint == endpoints::DELETE)
        .unwrap();
    assert_eq!(body["path"], json!("C:\\data"));
    let names: Vec<&str> = body["fileList"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert_eq!(names, ["item1.txt", "item4.txt"]);

    assert_eq!(ex.scroller().len(), 4);
    assert!(ex.selection().is_empty());
}
