//! Integration tests for the debounce-triggered fetch-and-render cycle
//!
//! All tests run on a paused tokio clock so the typing delay and response
//! latencies are deterministic.

use parking_lot::Mutex;
use remote_search::{
    InputRect, MemoryRenderer, Placement, Position, RemoteSearch, RemoteSearchError, ResultItem,
    SearchEvent, SearchOutcome, SearchPhase,
};
use serde_json::{Value, json};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

mod common;
use common::{ScriptedFetcher, TEST_DELAY, mount, test_config, wait_for};

const KEYSTROKE_GAP: Duration = Duration::from_millis(100);

fn people() -> Value {
    json!({ "items": [{ "name": "A", "id": 1 }, { "name": "B", "id": 2 }] })
}

async fn type_slowly(widget: &RemoteSearch<MemoryRenderer, ScriptedFetcher>, values: &[&str]) {
    for value in values {
        widget.renderer().type_text(value);
        widget.on_input(*value);
        tokio::time::sleep(KEYSTROKE_GAP).await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_one_request_per_typing_pause() {
    let fetcher = ScriptedFetcher::new();
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    type_slowly(&widget, &["m", "ma", "mar", "mary"]).await;
    wait_for(&mut events, SearchEvent::is_terminal).await;

    assert_eq!(fetcher.terms(), vec!["mary".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_each_pause_issues_its_own_request() {
    let fetcher = ScriptedFetcher::new();
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mar");
    wait_for(&mut events, SearchEvent::is_terminal).await;
    widget.on_input("mary");
    wait_for(&mut events, SearchEvent::is_terminal).await;

    assert_eq!(fetcher.terms(), vec!["mar".to_string(), "mary".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_short_input_never_reaches_the_network() {
    let fetcher = ScriptedFetcher::new();
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("ma");
    let event = wait_for(&mut events, SearchEvent::is_terminal).await;

    assert!(matches!(event, SearchEvent::Skipped { min_len: 3, .. }));
    assert!(fetcher.requests().is_empty());
    let view = widget.renderer().snapshot();
    assert!(view.rows.is_empty());
    assert!(!view.list_visible);
    assert_eq!(view.loading_shown, 0);
    assert_eq!(widget.state().phase(), SearchPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_threshold_counts_characters_not_bytes() {
    let fetcher = ScriptedFetcher::new();
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    // Two characters, six bytes
    widget.on_input("日本");
    wait_for(&mut events, SearchEvent::is_terminal).await;
    assert!(fetcher.requests().is_empty());

    widget.on_input("日本語");
    wait_for(&mut events, SearchEvent::is_terminal).await;
    assert_eq!(fetcher.terms(), vec!["日本語".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_value_is_never_requested() {
    let fetcher = ScriptedFetcher::new();
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mary");
    tokio::time::sleep(TEST_DELAY / 2).await;
    widget.on_input("");
    let event = wait_for(&mut events, SearchEvent::is_terminal).await;

    assert!(matches!(event, SearchEvent::Skipped { .. }));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_rows_follow_response_order() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::from_millis(50), people());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mary");
    let event = wait_for(&mut events, SearchEvent::is_terminal).await;

    assert!(matches!(event, SearchEvent::ResultsRendered { count: 2, .. }));
    let view = widget.renderer().snapshot();
    assert_eq!(view.labels(), vec!["A", "B"]);
    assert_eq!(view.rows[1].index, 1);
    assert!(view.list_visible);
    assert!(!view.loading);
    assert_eq!(view.loading_shown, 1);
    assert_eq!(widget.state().phase(), SearchPhase::Results);
    assert_eq!(widget.state().items().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_keeps_list_bordered() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("zzz", Duration::ZERO, json!({ "items": [] }));
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("zzz");
    wait_for(&mut events, SearchEvent::is_terminal).await;

    let view = widget.renderer().snapshot();
    assert!(view.rows.is_empty());
    assert!(view.list_visible);
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn test_keystroke_clears_rendered_list_immediately() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mary");
    wait_for(&mut events, SearchEvent::is_terminal).await;
    assert_eq!(widget.renderer().snapshot().rows.len(), 2);

    widget.on_input("mary ");
    let view = widget.renderer().snapshot();
    assert!(view.rows.is_empty());
    assert!(!view.list_visible);
    assert!(widget.state().items().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_late_response_for_superseded_request_is_discarded() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond(
        "mar",
        Duration::from_secs(3),
        json!({ "items": [{ "name": "Marcus" }] }),
    );
    fetcher.respond(
        "mary",
        Duration::from_millis(100),
        json!({ "items": [{ "name": "Mary" }] }),
    );
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mar");
    let issued = wait_for(&mut events, |e| matches!(e, SearchEvent::RequestIssued { .. })).await;
    let SearchEvent::RequestIssued { seq: first, .. } = issued else {
        unreachable!()
    };

    // Typing while "mar" is in flight voids it and hides the spinner
    widget.on_input("mary");
    assert!(!widget.renderer().snapshot().loading);
    assert_eq!(widget.state().in_flight(), None);

    let rendered = wait_for(&mut events, |e| {
        matches!(e, SearchEvent::ResultsRendered { .. })
    })
    .await;
    assert!(matches!(rendered, SearchEvent::ResultsRendered { count: 1, .. }));

    let stale = wait_for(&mut events, |e| {
        matches!(e, SearchEvent::StaleDiscarded { .. })
    })
    .await;
    assert!(matches!(stale, SearchEvent::StaleDiscarded { seq, .. } if seq == first));

    assert_eq!(widget.renderer().snapshot().labels(), vec!["Mary"]);
    assert_eq!(widget.state().input(), "mary");
}

#[tokio::test(start_paused = true)]
async fn test_direct_search_reports_stale_outcome() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mar", Duration::from_secs(1), people());
    let widget = mount(test_config().build().unwrap(), &fetcher);

    let pending = {
        let widget = widget.clone();
        tokio::spawn(async move { widget.search_after_typing_stopped("mar").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    widget.on_input("mark");

    let outcome = pending.await.unwrap().unwrap();
    assert!(matches!(outcome, SearchOutcome::Stale { .. }));
    assert!(widget.renderer().snapshot().rows.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_server_error_hides_spinner_and_reports_failure() {
    let fetcher = ScriptedFetcher::new();
    let error = RemoteSearchError::Server {
        status: 500,
        url: common::TEST_ENDPOINT.to_string(),
    };
    fetcher.fail("mary", Duration::from_millis(200), error.clone());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mary");
    let event = wait_for(&mut events, SearchEvent::is_terminal).await;

    assert!(matches!(event, SearchEvent::Failed { .. }));
    let view = widget.renderer().snapshot();
    assert!(!view.loading);
    assert_eq!(view.loading_shown, 1);
    assert_eq!(view.error, Some(error));
    assert!(!view.list_visible);
    assert_eq!(widget.state().phase(), SearchPhase::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_failure_clears_previous_results() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    fetcher.fail(
        "maryl",
        Duration::ZERO,
        RemoteSearchError::Network("connection reset".into()),
    );
    let widget = mount(test_config().build().unwrap(), &fetcher);

    let outcome = widget.search_after_typing_stopped("mary").await.unwrap();
    assert_eq!(outcome, SearchOutcome::Rendered { seq: 1, count: 2 });

    let err = widget.search_after_typing_stopped("maryl").await.unwrap_err();
    assert!(err.is_transient());
    let view = widget.renderer().snapshot();
    assert!(view.rows.is_empty());
    assert!(!view.list_visible);
    assert!(widget.state().items().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_malformed_body_takes_failure_path() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, json!({ "items": { "name": "A" } }));
    let widget = mount(test_config().build().unwrap(), &fetcher);

    let err = widget.search_after_typing_stopped("mary").await.unwrap_err();

    assert!(matches!(err, RemoteSearchError::Extraction(_)));
    assert!(!widget.renderer().snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn test_next_keystroke_clears_error() {
    let fetcher = ScriptedFetcher::new();
    fetcher.fail("mary", Duration::ZERO, RemoteSearchError::Network("down".into()));
    let widget = mount(test_config().build().unwrap(), &fetcher);

    let _ = widget.search_after_typing_stopped("mary").await;
    assert!(widget.renderer().snapshot().error.is_some());

    widget.on_input("mar");
    assert!(widget.renderer().snapshot().error.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_select_writes_label_and_calls_back_once() {
    let selected: Arc<Mutex<Vec<ResultItem>>> = Arc::default();
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let config = test_config()
        .on_click_item({
            let selected = Arc::clone(&selected);
            move |item| selected.lock().push(item.clone())
        })
        .build()
        .unwrap();
    let widget = mount(config, &fetcher);

    widget.search_after_typing_stopped("mary").await.unwrap();
    let item = widget.select(1).unwrap();

    assert_eq!(item.as_value(), &json!({ "name": "B", "id": 2 }));
    assert_eq!(selected.lock().as_slice(), &[item]);
    let view = widget.renderer().snapshot();
    assert_eq!(view.input_value, "B");
    assert!(view.rows.is_empty());
    assert!(!view.list_visible);
    assert_eq!(widget.state().input(), "B");
}

#[tokio::test(start_paused = true)]
async fn test_select_unknown_row_changes_nothing() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    widget.search_after_typing_stopped("mary").await.unwrap();

    let err = widget.select(5).unwrap_err();

    assert_eq!(err, RemoteSearchError::NoSuchItem(5));
    assert_eq!(widget.renderer().snapshot().rows.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_custom_label_applies_to_rows_and_selection() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond(
        "ada",
        Duration::ZERO,
        json!([{ "first": "Ada", "last": "Lovelace" }]),
    );
    let config = test_config()
        .custom_item_label(|item| {
            let part = |k| item.get(k).and_then(Value::as_str).unwrap_or_default().to_string();
            format!("{} {}", part("first"), part("last"))
        })
        .build()
        .unwrap();
    let widget = mount(config, &fetcher);

    widget.search_after_typing_stopped("ada").await.unwrap();
    assert_eq!(widget.renderer().snapshot().labels(), vec!["Ada Lovelace"]);

    widget.select(0).unwrap();
    assert_eq!(widget.renderer().snapshot().input_value, "Ada Lovelace");
}

#[tokio::test(start_paused = true)]
async fn test_custom_label_may_read_widget_state_during_select() {
    type Widget = RemoteSearch<MemoryRenderer, ScriptedFetcher>;
    let handle: Arc<OnceLock<Widget>> = Arc::default();
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let config = test_config()
        .custom_item_label({
            let handle = Arc::clone(&handle);
            move |item| {
                let rendered = handle.get().map_or(0, |w| w.state().items().len());
                let name = item.get("name").and_then(Value::as_str).unwrap_or_default();
                format!("{name} ({rendered})")
            }
        })
        .build()
        .unwrap();
    let widget = mount(config, &fetcher);
    assert!(handle.set(widget.clone()).is_ok());

    widget.search_after_typing_stopped("mary").await.unwrap();
    widget.select(0).unwrap();

    assert_eq!(widget.renderer().snapshot().input_value, "A (2)");
}

#[tokio::test(start_paused = true)]
async fn test_select_after_list_cleared_is_rejected() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    widget.search_after_typing_stopped("mary").await.unwrap();

    widget.on_input("mar");
    let err = widget.select(0).unwrap_err();

    assert_eq!(err, RemoteSearchError::NoSuchItem(0));
    assert_eq!(widget.renderer().snapshot().input_value, "");
}

#[tokio::test(start_paused = true)]
async fn test_results_callback_sees_raw_body_first() {
    let seen: Arc<Mutex<Vec<(Value, u16)>>> = Arc::default();
    let fetcher = ScriptedFetcher::new();
    let body = json!({ "data": { "people": [{ "name": "Mary" }] }, "total": 1 });
    fetcher.respond("mary", Duration::ZERO, body.clone());
    let config = test_config()
        .items(remote_search::ItemsExtractor::Field("data.people".into()))
        .on_get_results({
            let seen = Arc::clone(&seen);
            move |body, meta| seen.lock().push((body.clone(), meta.status))
        })
        .build()
        .unwrap();
    let widget = mount(config, &fetcher);

    widget.search_after_typing_stopped("mary").await.unwrap();

    assert_eq!(seen.lock().as_slice(), &[(body, 200)]);
    assert_eq!(widget.renderer().snapshot().labels(), vec!["Mary"]);
}

#[tokio::test(start_paused = true)]
async fn test_highlight_marks_settled_value() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mar", Duration::ZERO, json!([{ "name": "Rosemary" }]));
    let config = test_config().highlight_match(true).build().unwrap();
    let widget = mount(config, &fetcher);

    widget.search_after_typing_stopped("mar").await.unwrap();

    let view = widget.renderer().snapshot();
    let highlighted = view.rows[0].highlighted.as_ref().unwrap();
    assert_eq!(
        highlighted.to_html(),
        "Rose<span class='remote-search-highlight-match'>mar</span>y"
    );
}

#[tokio::test(start_paused = true)]
async fn test_focus_loss_hides_list_when_configured() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();
    widget.search_after_typing_stopped("mary").await.unwrap();

    widget.on_focus_lost();

    wait_for(&mut events, |e| matches!(e, SearchEvent::ListHidden { .. })).await;
    let view = widget.renderer().snapshot();
    assert!(view.rows.is_empty());
    assert!(!view.list_visible);
}

#[tokio::test(start_paused = true)]
async fn test_focus_loss_leaves_in_flight_request_alone() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::from_millis(300), people());
    let widget = mount(test_config().build().unwrap(), &fetcher);
    let mut events = widget.subscribe();

    widget.on_input("mary");
    wait_for(&mut events, |e| matches!(e, SearchEvent::RequestIssued { .. })).await;
    widget.on_focus_lost();
    wait_for(&mut events, |e| matches!(e, SearchEvent::ListHidden { .. })).await;

    let event = wait_for(&mut events, SearchEvent::is_terminal).await;

    assert!(matches!(event, SearchEvent::ResultsRendered { count: 2, .. }));
    let view = widget.renderer().snapshot();
    assert_eq!(view.labels(), vec!["A", "B"]);
    assert!(view.list_visible);
    assert!(!view.loading);
}

#[tokio::test(start_paused = true)]
async fn test_focus_loss_keeps_list_when_disabled() {
    let fetcher = ScriptedFetcher::new();
    fetcher.respond("mary", Duration::ZERO, people());
    let config = test_config().hide_on_blur(false).build().unwrap();
    let widget = mount(config, &fetcher);
    widget.search_after_typing_stopped("mary").await.unwrap();

    widget.on_focus_lost();

    assert_eq!(widget.renderer().snapshot().labels(), vec!["A", "B"]);
    assert_eq!(widget.select(0).unwrap().get("name"), Some(&json!("A")));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_pending_drops_scheduled_search() {
    let fetcher = ScriptedFetcher::new();
    let widget = mount(test_config().build().unwrap(), &fetcher);

    widget.on_input("mary");
    widget.cancel_pending();
    tokio::time::sleep(TEST_DELAY * 4).await;

    assert!(fetcher.requests().is_empty());
}

#[test]
fn test_mount_fails_for_unknown_selector() {
    let fetcher = ScriptedFetcher::new();
    let config = test_config().build().unwrap();
    let renderer = MemoryRenderer::with_selectors(["#other"]);

    let err = RemoteSearch::mount(config, renderer, fetcher).err().unwrap();

    assert!(matches!(err, RemoteSearchError::Configuration(msg) if msg.contains("#search")));
}

#[test]
fn test_mount_applies_placeholder_and_places_overlays() {
    let renderer = MemoryRenderer::with_selectors(["#search"]);
    renderer.set_input_rect(InputRect {
        left: 10.0,
        top: 20.0,
        width: 200.0,
        height: 30.0,
        scroll_x: 0.0,
        scroll_y: 100.0,
    });
    let config = test_config()
        .placeholder("find people")
        .list_placement(Placement::Offset { left: 0.0, top: 40.0 })
        .build()
        .unwrap();

    let widget = RemoteSearch::mount(config, renderer, ScriptedFetcher::new()).unwrap();

    let view = widget.renderer().snapshot();
    assert_eq!(view.attached_to.as_deref(), Some("#search"));
    assert_eq!(view.placeholder.as_deref(), Some("find people"));
    assert_eq!(view.spinner_at, Some(Position { left: 180.0, top: 126.0 }));
    assert_eq!(view.list_at, Some(Position { left: 10.0, top: 160.0 }));
    assert!(!view.list_visible);
    assert!(!view.loading);
}

#[test]
fn test_reposition_follows_input() {
    let widget = RemoteSearch::mount(
        test_config().build().unwrap(),
        MemoryRenderer::new(),
        ScriptedFetcher::new(),
    )
    .unwrap();

    widget.renderer().set_input_rect(InputRect {
        left: 0.0,
        top: 0.0,
        width: 100.0,
        height: 50.0,
        scroll_x: 5.0,
        scroll_y: 0.0,
    });
    widget.reposition();

    let view = widget.renderer().snapshot();
    assert_eq!(view.spinner_at, Some(Position { left: 75.0, top: 10.0 }));
    assert_eq!(view.list_at, Some(Position { left: 5.0, top: 50.0 }));
}
