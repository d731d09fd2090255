//! Test utilities and helper functions for the remote search test suite

use mockito::{Matcher, Mock, Server};
use parking_lot::Mutex;
use remote_search::{
    FetchResponse, Fetcher, MemoryRenderer, RemoteSearch, RemoteSearchError, RemoteSearchResult,
    ResponseMeta, SearchConfig, SearchEvent,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use url::Url;

/// Endpoint used by tests that never touch the network
#[allow(dead_code)]
pub const TEST_ENDPOINT: &str = "https://api.example.com/people";

/// Typing delay used by cycle tests
#[allow(dead_code)]
pub const TEST_DELAY: Duration = Duration::from_millis(500);

/// Canned response for one settled value
#[derive(Clone)]
struct Scripted {
    latency: Duration,
    result: RemoteSearchResult<Value>,
}

/// Fetcher that answers from a script keyed by the `search_term` value and
/// records every url it is asked for
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct ScriptedFetcher {
    script: Arc<Mutex<HashMap<String, Scripted>>>,
    requests: Arc<Mutex<Vec<Url>>>,
}

#[allow(dead_code)]
impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `term` with `body` after `latency`
    pub fn respond(&self, term: &str, latency: Duration, body: Value) {
        self.script.lock().insert(
            term.to_string(),
            Scripted {
                latency,
                result: Ok(body),
            },
        );
    }

    /// Fail `term` with `error` after `latency`
    pub fn fail(&self, term: &str, latency: Duration, error: RemoteSearchError) {
        self.script.lock().insert(
            term.to_string(),
            Scripted {
                latency,
                result: Err(error),
            },
        );
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }

    /// Settled values that reached the network, in order
    pub fn terms(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|url| query_value(url, "search_term"))
            .collect()
    }
}

impl Fetcher for ScriptedFetcher {
    async fn get_json(&self, url: Url) -> RemoteSearchResult<FetchResponse> {
        self.requests.lock().push(url.clone());

        let term = query_value(&url, "search_term").unwrap_or_default();
        let scripted = self.script.lock().get(&term).cloned();
        let Scripted { latency, result } = scripted.unwrap_or(Scripted {
            latency: Duration::ZERO,
            result: Ok(json!({ "items": [] })),
        });

        tokio::time::sleep(latency).await;
        let body = result?;
        Ok(FetchResponse {
            body,
            meta: ResponseMeta {
                url: url.to_string(),
                status: 200,
            },
        })
    }
}

/// Value of a query parameter on a url
#[allow(dead_code)]
pub fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Builder preset shared by the cycle tests
#[allow(dead_code)]
pub fn test_config() -> remote_search::SearchConfigBuilder<remote_search::config::WithEndpoint> {
    SearchConfig::builder()
        .input_selector("#search")
        .absolute_url(TEST_ENDPOINT)
        .typing_delay(TEST_DELAY)
}

/// Route `tracing` output through the test harness, filtered by `RUST_LOG`
///
/// Safe to call from every test; only the first call installs the subscriber.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Mount a widget over a scripted fetcher and a memory renderer
#[allow(dead_code)]
pub fn mount(
    config: SearchConfig,
    fetcher: &ScriptedFetcher,
) -> RemoteSearch<MemoryRenderer, ScriptedFetcher> {
    init_test_logging();
    RemoteSearch::mount(config, MemoryRenderer::new(), fetcher.clone())
        .expect("widget should mount")
}

/// Receive events until one matches, failing after a generous wait
#[allow(dead_code)]
pub async fn wait_for<P>(events: &mut broadcast::Receiver<SearchEvent>, mut predicate: P) -> SearchEvent
where
    P: FnMut(&SearchEvent) -> bool,
{
    let wait = async {
        loop {
            match events.recv().await {
                Ok(event) if predicate(&event) => return event,
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => panic!("event channel closed"),
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(30), wait)
        .await
        .expect("expected event was never published")
}

/// Creates a mock search endpoint that answers a given term with JSON
#[allow(dead_code)]
pub async fn create_search_mock(server: &mut Server, term: &str, body: &Value) -> Mock {
    server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("search_term".into(), term.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Creates a mock endpoint that returns an error
#[allow(dead_code)]
pub async fn create_error_mock(server: &mut Server, path: &str, status: usize) -> Mock {
    server
        .mock("GET", path)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_body("Error")
        .create_async()
        .await
}

/// Helper to create test URLs
#[allow(dead_code)]
pub fn test_url(server: &Server, path: &str) -> String {
    format!("{}{}", server.url(), path)
}
