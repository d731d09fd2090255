//! Network side of the search cycle
//!
//! The widget only needs "GET this url, give me JSON". [`Fetcher`] is that
//! seam; [`HttpFetcher`] implements it with `reqwest`, tests implement it with
//! canned responses.

mod http;

pub use http::HttpFetcher;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use url::Url;

use crate::widget::errors::RemoteSearchResult;

/// Transport used by the widget to issue search requests
pub trait Fetcher: Send + Sync + 'static {
    /// Issue a GET and decode the JSON body
    ///
    /// Implementations fail with `Network` when no response arrives, `Server`
    /// on a non-success status and `Extraction` when the body is not JSON.
    fn get_json(&self, url: Url)
    -> impl Future<Output = RemoteSearchResult<FetchResponse>> + Send;
}

/// A decoded search response
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub body: Value,
    pub meta: ResponseMeta,
}

/// Response details handed to the results callback alongside the body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Final url after redirects
    pub url: String,
    pub status: u16,
}
