//! Full export of the highlights feed.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ExplorerError, ExplorerResult};
use crate::transport::{ApiRequest, HttpTransport};

pub const HIGHLIGHTS_FEED_PATH: &str = "library_items/highlights_feed/";

#[derive(Debug, Deserialize)]
struct FeedPage {
    #[serde(default)]
    feed: Vec<Value>,
    next: Option<String>,
}

/// Fetch every feed entry, following `next` links until the last page.
pub async fn fetch_highlights<T: HttpTransport + ?Sized>(
    transport: &T,
    access_token: &str,
    first_page_url: &str,
) -> ExplorerResult<Vec<Value>> {
    let mut entries = Vec::new();
    let mut next = Some(first_page_url.to_string());
    let mut pages = 0usize;

    while let Some(url) = next.take().filter(|url| !url.is_empty()) {
        let response = transport
            .send(ApiRequest::get(&url).bearer(access_token))
            .await?;

        if !response.is_success() {
            return Err(ExplorerError::Api {
                status: response.status,
                url,
            });
        }

        let page: FeedPage = serde_json::from_str(&response.body)?;
        pages += 1;
        debug!(url, entries = page.feed.len(), "Fetched highlights page");

        entries.extend(page.feed);
        next = page.next;
    }

    info!(pages, entries = entries.len(), "Fetched highlights feed");
    Ok(entries)
}
