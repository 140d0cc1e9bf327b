//! Shared fixtures: synthetic provider bodies and a recording transport
#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::Mutex;
use trendscope::endpoints::{Endpoint, Locale};
use trendscope::transport::Transport;
use trendscope::types::TrendingStory;
use trendscope::TrendsError;

/// Wrap trending records the way the batch RPC does: guard, outer frame, JSON-in-JSON
pub fn trending_envelope(records: &[Value]) -> String {
    let inner = json!([null, records]).to_string();
    let outer = json!([["wrb.fr", "i0OFE", inner, null, null, null, "generic"]]);
    format!(")]}}'\n\n{}", outer)
}

/// Positional record that decodes back into `story`.
///
/// Stories without an image must have no articles; the provider carries both in one slot.
pub fn story_record(story: &TrendingStory) -> Value {
    let media = match &story.image {
        Some(image) => {
            let articles: Vec<Value> = story
                .articles
                .iter()
                .map(|a| json!([a.title, a.url, a.source, a.time, a.snippet]))
                .collect();
            json!([image.news_url, image.source, image.image_url, articles])
        }
        None => Value::Null,
    };
    let end = story.end_time.map(|t| json!([t])).unwrap_or(Value::Null);

    json!([
        story.title,
        media,
        "US",
        [story.start_time],
        end,
        null,
        story.traffic,
        null,
        1000,
        [],
        [11],
        [],
        story.share_url
    ])
}

/// Guard-prefixed JSON object body (explore, widget data, autocomplete)
pub fn document_body(doc: Value) -> String {
    format!(")]}}',\n{}", doc)
}

/// Explore handshake exposing the given widget ids; each token is `tok-<id>`
pub fn explore_body(widget_ids: &[&str]) -> String {
    let widgets: Vec<Value> = widget_ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "request": {"restriction": {"geo": {"country": "US"}}, "resolution": "COUNTRY"},
                "token": format!("tok-{}", id),
            })
        })
        .collect();
    document_body(json!({ "widgets": widgets }))
}

pub fn query_value<'a>(endpoint: &'a Endpoint, key: &str) -> Option<&'a str> {
    endpoint
        .query
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

type Responder = Box<dyn Fn(&Endpoint) -> Result<String, TrendsError> + Send + Sync>;

/// Transport that answers from a closure and records every request
pub struct MockTransport {
    responder: Responder,
    calls: Mutex<Vec<Endpoint>>,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(&Endpoint) -> Result<String, TrendsError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Transport that fails the test if it is ever called
    pub fn unreachable() -> Self {
        Self::new(|endpoint| panic!("unexpected transport call to {}", endpoint.path))
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<String, TrendsError> {
        self.calls.lock().unwrap().push(endpoint.clone());
        (self.responder)(endpoint)
    }
}

pub fn locale() -> Locale {
    Locale::default()
}
