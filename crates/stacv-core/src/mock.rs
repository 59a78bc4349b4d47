//! # Mock Fetcher
//!
//! An in-memory [`Fetch`] implementation keyed by the display form of a
//! [`Href`]. Every request is recorded, so tests can assert which documents
//! and schemas were retrieved, and how often.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::StacError;
use crate::fetch::Fetch;
use crate::href::Href;

/// In-memory fetcher for tests.
#[derive(Debug, Default)]
pub struct MockFetcher {
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// An empty fetcher: every request fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `doc` at `href`.
    pub fn with(mut self, href: impl Into<String>, doc: Value) -> Self {
        self.documents.insert(href.into(), doc);
        self
    }

    /// Every request made so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of requests made for `href`.
    pub fn request_count(&self, href: &str) -> usize {
        self.requests.lock().iter().filter(|r| *r == href).count()
    }
}

impl Fetch for MockFetcher {
    fn fetch(&self, href: &Href) -> Result<Value, StacError> {
        let key = href.to_string();
        self.requests.lock().push(key.clone());
        match self.documents.get(&key) {
            Some(doc) => Ok(doc.clone()),
            None if href.is_url() => Err(StacError::Network {
                href: key,
                reason: "HTTP status client error (404 Not Found)".to_string(),
            }),
            None => Err(StacError::NotFound {
                path: key,
                reason: "no such file or directory".to_string(),
            }),
        }
    }
}
