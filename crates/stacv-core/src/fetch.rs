//! # Document Fetcher
//!
//! Resolves a [`Href`] to parsed JSON. URLs are retrieved with a plain GET
//! (no custom headers or auth), paths are read from disk. There is no
//! retry: one failure is terminal for the reference.
//!
//! ## Failure mapping
//!
//! - transport failure, TLS failure or non-2xx status → `Network`
//! - local path missing or unreadable → `NotFound`
//! - bytes that are not JSON → `Parse`

use std::io;

use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::StacError;
use crate::href::Href;

/// Retrieval of JSON documents.
///
/// Documents, schemas and `$ref` targets all go through this seam. The
/// `Send + Sync` bound lets a fetcher back a schema retriever.
pub trait Fetch: Send + Sync {
    /// Retrieve and parse the document at `href`.
    fn fetch(&self, href: &Href) -> Result<Value, StacError>;
}

/// Blocking HTTP and filesystem fetcher.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: reqwest::blocking::Client,
}

impl Fetcher {
    /// Build a fetcher with the configured request timeout.
    pub fn new(config: &ValidatorConfig) -> Result<Self, StacError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StacError::Network {
                href: "client_init".into(),
                reason: e.to_string(),
            })?;
        Ok(Self { http })
    }

    fn get(&self, url: &url::Url) -> Result<String, StacError> {
        let network = |e: reqwest::Error| StacError::Network {
            href: url.to_string(),
            reason: e.to_string(),
        };
        self.http
            .get(url.clone())
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(network)
    }
}

impl Fetch for Fetcher {
    fn fetch(&self, href: &Href) -> Result<Value, StacError> {
        tracing::debug!(%href, "fetching");
        let body = match href {
            Href::Url(url) => self.get(url)?,
            Href::Path(path) => std::fs::read_to_string(path).map_err(|e| StacError::NotFound {
                path: path.display().to_string(),
                reason: describe_io(&e),
            })?,
        };
        parse_json(href, &body)
    }
}

/// Parse a fetched body, attributing failures to `href`.
fn parse_json(href: &Href, body: &str) -> Result<Value, StacError> {
    serde_json::from_str(body).map_err(|e| StacError::Parse {
        href: href.to_string(),
        reason: e.to_string(),
    })
}

fn describe_io(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "no such file or directory".to_string(),
        _ => err.to_string(),
    }
}
