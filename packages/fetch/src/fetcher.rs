use std::collections::BTreeMap;

use url::Url;

use crate::error::{FetchError, Result};

/// A function that fetches the text behind a URL.
pub type Handler = Box<dyn Fn(&Url) -> Result<String> + Send + Sync>;

/// Dispatches fetches to a handler chosen by the URL's protocol.
///
/// Protocols are keyed with a trailing colon (`http:`), matching how they are
/// written in front of a URL. `http:` and `https:` are registered by
/// [`Fetcher::new`].
///
/// # Example
///
/// ```ignore
/// use stanza_fetch::Fetcher;
///
/// let mut fetcher = Fetcher::new();
/// fetcher.register("echo", |url| Ok(url.path().to_string()));
///
/// let text = fetcher.fetch_str("echo:hello")?;
/// assert_eq!(text, "hello");
/// ```
pub struct Fetcher {
    handlers: BTreeMap<String, Handler>,
}

impl Fetcher {
    /// Create a fetcher that knows `http:` and `https:`.
    pub fn new() -> Self {
        let mut fetcher = Self::empty();
        fetcher.register("http", http_handler);
        fetcher.register("https", http_handler);
        fetcher
    }

    /// Create a fetcher with no protocols registered.
    pub fn empty() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// The registered protocols, each with its trailing colon.
    pub fn known_protocols(&self) -> Vec<String> {
        self.handlers.keys().cloned().collect()
    }

    /// Register (or replace) the handler for a protocol.
    ///
    /// The trailing colon is optional: `"http"` and `"http:"` are the same.
    pub fn register<F>(&mut self, protocol: &str, handler: F) -> &mut Self
    where
        F: Fn(&Url) -> Result<String> + Send + Sync + 'static,
    {
        let mut protocol = protocol.to_string();
        if !protocol.ends_with(':') {
            protocol.push(':');
        }
        self.handlers.insert(protocol, Box::new(handler));
        self
    }

    /// Fetch the text behind `url`.
    ///
    /// Fails immediately with [`FetchError::UnknownProtocol`] if no handler is
    /// registered for the URL's protocol.
    pub fn fetch(&self, url: &Url) -> Result<String> {
        let protocol = format!("{}:", url.scheme());
        let handler = self
            .handlers
            .get(&protocol)
            .ok_or_else(|| FetchError::UnknownProtocol {
                protocol: protocol.clone(),
                known: self.known_protocols(),
            })?;

        tracing::debug!(%url, "fetching");
        handler(url)
    }

    /// Parse `url` and fetch it.
    pub fn fetch_str(&self, url: &str) -> Result<String> {
        self.fetch(&Url::parse(url)?)
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn http_handler(url: &Url) -> Result<String> {
    let response = reqwest::blocking::get(url.as_str())?.error_for_status()?;
    Ok(response.text()?)
}
