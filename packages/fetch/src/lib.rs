//! # stanza-fetch
//!
//! Fetch the text behind a URL, dispatching on the URL's protocol.
//!
//! ```ignore
//! use stanza_fetch::Fetcher;
//!
//! let fetcher = Fetcher::new();
//! let body = fetcher.fetch_str("https://example.com/module.txt")?;
//! ```
//!
//! Unknown protocols fail immediately; the error lists every protocol the
//! fetcher knows about.

pub mod error;
pub mod fetcher;

pub use error::{FetchError, Result};
pub use fetcher::{Fetcher, Handler};
