//! # stanza-file-store
//!
//! Key/value text stores for persisting REPL state between sessions.
//!
//! ## Store Types
//!
//! - [`LocalDiskStore`]: one file per key under a root directory.
//! - [`InMemoryStore`]: a map held in memory, for tests and throwaway sessions.
//!
//! ```ignore
//! use stanza_file_store::{KeyValueStore, LocalDiskStore};
//!
//! let mut store = LocalDiskStore::create(dir)?;
//! store.set("repl/history", "c\nb\na\n").await?;
//! let text = store.get("repl/history").await?;
//! ```

pub mod error;
pub mod in_memory;
pub mod local_disk;
pub mod traits;

pub use error::{Result, StoreError};
pub use in_memory::InMemoryStore;
pub use local_disk::LocalDiskStore;
pub use traits::KeyValueStore;
