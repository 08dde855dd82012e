//! The key/value store capability.

use async_trait::async_trait;

use crate::Result;

/// Durable text storage addressed by string keys.
///
/// Keys are `/`-separated relative paths such as `repl/history`. A missing
/// key reads as `Ok(None)`; writing replaces the whole record.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn KeyValueStore>`.
///
/// # Example
///
/// ```rust,ignore
/// use stanza_file_store::{InMemoryStore, KeyValueStore};
///
/// async fn bump(store: &mut dyn KeyValueStore) -> stanza_file_store::Result<()> {
///     let old = store.get("counter").await?.unwrap_or_default();
///     store.set("counter", &format!("{old}1")).await
/// }
/// ```
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the record stored under `key`.
    async fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// Replace the record stored under `key` with `value`.
    async fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

// Blanket implementations for references and boxes

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    async fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.as_mut().get(key).await
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.as_mut().set(key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryStore;

    #[tokio::test]
    async fn object_safety_works() {
        let mut store = InMemoryStore::new();
        let boxed: &mut dyn KeyValueStore = &mut store;

        boxed.set("a/b", "value").await.unwrap();
        assert_eq!(boxed.get("a/b").await.unwrap().as_deref(), Some("value"));
    }

    #[tokio::test]
    async fn boxed_store_delegates() {
        let mut store: Box<dyn KeyValueStore> = Box::new(InMemoryStore::new());

        assert!(store.get("missing").await.unwrap().is_none());
        store.set("present", "yes").await.unwrap();
        assert_eq!(store.get("present").await.unwrap().as_deref(), Some("yes"));
    }
}
