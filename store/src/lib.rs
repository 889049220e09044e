pub mod keys;
pub mod sqlite_store;

/// Persistent key/value state, the client-side stand-in for the browser's
/// local storage. Values are opaque strings; serialization lives with the
/// callers. Removing an absent key is not an error.
#[async_trait::async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn put(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}
