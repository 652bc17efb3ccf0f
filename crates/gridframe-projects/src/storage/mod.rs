//! Key-value storage port and its backends.
//!
//! The project store only needs string keys mapped to string values;
//! each backend decides where those strings live.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::ProjectResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Port for string key-value persistence
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Value stored under `key`, `None` when absent
    async fn get_item(&self, key: &str) -> ProjectResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> ProjectResult<()>;

    /// Remove `key`; removing an absent key succeeds
    async fn remove_item(&self, key: &str) -> ProjectResult<()>;

    /// All stored keys, in no particular order
    async fn keys(&self) -> ProjectResult<Vec<String>>;
}

#[async_trait]
impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    async fn get_item(&self, key: &str) -> ProjectResult<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> ProjectResult<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> ProjectResult<()> {
        (**self).remove_item(key).await
    }

    async fn keys(&self) -> ProjectResult<Vec<String>> {
        (**self).keys().await
    }
}
