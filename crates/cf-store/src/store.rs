use crate::StoreResult;

/// Device-durable key-value storage surviving process restarts.
///
/// Values are opaque serialized blobs; absence of a key is a valid
/// state (it is how "logged out" looks on disk), so reads return
/// `Option` and removing an absent key succeeds.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Durably store `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the value under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
