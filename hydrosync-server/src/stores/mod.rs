mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::Device;

/// Persistence backend for device records, keyed by MAC address.
///
/// Implementations hand out copies; mutating a returned [`Device`] has no
/// effect until it is written back with [`DeviceStore::put`].
#[async_trait]
pub trait DeviceStore: Send + Sync {
    async fn get(&self, mac: &str) -> Result<Option<Device>, StoreError>;

    /// Returns `false` when a device with the same MAC already exists.
    async fn insert(&self, device: &Device) -> Result<bool, StoreError>;

    /// Replaces an existing record. Returns `false` when there is none.
    async fn put(&self, device: &Device) -> Result<bool, StoreError>;

    async fn delete(&self, mac: &str) -> Result<bool, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}
