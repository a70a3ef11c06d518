use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DeviceStore;
use crate::errors::StoreError;
use crate::models::Device;

#[derive(Default)]
pub struct MemoryStore {
    devices: RwLock<HashMap<String, Device>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceStore for MemoryStore {
    async fn get(&self, mac: &str) -> Result<Option<Device>, StoreError> {
        Ok(self.devices.read().await.get(mac).cloned())
    }

    async fn insert(&self, device: &Device) -> Result<bool, StoreError> {
        let mut devices = self.devices.write().await;
        if devices.contains_key(&device.mac) {
            return Ok(false);
        }

        devices.insert(device.mac.clone(), device.clone());

        Ok(true)
    }

    async fn put(&self, device: &Device) -> Result<bool, StoreError> {
        match self.devices.write().await.get_mut(&device.mac) {
            Some(stored) => {
                *stored = device.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, mac: &str) -> Result<bool, StoreError> {
        Ok(self.devices.write().await.remove(mac).is_some())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.devices.write().await.clear();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hydrosync_api::Settings;

    use super::*;

    fn device(mac: &str) -> Device {
        Device {
            mac: mac.to_string(),
            passhash: "hash".to_string(),
            settings: Settings::default(),
            states: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicates() {
        let store = MemoryStore::new();

        assert!(store.insert(&device("00:1A:C2:7B:00:47")).await.unwrap());
        assert!(!store.insert(&device("00:1A:C2:7B:00:47")).await.unwrap());
        assert!(store.insert(&device("07:2B:C2:7B:00:47")).await.unwrap());
    }

    #[tokio::test]
    async fn test_returned_devices_are_copies() {
        let store = MemoryStore::new();
        store.insert(&device("00:1A:C2:7B:00:47")).await.unwrap();

        let mut copy = store.get("00:1A:C2:7B:00:47").await.unwrap().unwrap();
        copy.passhash = "changed".to_string();

        let stored = store.get("00:1A:C2:7B:00:47").await.unwrap().unwrap();
        assert_eq!(stored.passhash, "hash");
    }

    #[tokio::test]
    async fn test_put_and_delete_require_existing_device() {
        let store = MemoryStore::new();
        let mut record = device("00:1A:C2:7B:00:47");

        assert!(!store.put(&record).await.unwrap());
        assert!(!store.delete(&record.mac).await.unwrap());

        store.insert(&record).await.unwrap();
        record.settings.poll_frequency = 2000;
        assert!(store.put(&record).await.unwrap());
        assert_eq!(store.get(&record.mac).await.unwrap(), Some(record.clone()));

        assert!(store.delete(&record.mac).await.unwrap());
        assert!(store.get(&record.mac).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = MemoryStore::new();
        store.insert(&device("00:1A:C2:7B:00:47")).await.unwrap();
        store.insert(&device("07:2B:C2:7B:00:47")).await.unwrap();

        store.clear().await.unwrap();

        assert!(store.get("00:1A:C2:7B:00:47").await.unwrap().is_none());
        assert!(store.get("07:2B:C2:7B:00:47").await.unwrap().is_none());
    }
}
