use std::sync::Arc;

use async_trait::async_trait;
use sqlx::types::Json;

use super::DeviceStore;
use crate::configs::Storage;
use crate::errors::StoreError;
use crate::models::{Device, DeviceRow};

pub struct SqliteStore {
    storage: Arc<Storage>,
}

impl SqliteStore {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl DeviceStore for SqliteStore {
    async fn get(&self, mac: &str) -> Result<Option<Device>, StoreError> {
        let row: Option<DeviceRow> = sqlx::query_as("SELECT * FROM devices WHERE mac = $1")
            .bind(mac)
            .fetch_optional(self.storage.get_pool())
            .await?;

        Ok(row.map(Device::from))
    }

    async fn insert(&self, device: &Device) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO devices (mac, passhash, settings, states)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (mac) DO NOTHING
            "#,
        )
        .bind(&device.mac)
        .bind(&device.passhash)
        .bind(Json(&device.settings))
        .bind(Json(&device.states))
        .execute(self.storage.get_pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn put(&self, device: &Device) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE devices
            SET passhash = $1, settings = $2, states = $3
            WHERE mac = $4
            "#,
        )
        .bind(&device.passhash)
        .bind(Json(&device.settings))
        .bind(Json(&device.states))
        .bind(&device.mac)
        .execute(self.storage.get_pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, mac: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM devices WHERE mac = $1")
            .bind(mac)
            .execute(self.storage.get_pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM devices")
            .execute(self.storage.get_pool())
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use hydrosync_api::{PumpState, SensorState, Settings, State};

    use crate::tests::setup_test_storage;

    use super::*;

    fn device(mac: &str) -> Device {
        Device {
            mac: mac.to_string(),
            passhash: "hash".to_string(),
            settings: Settings {
                poll_frequency: 1000,
            },
            states: vec![State {
                sensor: SensorState {
                    pin: 7,
                    threshold: 100,
                    level: 50,
                },
                pump: PumpState {
                    pin: 5,
                    speed: 255,
                    is_active: false,
                    threshold_offset: 50,
                },
            }],
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_device() {
        let store = SqliteStore::new(setup_test_storage().await);
        let record = device("00:1A:C2:7B:00:47");

        assert!(store.insert(&record).await.unwrap());
        assert!(!store.insert(&record).await.unwrap());

        let found = store.get(&record.mac).await.unwrap();
        assert_eq!(found, Some(record));

        assert!(store.get("07:2B:C2:7B:00:47").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_json_columns() {
        let store = SqliteStore::new(setup_test_storage().await);
        let mut record = device("00:1A:C2:7B:00:47");

        assert!(!store.put(&record).await.unwrap());
        store.insert(&record).await.unwrap();

        record.settings.poll_frequency = 2000;
        record.states[0].pump.is_active = true;
        assert!(store.put(&record).await.unwrap());

        let found = store.get(&record.mac).await.unwrap().unwrap();
        assert_eq!(found.settings.poll_frequency, 2000);
        assert!(found.states[0].pump.is_active);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let store = SqliteStore::new(setup_test_storage().await);
        store.insert(&device("00:1A:C2:7B:00:47")).await.unwrap();
        store.insert(&device("07:2B:C2:7B:00:47")).await.unwrap();

        assert!(store.delete("00:1A:C2:7B:00:47").await.unwrap());
        assert!(!store.delete("00:1A:C2:7B:00:47").await.unwrap());
        assert!(store.get("07:2B:C2:7B:00:47").await.unwrap().is_some());

        store.clear().await.unwrap();
        assert!(store.get("07:2B:C2:7B:00:47").await.unwrap().is_none());
    }
}
