use std::sync::Arc;

use hydrosync_api::{Settings, State};
use tokio::sync::Mutex;

use crate::errors::StoreError;
use crate::models::{Device, ShallowDevice};
use crate::stores::DeviceStore;

pub struct DeviceRepository {
    store: Arc<dyn DeviceStore>,
    // Serializes get-modify-put sequences so concurrent requests see each
    // update applied in full.
    write_lock: Mutex<()>,
}

impl DeviceRepository {
    pub fn new(store: Arc<dyn DeviceStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }
}

impl DeviceRepository {
    pub async fn create(
        &self,
        mac: &str,
        passhash: &str,
        settings: Settings,
        states: Vec<State>,
    ) -> Result<bool, StoreError> {
        let device = Device {
            mac: mac.to_string(),
            passhash: passhash.to_string(),
            settings,
            states,
        };

        let _guard = self.write_lock.lock().await;

        self.store.insert(&device).await
    }

    pub async fn find_shallow(&self, mac: &str) -> Result<Option<ShallowDevice>, StoreError> {
        let device = self.store.get(mac).await?;

        Ok(device.as_ref().map(ShallowDevice::from))
    }

    pub async fn find_settings(&self, mac: &str) -> Result<Option<Settings>, StoreError> {
        let device = self.store.get(mac).await?;

        Ok(device.map(|device| device.settings))
    }

    pub async fn find_states(&self, mac: &str) -> Result<Option<Vec<State>>, StoreError> {
        let device = self.store.get(mac).await?;

        Ok(device.map(|device| device.states))
    }

    pub async fn update_passhash(&self, mac: &str, passhash: &str) -> Result<bool, StoreError> {
        self.try_modify(mac, |device| -> Result<(), StoreError> {
            device.passhash = passhash.to_string();
            Ok(())
        })
        .await
    }

    pub async fn update_settings(&self, mac: &str, settings: Settings) -> Result<bool, StoreError> {
        self.try_modify(mac, |device| -> Result<(), StoreError> {
            device.settings = settings;
            Ok(())
        })
        .await
    }

    /// Run `merge` against the stored states of a device and write the result back.
    ///
    /// Returns `Ok(false)` for an unknown device. When `merge` fails nothing is
    /// written and its error is returned.
    pub async fn update_states<F, E>(&self, mac: &str, merge: F) -> Result<bool, E>
    where
        F: FnOnce(&mut Vec<State>) -> Result<(), E> + Send,
        E: From<StoreError>,
    {
        self.try_modify(mac, |device| merge(&mut device.states))
            .await
    }

    pub async fn remove(&self, mac: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;

        self.store.delete(mac).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        self.store.clear().await
    }

    async fn try_modify<F, E>(&self, mac: &str, modify: F) -> Result<bool, E>
    where
        F: FnOnce(&mut Device) -> Result<(), E> + Send,
        E: From<StoreError>,
    {
        let _guard = self.write_lock.lock().await;

        let Some(mut device) = self.store.get(mac).await? else {
            return Ok(false);
        };

        modify(&mut device)?;

        Ok(self.store.put(&device).await?)
    }
}
