use hydrosync_api::{Settings, State};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

use super::Table;

/// Everything the server stores about one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub mac: String,
    pub passhash: String,
    pub settings: Settings,
    pub states: Vec<State>,
}

/// Credential view of a [`Device`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShallowDevice {
    pub mac: String,
    pub passhash: String,
}

impl From<&Device> for ShallowDevice {
    fn from(device: &Device) -> Self {
        Self {
            mac: device.mac.clone(),
            passhash: device.passhash.clone(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct DeviceRow {
    pub mac: String,
    pub passhash: String,
    pub settings: Json<Settings>,
    pub states: Json<Vec<State>>,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Self {
            mac: row.mac,
            passhash: row.passhash,
            settings: row.settings.0,
            states: row.states.0,
        }
    }
}

#[derive(Clone)]
pub struct DeviceTable;

impl Table for DeviceTable {
    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS devices (
                mac VARCHAR(17) PRIMARY KEY NOT NULL,
                passhash TEXT NOT NULL,
                settings JSON NOT NULL,
                states JSON NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS devices;")
    }
}
