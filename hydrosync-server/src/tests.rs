//! Fixtures shared by unit tests and, through the `mock` feature, the
//! integration tests.

use std::sync::Arc;

use hydrosync_api::{MacAddress, PumpState, SensorState, Settings as DeviceSettings, State};

use crate::configs::settings::{Auth, Backend, Database, Hashing, Logger, Server, Settings, States};
use crate::configs::{SchemaManager, Storage};
use crate::repositories::DeviceRepository;
use crate::services::AuthService;
use crate::stores::{MemoryStore, SqliteStore};

pub const TEST_MAC: &str = "00:1A:C2:7B:00:47";
pub const TEST_PASSWORD: &str = "test-password";

/// Cheapest argon2 parameters, so tests do not spend seconds hashing
pub fn test_hashing() -> Hashing {
    Hashing {
        memory_cost: 8,
        time_cost: 1,
        parallelism: 1,
    }
}

pub fn test_auth() -> Auth {
    Auth {
        secret: String::from("test-secret"),
        expiration: 1000,
        hashing: test_hashing(),
    }
}

pub fn test_database() -> Database {
    Database {
        backend: Backend::Memory,
        migration_path: None,
        clean_start: true,
        url: String::from("sqlite::memory:"),
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: Server {
            host: String::from("127.0.0.1"),
            port: 0,
        },
        logger: Logger {
            level: String::from("debug"),
        },
        database: test_database(),
        auth: test_auth(),
        states: States::default(),
    }
}

pub fn test_states() -> Vec<State> {
    vec![State {
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
    }]
}

pub async fn setup_test_storage() -> Arc<Storage> {
    Arc::new(
        Storage::new(test_database(), SchemaManager::default())
            .await
            .unwrap(),
    )
}

pub fn setup_test_repository() -> Arc<DeviceRepository> {
    Arc::new(DeviceRepository::new(Arc::new(MemoryStore::new())))
}

pub async fn setup_sqlite_repository() -> Arc<DeviceRepository> {
    Arc::new(DeviceRepository::new(Arc::new(SqliteStore::new(
        setup_test_storage().await,
    ))))
}

/// Register a device whose password is [`TEST_PASSWORD`].
pub async fn create_test_device(
    repository: &DeviceRepository,
    mac: &str,
    states: Vec<State>,
) -> MacAddress {
    let auth_service = AuthService::new(&test_hashing()).unwrap();
    let passhash = auth_service.hash(TEST_PASSWORD).unwrap();

    let created = repository
        .create(mac, &passhash, DeviceSettings::default(), states)
        .await
        .unwrap();
    assert!(created, "device {mac} already exists");

    MacAddress::parse(mac).unwrap()
}
