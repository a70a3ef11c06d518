pub mod schema;
pub mod settings;
pub mod storage;

pub use schema::SchemaManager;
pub use settings::{Auth, Backend, Database, Hashing, Logger, Server, Settings, States};
pub use storage::Storage;
