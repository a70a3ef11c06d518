
use super::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Device not found")]
    UnknownDevice,

    #[error("No state exists for sensor pin {0}")]
    UnmatchedPin(u8),

    #[error(transparent)]
    Store(#[from] StoreError),
}
