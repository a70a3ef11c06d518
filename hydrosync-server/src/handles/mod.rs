mod auth_handle;
mod device_handle;
mod docs_handle;

pub use auth_handle::*;
pub use device_handle::*;
pub use docs_handle::*;
