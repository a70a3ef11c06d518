mod auth;
mod device;
mod settings;
mod state;

pub use auth::*;
pub use device::*;
pub use settings::*;
pub use state::*;
