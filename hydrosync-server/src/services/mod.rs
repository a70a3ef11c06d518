mod auth_service;
mod state_service;
mod token_service;

pub use auth_service::*;
pub use state_service::*;
pub use token_service::*;
