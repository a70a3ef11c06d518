#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod mac;
pub mod models;

pub use mac::{MacAddress, MacAddressError};
pub use models::*;
