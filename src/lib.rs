pub mod types;
pub mod registry;
pub mod orderbook;
pub mod account;
pub mod risk;
pub mod sizing;
pub mod core;
pub mod error;
pub mod config;
pub mod observability;
pub mod interfaces;
pub mod api;

pub use crate::api::Gateway;
pub use crate::core::OrderComputeEngine;
pub use crate::error::{Error, Result};
