//! mock-api: Simulated backend for the transfer wizard
//!
//! Wraps static in-memory tables (assets, networks, vaults, address book,
//! balances, fees, prices) in a simulator that settles each call after a
//! random delay with a random success or failure.

pub mod client;
pub mod data;
pub mod simulator;

use transfer_core::ApiError;

pub use client::MockApi;
pub use data::MockData;
pub use simulator::{CallPlan, Outcome, Simulator};

/// Result type for mock API calls
pub type Result<T> = std::result::Result<T, ApiError>;
