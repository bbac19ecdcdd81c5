//! Goal Progress Core - savings goal progress engine.
//!
//! This crate derives a goal's balance from allocation rules over linked
//! accounts, rebuilds its history from account snapshots, and projects whether
//! and when the target will be met. It performs no I/O of its own; storage is
//! reached through the traits in [`goals`].

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod utils;

// Re-export common types from the goals module
pub use goals::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
