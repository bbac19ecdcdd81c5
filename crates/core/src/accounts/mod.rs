//! Accounts module - balance readings consumed by the goal engine.

mod accounts_model;


pub use accounts_model::{
    balances_by_account, AccountBalance, AccountBalanceSnapshot, AccountBalanceSnapshotRecord,
};
