//! Account balance domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::parse_datetime;

/// Current balance reading for an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub account_id: String,
    pub balance: Decimal,
}

impl AccountBalance {
    pub fn new(account_id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            balance,
        }
    }
}

/// Historical balance reading for an account.
///
/// Several snapshots may exist for the same account on the same day; the
/// engine only uses the latest one by timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceSnapshot {
    pub account_id: String,
    pub timestamp: NaiveDateTime,
    pub balance: Decimal,
}

impl AccountBalanceSnapshot {
    pub fn new(account_id: impl Into<String>, timestamp: NaiveDateTime, balance: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            timestamp,
            balance,
        }
    }

    /// Calendar date of the reading.
    pub fn snapshot_date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Snapshot as delivered by the storage layer, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalanceSnapshotRecord {
    pub account_id: String,
    pub timestamp: Option<String>,
    pub balance: Decimal,
}

impl TryFrom<AccountBalanceSnapshotRecord> for AccountBalanceSnapshot {
    type Error = Error;

    fn try_from(record: AccountBalanceSnapshotRecord) -> Result<Self> {
        if record.account_id.trim().is_empty() {
            return Err(ValidationError::MissingField("accountId".to_string()).into());
        }
        let raw_timestamp = record
            .timestamp
            .as_deref()
            .ok_or_else(|| ValidationError::MissingField("timestamp".to_string()))?;
        let timestamp = parse_datetime(raw_timestamp)?;

        Ok(Self {
            account_id: record.account_id,
            timestamp,
            balance: record.balance,
        })
    }
}

/// Builds an account_id -> balance lookup. Later entries win on duplicates.
pub fn balances_by_account(balances: &[AccountBalance]) -> HashMap<String, Decimal> {
    balances
        .iter()
        .map(|b| (b.account_id.clone(), b.balance))
        .collect()
}
