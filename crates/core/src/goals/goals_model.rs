//! Goals domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::str::FromStr;

use super::goals_errors::GoalError;
use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::{parse_date, parse_datetime};

/// How an allocation slices its account's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocationKind {
    /// `value` percent of the account balance
    Percentage,
    /// Up to `value` of the account balance
    Fixed,
}

impl AllocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationKind::Percentage => "percentage",
            AllocationKind::Fixed => "fixed",
        }
    }
}

impl std::fmt::Display for AllocationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AllocationKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" => Ok(AllocationKind::Percentage),
            "fixed" | "amount" => Ok(AllocationKind::Fixed),
            other => Err(format!("unknown allocation type '{}'", other)),
        }
    }
}

/// Rule binding a slice of one account's balance to a goal.
///
/// Values are used as given: a percentage above 100 or a negative amount is
/// not rejected here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub account_id: String,
    pub kind: AllocationKind,
    pub value: Decimal,
}

impl Allocation {
    pub fn percentage(account_id: impl Into<String>, value: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            kind: AllocationKind::Percentage,
            value,
        }
    }

    pub fn fixed(account_id: impl Into<String>, value: Decimal) -> Self {
        Self {
            account_id: account_id.into(),
            kind: AllocationKind::Fixed,
            value,
        }
    }
}

/// Domain model representing a savings goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub allocations: Vec<Allocation>,
    pub starting_balance: Decimal,
    pub created_at: NaiveDateTime,
    pub completed: bool,
    pub completed_at: Option<NaiveDateTime>,
}

impl Goal {
    /// A goal without allocations is tracked by hand and never derives its
    /// balance from accounts.
    pub fn is_manual(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Distinct account ids referenced by the allocations.
    pub fn referenced_account_ids(&self) -> HashSet<&str> {
        self.allocations
            .iter()
            .map(|a| a.account_id.as_str())
            .collect()
    }
}

/// Allocation entry as stored: a loosely typed JSON object.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub account_id: Option<String>,
    #[serde(alias = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Value,
}

impl AllocationRecord {
    /// Validates the record into an [`Allocation`]. `index` is the position in
    /// the stored list and only feeds error messages.
    pub fn into_allocation(self, index: usize) -> Result<Allocation> {
        let invalid = |message: String| -> Error { GoalError::InvalidAllocation { index, message }.into() };

        let account_id = self
            .account_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| invalid("missing accountId".to_string()))?;

        let kind = self
            .kind
            .as_deref()
            .ok_or_else(|| invalid("missing type".to_string()))?
            .parse::<AllocationKind>()
            .map_err(invalid)?;

        let value = decimal_from_json(&self.value)
            .ok_or_else(|| invalid(format!("value '{}' is not a number", self.value)))?;

        Ok(Allocation {
            account_id,
            kind,
            value,
        })
    }
}

/// Reads a decimal out of a JSON number or numeric string.
fn decimal_from_json(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Parses the stored JSON allocation list. Blank or absent input means a
/// manually tracked goal.
pub fn parse_allocations(raw: Option<&str>) -> Result<Vec<Allocation>> {
    let raw = match raw.map(str::trim) {
        None | Some("") | Some("null") => return Ok(Vec::new()),
        Some(raw) => raw,
    };

    let records: Vec<AllocationRecord> = serde_json::from_str(raw)?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_allocation(index))
        .collect()
}

/// Goal as delivered by the storage layer, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecord {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub target_date: Option<String>,
    /// JSON-encoded list of allocation objects
    pub allocations: Option<String>,
    pub starting_balance: Option<Decimal>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub completed_at: Option<String>,
}

impl TryFrom<GoalRecord> for Goal {
    type Error = Error;

    fn try_from(record: GoalRecord) -> Result<Self> {
        if record.target_amount <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Goal {} has a non-positive target amount {}",
                record.id, record.target_amount
            ))
            .into());
        }

        let created_at = record
            .created_at
            .as_deref()
            .ok_or_else(|| ValidationError::MissingField("createdAt".to_string()))
            .map_err(Error::from)
            .and_then(parse_datetime)?;

        let target_date = non_blank(record.target_date.as_deref())
            .map(parse_date)
            .transpose()?;

        let completed_at = non_blank(record.completed_at.as_deref())
            .map(parse_datetime)
            .transpose()?;

        let allocations = parse_allocations(record.allocations.as_deref())?;

        Ok(Goal {
            id: record.id,
            name: record.name,
            target_amount: record.target_amount,
            target_date,
            allocations,
            starting_balance: record.starting_balance.unwrap_or(Decimal::ZERO),
            created_at,
            completed: record.completed,
            completed_at,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
