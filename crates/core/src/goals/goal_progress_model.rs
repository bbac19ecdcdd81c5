//! Derived goal progress models and engine configuration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::goals_errors::GoalError;
use super::goals_model::AllocationKind;
use crate::constants::{DEFAULT_CHART_MAX_POINTS, DEFAULT_ON_TRACK_TOLERANCE_PCT};

/// A goal's reconstructed balance on a given date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub balance: Decimal,
}

impl HistoryPoint {
    pub fn new(date: NaiveDate, balance: Decimal) -> Self {
        Self { date, balance }
    }
}

/// How much one allocation contributes to a goal's current balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationContribution {
    pub account_id: String,
    pub kind: AllocationKind,
    pub value: Decimal,
    /// Current account balance, None when the account is unknown
    pub account_balance: Option<Decimal>,
    /// Portion of the account balance credited to the goal
    pub contribution: Decimal,
}

/// Everything the display layer needs for one goal at one evaluation instant.
///
/// Recomputed from scratch on every evaluation; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalMetrics {
    pub goal_id: String,
    pub current_balance: Decimal,
    /// Progress from starting balance to target, clamped to [0, 100]
    pub progress_pct: Decimal,
    /// max(0, target - current)
    pub remaining_amount: Decimal,
    pub days_remaining: Option<i64>,
    pub monthly_needed: Option<Decimal>,
    pub on_track: Option<bool>,
    pub projected_completion_date: Option<NaiveDate>,
    /// Marked completed, or current balance at or above target
    pub target_reached: bool,
    pub allocations: Vec<AllocationContribution>,
    pub trajectory: Vec<HistoryPoint>,
    pub chart_points: Vec<HistoryPoint>,
}

/// Tunable parameters of the goal progress engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressConfig {
    /// Maximum chart points after downsampling (default: 18)
    pub chart_max_points: usize,

    /// Shortfall in percentage points still counted as on track (default: 5)
    pub on_track_tolerance_pct: Decimal,
}

impl Default for GoalProgressConfig {
    fn default() -> Self {
        Self {
            chart_max_points: DEFAULT_CHART_MAX_POINTS,
            on_track_tolerance_pct: Decimal::from(DEFAULT_ON_TRACK_TOLERANCE_PCT),
        }
    }
}

impl GoalProgressConfig {
    pub fn validate(&self) -> Result<(), GoalError> {
        if self.chart_max_points < 2 {
            return Err(GoalError::InvalidConfig(format!(
                "chartMaxPoints must be at least 2, got {}",
                self.chart_max_points
            )));
        }
        if self.on_track_tolerance_pct.is_sign_negative() {
            return Err(GoalError::InvalidConfig(format!(
                "onTrackTolerancePct must not be negative, got {}",
                self.on_track_tolerance_pct
            )));
        }
        Ok(())
    }
}
