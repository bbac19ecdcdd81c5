use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::goal_progress_model::{GoalMetrics, GoalProgressConfig};
use super::goals_model::GoalRecord;
use crate::accounts::{AccountBalance, AccountBalanceSnapshotRecord};
use crate::errors::Result;

/// Bulk retrieval of the records the goal engine consumes.
///
/// Implemented by the storage layer. Records are returned unvalidated; the
/// service turns them into domain types before any computation.
#[async_trait]
pub trait GoalDataSourceTrait: Send + Sync {
    async fn load_goals(&self) -> Result<Vec<GoalRecord>>;
    async fn load_account_balances(&self) -> Result<Vec<AccountBalance>>;
    /// Snapshots for the given accounts, in any order.
    async fn load_snapshots(&self, account_ids: &[String])
        -> Result<Vec<AccountBalanceSnapshotRecord>>;
}

/// Trait for goal progress service operations
#[async_trait]
pub trait GoalProgressServiceTrait: Send + Sync {
    /// Metrics for every goal, evaluated at `now`.
    async fn get_goals_progress(&self, now: NaiveDateTime) -> Result<Vec<GoalMetrics>>;
    async fn get_goal_progress(&self, goal_id: &str, now: NaiveDateTime) -> Result<GoalMetrics>;
    async fn get_config(&self) -> GoalProgressConfig;
    async fn update_config(&self, config: GoalProgressConfig) -> Result<()>;
}
