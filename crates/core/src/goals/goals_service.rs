//! Goal progress service implementation.
//!
//! The service is the explicit orchestrator around the pure engine: it pulls
//! every record it needs from the data source up front, validates it, and only
//! then evaluates goals. Nothing is cached between calls.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::goal_metrics_calculator::calculate_goal_metrics;
use super::goal_progress_model::{GoalMetrics, GoalProgressConfig};
use super::goals_errors::GoalError;
use super::goals_model::Goal;
use super::goals_traits::{GoalDataSourceTrait, GoalProgressServiceTrait};
use crate::accounts::{balances_by_account, AccountBalanceSnapshot};
use crate::errors::Result;
use crate::utils::time_utils::evaluation_now;

/// Account data shared by every goal in one evaluation pass.
struct EvaluationInputs {
    account_balances: HashMap<String, Decimal>,
    snapshots: Vec<AccountBalanceSnapshot>,
}

/// Service for computing goal progress metrics.
pub struct GoalProgressService {
    data_source: Arc<dyn GoalDataSourceTrait>,
    config: RwLock<GoalProgressConfig>,
}

impl GoalProgressService {
    /// Creates a service with the default configuration.
    pub fn new(data_source: Arc<dyn GoalDataSourceTrait>) -> Self {
        Self {
            data_source,
            config: RwLock::new(GoalProgressConfig::default()),
        }
    }

    /// Creates a service with custom configuration.
    pub fn with_config(
        data_source: Arc<dyn GoalDataSourceTrait>,
        config: GoalProgressConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            data_source,
            config: RwLock::new(config),
        })
    }

    /// Metrics for every goal, evaluated at the current local time.
    pub async fn get_current_goals_progress(&self) -> Result<Vec<GoalMetrics>> {
        self.get_goals_progress(evaluation_now()).await
    }

    /// Loads balances and the snapshots of every account referenced by `goals`.
    async fn load_inputs(&self, goals: &[Goal]) -> Result<EvaluationInputs> {
        let balances = self.data_source.load_account_balances().await?;
        let account_balances = balances_by_account(&balances);

        let account_ids: Vec<String> = goals
            .iter()
            .flat_map(|goal| goal.allocations.iter().map(|a| a.account_id.clone()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let snapshots = if account_ids.is_empty() {
            Vec::new()
        } else {
            self.data_source
                .load_snapshots(&account_ids)
                .await?
                .into_iter()
                .map(AccountBalanceSnapshot::try_from)
                .collect::<Result<Vec<_>>>()?
        };

        debug!(
            "Loaded {} account balances and {} snapshots for {} accounts",
            account_balances.len(),
            snapshots.len(),
            account_ids.len()
        );

        Ok(EvaluationInputs {
            account_balances,
            snapshots,
        })
    }

    fn warn_dangling_references(goal: &Goal, account_balances: &HashMap<String, Decimal>) {
        for allocation in &goal.allocations {
            if !account_balances.contains_key(&allocation.account_id) {
                warn!(
                    "Goal {} allocates from unknown account {}; counting it as zero",
                    goal.id, allocation.account_id
                );
            }
        }
    }

    fn evaluate(
        goals: &[Goal],
        inputs: &EvaluationInputs,
        now: NaiveDateTime,
        config: &GoalProgressConfig,
    ) -> Result<Vec<GoalMetrics>> {
        goals
            .iter()
            .map(|goal| {
                Self::warn_dangling_references(goal, &inputs.account_balances);
                calculate_goal_metrics(
                    goal,
                    &inputs.account_balances,
                    &inputs.snapshots,
                    now,
                    config,
                )
            })
            .collect()
    }
}

#[async_trait]
impl GoalProgressServiceTrait for GoalProgressService {
    async fn get_goals_progress(&self, now: NaiveDateTime) -> Result<Vec<GoalMetrics>> {
        let config = self.config.read().await.clone();

        let goals = self
            .data_source
            .load_goals()
            .await?
            .into_iter()
            .map(Goal::try_from)
            .collect::<Result<Vec<_>>>()?;

        if goals.is_empty() {
            debug!("No goals found. Returning empty progress.");
            return Ok(Vec::new());
        }

        let inputs = self.load_inputs(&goals).await?;
        let metrics = Self::evaluate(&goals, &inputs, now, &config)?;

        info!("Evaluated progress for {} goals as of {}", metrics.len(), now);

        Ok(metrics)
    }

    async fn get_goal_progress(&self, goal_id: &str, now: NaiveDateTime) -> Result<GoalMetrics> {
        let config = self.config.read().await.clone();

        let record = self
            .data_source
            .load_goals()
            .await?
            .into_iter()
            .find(|g| g.id == goal_id)
            .ok_or_else(|| GoalError::GoalNotFound(goal_id.to_string()))?;
        let goal = Goal::try_from(record)?;

        let inputs = self.load_inputs(std::slice::from_ref(&goal)).await?;
        Self::warn_dangling_references(&goal, &inputs.account_balances);

        calculate_goal_metrics(
            &goal,
            &inputs.account_balances,
            &inputs.snapshots,
            now,
            &config,
        )
    }

    async fn get_config(&self) -> GoalProgressConfig {
        self.config.read().await.clone()
    }

    async fn update_config(&self, config: GoalProgressConfig) -> Result<()> {
        config.validate()?;
        *self.config.write().await = config;
        Ok(())
    }
}
