//! Composes balance, trajectory, projection and schedule metrics for one goal.

use chrono::NaiveDateTime;
use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::allocation_resolver::{compute_balance, resolve_allocations};
use super::downsampler::downsample;
use super::goal_progress_model::{GoalMetrics, GoalProgressConfig};
use super::goals_model::Goal;
use super::history_reconstructor::build_trajectory;
use super::pace_projector::project;
use super::schedule_evaluator::{
    days_remaining, monthly_needed, on_track, progress_pct, remaining_amount,
};
use crate::accounts::AccountBalanceSnapshot;
use crate::constants::{DECIMAL_PRECISION, DISPLAY_DECIMAL_PRECISION};
use crate::errors::Result;

/// Computes the full metrics bundle for one goal.
///
/// Pure: the same inputs always give the same output, and nothing is cached.
///
/// # Arguments
///
/// * `goal` - The goal to evaluate.
/// * `account_balances` - Current balance per account id.
/// * `snapshots` - Historical balance readings; unrelated accounts are ignored.
/// * `now` - Evaluation instant, local wall time.
/// * `config` - Chart size and on-track tolerance.
pub fn calculate_goal_metrics(
    goal: &Goal,
    account_balances: &HashMap<String, Decimal>,
    snapshots: &[AccountBalanceSnapshot],
    now: NaiveDateTime,
    config: &GoalProgressConfig,
) -> Result<GoalMetrics> {
    let current_balance = compute_balance(goal, account_balances)?;
    let allocations = resolve_allocations(goal, account_balances)?;

    let trajectory = build_trajectory(goal, snapshots, account_balances, now.date())?;
    let chart_points = downsample(&trajectory, config.chart_max_points);

    let projected_completion_date = project(goal, current_balance, &trajectory, now)?;

    let metrics = GoalMetrics {
        goal_id: goal.id.clone(),
        current_balance: current_balance.round_dp(DECIMAL_PRECISION),
        progress_pct: progress_pct(goal, current_balance).round_dp(DISPLAY_DECIMAL_PRECISION),
        remaining_amount: remaining_amount(goal, current_balance).round_dp(DECIMAL_PRECISION),
        days_remaining: days_remaining(goal, now),
        monthly_needed: monthly_needed(goal, current_balance, now)
            .map(|amount| amount.round_dp(DECIMAL_PRECISION)),
        on_track: on_track(goal, current_balance, now, config.on_track_tolerance_pct),
        projected_completion_date,
        target_reached: goal.completed || current_balance >= goal.target_amount,
        allocations,
        trajectory,
        chart_points,
    };

    debug!(
        "Goal {} evaluated: balance={}, progress={}%, trajectory={} points, projected={:?}",
        metrics.goal_id,
        metrics.current_balance,
        metrics.progress_pct,
        metrics.trajectory.len(),
        metrics.projected_completion_date
    );

    Ok(metrics)
}
