//! Projected completion date from an observed savings pace.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use log::debug;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::goal_progress_model::HistoryPoint;
use super::goals_errors::GoalError;
use super::goals_model::Goal;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::utils::time_utils::fractional_days_between;

/// Where a savings pace was measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceSource {
    /// First to last point of the reconstructed trajectory
    Trajectory,
    /// Starting balance to current balance since the goal was created
    LifetimeAverage,
}

/// Balance change observed over a span of days.
///
/// Kept as a ratio so projections divide once and stay exact for whole-day
/// spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsPace {
    pub source: PaceSource,
    pub change: Decimal,
    pub span_days: Decimal,
}

impl SavingsPace {
    pub fn daily_rate(&self) -> Decimal {
        self.change / self.span_days
    }

    pub fn is_positive(&self) -> bool {
        self.change > Decimal::ZERO
    }

    /// Days needed to save `amount` at this pace.
    fn days_to_cover(&self, amount: Decimal) -> Option<Decimal> {
        amount
            .checked_mul(self.span_days)?
            .checked_div(self.change)
    }
}

/// Pace between the first and last trajectory points, or None when the
/// trajectory is too short (fewer than two points or under one day apart) or
/// its balance change does not fit in a `Decimal`.
pub fn trajectory_pace(trajectory: &[HistoryPoint]) -> Option<SavingsPace> {
    let (first, last) = match trajectory {
        [first, .., last] => (first, last),
        _ => return None,
    };

    let days_between = (last.date - first.date).num_days();
    if days_between < 1 {
        return None;
    }

    Some(SavingsPace {
        source: PaceSource::Trajectory,
        change: last.balance.checked_sub(first.balance)?,
        span_days: Decimal::from(days_between),
    })
}

/// Lifetime-average pace since creation, or None when the goal is less than a
/// day old or has made no progress.
pub fn lifetime_pace(
    goal: &Goal,
    current_balance: Decimal,
    now: NaiveDateTime,
) -> Option<SavingsPace> {
    let days_since_creation = fractional_days_between(goal.created_at, now);
    if days_since_creation < Decimal::ONE {
        return None;
    }

    let progress_made = current_balance.checked_sub(goal.starting_balance)?;
    if progress_made <= Decimal::ZERO {
        return None;
    }

    Some(SavingsPace {
        source: PaceSource::LifetimeAverage,
        change: progress_made,
        span_days: days_since_creation,
    })
}

/// Picks the pace a projection is based on. The trajectory wins whenever it
/// spans at least a day; the two sources never blend.
pub fn select_pace(
    goal: &Goal,
    current_balance: Decimal,
    trajectory: &[HistoryPoint],
    now: NaiveDateTime,
) -> Option<SavingsPace> {
    trajectory_pace(trajectory).or_else(|| lifetime_pace(goal, current_balance, now))
}

/// Estimates the date on which `goal` reaches its target.
///
/// Returns `Ok(None)` when the target is already met or when no positive pace
/// can be observed. The projected day count is rounded up to a whole day.
pub fn project(
    goal: &Goal,
    current_balance: Decimal,
    trajectory: &[HistoryPoint],
    now: NaiveDateTime,
) -> Result<Option<NaiveDate>> {
    if current_balance >= goal.target_amount {
        return Ok(None);
    }

    let pace = match select_pace(goal, current_balance, trajectory, now) {
        Some(pace) if pace.is_positive() => pace,
        other => {
            debug!(
                "No projection for goal {}: pace {:?} is not positive",
                goal.id,
                other.map(|p| p.source)
            );
            return Ok(None);
        }
    };

    let out_of_range = |message: String| GoalError::date_out_of_range(&goal.id, message);
    let remaining = goal
        .target_amount
        .checked_sub(current_balance)
        .ok_or_else(|| {
            out_of_range(format!("balance {} is too far below target", current_balance))
        })?;

    let days_to_goal = pace
        .days_to_cover(remaining)
        .ok_or_else(|| out_of_range(format!("cannot divide {} by the pace", remaining)))?
        .round_dp(DECIMAL_PRECISION)
        .ceil();

    let projected = days_to_goal
        .to_i64()
        .and_then(TimeDelta::try_days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or_else(|| out_of_range(format!("{} days after {}", days_to_goal, now.date())))?;

    Ok(Some(projected.date()))
}
