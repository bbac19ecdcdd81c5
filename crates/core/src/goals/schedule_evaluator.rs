//! Target-date schedule metrics: days remaining, monthly amount needed,
//! progress percentage and the on-track verdict.

use chrono::NaiveDateTime;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

use super::goals_model::Goal;
use crate::constants::DAYS_PER_MONTH;
use crate::utils::time_utils::{fractional_days_between, start_of_day};

/// Whole days until the target date (midnight), rounded up. Zero or negative
/// means the goal is due or past due.
pub fn days_remaining(goal: &Goal, now: NaiveDateTime) -> Option<i64> {
    let target = start_of_day(goal.target_date?);
    fractional_days_between(now, target).ceil().to_i64()
}

/// Amount still missing from the target, never negative. Saturates at
/// `Decimal::MAX` for extremely negative balances.
pub fn remaining_amount(goal: &Goal, current_balance: Decimal) -> Decimal {
    goal.target_amount
        .saturating_sub(current_balance)
        .max(Decimal::ZERO)
}

/// Amount to set aside per 30-day month to hit the target on time.
///
/// None without a target date or once the target date has arrived.
pub fn monthly_needed(goal: &Goal, current_balance: Decimal, now: NaiveDateTime) -> Option<Decimal> {
    let days = days_remaining(goal, now).filter(|days| *days > 0)?;
    let months = Decimal::from(days) / Decimal::from(DAYS_PER_MONTH);
    let remaining = remaining_amount(goal, current_balance);
    Some(remaining.checked_div(months).unwrap_or(Decimal::MAX))
}

/// Progress from starting balance toward target, clamped to [0, 100].
///
/// A ratio too large for a `Decimal` lands on the bound its sign points to.
pub fn progress_pct(goal: &Goal, current_balance: Decimal) -> Decimal {
    let needed = goal.target_amount.saturating_sub(goal.starting_balance);
    if needed <= Decimal::ZERO {
        return Decimal::ONE_HUNDRED;
    }

    current_balance
        .checked_sub(goal.starting_balance)
        .and_then(|gained| gained.checked_div(needed))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
        .unwrap_or(if current_balance > goal.starting_balance {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        })
}

/// Whether actual progress keeps up with the share of time elapsed between
/// creation and target date, allowing `tolerance_pct` points of shortfall.
///
/// None without a target date. A target date at or before creation cannot be
/// evaluated and counts as on track.
pub fn on_track(
    goal: &Goal,
    current_balance: Decimal,
    now: NaiveDateTime,
    tolerance_pct: Decimal,
) -> Option<bool> {
    let target = start_of_day(goal.target_date?);
    let total_duration = fractional_days_between(goal.created_at, target);
    if total_duration <= Decimal::ZERO {
        return Some(true);
    }

    let remaining_days = Decimal::from(days_remaining(goal, now)?);
    let elapsed = total_duration - remaining_days;
    let expected_pct = elapsed / total_duration * Decimal::ONE_HUNDRED;
    let actual_pct = progress_pct(goal, current_balance);

    Some(actual_pct >= expected_pct - tolerance_pct)
}
