//! Derives a goal's balance from its allocation rules and account balances.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::goal_progress_model::AllocationContribution;
use super::goals_errors::GoalError;
use super::goals_model::{Allocation, AllocationKind, Goal};
use crate::errors::Result;

/// Portion of `account_balance` credited by one allocation, or None when it
/// does not fit in a `Decimal`.
///
/// Fixed allocations are capped by what the account actually holds.
pub fn allocation_contribution(
    allocation: &Allocation,
    account_balance: Decimal,
) -> Option<Decimal> {
    match allocation.kind {
        AllocationKind::Percentage => account_balance
            .checked_mul(allocation.value)?
            .checked_div(Decimal::ONE_HUNDRED),
        AllocationKind::Fixed => Some(allocation.value.min(account_balance)),
    }
}

fn checked_contribution(
    goal: &Goal,
    allocation: &Allocation,
    account_balance: Decimal,
) -> Result<Decimal> {
    allocation_contribution(allocation, account_balance).ok_or_else(|| {
        GoalError::amount_overflow(
            &goal.id,
            format!(
                "{} allocation of {} on account {} holding {}",
                allocation.kind, allocation.value, allocation.account_id, account_balance
            ),
        )
        .into()
    })
}

/// Computes the current balance of `goal`.
///
/// Manual goals (no allocations) return their starting balance untouched.
/// Allocations pointing at accounts missing from `account_balances` contribute
/// zero. The total is neither clamped to zero nor to the target; a total that
/// overflows is a [`GoalError::AmountOverflow`].
pub fn compute_balance(
    goal: &Goal,
    account_balances: &HashMap<String, Decimal>,
) -> Result<Decimal> {
    if goal.is_manual() {
        return Ok(goal.starting_balance);
    }

    goal.allocations
        .iter()
        .try_fold(Decimal::ZERO, |total, allocation| -> Result<Decimal> {
            let Some(balance) = account_balances.get(allocation.account_id.as_str()) else {
                return Ok(total);
            };
            let contribution = checked_contribution(goal, allocation, *balance)?;
            total.checked_add(contribution).ok_or_else(|| {
                GoalError::amount_overflow(&goal.id, "sum of allocations exceeds the decimal range")
                    .into()
            })
        })
}

/// Per-allocation breakdown behind [`compute_balance`].
pub fn resolve_allocations(
    goal: &Goal,
    account_balances: &HashMap<String, Decimal>,
) -> Result<Vec<AllocationContribution>> {
    goal.allocations
        .iter()
        .map(|allocation| {
            let account_balance = account_balances
                .get(allocation.account_id.as_str())
                .copied();
            let contribution = match account_balance {
                Some(balance) => checked_contribution(goal, allocation, balance)?,
                None => Decimal::ZERO,
            };

            Ok(AllocationContribution {
                account_id: allocation.account_id.clone(),
                kind: allocation.kind,
                value: allocation.value,
                account_balance,
                contribution,
            })
        })
        .collect()
}
