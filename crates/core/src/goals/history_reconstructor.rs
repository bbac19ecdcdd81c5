//! Rebuilds a goal's balance trajectory from historical account snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::allocation_resolver::compute_balance;
use super::goal_progress_model::HistoryPoint;
use super::goals_model::Goal;
use crate::accounts::AccountBalanceSnapshot;
use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;

/// Latest reading per account for every date that has one.
///
/// Snapshots for accounts outside `account_ids` are dropped. Within a day the
/// reading with the greatest timestamp wins; on equal timestamps the later
/// entry in `snapshots` wins.
pub fn latest_readings_by_date<'a>(
    snapshots: &'a [AccountBalanceSnapshot],
    account_ids: &HashSet<&str>,
) -> BTreeMap<NaiveDate, HashMap<&'a str, Decimal>> {
    let mut by_date: BTreeMap<NaiveDate, HashMap<&'a str, (NaiveDateTime, Decimal)>> =
        BTreeMap::new();

    for snapshot in snapshots
        .iter()
        .filter(|s| account_ids.contains(s.account_id.as_str()))
    {
        let day = by_date.entry(snapshot.snapshot_date()).or_default();
        let is_latest = day
            .get(snapshot.account_id.as_str())
            .map_or(true, |(seen_at, _)| snapshot.timestamp >= *seen_at);
        if is_latest {
            day.insert(
                snapshot.account_id.as_str(),
                (snapshot.timestamp, snapshot.balance),
            );
        }
    }

    by_date
        .into_iter()
        .map(|(date, readings)| {
            let balances = readings
                .into_iter()
                .map(|(account_id, (_, balance))| (account_id, balance))
                .collect();
            (date, balances)
        })
        .collect()
}

/// Replays `snapshots` through the goal's allocation rules.
///
/// Accounts without a reading on a given date keep their last observed
/// balance; accounts not yet observed count as zero. Manual goals have no
/// derivable history and yield an empty series. Output is strictly ascending
/// by date.
pub fn reconstruct(
    goal: &Goal,
    snapshots: &[AccountBalanceSnapshot],
) -> Result<Vec<HistoryPoint>> {
    if goal.is_manual() {
        return Ok(Vec::new());
    }

    let account_ids = goal.referenced_account_ids();
    let readings = latest_readings_by_date(snapshots, &account_ids);

    let mut last_known: HashMap<String, Decimal> = HashMap::new();
    let mut history = Vec::with_capacity(readings.len());

    for (date, day_readings) in readings {
        for (account_id, balance) in day_readings {
            last_known.insert(account_id.to_string(), balance);
        }

        let balance = compute_balance(goal, &last_known)?;
        history.push(HistoryPoint::new(date, balance.round_dp(DECIMAL_PRECISION)));
    }

    debug!(
        "Reconstructed {} history points for goal {} from {} snapshots",
        history.len(),
        goal.id,
        snapshots.len()
    );

    Ok(history)
}

/// Reconstructs the trajectory and pads it so charts always have a start and
/// an end.
///
/// - A point for `today` with the live balance is appended when the series is
///   empty or ends before `today`.
/// - If fewer than two points remain, a point at the goal's creation date with
///   its starting balance is added, keeping date order.
pub fn build_trajectory(
    goal: &Goal,
    snapshots: &[AccountBalanceSnapshot],
    account_balances: &HashMap<String, Decimal>,
    today: NaiveDate,
) -> Result<Vec<HistoryPoint>> {
    let mut trajectory = reconstruct(goal, snapshots)?;

    if trajectory.last().map_or(true, |last| last.date < today) {
        let live_balance = compute_balance(goal, account_balances)?;
        trajectory.push(HistoryPoint::new(
            today,
            live_balance.round_dp(DECIMAL_PRECISION),
        ));
    }

    if trajectory.len() < 2 {
        let created = HistoryPoint::new(goal.created_at.date(), goal.starting_balance);
        let after_existing = trajectory
            .first()
            .is_some_and(|first| created.date > first.date);
        if after_existing {
            trajectory.push(created);
        } else {
            trajectory.insert(0, created);
        }
    }

    Ok(trajectory)
}
