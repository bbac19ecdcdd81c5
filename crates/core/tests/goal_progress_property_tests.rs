//! Property-based integration tests for the goal progress engine.
//!
//! These tests verify that universal properties hold across generated inputs,
//! using the `proptest` crate for random test case generation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use goal_progress_core::accounts::AccountBalanceSnapshot;
use goal_progress_core::goals::{
    compute_balance, downsample, progress_pct, project, reconstruct, Allocation, Goal,
    HistoryPoint,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

// =============================================================================
// Generators
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn base_instant() -> NaiveDateTime {
    base_date().and_hms_opt(0, 0, 0).unwrap()
}

/// Money amounts in cents, between -1M and 1M.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_account_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("acc-1"), Just("acc-2"), Just("acc-3")].prop_map(|s| s.to_string())
}

fn arb_allocation() -> impl Strategy<Value = Allocation> {
    (arb_account_id(), any::<bool>(), 0i64..20_000).prop_map(|(account_id, fixed, raw)| {
        if fixed {
            Allocation::fixed(account_id, Decimal::new(raw, 0))
        } else {
            Allocation::percentage(account_id, Decimal::new(raw, 2))
        }
    })
}

fn goal(allocations: Vec<Allocation>, target: Decimal, starting: Decimal) -> Goal {
    Goal {
        id: "prop-goal".to_string(),
        name: "Property goal".to_string(),
        target_amount: target,
        target_date: None,
        allocations,
        starting_balance: starting,
        created_at: base_instant(),
        completed: false,
        completed_at: None,
    }
}

fn arb_balances() -> impl Strategy<Value = HashMap<String, Decimal>> {
    proptest::collection::hash_map(arb_account_id(), arb_amount(), 0..=3)
}

/// Snapshots over the first 60 days of 2024, several per day allowed.
fn arb_snapshots() -> impl Strategy<Value = Vec<AccountBalanceSnapshot>> {
    proptest::collection::vec((arb_account_id(), 0i64..60, 0u32..24, arb_amount()), 0..40)
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(account_id, day, hour, balance)| {
                    let timestamp = (base_date() + Duration::days(day))
                        .and_hms_opt(hour, 0, 0)
                        .unwrap();
                    AccountBalanceSnapshot::new(account_id, timestamp, balance)
                })
                .collect()
        })
}

fn arb_points(max_len: usize) -> impl Strategy<Value = Vec<HistoryPoint>> {
    proptest::collection::vec(arb_amount(), 2..=max_len).prop_map(|balances| {
        balances
            .into_iter()
            .enumerate()
            .map(|(i, balance)| HistoryPoint::new(base_date() + Duration::days(i as i64), balance))
            .collect()
    })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Manual goals report their starting balance whatever the accounts hold.
    #[test]
    fn prop_manual_goal_balance_is_starting_balance(
        starting in arb_amount(),
        balances in arb_balances(),
    ) {
        let g = goal(vec![], Decimal::new(1_000_000, 2), starting);
        prop_assert_eq!(compute_balance(&g, &balances).unwrap(), starting);
    }

    /// A fixed allocation never credits more than the account holds nor more
    /// than its cap.
    #[test]
    fn prop_fixed_allocation_is_capped(
        cap in arb_positive_amount(),
        balance in arb_amount(),
    ) {
        let g = goal(vec![Allocation::fixed("acc-1", cap)], cap, Decimal::ZERO);
        let balances = HashMap::from([("acc-1".to_string(), balance)]);
        let credited = compute_balance(&g, &balances).unwrap();
        prop_assert!(credited <= cap);
        prop_assert!(credited <= balance);
    }

    /// Downsampling bounds the length and preserves both endpoints.
    #[test]
    fn prop_downsample_bounds_and_endpoints(
        points in arb_points(300),
        max_points in 2usize..40,
    ) {
        let sampled = downsample(&points, max_points);
        prop_assert!(sampled.len() <= max_points);
        prop_assert_eq!(sampled.first(), points.first());
        prop_assert_eq!(sampled.last(), points.last());
        prop_assert!(sampled.windows(2).all(|w| w[0].date < w[1].date));
    }

    /// Progress never leaves [0, 100].
    #[test]
    fn prop_progress_pct_is_clamped(
        target in arb_positive_amount(),
        starting in arb_amount(),
        current in arb_amount(),
    ) {
        let g = goal(vec![], target, starting);
        let pct = progress_pct(&g, current);
        prop_assert!(pct >= Decimal::ZERO);
        prop_assert!(pct <= Decimal::ONE_HUNDRED);
    }

    /// Reconstruction yields strictly ascending dates, one per snapshot date.
    #[test]
    fn prop_reconstruction_is_strictly_ordered(
        allocations in proptest::collection::vec(arb_allocation(), 1..4),
        snapshots in arb_snapshots(),
    ) {
        let g = goal(allocations, Decimal::new(1_000_000, 2), Decimal::ZERO);
        let history = reconstruct(&g, &snapshots).unwrap();
        prop_assert!(history.windows(2).all(|w| w[0].date < w[1].date));

        let referenced = g.referenced_account_ids();
        let mut dates: Vec<NaiveDate> = snapshots
            .iter()
            .filter(|s| referenced.contains(s.account_id.as_str()))
            .map(|s| s.snapshot_date())
            .collect();
        dates.sort();
        dates.dedup();
        prop_assert_eq!(history.len(), dates.len());
    }

    /// The last reconstructed point equals the live computation over the
    /// carried-forward latest readings.
    #[test]
    fn prop_last_point_matches_latest_readings(
        allocations in proptest::collection::vec(arb_allocation(), 1..4),
        snapshots in arb_snapshots(),
    ) {
        let g = goal(allocations, Decimal::new(1_000_000, 2), Decimal::ZERO);
        let history = reconstruct(&g, &snapshots).unwrap();

        let mut ordered = snapshots.clone();
        ordered.sort_by_key(|s| s.timestamp);
        let mut latest: HashMap<String, Decimal> = HashMap::new();
        for s in &ordered {
            latest.insert(s.account_id.clone(), s.balance);
        }

        if let Some(last) = history.last() {
            let expected = compute_balance(&g, &latest).unwrap().round_dp(6);
            prop_assert_eq!(last.balance, expected);
        }
    }

    /// A flat or shrinking trajectory spanning at least a day never projects.
    #[test]
    fn prop_non_positive_trend_never_projects(
        first in arb_positive_amount(),
        drop in 0i64..1_000_000,
        span in 1i64..400,
        starting in arb_amount(),
    ) {
        let last = first - Decimal::new(drop, 2);
        let trajectory = vec![
            HistoryPoint::new(base_date(), first),
            HistoryPoint::new(base_date() + Duration::days(span), last),
        ];
        let target = first + Decimal::new(1_000_000, 2);
        let g = goal(vec![], target, starting);
        let now = base_instant() + Duration::days(span);
        prop_assert_eq!(project(&g, last, &trajectory, now).unwrap(), None);
    }
}
