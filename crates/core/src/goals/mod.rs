//! Goals module - goal progress engine, domain models, services, and traits.
//!
//! Balances are derived from allocation rules, trajectories are replayed from
//! account snapshots with carry-forward, and pace/schedule metrics are computed
//! on demand. Every calculation is a pure function of its inputs;
//! [`GoalProgressService`] only gathers those inputs.

mod allocation_resolver;
mod downsampler;
mod goal_metrics_calculator;
mod goal_progress_model;
mod goals_errors;
mod goals_model;
mod goals_service;
mod goals_traits;
mod history_reconstructor;
mod pace_projector;
mod schedule_evaluator;


pub use allocation_resolver::{allocation_contribution, compute_balance, resolve_allocations};
pub use downsampler::downsample;
pub use goal_metrics_calculator::calculate_goal_metrics;
pub use goal_progress_model::{AllocationContribution, GoalMetrics, GoalProgressConfig, HistoryPoint};
pub use goals_errors::GoalError;
pub use goals_model::{
    parse_allocations, Allocation, AllocationKind, AllocationRecord, Goal, GoalRecord,
};
pub use goals_service::GoalProgressService;
pub use goals_traits::{GoalDataSourceTrait, GoalProgressServiceTrait};
pub use history_reconstructor::{build_trajectory, latest_readings_by_date, reconstruct};
pub use pace_projector::{lifetime_pace, project, select_pace, trajectory_pace, PaceSource, SavingsPace};
pub use schedule_evaluator::{days_remaining, monthly_needed, on_track, progress_pct, remaining_amount};
