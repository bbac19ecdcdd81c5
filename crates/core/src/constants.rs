/// Decimal precision for monetary calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Maximum number of chart points kept after downsampling a trajectory
pub const DEFAULT_CHART_MAX_POINTS: usize = 18;

/// Allowed shortfall, in percentage points, still counted as on track
pub const DEFAULT_ON_TRACK_TOLERANCE_PCT: u32 = 5;

/// Days per month used when spreading the remaining amount over time
pub const DAYS_PER_MONTH: u32 = 30;

/// Seconds per day, used for fractional day arithmetic
pub const SECONDS_PER_DAY: i64 = 86_400;
