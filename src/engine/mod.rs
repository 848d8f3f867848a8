//! Nutrition engine
//!
//! Pure, deterministic computation over in-memory data: daily calorie
//! and protein goals from physiological inputs, day-level meal
//! aggregation, and period statistics. No I/O and no shared state;
//! bad domain input degrades to documented defaults instead of
//! erroring, so callers always get a displayable number.

pub mod aggregate;
pub mod goals;
pub mod stats;

pub use aggregate::{aggregate_day, sort_for_display, DaySummary};
pub use goals::{daily_calorie_goal, daily_protein_goal, GoalInputs};
pub use stats::{aggregate_period, dense_series, DailyAverages, PeriodStats, SeriesPoint};
