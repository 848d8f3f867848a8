//! Statistics MCP Tools
//!
//! Period aggregation over logged meals: totals, daily averages, and
//! a per-day calorie series.

use serde::Serialize;

use crate::db::Database;
use crate::engine::goals::DEFAULT_CALORIE_GOAL;
use crate::engine::{aggregate_period, dense_series, PeriodStats};
use crate::models::{Meal, Profile};

/// Response for get_period_stats
#[derive(Debug, Serialize)]
pub struct PeriodStatsResponse {
    #[serde(flatten)]
    pub stats: PeriodStats,
    /// Goal at the time of the query, for charting against the series
    pub daily_calorie_goal: i64,
}

/// Aggregate statistics over an inclusive date range.
///
/// With `fill_missing_days` the series carries one point per calendar
/// day, zero on days without meals.
pub fn get_period_stats(
    db: &Database,
    start_date: &str,
    end_date: &str,
    fill_missing_days: bool,
) -> Result<PeriodStatsResponse, String> {
    if start_date > end_date {
        return Err("start_date must not be after end_date".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let meals = Meal::get_for_range(&conn, start_date, end_date)
        .map_err(|e| format!("Failed to get meals: {}", e))?;

    let mut stats = aggregate_period(&meals, start_date, end_date);
    if fill_missing_days {
        stats.series = dense_series(&stats.series, start_date, end_date);
    }

    let daily_calorie_goal = Profile::get(&conn)
        .map_err(|e| format!("Failed to get profile: {}", e))?
        .map(|p| p.daily_calorie_goal)
        .unwrap_or(DEFAULT_CALORIE_GOAL);

    Ok(PeriodStatsResponse {
        stats,
        daily_calorie_goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::meals::log_meal;

    fn test_db() -> Database {
        let db = Database::new_in_memory().unwrap();
        let conn = db.get_conn().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        db
    }

    #[test]
    fn test_period_stats_over_logged_meals() {
        let db = test_db();
        log_meal(&db, "a", "lunch", "2025-03-10", 800, 40.0, 60.0, 20.0, true, None).unwrap();
        log_meal(&db, "b", "dinner", "2025-03-10", 600, 30.0, 40.0, 15.0, true, None).unwrap();
        log_meal(&db, "c", "lunch", "2025-03-12", 1000, 50.0, 80.0, 30.0, false, None).unwrap();

        let response = get_period_stats(&db, "2025-03-08", "2025-03-14", false).unwrap();
        assert_eq!(response.stats.days_with_data, 2);
        assert_eq!(response.stats.total_calories, 2400);
        assert_eq!(response.stats.averages.calories, 1200);
        assert_eq!(response.stats.series.len(), 2);
        assert_eq!(response.daily_calorie_goal, DEFAULT_CALORIE_GOAL);
    }

    #[test]
    fn test_dense_series_spans_the_whole_range() {
        let db = test_db();
        log_meal(&db, "a", "lunch", "2025-03-10", 800, 40.0, 60.0, 20.0, true, None).unwrap();

        let response = get_period_stats(&db, "2025-03-08", "2025-03-14", true).unwrap();
        assert_eq!(response.stats.series.len(), 7);
        assert_eq!(response.stats.series[2].calories, 800);
        assert_eq!(response.stats.series[0].calories, 0);
    }
}
