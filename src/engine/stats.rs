//! Period statistics
//!
//! Aggregates meals over an inclusive date range into totals, per-day
//! averages, and a per-day calorie series for charting.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Macros, Meal};

/// Per-day averages over the days that have data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DailyAverages {
    pub calories: i64,
    pub protein: i64, // grams
    pub carbs: i64,   // grams
    pub fat: i64,     // grams
}

/// One day's calorie total in a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub calories: i64,
}

/// Aggregated statistics for a date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodStats {
    pub start_date: String,
    pub end_date: String,
    /// Distinct dates with at least one meal
    pub days_with_data: i64,
    pub total_calories: i64,
    pub total_macros: Macros,
    pub averages: DailyAverages,
    /// Sorted by date ascending, days without data omitted
    pub series: Vec<SeriesPoint>,
}

/// Aggregate meals over an inclusive `[start_date, end_date]` range.
///
/// Dates are ISO strings, so plain string comparison orders them.
/// Averages divide by the number of distinct days with data; an empty
/// range yields zeros and an empty series.
pub fn aggregate_period(meals: &[Meal], start_date: &str, end_date: &str) -> PeriodStats {
    let mut by_date: BTreeMap<&str, (i64, Macros)> = BTreeMap::new();

    for meal in meals {
        if meal.date.as_str() < start_date || meal.date.as_str() > end_date {
            continue;
        }
        let entry = by_date.entry(&meal.date).or_insert((0, Macros::zero()));
        entry.0 += meal.calories;
        entry.1 = entry.1.add(meal.macros);
    }

    let days = by_date.len() as i64;
    let total_calories: i64 = by_date.values().map(|(c, _)| c).sum();
    let total_macros = by_date
        .values()
        .fold(Macros::zero(), |acc, (_, m)| acc.add(*m));

    let averages = if days == 0 {
        DailyAverages {
            calories: 0,
            protein: 0,
            carbs: 0,
            fat: 0,
        }
    } else {
        DailyAverages {
            calories: (total_calories as f64 / days as f64).round() as i64,
            protein: (total_macros.protein / days as f64).round() as i64,
            carbs: (total_macros.carbs / days as f64).round() as i64,
            fat: (total_macros.fat / days as f64).round() as i64,
        }
    };

    let series = by_date
        .into_iter()
        .map(|(date, (calories, _))| SeriesPoint {
            date: date.to_string(),
            calories,
        })
        .collect();

    PeriodStats {
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        days_with_data: days,
        total_calories,
        total_macros,
        averages,
        series,
    }
}

/// Expand a sparse series to one point per calendar day in the range,
/// with zero calories on days without data.
///
/// Falls back to the sparse series unchanged when either bound is not
/// a parseable ISO date.
pub fn dense_series(sparse: &[SeriesPoint], start_date: &str, end_date: &str) -> Vec<SeriesPoint> {
    let (start, end) = match (
        NaiveDate::parse_from_str(start_date, "%Y-%m-%d"),
        NaiveDate::parse_from_str(end_date, "%Y-%m-%d"),
    ) {
        (Ok(s), Ok(e)) => (s, e),
        _ => return sparse.to_vec(),
    };

    let by_date: BTreeMap<&str, i64> = sparse
        .iter()
        .map(|p| (p.date.as_str(), p.calories))
        .collect();

    let mut dense = Vec::new();
    let mut day = start;
    while day <= end {
        let date = day.format("%Y-%m-%d").to_string();
        let calories = by_date.get(date.as_str()).copied().unwrap_or(0);
        dense.push(SeriesPoint { date, calories });
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    dense
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn meal(date: &str, calories: i64, protein: f64) -> Meal {
        Meal {
            id: 0,
            name: "test".to_string(),
            meal_type: MealType::Lunch,
            date: date.to_string(),
            calories,
            macros: Macros {
                protein,
                carbs: 20.0,
                fat: 10.0,
            },
            completed: true,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_averages_divide_by_days_with_data() {
        // Three meals across two distinct days inside a seven-day range.
        let meals = vec![
            meal("2025-03-10", 800, 40.0),
            meal("2025-03-10", 600, 30.0),
            meal("2025-03-12", 1000, 50.0),
        ];

        let stats = aggregate_period(&meals, "2025-03-08", "2025-03-14");
        assert_eq!(stats.days_with_data, 2);
        assert_eq!(stats.total_calories, 2400);
        assert_eq!(stats.averages.calories, 1200);
        assert_eq!(stats.averages.protein, 60);
        assert_eq!(stats.averages.carbs, 30); // 60g over 2 days
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let meals = vec![
            meal("2025-03-09", 500, 20.0),
            meal("2025-03-10", 700, 30.0),
            meal("2025-03-12", 900, 40.0),
            meal("2025-03-13", 400, 15.0),
        ];

        let stats = aggregate_period(&meals, "2025-03-10", "2025-03-12");
        assert_eq!(stats.days_with_data, 2);
        assert_eq!(stats.total_calories, 1600);
    }

    #[test]
    fn test_empty_range_yields_zeros() {
        let stats = aggregate_period(&[], "2025-03-01", "2025-03-07");
        assert_eq!(stats.days_with_data, 0);
        assert_eq!(stats.total_calories, 0);
        assert_eq!(stats.averages.calories, 0);
        assert!(stats.series.is_empty());
    }

    #[test]
    fn test_meals_outside_range_yield_zeros() {
        let meals = vec![
            meal("2025-02-28", 500, 20.0),
            meal("2025-03-08", 700, 30.0),
        ];

        let stats = aggregate_period(&meals, "2025-03-01", "2025-03-07");
        assert_eq!(stats.days_with_data, 0);
        assert_eq!(stats.averages.calories, 0);
        assert_eq!(stats.averages.protein, 0);
        assert!(stats.series.is_empty());
    }

    #[test]
    fn test_series_is_sorted_and_sparse() {
        let meals = vec![
            meal("2025-03-12", 900, 40.0),
            meal("2025-03-10", 700, 30.0),
            meal("2025-03-10", 300, 10.0),
        ];

        let stats = aggregate_period(&meals, "2025-03-01", "2025-03-31");
        let dates: Vec<&str> = stats.series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2025-03-10", "2025-03-12"]);
        assert_eq!(stats.series[0].calories, 1000);
    }

    #[test]
    fn test_dense_series_fills_missing_days_with_zero() {
        let sparse = vec![
            SeriesPoint {
                date: "2025-03-10".to_string(),
                calories: 1000,
            },
            SeriesPoint {
                date: "2025-03-12".to_string(),
                calories: 900,
            },
        ];

        let dense = dense_series(&sparse, "2025-03-09", "2025-03-13");
        assert_eq!(dense.len(), 5);
        assert_eq!(dense[0].calories, 0);
        assert_eq!(dense[1].calories, 1000);
        assert_eq!(dense[2].calories, 0);
        assert_eq!(dense[4].date, "2025-03-13");
    }

    #[test]
    fn test_dense_series_falls_back_on_bad_bounds() {
        let sparse = vec![SeriesPoint {
            date: "2025-03-10".to_string(),
            calories: 1000,
        }];

        let dense = dense_series(&sparse, "not-a-date", "2025-03-13");
        assert_eq!(dense.len(), 1);
        assert_eq!(dense[0].date, "2025-03-10");
    }
}
