//! Day-level meal aggregation
//!
//! Splits a day's meals into consumed (completed) and planned
//! (pending) totals and reports remaining budget against the daily
//! calorie goal.

use serde::{Deserialize, Serialize};

use crate::models::{Macros, Meal};

/// Calorie and macro totals for a single day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub daily_calorie_goal: i64,
    /// Calories from completed meals
    pub consumed_calories: i64,
    /// Calories from pending meals
    pub planned_calories: i64,
    /// Goal minus consumed and planned, never negative
    pub remaining_calories: i64,
    /// Calories logged beyond the goal, zero while under it
    pub over_goal_calories: i64,
    pub consumed_macros: Macros,
    pub planned_macros: Macros,
    pub total_macros: Macros,
    pub meal_count: usize,
}

/// Aggregate a day's meals against a daily calorie goal.
///
/// Every meal contributes to exactly one of the consumed or planned
/// totals, so consumed + planned always equals the day total.
pub fn aggregate_day(meals: &[Meal], daily_calorie_goal: i64) -> DaySummary {
    let mut consumed_calories = 0i64;
    let mut planned_calories = 0i64;
    let mut consumed_macros = Macros::zero();
    let mut planned_macros = Macros::zero();

    for meal in meals {
        if meal.completed {
            consumed_calories += meal.calories;
            consumed_macros = consumed_macros.add(meal.macros);
        } else {
            planned_calories += meal.calories;
            planned_macros = planned_macros.add(meal.macros);
        }
    }

    // Planned meals count against the budget too: remaining is what is
    // left to plan, not what is left to eat.
    let logged = consumed_calories + planned_calories;

    DaySummary {
        daily_calorie_goal,
        consumed_calories,
        planned_calories,
        remaining_calories: (daily_calorie_goal - logged).max(0),
        over_goal_calories: (logged - daily_calorie_goal).max(0),
        consumed_macros,
        planned_macros,
        total_macros: consumed_macros.add(planned_macros),
        meal_count: meals.len(),
    }
}

/// Sort meals into display order: breakfast, lunch, dinner, snack,
/// then unspecified. Ties keep their original order.
pub fn sort_for_display(meals: &mut [Meal]) {
    meals.sort_by_key(|m| m.meal_type.display_rank());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealType;

    fn meal(id: i64, meal_type: MealType, calories: i64, protein: f64, completed: bool) -> Meal {
        Meal {
            id,
            name: format!("meal {}", id),
            meal_type,
            date: "2025-03-10".to_string(),
            calories,
            macros: Macros {
                protein,
                carbs: 10.0,
                fat: 5.0,
            },
            completed,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_consumed_and_planned_partition_the_day() {
        let meals = vec![
            meal(1, MealType::Breakfast, 400, 25.0, true),
            meal(2, MealType::Lunch, 650, 40.0, true),
            meal(3, MealType::Dinner, 700, 35.0, false),
            meal(4, MealType::Snack, 180, 8.0, false),
        ];

        let summary = aggregate_day(&meals, 2500);
        assert_eq!(summary.consumed_calories, 1050);
        assert_eq!(summary.planned_calories, 880);
        assert_eq!(
            summary.consumed_calories + summary.planned_calories,
            meals.iter().map(|m| m.calories).sum::<i64>()
        );
        assert_eq!(summary.consumed_macros.protein, 65.0);
        assert_eq!(summary.total_macros.protein, 108.0);
        assert_eq!(summary.remaining_calories, 570); // 2500 - 1930
        assert_eq!(summary.over_goal_calories, 0);
    }

    #[test]
    fn test_remaining_clamps_at_zero_when_over_goal() {
        let meals = vec![
            meal(1, MealType::Lunch, 1400, 50.0, true),
            meal(2, MealType::Dinner, 900, 45.0, false),
        ];

        // Planned calories push the day over the goal as well.
        let summary = aggregate_day(&meals, 2000);
        assert_eq!(summary.remaining_calories, 0);
        assert_eq!(summary.over_goal_calories, 300);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let meals = vec![
            meal(1, MealType::Breakfast, 400, 25.0, true),
            meal(2, MealType::Dinner, 700, 35.0, false),
        ];

        let first = aggregate_day(&meals, 2200);
        let second = aggregate_day(&meals, 2200);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_day() {
        let summary = aggregate_day(&[], 2200);
        assert_eq!(summary.consumed_calories, 0);
        assert_eq!(summary.planned_calories, 0);
        assert_eq!(summary.remaining_calories, 2200);
        assert_eq!(summary.total_macros.protein, 0.0);
        assert_eq!(summary.meal_count, 0);
    }

    #[test]
    fn test_display_order_is_stable_within_a_meal_type() {
        let mut meals = vec![
            meal(1, MealType::Snack, 100, 5.0, true),
            meal(2, MealType::Dinner, 700, 35.0, false),
            meal(3, MealType::Breakfast, 400, 25.0, true),
            meal(4, MealType::Snack, 150, 6.0, false),
            meal(5, MealType::Unspecified, 300, 12.0, false),
            meal(6, MealType::Lunch, 600, 30.0, true),
        ];

        sort_for_display(&mut meals);
        let order: Vec<i64> = meals.iter().map(|m| m.id).collect();
        assert_eq!(order, vec![3, 6, 2, 1, 4, 5]);
    }
}
