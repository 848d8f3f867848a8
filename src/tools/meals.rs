//! Meal MCP Tools
//!
//! Tools for logging meals, viewing a day against the calorie goal,
//! and toggling planned meals to consumed.

use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::engine::goals::DEFAULT_CALORIE_GOAL;
use crate::engine::{aggregate_day, sort_for_display, DaySummary};
use crate::models::{FoodItem, Macros, Meal, MealCreate, MealType, Profile};

/// One food portion when composing a meal from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPortion {
    pub food_item_id: i64,
    /// Serving multiplier, e.g. 1.5 servings
    pub quantity: f64,
}

/// Response for get_day
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    /// Meals in display order: breakfast, lunch, dinner, snack, other
    pub meals: Vec<Meal>,
    pub summary: DaySummary,
}

/// Response for list_meals
#[derive(Debug, Serialize)]
pub struct ListMealsResponse {
    pub meals: Vec<Meal>,
    pub start_date: String,
    pub end_date: String,
}

fn validate_date(date: &str) -> Result<(), String> {
    // ISO dates sort lexicographically; anything else breaks range
    // queries, so reject it at the boundary.
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if well_formed {
        Ok(())
    } else {
        Err(format!("Invalid date (expected YYYY-MM-DD): {}", date))
    }
}

/// The configured daily calorie goal, or the default when no profile
/// has been set.
fn daily_goal(conn: &rusqlite::Connection) -> Result<i64, String> {
    let profile = Profile::get(conn).map_err(|e| format!("Failed to get profile: {}", e))?;
    Ok(profile
        .map(|p| p.daily_calorie_goal)
        .unwrap_or(DEFAULT_CALORIE_GOAL))
}

/// Log a meal with explicit nutrition values
pub fn log_meal(
    db: &Database,
    name: &str,
    meal_type: &str,
    date: &str,
    calories: i64,
    protein: f64,
    carbs: f64,
    fat: f64,
    completed: bool,
    notes: Option<String>,
) -> Result<Meal, String> {
    validate_date(date)?;
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if calories < 0 {
        return Err("Calories cannot be negative".to_string());
    }
    if protein < 0.0 || carbs < 0.0 || fat < 0.0 {
        return Err("Macros cannot be negative".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let data = MealCreate {
        name: name.to_string(),
        meal_type: MealType::from_str(meal_type),
        date: date.to_string(),
        calories,
        macros: Macros {
            protein,
            carbs,
            fat,
        },
        completed,
        notes,
    };

    Meal::create(&conn, &data).map_err(|e| format!("Failed to log meal: {}", e))
}

/// Log a meal composed from catalog food items.
///
/// Each portion is scaled by its quantity; the meal's totals are the
/// sums of the scaled portions and its name joins the portion names.
pub fn log_meal_from_foods(
    db: &Database,
    meal_type: &str,
    date: &str,
    portions: &[FoodPortion],
    completed: bool,
    notes: Option<String>,
) -> Result<Meal, String> {
    validate_date(date)?;
    if portions.is_empty() {
        return Err("At least one food portion is required".to_string());
    }
    for portion in portions {
        if portion.quantity <= 0.0 {
            return Err("Quantity must be greater than 0".to_string());
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let mut calories = 0i64;
    let mut macros = Macros::zero();
    let mut names = Vec::new();

    for portion in portions {
        let item = FoodItem::get_by_id(&conn, portion.food_item_id)
            .map_err(|e| format!("Failed to get food item: {}", e))?
            .ok_or_else(|| format!("Food item not found with id: {}", portion.food_item_id))?;

        let scaled = item.scaled(portion.quantity);
        calories += scaled.calories;
        macros = macros.add(Macros {
            protein: scaled.protein,
            carbs: scaled.carbs,
            fat: scaled.fat,
        });
        names.push(scaled.name);
    }

    let data = MealCreate {
        name: names.join(", "),
        meal_type: MealType::from_str(meal_type),
        date: date.to_string(),
        calories,
        macros,
        completed,
        notes,
    };

    Meal::create(&conn, &data).map_err(|e| format!("Failed to log meal: {}", e))
}

/// Get a day's meals in display order with its summary
pub fn get_day(db: &Database, date: &str) -> Result<DayResponse, String> {
    validate_date(date)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let mut meals =
        Meal::get_for_date(&conn, date).map_err(|e| format!("Failed to get meals: {}", e))?;

    let goal = daily_goal(&conn)?;
    let summary = aggregate_day(&meals, goal);
    sort_for_display(&mut meals);

    Ok(DayResponse {
        date: date.to_string(),
        meals,
        summary,
    })
}

/// List meals in an inclusive date range
pub fn list_meals(
    db: &Database,
    start_date: &str,
    end_date: &str,
) -> Result<ListMealsResponse, String> {
    validate_date(start_date)?;
    validate_date(end_date)?;
    if start_date > end_date {
        return Err("start_date must not be after end_date".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let meals = Meal::get_for_range(&conn, start_date, end_date)
        .map_err(|e| format!("Failed to list meals: {}", e))?;

    Ok(ListMealsResponse {
        meals,
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    })
}

/// Mark a meal as consumed or back to planned
pub fn set_meal_completed(
    db: &Database,
    id: i64,
    completed: bool,
) -> Result<Option<Meal>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Meal::set_completed(&conn, id, completed)
        .map_err(|e| format!("Failed to update meal: {}", e))
}

/// Delete a meal
pub fn delete_meal(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Meal::delete(&conn, id).map_err(|e| format!("Failed to delete meal: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        let db = Database::new_in_memory().unwrap();
        let conn = db.get_conn().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        crate::db::seed::seed_builtin_foods(&conn).unwrap();
        db
    }

    #[test]
    fn test_log_meal_from_foods_sums_scaled_portions() {
        let db = test_db();
        let conn = db.get_conn().unwrap();

        let egg = FoodItem::search(&conn, "Egg", 1).unwrap().remove(0);
        let chicken = FoodItem::search(&conn, "Chicken breast", 1)
            .unwrap()
            .remove(0);
        drop(conn);

        let meal = log_meal_from_foods(
            &db,
            "lunch",
            "2025-03-10",
            &[
                FoodPortion {
                    food_item_id: egg.id,
                    quantity: 2.0,
                },
                FoodPortion {
                    food_item_id: chicken.id,
                    quantity: 1.5,
                },
            ],
            true,
            None,
        )
        .unwrap();

        // 2 eggs: 140 kcal / 12 g protein, 1.5 chicken: 180 kcal / 39 g
        assert_eq!(meal.calories, 320);
        assert_eq!(meal.macros.protein, 51.0);
        assert!(meal.name.contains("Egg"));
        assert!(meal.name.contains("Chicken breast"));
    }

    #[test]
    fn test_get_day_uses_default_goal_without_profile() {
        let db = test_db();

        log_meal(&db, "Oatmeal", "breakfast", "2025-03-10", 350, 12.0, 60.0, 6.0, true, None)
            .unwrap();
        log_meal(&db, "Steak", "dinner", "2025-03-10", 700, 50.0, 5.0, 45.0, false, None)
            .unwrap();

        let day = get_day(&db, "2025-03-10").unwrap();
        assert_eq!(day.summary.daily_calorie_goal, DEFAULT_CALORIE_GOAL);
        assert_eq!(day.summary.consumed_calories, 350);
        assert_eq!(day.summary.planned_calories, 700);
        assert_eq!(day.summary.remaining_calories, 950); // 2000 - 1050
        assert_eq!(day.meals[0].name, "Oatmeal");
    }

    #[test]
    fn test_get_day_orders_meals_by_type() {
        let db = test_db();

        log_meal(&db, "Snack", "snack", "2025-03-10", 150, 5.0, 20.0, 5.0, true, None).unwrap();
        log_meal(&db, "Dinner", "dinner", "2025-03-10", 700, 40.0, 50.0, 25.0, true, None)
            .unwrap();
        log_meal(&db, "Breakfast", "breakfast", "2025-03-10", 350, 20.0, 40.0, 10.0, true, None)
            .unwrap();

        let day = get_day(&db, "2025-03-10").unwrap();
        let names: Vec<&str> = day.meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Breakfast", "Dinner", "Snack"]);
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let db = test_db();
        assert!(get_day(&db, "03/10/2025").is_err());
        assert!(get_day(&db, "2025-3-10").is_err());
        assert!(get_day(&db, "2025-03-10").is_ok());
    }
}
