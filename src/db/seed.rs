//! Builtin food dataset
//!
//! Seeds the food_items table with a bundled set of common foods so
//! food search works without any external lookup service.

use rusqlite::{params, Connection};

use super::connection::DbResult;

/// (name, serving_qty, serving_unit, serving_weight_grams, calories, protein, carbs, fat)
type BuiltinFood = (&'static str, f64, &'static str, f64, f64, f64, f64, f64);

/// Bundled common foods, nutrition per serving
const BUILTIN_FOODS: &[BuiltinFood] = &[
    ("Egg", 1.0, "unit", 50.0, 70.0, 6.0, 0.5, 5.0),
    ("Sweet potato", 1.0, "medium", 130.0, 112.0, 2.0, 26.0, 0.1),
    ("Chicken breast", 100.0, "g", 100.0, 120.0, 26.0, 0.0, 1.5),
    ("Chicken", 100.0, "g", 100.0, 165.0, 31.0, 0.0, 3.6),
    ("Ground beef", 100.0, "g", 100.0, 141.0, 21.0, 0.0, 5.0),
    ("Steak", 100.0, "g", 100.0, 141.0, 21.0, 0.0, 5.0),
    ("Ham", 1.0, "slice", 30.0, 35.0, 6.0, 0.5, 1.0),
    ("Bread", 1.0, "slice", 30.0, 75.0, 2.0, 15.0, 1.0),
    ("Rice", 100.0, "g cooked", 100.0, 130.0, 2.7, 28.0, 0.3),
    ("Pasta", 100.0, "g cooked", 100.0, 158.0, 5.8, 31.0, 0.9),
    ("Quinoa", 100.0, "g cooked", 100.0, 120.0, 4.4, 21.3, 1.9),
    ("Lentils", 100.0, "g cooked", 100.0, 116.0, 9.0, 20.0, 0.4),
    ("Potato", 1.0, "medium", 150.0, 130.0, 3.0, 30.0, 0.2),
    ("Apple", 1.0, "medium", 182.0, 95.0, 0.5, 25.0, 0.3),
    ("Banana", 1.0, "medium", 118.0, 105.0, 1.3, 27.0, 0.4),
    ("Tomato", 1.0, "medium", 123.0, 22.0, 1.1, 4.8, 0.2),
    ("Carrot", 1.0, "medium", 61.0, 25.0, 0.6, 5.8, 0.1),
    ("Broccoli", 100.0, "g", 100.0, 34.0, 2.8, 6.6, 0.4),
    ("Green beans", 100.0, "g cooked", 100.0, 35.0, 1.9, 7.0, 0.1),
    ("Lettuce", 100.0, "g", 100.0, 15.0, 1.4, 2.9, 0.2),
    ("Zucchini", 100.0, "g", 100.0, 17.0, 1.2, 3.1, 0.3),
    ("Cucumber", 100.0, "g", 100.0, 15.0, 0.7, 3.6, 0.1),
    ("Avocado", 1.0, "medium", 150.0, 240.0, 3.0, 12.8, 22.0),
    ("Salmon", 100.0, "g", 100.0, 206.0, 22.1, 0.0, 12.4),
    ("Tuna", 100.0, "g", 100.0, 108.0, 25.0, 0.0, 0.8),
    ("White fish", 100.0, "g", 100.0, 96.0, 20.5, 0.0, 2.3),
    ("Milk", 100.0, "ml", 100.0, 60.0, 3.2, 4.8, 3.2),
    ("Plain yogurt", 1.0, "pot", 125.0, 59.0, 5.3, 5.7, 0.2),
    ("Cheese", 30.0, "g", 30.0, 120.0, 7.0, 0.5, 10.0),
    ("Corn cake", 1.0, "cake", 30.0, 110.0, 2.0, 23.0, 1.5),
    ("Whole wheat wrap", 1.0, "wrap", 35.0, 95.0, 3.0, 16.0, 1.0),
    ("Olive oil", 1.0, "tbsp", 14.0, 120.0, 0.0, 0.0, 14.0),
    ("Butter", 1.0, "tbsp", 14.0, 100.0, 0.0, 0.0, 11.0),
    ("Almonds", 30.0, "g", 30.0, 173.0, 6.3, 6.1, 15.0),
];

/// Insert the builtin foods if none are present yet.
/// Returns the number of rows inserted (0 when already seeded).
pub fn seed_builtin_foods(conn: &Connection) -> DbResult<usize> {
    let existing: i64 = conn.query_row(
        "SELECT COUNT(*) FROM food_items WHERE builtin = 1",
        [],
        |row| row.get(0),
    )?;

    if existing > 0 {
        return Ok(0);
    }

    let mut stmt = conn.prepare(
        r#"
        INSERT INTO food_items (
            name, serving_qty, serving_unit, serving_weight_grams,
            calories, protein, carbs, fat, builtin
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)
        "#,
    )?;

    let mut inserted = 0;
    for (name, qty, unit, grams, calories, protein, carbs, fat) in BUILTIN_FOODS {
        stmt.execute(params![name, qty, unit, grams, calories, protein, carbs, fat])?;
        inserted += 1;
    }

    tracing::info!(count = inserted, "seeded builtin food items");
    Ok(inserted)
}
