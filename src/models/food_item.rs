//! Food Item model
//!
//! Reference nutrition data per serving. Scaled by a quantity
//! multiplier when composed into a meal.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// Round to one decimal place
fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// A food item with per-serving nutrition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: i64,
    pub name: String,
    pub serving_qty: f64,
    pub serving_unit: String,
    pub serving_weight_grams: f64,
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub thumbnail: Option<String>,
    pub builtin: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new food item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItemCreate {
    pub name: String,
    pub serving_qty: f64,
    pub serving_unit: String,
    pub serving_weight_grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub thumbnail: Option<String>,
}

/// A food item scaled by a quantity multiplier.
///
/// Serving metrics scale linearly; calories round to the nearest
/// integer and macros to one decimal place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledFood {
    pub name: String,
    pub quantity: f64,
    pub serving_qty: f64,
    pub serving_unit: String,
    pub serving_weight_grams: f64,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl FoodItem {
    /// Scale this food item's serving by a positive quantity multiplier
    pub fn scaled(&self, quantity: f64) -> ScaledFood {
        ScaledFood {
            name: self.name.clone(),
            quantity,
            serving_qty: self.serving_qty * quantity,
            serving_unit: self.serving_unit.clone(),
            serving_weight_grams: self.serving_weight_grams * quantity,
            calories: (self.calories * quantity).round() as i64,
            protein: round1(self.protein * quantity),
            carbs: round1(self.carbs * quantity),
            fat: round1(self.fat * quantity),
        }
    }

    /// Create a FoodItem from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            serving_qty: row.get("serving_qty")?,
            serving_unit: row.get("serving_unit")?,
            serving_weight_grams: row.get("serving_weight_grams")?,
            calories: row.get("calories")?,
            protein: row.get("protein")?,
            carbs: row.get("carbs")?,
            fat: row.get("fat")?,
            thumbnail: row.get("thumbnail")?,
            builtin: row.get("builtin")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new user-defined food item
    pub fn create(conn: &Connection, data: &FoodItemCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO food_items (
                name, serving_qty, serving_unit, serving_weight_grams,
                calories, protein, carbs, fat, thumbnail, builtin
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0)
            "#,
            params![
                data.name,
                data.serving_qty,
                data.serving_unit,
                data.serving_weight_grams,
                data.calories,
                data.protein,
                data.carbs,
                data.fat,
                data.thumbnail,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a food item by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM food_items WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Search food items by name, prefix matches first
    pub fn search(conn: &Connection, query: &str, limit: i64) -> DbResult<Vec<Self>> {
        let contains = format!("%{}%", query);
        let prefix = format!("{}%", query);
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM food_items
            WHERE name LIKE ?1
            ORDER BY CASE WHEN name LIKE ?2 THEN 0 ELSE 1 END, name ASC
            LIMIT ?3
            "#,
        )?;

        let items = stmt
            .query_map(params![contains, prefix, limit], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// List food items sorted by name
    pub fn list(conn: &Connection, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM food_items ORDER BY name ASC LIMIT ?1 OFFSET ?2",
        )?;

        let items = stmt
            .query_map(params![limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Count food items
    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM food_items", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a user-defined food item.
    /// Builtin rows are protected; returns Ok(false) for them and for
    /// unknown ids.
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute(
            "DELETE FROM food_items WHERE id = ?1 AND builtin = 0",
            [id],
        )?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(calories: f64, protein: f64, carbs: f64, fat: f64) -> FoodItem {
        FoodItem {
            id: 1,
            name: "Almonds".to_string(),
            serving_qty: 30.0,
            serving_unit: "g".to_string(),
            serving_weight_grams: 30.0,
            calories,
            protein,
            carbs,
            fat,
            thumbnail: None,
            builtin: true,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_scaled_macro_rounds_to_one_decimal() {
        let scaled = item(173.0, 6.3, 6.1, 15.0).scaled(2.5);
        assert_eq!(scaled.protein, 15.8); // 6.3 * 2.5 = 15.75 -> 15.8
        assert_eq!(scaled.serving_qty, 75.0);
        assert_eq!(scaled.serving_weight_grams, 75.0);
    }

    #[test]
    fn test_scaled_calories_round_to_integer() {
        let scaled = item(70.0, 6.0, 0.5, 5.0).scaled(1.5);
        assert_eq!(scaled.calories, 105);

        let scaled = item(95.0, 0.5, 25.0, 0.3).scaled(0.33);
        assert_eq!(scaled.calories, 31); // 31.35 -> 31
    }

    #[test]
    fn test_search_prefers_prefix_matches() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        crate::db::seed::seed_builtin_foods(&conn).unwrap();

        let results = FoodItem::search(&conn, "Chicken", 10).unwrap();
        assert!(results.len() >= 2);
        assert!(results[0].name.starts_with("Chicken"));
    }

    #[test]
    fn test_builtin_rows_cannot_be_deleted() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        crate::db::seed::seed_builtin_foods(&conn).unwrap();

        let egg = FoodItem::search(&conn, "Egg", 1).unwrap().remove(0);
        assert!(!FoodItem::delete(&conn, egg.id).unwrap());

        let custom = FoodItem::create(
            &conn,
            &FoodItemCreate {
                name: "Protein bar".to_string(),
                serving_qty: 1.0,
                serving_unit: "bar".to_string(),
                serving_weight_grams: 60.0,
                calories: 210.0,
                protein: 20.0,
                carbs: 22.0,
                fat: 7.0,
                thumbnail: None,
            },
        )
        .unwrap();
        assert!(FoodItem::delete(&conn, custom.id).unwrap());
    }
}
