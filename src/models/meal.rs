//! Meal model
//!
//! A logged meal on one calendar date. `completed = false` means the
//! meal is planned; `true` means it was consumed.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use super::Macros;

/// Meal type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Unspecified,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
            MealType::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => MealType::Breakfast,
            "lunch" => MealType::Lunch,
            "dinner" => MealType::Dinner,
            "snack" => MealType::Snack,
            _ => MealType::Unspecified,
        }
    }

    /// Fixed display rank: breakfast first, unknown types last
    pub fn display_rank(&self) -> u8 {
        match self {
            MealType::Breakfast => 1,
            MealType::Lunch => 2,
            MealType::Dinner => 3,
            MealType::Snack => 4,
            MealType::Unspecified => 5,
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub meal_type: MealType,
    pub date: String, // ISO date: "2025-01-09"
    pub calories: i64,
    pub macros: Macros,
    pub completed: bool,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealCreate {
    pub name: String,
    pub meal_type: MealType,
    pub date: String,
    pub calories: i64,
    pub macros: Macros,
    pub completed: bool,
    pub notes: Option<String>,
}

impl Meal {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let meal_type_str: String = row.get("meal_type")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            meal_type: MealType::from_str(&meal_type_str),
            date: row.get("date")?,
            calories: row.get("calories")?,
            macros: Macros {
                protein: row.get("protein")?,
                carbs: row.get("carbs")?,
                fat: row.get("fat")?,
            },
            completed: row.get("completed")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Insert a new meal
    pub fn create(conn: &Connection, data: &MealCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO meals (name, meal_type, date, calories, protein, carbs, fat, completed, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                data.name,
                data.meal_type.as_str(),
                data.date,
                data.calories,
                data.macros.protein,
                data.macros.carbs,
                data.macros.fat,
                data.completed,
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a meal by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(meal) => Ok(Some(meal)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get all meals for a date, in insertion order
    pub fn get_for_date(conn: &Connection, date: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM meals WHERE date = ?1 ORDER BY id")?;

        let meals = stmt
            .query_map([date], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    /// Get all meals in an inclusive date range, ordered by date then id
    pub fn get_for_range(conn: &Connection, start: &str, end: &str) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM meals WHERE date >= ?1 AND date <= ?2 ORDER BY date, id",
        )?;

        let meals = stmt
            .query_map([start, end], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(meals)
    }

    /// Set the completed flag on a meal
    pub fn set_completed(conn: &Connection, id: i64, completed: bool) -> DbResult<Option<Self>> {
        conn.execute(
            "UPDATE meals SET completed = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![completed, id],
        )?;

        Self::get_by_id(conn, id)
    }

    /// Delete a meal
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM meals WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        conn
    }

    fn meal(name: &str, date: &str, calories: i64) -> MealCreate {
        MealCreate {
            name: name.to_string(),
            meal_type: MealType::Lunch,
            date: date.to_string(),
            calories,
            macros: Macros { protein: 20.0, carbs: 30.0, fat: 10.0 },
            completed: false,
            notes: None,
        }
    }

    #[test]
    fn test_create_and_fetch_by_date() {
        let conn = test_conn();
        Meal::create(&conn, &meal("Chicken and rice", "2025-03-01", 650)).unwrap();
        Meal::create(&conn, &meal("Omelette", "2025-03-02", 300)).unwrap();

        let day = Meal::get_for_date(&conn, "2025-03-01").unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].name, "Chicken and rice");
        assert!(!day[0].completed);
    }

    #[test]
    fn test_range_is_inclusive() {
        let conn = test_conn();
        Meal::create(&conn, &meal("a", "2025-03-01", 100)).unwrap();
        Meal::create(&conn, &meal("b", "2025-03-05", 200)).unwrap();
        Meal::create(&conn, &meal("c", "2025-03-06", 300)).unwrap();

        let range = Meal::get_for_range(&conn, "2025-03-01", "2025-03-05").unwrap();
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn test_set_completed() {
        let conn = test_conn();
        let created = Meal::create(&conn, &meal("Pasta", "2025-03-01", 500)).unwrap();

        let updated = Meal::set_completed(&conn, created.id, true).unwrap().unwrap();
        assert!(updated.completed);

        let reverted = Meal::set_completed(&conn, created.id, false).unwrap().unwrap();
        assert!(!reverted.completed);
    }

    #[test]
    fn test_delete() {
        let conn = test_conn();
        let created = Meal::create(&conn, &meal("Snack", "2025-03-01", 150)).unwrap();
        assert!(Meal::delete(&conn, created.id).unwrap());
        assert!(!Meal::delete(&conn, created.id).unwrap());
    }
}
