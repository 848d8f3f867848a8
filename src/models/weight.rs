//! Weight entry model
//!
//! Append-only body weight log.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;

/// A body weight reading on a calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: i64,
    pub date: String, // ISO date: "2025-01-09"
    pub weight_kg: f64,
    pub notes: Option<String>,
    pub created_at: String,
}

impl WeightEntry {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            date: row.get("date")?,
            weight_kg: row.get("weight_kg")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a new weight entry
    pub fn create(
        conn: &Connection,
        date: &str,
        weight_kg: f64,
        notes: Option<&str>,
    ) -> DbResult<Self> {
        conn.execute(
            "INSERT INTO weights (date, weight_kg, notes) VALUES (?1, ?2, ?3)",
            params![date, weight_kg, notes],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a weight entry by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM weights WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List weight entries with optional date range, newest first
    pub fn list(
        conn: &Connection,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
    ) -> DbResult<Vec<Self>> {
        let mut sql = String::from("SELECT * FROM weights WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND date <= ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY date DESC, id DESC");

        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> =
            params_vec.iter().map(|p| p.as_ref()).collect();

        let entries = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Get the most recent weight entry
    pub fn latest(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt =
            conn.prepare("SELECT * FROM weights ORDER BY date DESC, id DESC LIMIT 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a weight entry
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM weights WHERE id = ?1", [id])?;
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

    #[test]
    fn test_list_newest_first_with_range() {
        let conn = test_conn();
        WeightEntry::create(&conn, "2025-03-01", 81.2, None).unwrap();
        WeightEntry::create(&conn, "2025-03-08", 80.6, None).unwrap();
        WeightEntry::create(&conn, "2025-03-15", 80.1, Some("after vacation")).unwrap();

        let all = WeightEntry::list(&conn, None, None, 10).unwrap();
        assert_eq!(all[0].date, "2025-03-15");

        let range = WeightEntry::list(&conn, Some("2025-03-01"), Some("2025-03-08"), 10).unwrap();
        assert_eq!(range.len(), 2);

        let latest = WeightEntry::latest(&conn).unwrap().unwrap();
        assert_eq!(latest.weight_kg, 80.1);
    }
}
