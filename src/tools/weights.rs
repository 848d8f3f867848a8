//! Weight MCP Tools
//!
//! Tools for the body weight log.

use serde::Serialize;

use crate::db::Database;
use crate::models::WeightEntry;

/// Response for list_weights
#[derive(Debug, Serialize)]
pub struct ListWeightsResponse {
    /// Newest first
    pub entries: Vec<WeightEntry>,
    pub latest: Option<WeightEntry>,
}

/// Log a body weight reading
pub fn log_weight(
    db: &Database,
    date: &str,
    weight_kg: f64,
    notes: Option<&str>,
) -> Result<WeightEntry, String> {
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    WeightEntry::create(&conn, date, weight_kg, notes)
        .map_err(|e| format!("Failed to log weight: {}", e))
}

/// List weight entries, newest first, with optional date range
pub fn list_weights(
    db: &Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
) -> Result<ListWeightsResponse, String> {
    let limit = limit.clamp(1, 500);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let entries = WeightEntry::list(&conn, start_date, end_date, limit)
        .map_err(|e| format!("Failed to list weights: {}", e))?;
    let latest =
        WeightEntry::latest(&conn).map_err(|e| format!("Failed to get latest weight: {}", e))?;

    Ok(ListWeightsResponse { entries, latest })
}

/// Delete a weight entry
pub fn delete_weight(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    WeightEntry::delete(&conn, id).map_err(|e| format!("Failed to delete weight entry: {}", e))
}
