//! Food Item MCP Tools
//!
//! Tools for the food reference catalog: builtin staples seeded at
//! startup plus user-defined items.

use serde::Serialize;

use crate::db::Database;
use crate::models::{FoodItem, FoodItemCreate, ScaledFood};

/// Response for search_food_items
#[derive(Debug, Serialize)]
pub struct SearchFoodItemsResponse {
    pub items: Vec<FoodItem>,
    pub query: String,
}

/// Response for list_food_items
#[derive(Debug, Serialize)]
pub struct ListFoodItemsResponse {
    pub items: Vec<FoodItem>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Add a user-defined food item
pub fn add_food_item(db: &Database, data: FoodItemCreate) -> Result<FoodItem, String> {
    if data.name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if data.serving_qty <= 0.0 {
        return Err("serving_qty must be greater than 0".to_string());
    }
    if data.calories < 0.0 || data.protein < 0.0 || data.carbs < 0.0 || data.fat < 0.0 {
        return Err("Nutrition values cannot be negative".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    FoodItem::create(&conn, &data).map_err(|e| format!("Failed to add food item: {}", e))
}

/// Get a food item by ID
pub fn get_food_item(db: &Database, id: i64) -> Result<Option<FoodItem>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    FoodItem::get_by_id(&conn, id).map_err(|e| format!("Failed to get food item: {}", e))
}

/// Search food items by name
pub fn search_food_items(
    db: &Database,
    query: &str,
    limit: i64,
) -> Result<SearchFoodItemsResponse, String> {
    let limit = limit.clamp(1, 100);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = FoodItem::search(&conn, query, limit)
        .map_err(|e| format!("Failed to search food items: {}", e))?;

    Ok(SearchFoodItemsResponse {
        items,
        query: query.to_string(),
    })
}

/// List food items with pagination
pub fn list_food_items(
    db: &Database,
    limit: i64,
    offset: i64,
) -> Result<ListFoodItemsResponse, String> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = FoodItem::list(&conn, limit, offset)
        .map_err(|e| format!("Failed to list food items: {}", e))?;
    let total = FoodItem::count(&conn).map_err(|e| format!("Failed to count food items: {}", e))?;

    Ok(ListFoodItemsResponse {
        items,
        total,
        limit,
        offset,
    })
}

/// Preview a food item scaled by a quantity multiplier
pub fn scale_food_item(
    db: &Database,
    id: i64,
    quantity: f64,
) -> Result<Option<ScaledFood>, String> {
    if quantity <= 0.0 {
        return Err("Quantity must be greater than 0".to_string());
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let item = FoodItem::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get food item: {}", e))?;

    Ok(item.map(|i| i.scaled(quantity)))
}

/// Delete a user-defined food item. Builtin items are protected.
pub fn delete_food_item(db: &Database, id: i64) -> Result<bool, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    FoodItem::delete(&conn, id).map_err(|e| format!("Failed to delete food item: {}", e))
}
