//! MealTrack MCP Server Implementation
//!
//! Implements the MCP server with all MealTrack tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::FoodItemCreate;
use crate::tools::foods;
use crate::tools::meals::{self, FoodPortion};
use crate::tools::profile;
use crate::tools::stats;
use crate::tools::status::StatusTracker;
use crate::tools::weights;

/// MealTrack MCP Service
#[derive(Clone)]
pub struct MealTrackService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<MealTrackService>,
}

impl MealTrackService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetProfileParams {
    /// Age in years
    pub age: Option<i64>,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Gender: male, female, or unspecified
    pub gender: Option<String>,
    /// Activity level: sedentary, light, moderate, active, very_active
    pub activity_level: Option<String>,
    /// Fitness goal: weight_loss, maintenance, muscle_gain, extreme_gain
    pub fitness_goal: Option<String>,
}

// ============================================================================
// Food Item Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodItemParams {
    pub name: String,
    /// Serving quantity, e.g. 100 for "100 g" or 1 for "1 egg"
    pub serving_qty: f64,
    /// Serving unit, e.g. "g", "ml", "egg"
    pub serving_unit: String,
    /// Weight of one serving in grams
    pub serving_weight_grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    /// Optional thumbnail URL
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodItemsParams {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_search_limit() -> i64 {
    20
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFoodItemsParams {
    /// Maximum results (default 50, max 200)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Offset for pagination (default 0)
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScaleFoodItemParams {
    /// Food item ID
    pub id: i64,
    /// Serving multiplier, e.g. 1.5 for one and a half servings
    pub quantity: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteFoodItemParams {
    /// Food item ID to delete (builtin items are protected)
    pub id: i64,
}

// ============================================================================
// Meal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealParams {
    /// Name of the meal
    pub name: String,
    /// Meal type: breakfast, lunch, dinner, snack, or unspecified
    #[serde(default = "default_meal_type")]
    pub meal_type: String,
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    pub calories: i64,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbs in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat: f64,
    /// true = consumed, false = planned (default true)
    #[serde(default = "default_completed")]
    pub completed: bool,
    pub notes: Option<String>,
}

fn default_meal_type() -> String {
    "unspecified".to_string()
}

fn default_completed() -> bool {
    true
}

/// One food portion when composing a meal from the catalog
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodPortionParam {
    /// Food item ID
    pub food_item_id: i64,
    /// Serving multiplier (default 1.0)
    #[serde(default = "default_quantity")]
    pub quantity: f64,
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogMealFromFoodsParams {
    /// Meal type: breakfast, lunch, dinner, snack, or unspecified
    #[serde(default = "default_meal_type")]
    pub meal_type: String,
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Food portions making up the meal
    pub portions: Vec<FoodPortionParam>,
    /// true = consumed, false = planned (default true)
    #[serde(default = "default_completed")]
    pub completed: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDayParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListMealsParams {
    /// Start date (inclusive) in ISO format: YYYY-MM-DD
    pub start_date: String,
    /// End date (inclusive) in ISO format: YYYY-MM-DD
    pub end_date: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetMealCompletedParams {
    /// Meal ID
    pub id: i64,
    /// true = consumed, false = back to planned
    pub completed: bool,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteMealParams {
    /// Meal ID to delete
    pub id: i64,
}

// ============================================================================
// Statistics Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetPeriodStatsParams {
    /// Start date (inclusive) in ISO format: YYYY-MM-DD
    pub start_date: String,
    /// End date (inclusive) in ISO format: YYYY-MM-DD
    pub end_date: String,
    /// Include days without meals as zero points in the series
    #[serde(default)]
    pub fill_missing_days: bool,
}

// ============================================================================
// Weight Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogWeightParams {
    /// Date in ISO format: YYYY-MM-DD
    pub date: String,
    /// Body weight in kilograms
    pub weight_kg: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListWeightsParams {
    /// Start date (inclusive) - optional
    pub start_date: Option<String>,
    /// End date (inclusive) - optional
    pub end_date: Option<String>,
    /// Maximum results (default 30, max 500)
    #[serde(default = "default_weights_limit")]
    pub limit: i64,
}

fn default_weights_limit() -> i64 {
    30
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteWeightParams {
    /// Weight entry ID to delete
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl MealTrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the MealTrack service including build info, database status, and process information")]
    async fn mealtrack_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for tracking meals, profile goals, and weights. Call this when starting a new tracking session or when unsure how to use the tools.")]
    fn tracking_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::TRACKING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(TRACKING_INSTRUCTIONS)]))
    }

    // --- Profile ---

    #[tool(description = "Set or update the user profile. Omitted fields keep their current value. Daily calorie and protein goals are recomputed automatically from the merged inputs.")]
    fn set_profile(&self, Parameters(p): Parameters<SetProfileParams>) -> Result<CallToolResult, McpError> {
        let result = profile::set_profile(
            &self.database,
            p.age,
            p.weight_kg,
            p.height_cm,
            p.gender.as_deref(),
            p.activity_level.as_deref(),
            p.fitness_goal.as_deref(),
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get the user profile with derived daily calorie and protein goals")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = profile::get_profile(&self.database).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(p) => serde_json::to_string_pretty(&p),
            None => Ok(r#"{"error": "Profile not set"}"#.to_string()),
        }
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Food Items ---

    #[tool(description = "Add a user-defined food item with per-serving nutrition")]
    fn add_food_item(&self, Parameters(p): Parameters<AddFoodItemParams>) -> Result<CallToolResult, McpError> {
        let data = FoodItemCreate {
            name: p.name,
            serving_qty: p.serving_qty,
            serving_unit: p.serving_unit,
            serving_weight_grams: p.serving_weight_grams,
            calories: p.calories,
            protein: p.protein,
            carbs: p.carbs,
            fat: p.fat,
            thumbnail: p.thumbnail,
        };
        let result = foods::add_food_item(&self.database, data).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Search food items by name. Prefix matches are ranked first.")]
    fn search_food_items(&self, Parameters(p): Parameters<SearchFoodItemsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::search_food_items(&self.database, &p.query, p.limit).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List food items sorted by name, with pagination")]
    fn list_food_items(&self, Parameters(p): Parameters<ListFoodItemsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::list_food_items(&self.database, p.limit, p.offset).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Preview a food item scaled by a quantity multiplier: calories round to the nearest integer, macros to one decimal")]
    fn scale_food_item(&self, Parameters(p): Parameters<ScaleFoodItemParams>) -> Result<CallToolResult, McpError> {
        let result = foods::scale_food_item(&self.database, p.id, p.quantity).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(scaled) => serde_json::to_string_pretty(&scaled),
            None => Ok(format!(r#"{{"error": "Food item not found", "id": {}}}"#, p.id)),
        }
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a user-defined food item. Builtin items cannot be deleted.")]
    fn delete_food_item(&self, Parameters(p): Parameters<DeleteFoodItemParams>) -> Result<CallToolResult, McpError> {
        let deleted = foods::delete_food_item(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = format!(r#"{{"deleted": {}, "id": {}}}"#, deleted, p.id);
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Meals ---

    #[tool(description = "Log a meal with explicit nutrition values on a date")]
    fn log_meal(&self, Parameters(p): Parameters<LogMealParams>) -> Result<CallToolResult, McpError> {
        let result = meals::log_meal(
            &self.database,
            &p.name,
            &p.meal_type,
            &p.date,
            p.calories,
            p.protein,
            p.carbs,
            p.fat,
            p.completed,
            p.notes,
        )
        .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Log a meal composed from catalog food items. Each portion is scaled by its quantity and the meal totals are the sums of the scaled portions.")]
    fn log_meal_from_foods(&self, Parameters(p): Parameters<LogMealFromFoodsParams>) -> Result<CallToolResult, McpError> {
        let portions: Vec<FoodPortion> = p
            .portions
            .into_iter()
            .map(|fp| FoodPortion {
                food_item_id: fp.food_item_id,
                quantity: fp.quantity,
            })
            .collect();
        let result = meals::log_meal_from_foods(&self.database, &p.meal_type, &p.date, &portions, p.completed, p.notes)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get a day's meals in display order plus a summary: consumed vs planned calories and macros, and calories remaining against the daily goal")]
    fn get_day(&self, Parameters(p): Parameters<GetDayParams>) -> Result<CallToolResult, McpError> {
        let result = meals::get_day(&self.database, &p.date).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List meals in an inclusive date range, ordered by date")]
    fn list_meals(&self, Parameters(p): Parameters<ListMealsParams>) -> Result<CallToolResult, McpError> {
        let result = meals::list_meals(&self.database, &p.start_date, &p.end_date).map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Mark a meal as consumed (completed=true) or back to planned (completed=false)")]
    fn set_meal_completed(&self, Parameters(p): Parameters<SetMealCompletedParams>) -> Result<CallToolResult, McpError> {
        let result = meals::set_meal_completed(&self.database, p.id, p.completed).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(meal) => serde_json::to_string_pretty(&meal),
            None => Ok(format!(r#"{{"error": "Meal not found", "id": {}}}"#, p.id)),
        }
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a meal")]
    fn delete_meal(&self, Parameters(p): Parameters<DeleteMealParams>) -> Result<CallToolResult, McpError> {
        let deleted = meals::delete_meal(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = format!(r#"{{"deleted": {}, "id": {}}}"#, deleted, p.id);
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Statistics ---

    #[tool(description = "Get nutrition statistics for an inclusive date range: totals, per-day averages over days with data, and a per-day calorie series for charting")]
    fn get_period_stats(&self, Parameters(p): Parameters<GetPeriodStatsParams>) -> Result<CallToolResult, McpError> {
        let result = stats::get_period_stats(&self.database, &p.start_date, &p.end_date, p.fill_missing_days)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Weights ---

    #[tool(description = "Log a body weight reading in kilograms")]
    fn log_weight(&self, Parameters(p): Parameters<LogWeightParams>) -> Result<CallToolResult, McpError> {
        let result = weights::log_weight(&self.database, &p.date, p.weight_kg, p.notes.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "List weight entries newest first, with optional date range")]
    fn list_weights(&self, Parameters(p): Parameters<ListWeightsParams>) -> Result<CallToolResult, McpError> {
        let result = weights::list_weights(&self.database, p.start_date.as_deref(), p.end_date.as_deref(), p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete a weight entry")]
    fn delete_weight(&self, Parameters(p): Parameters<DeleteWeightParams>) -> Result<CallToolResult, McpError> {
        let deleted = weights::delete_weight(&self.database, p.id).map_err(|e| McpError::internal_error(e, None))?;
        let json = format!(r#"{{"deleted": {}, "id": {}}}"#, deleted, p.id);
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for MealTrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mealtrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("MealTrack".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MealTrack - Meal, nutrition goal, and weight tracking. \
                 IMPORTANT: Call tracking_instructions when starting a session. \
                 Profile: set_profile/get_profile (daily calorie and protein goals are derived automatically). \
                 Food catalog: add/search/list/scale/delete_food_item. \
                 Meals: log_meal (explicit values), log_meal_from_foods (composed from the catalog), \
                 get_day, list_meals, set_meal_completed, delete_meal. \
                 Statistics: get_period_stats for totals, daily averages, and calorie series. \
                 Weights: log_weight/list_weights/delete_weight. \
                 Dates use ISO format YYYY-MM-DD; ranges are inclusive."
                    .into(),
            ),
        }
    }
}
