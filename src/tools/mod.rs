//! MealTrack Tools module
//!
//! MCP tool implementations for meal and nutrition tracking.

pub mod foods;
pub mod meals;
pub mod profile;
pub mod stats;
pub mod status;
pub mod weights;
