//! MealTrack Library
//!
//! Core functionality for meal logging and calorie tracking.

pub mod build_info;
pub mod db;
pub mod engine;
pub mod mcp;
pub mod models;
pub mod tools;
