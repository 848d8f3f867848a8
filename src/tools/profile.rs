//! Profile MCP Tools
//!
//! Tools for reading and updating the user profile. Derived daily
//! goals are recomputed on every update.

use crate::db::Database;
use crate::models::{ActivityLevel, FitnessGoal, Gender, Profile, ProfileUpdate};

/// Set or update the profile. Omitted fields keep their current value.
pub fn set_profile(
    db: &Database,
    age: Option<i64>,
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    gender: Option<&str>,
    activity_level: Option<&str>,
    fitness_goal: Option<&str>,
) -> Result<Profile, String> {
    if let Some(a) = age {
        if a <= 0 {
            return Err("Age must be greater than 0".to_string());
        }
    }
    if let Some(w) = weight_kg {
        if w <= 0.0 {
            return Err("Weight must be greater than 0".to_string());
        }
    }
    if let Some(h) = height_cm {
        if h <= 0.0 {
            return Err("Height must be greater than 0".to_string());
        }
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let update = ProfileUpdate {
        age,
        weight_kg,
        height_cm,
        gender: gender.map(Gender::from_str),
        activity_level: activity_level.map(ActivityLevel::from_str),
        fitness_goal: fitness_goal.map(FitnessGoal::from_str),
    };

    Profile::set(&conn, &update).map_err(|e| format!("Failed to update profile: {}", e))
}

/// Get the profile, None when never set
pub fn get_profile(db: &Database) -> Result<Option<Profile>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    Profile::get(&conn).map_err(|e| format!("Failed to get profile: {}", e))
}
