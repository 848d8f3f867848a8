//! MealTrack Status Tool
//!
//! Provides runtime status information about the MealTrack service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Meal tracking instructions for AI assistants
pub const TRACKING_INSTRUCTIONS: &str = r#"
# MealTrack Instructions

This guide explains how to track meals and nutrition using the MealTrack tools.

## Overview

MealTrack keeps four kinds of data:
1. **Profile** - Age, weight, height, gender, activity level, and fitness goal.
   Daily calorie and protein goals are derived from these automatically.
2. **Food items** - A catalog of foods with per-serving nutrition. Builtin
   staples are seeded; users can add their own.
3. **Meals** - Logged per calendar date, either consumed (completed) or
   planned (pending).
4. **Weights** - An append-only body weight log.

## Dates

All dates use ISO format: YYYY-MM-DD. Do not guess relative dates; ask the
user or use a calendar tool to resolve "today" before logging.

## Profile and Goals

Set the profile once, update fields as they change:

```
set_profile(age: 30, weight_kg: 80, height_cm: 180, gender: "male",
            activity_level: "moderate", fitness_goal: "maintenance")
```

- Omitted fields keep their current value.
- `activity_level`: sedentary, light, moderate, active, very_active
- `fitness_goal`: weight_loss, maintenance, muscle_gain, extreme_gain
- Unknown values fall back to moderate / maintenance.
- The daily calorie goal comes from the Harris-Benedict formula scaled by
  activity and goal; the protein goal is grams per kg of body weight.
- Without a complete profile the goals default to 2000 kcal and 120 g.

## Logging Meals

**From the food catalog** (preferred - nutrition is computed for you):

```
search_food_items(query: "chicken")
log_meal_from_foods(date: "2025-03-10", meal_type: "lunch",
                    portions: [{food_item_id: 12, quantity: 1.5}],
                    completed: true)
```

`quantity` is a serving multiplier: 1.5 means one and a half servings of
the item as cataloged. Serving metrics scale linearly; calories round to
the nearest integer and macros to one decimal.

**With explicit values** (when nutrition is already known):

```
log_meal(name: "Chicken and rice", meal_type: "lunch", date: "2025-03-10",
         calories: 650, protein: 45, carbs: 70, fat: 15, completed: true)
```

- `meal_type`: breakfast, lunch, dinner, snack (anything else is
  "unspecified" and sorts last).
- `completed: false` logs a planned meal; flip it later with
  `set_meal_completed` when it is eaten.

## Reading a Day

```
get_day(date: "2025-03-10")
```

Returns the day's meals in display order (breakfast, lunch, dinner, snack)
plus a summary: consumed vs planned calories, macros for each, calories
remaining against the daily goal (never negative), and how far over the
goal the day is, if at all.

## Statistics

```
get_period_stats(start_date: "2025-03-01", end_date: "2025-03-31")
```

Returns totals, per-day averages (over days that have data, not calendar
days), and a per-day calorie series sorted by date. Pass
`fill_missing_days: true` to get one point per calendar day with zeros on
empty days, which charts better.

## Weight Log

```
log_weight(date: "2025-03-10", weight_kg: 80.5)
list_weights(limit: 30)
```

The weight log is separate from the profile; logging a weight does not
change the goal calculation until the profile is updated.

## Quick Reference

| Task | Tool |
|------|------|
| Set/update profile | `set_profile` |
| View profile and goals | `get_profile` |
| Find food items | `search_food_items` |
| Add a food item | `add_food_item` |
| Preview a scaled portion | `scale_food_item` |
| Log a meal from foods | `log_meal_from_foods` |
| Log a meal directly | `log_meal` |
| View a day with summary | `get_day` |
| List meals in a range | `list_meals` |
| Mark planned meal eaten | `set_meal_completed` |
| Delete a meal | `delete_meal` |
| Nutrition statistics | `get_period_stats` |
| Log body weight | `log_weight` |
| View weight history | `list_weights` |

## Notes

- Builtin food items cannot be deleted; user-added ones can.
- Date ranges are inclusive on both ends.
- Deleting a meal is permanent; prefer `set_meal_completed(false)` to
  un-eat a meal that was logged by mistake.
"#;

/// Runtime status of the MealTrack service
#[derive(Debug, Clone, Serialize)]
pub struct MealTrackStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> MealTrackStatus {
        let build_info = BuildInfo::current();

        // Get database size if it exists
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        // Get process info
        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        MealTrackStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
