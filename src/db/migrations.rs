//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILE
        -- Single-row table (id = 1) with the user's
        -- physiological inputs and derived daily goals.
        -- Derived goals are recomputed on every write.
        -- ============================================
        CREATE TABLE profile (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            age INTEGER,                         -- years, nullable until profile completed
            weight_kg REAL,
            height_cm REAL,
            gender TEXT NOT NULL CHECK(gender IN ('male', 'female', 'unspecified')) DEFAULT 'unspecified',
            activity_level TEXT NOT NULL CHECK(activity_level IN ('sedentary', 'light', 'moderate', 'active', 'very_active')) DEFAULT 'moderate',
            fitness_goal TEXT NOT NULL CHECK(fitness_goal IN ('weight_loss', 'maintenance', 'muscle_gain', 'extreme_gain')) DEFAULT 'maintenance',

            -- Derived goals, engine-computed
            daily_calorie_goal INTEGER NOT NULL DEFAULT 2000,
            daily_protein_goal INTEGER NOT NULL DEFAULT 120,

            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- FOOD ITEMS
        -- Reference nutrition data, per serving.
        -- Builtin rows are the bundled common-food set.
        -- ============================================
        CREATE TABLE food_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            serving_qty REAL NOT NULL DEFAULT 1.0,
            serving_unit TEXT NOT NULL,
            serving_weight_grams REAL NOT NULL,

            -- Nutritional values (per serving)
            calories REAL NOT NULL DEFAULT 0,
            protein REAL NOT NULL DEFAULT 0,     -- grams
            carbs REAL NOT NULL DEFAULT 0,       -- grams
            fat REAL NOT NULL DEFAULT 0,         -- grams

            thumbnail TEXT,
            builtin INTEGER NOT NULL DEFAULT 0,  -- boolean, bundled dataset row
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_food_items_name ON food_items(name);

        -- ============================================
        -- MEALS
        -- Logged meals, one calendar date each.
        -- completed = 0 means planned, 1 means consumed.
        -- ============================================
        CREATE TABLE meals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            meal_type TEXT NOT NULL CHECK(meal_type IN ('breakfast', 'lunch', 'dinner', 'snack', 'unspecified')),
            date TEXT NOT NULL,                  -- ISO date: "2025-01-09"

            calories INTEGER NOT NULL DEFAULT 0 CHECK(calories >= 0),
            protein REAL NOT NULL DEFAULT 0 CHECK(protein >= 0),
            carbs REAL NOT NULL DEFAULT 0 CHECK(carbs >= 0),
            fat REAL NOT NULL DEFAULT 0 CHECK(fat >= 0),

            completed INTEGER NOT NULL DEFAULT 0,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_meals_date ON meals(date);
        CREATE INDEX idx_meals_type ON meals(meal_type);

        -- ============================================
        -- WEIGHTS
        -- Append-only body weight log
        -- ============================================
        CREATE TABLE weights (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,                  -- ISO date: "2025-01-09"
            weight_kg REAL NOT NULL CHECK(weight_kg > 0),
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_weights_date ON weights(date);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
