//! Profile model
//!
//! Single-row table holding the user's physiological inputs and the
//! daily goals derived from them. The derived goals are recomputed by
//! the engine on every write; they are never set directly.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::DbResult;
use crate::engine::goals::{self, GoalInputs};

/// Gender enum for BMR selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unspecified,
        }
    }
}

/// Activity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Unrecognized values decode to Moderate
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "light" => ActivityLevel::Light,
            "moderate" => ActivityLevel::Moderate,
            "active" => ActivityLevel::Active,
            "very_active" | "veryactive" => ActivityLevel::VeryActive,
            _ => ActivityLevel::Moderate,
        }
    }
}

/// Fitness goal enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    #[default]
    Maintenance,
    MuscleGain,
    ExtremeGain,
}

impl FitnessGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::ExtremeGain => "extreme_gain",
        }
    }

    /// Unrecognized values decode to Maintenance
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "weight_loss" | "weightloss" => FitnessGoal::WeightLoss,
            "maintenance" => FitnessGoal::Maintenance,
            "muscle_gain" | "musclegain" => FitnessGoal::MuscleGain,
            "extreme_gain" | "extremegain" => FitnessGoal::ExtremeGain,
            _ => FitnessGoal::Maintenance,
        }
    }
}

/// User profile with derived daily goals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub age: Option<i64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
    pub daily_calorie_goal: i64,
    pub daily_protein_goal: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update for the profile; None fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub age: Option<i64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
}

impl Profile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let gender: String = row.get("gender")?;
        let activity: String = row.get("activity_level")?;
        let goal: String = row.get("fitness_goal")?;
        Ok(Self {
            id: row.get("id")?,
            age: row.get("age")?,
            weight_kg: row.get("weight_kg")?,
            height_cm: row.get("height_cm")?,
            gender: Gender::from_str(&gender),
            activity_level: ActivityLevel::from_str(&activity),
            fitness_goal: FitnessGoal::from_str(&goal),
            daily_calorie_goal: row.get("daily_calorie_goal")?,
            daily_protein_goal: row.get("daily_protein_goal")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile (single row table)
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or update the profile (upsert), merging with any existing row
    /// and recomputing both derived goals from the merged inputs.
    pub fn set(conn: &Connection, data: &ProfileUpdate) -> DbResult<Self> {
        let current = Self::get(conn)?;

        let age = data.age.or(current.as_ref().and_then(|p| p.age));
        let weight_kg = data.weight_kg.or(current.as_ref().and_then(|p| p.weight_kg));
        let height_cm = data.height_cm.or(current.as_ref().and_then(|p| p.height_cm));
        let gender = data
            .gender
            .or(current.as_ref().map(|p| p.gender))
            .unwrap_or_default();
        let activity_level = data
            .activity_level
            .or(current.as_ref().map(|p| p.activity_level))
            .unwrap_or_default();
        let fitness_goal = data
            .fitness_goal
            .or(current.as_ref().map(|p| p.fitness_goal))
            .unwrap_or_default();

        let inputs = GoalInputs {
            age: age.map(|a| a as f64),
            weight_kg,
            height_cm,
            gender,
            activity_level,
            fitness_goal,
        };
        let daily_calorie_goal = goals::daily_calorie_goal(&inputs);
        let daily_protein_goal = goals::daily_protein_goal(weight_kg, activity_level, fitness_goal);

        conn.execute(
            r#"
            INSERT INTO profile (
                id, age, weight_kg, height_cm, gender, activity_level, fitness_goal,
                daily_calorie_goal, daily_protein_goal
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                age = excluded.age,
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                gender = excluded.gender,
                activity_level = excluded.activity_level,
                fitness_goal = excluded.fitness_goal,
                daily_calorie_goal = excluded.daily_calorie_goal,
                daily_protein_goal = excluded.daily_protein_goal,
                updated_at = datetime('now')
            "#,
            params![
                age,
                weight_kg,
                height_cm,
                gender.as_str(),
                activity_level.as_str(),
                fitness_goal.as_str(),
                daily_calorie_goal,
                daily_protein_goal,
            ],
        )?;

        Self::get(conn)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
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
    fn test_enum_round_trip() {
        assert_eq!(ActivityLevel::from_str("very_active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from_str("veryActive"), ActivityLevel::VeryActive);
        assert_eq!(FitnessGoal::from_str("weightLoss"), FitnessGoal::WeightLoss);
        assert_eq!(Gender::from_str("FEMALE"), Gender::Female);
    }

    #[test]
    fn test_unknown_enum_defaults() {
        assert_eq!(ActivityLevel::from_str("foo"), ActivityLevel::Moderate);
        assert_eq!(FitnessGoal::from_str("performance"), FitnessGoal::Maintenance);
        assert_eq!(Gender::from_str(""), Gender::Unspecified);
    }

    #[test]
    fn test_set_recomputes_goals() {
        let conn = test_conn();
        let profile = Profile::set(
            &conn,
            &ProfileUpdate {
                age: Some(30),
                weight_kg: Some(80.0),
                height_cm: Some(180.0),
                gender: Some(Gender::Male),
                activity_level: Some(ActivityLevel::Moderate),
                fitness_goal: Some(FitnessGoal::Maintenance),
            },
        )
        .unwrap();

        assert_eq!(profile.daily_calorie_goal, 2873);
        assert_eq!(profile.daily_protein_goal, 160);
    }

    #[test]
    fn test_partial_update_keeps_inputs_and_recomputes() {
        let conn = test_conn();
        Profile::set(
            &conn,
            &ProfileUpdate {
                age: Some(30),
                weight_kg: Some(70.0),
                height_cm: Some(175.0),
                gender: Some(Gender::Male),
                ..Default::default()
            },
        )
        .unwrap();

        // Only the weight changes; the other inputs carry over.
        let updated = Profile::set(
            &conn,
            &ProfileUpdate {
                weight_kg: Some(80.0),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.age, Some(30));
        assert_eq!(updated.gender, Gender::Male);
        assert_eq!(updated.daily_calorie_goal, 2873);
    }

    #[test]
    fn test_incomplete_profile_gets_default_goals() {
        let conn = test_conn();
        let profile = Profile::set(&conn, &ProfileUpdate::default()).unwrap();
        assert_eq!(profile.daily_calorie_goal, 2000);
        assert_eq!(profile.daily_protein_goal, 120);
    }
}
