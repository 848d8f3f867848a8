//! Utility to set the user profile in the database
//!
//! Usage: set_profile <age> <weight_kg> <height_cm> [gender] [activity_level] [fitness_goal]

use std::path::PathBuf;

use mealtrack::models::{ActivityLevel, FitnessGoal, Gender, Profile, ProfileUpdate};

fn get_database_path() -> PathBuf {
    std::env::var("MEALTRACK_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            // Go up from target/release or target/debug to project root
            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            std::fs::create_dir_all(&path).ok();
            path.push("mealtrack.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: set_profile <age> <weight_kg> <height_cm> [gender] [activity_level] [fitness_goal]"
        );
        std::process::exit(1);
    }

    let update = ProfileUpdate {
        age: Some(args[0].parse()?),
        weight_kg: Some(args[1].parse()?),
        height_cm: Some(args[2].parse()?),
        gender: args.get(3).map(|s| Gender::from_str(s)),
        activity_level: args.get(4).map(|s| ActivityLevel::from_str(s)),
        fitness_goal: args.get(5).map(|s| FitnessGoal::from_str(s)),
    };

    let db_path = get_database_path();
    println!("Database path: {}", db_path.display());

    let database = mealtrack::db::Database::new(&db_path)?;

    // Run migrations
    database.with_conn(|conn| {
        mealtrack::db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    // Set the profile and print the derived goals
    database.with_conn(|conn| {
        let profile = Profile::set(conn, &update)?;
        println!("Profile set:");
        println!("  Age: {:?}", profile.age);
        println!("  Weight: {:?} kg", profile.weight_kg);
        println!("  Height: {:?} cm", profile.height_cm);
        println!("  Gender: {}", profile.gender.as_str());
        println!("  Activity: {}", profile.activity_level.as_str());
        println!("  Goal: {}", profile.fitness_goal.as_str());
        println!("  Daily calorie goal: {} kcal", profile.daily_calorie_goal);
        println!("  Daily protein goal: {} g", profile.daily_protein_goal);
        Ok(())
    })?;

    Ok(())
}
