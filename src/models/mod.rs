//! Data models
//!
//! Rust structs representing database entities.

mod food_item;
mod macros;
mod meal;
mod profile;
mod weight;

pub use food_item::{FoodItem, FoodItemCreate, ScaledFood};
pub use macros::Macros;
pub use meal::{Meal, MealCreate, MealType};
pub use profile::{ActivityLevel, FitnessGoal, Gender, Profile, ProfileUpdate};
pub use weight::WeightEntry;
