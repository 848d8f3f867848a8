//! Shared macronutrient data structure
//!
//! Used across food items, meals, and statistics.

use serde::{Deserialize, Serialize};

/// Macronutrient totals in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl Macros {
    /// Create a new Macros with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale macro values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    /// Add another Macros to this one
    pub fn add(&self, other: Macros) -> Self {
        Self {
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }
}

impl std::ops::Add for Macros {
    type Output = Macros;

    fn add(self, other: Macros) -> Macros {
        Macros::add(&self, other)
    }
}

impl std::ops::Mul<f64> for Macros {
    type Output = Macros;

    fn mul(self, multiplier: f64) -> Macros {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Macros {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Macros::zero(), |acc, m| acc + m)
    }
}
