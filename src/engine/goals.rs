//! Daily calorie and protein goal calculators
//!
//! Calorie goals use the revised Harris-Benedict BMR formula scaled by
//! activity and fitness-goal multipliers. Protein goals are grams per
//! kilogram of body weight scaled by a goal factor. Missing numeric
//! inputs resolve to fixed defaults rather than errors.

use crate::models::{ActivityLevel, FitnessGoal, Gender};

/// Calorie goal when age, weight, or height is missing or the
/// computation is non-finite
pub const DEFAULT_CALORIE_GOAL: i64 = 2000;

/// Protein goal when weight is missing
pub const DEFAULT_PROTEIN_GOAL: i64 = 120;

/// Physiological inputs for the calorie goal calculation
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalInputs {
    pub age: Option<f64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub fitness_goal: FitnessGoal,
}

/// Revised Harris-Benedict basal metabolic rate.
/// Unspecified gender uses the mean of the male and female formulas.
pub fn bmr(gender: Gender, age: f64, weight_kg: f64, height_cm: f64) -> f64 {
    let male = 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age;
    let female = 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age;
    match gender {
        Gender::Male => male,
        Gender::Female => female,
        Gender::Unspecified => (male + female) / 2.0,
    }
}

/// BMR scaling factor per activity level
pub fn activity_multiplier(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Active => 1.725,
        ActivityLevel::VeryActive => 1.9,
    }
}

/// Caloric adjustment per fitness goal
pub fn goal_multiplier(goal: FitnessGoal) -> f64 {
    match goal {
        FitnessGoal::WeightLoss => 0.8,
        FitnessGoal::Maintenance => 1.0,
        FitnessGoal::MuscleGain => 1.1,
        FitnessGoal::ExtremeGain => 1.2,
    }
}

/// Protein grams per kg of body weight, per activity level
pub fn protein_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.6,
        ActivityLevel::Light => 1.8,
        ActivityLevel::Moderate => 2.0,
        ActivityLevel::Active => 2.2,
        ActivityLevel::VeryActive => 2.4,
    }
}

/// Protein adjustment per fitness goal
pub fn protein_goal_factor(goal: FitnessGoal) -> f64 {
    match goal {
        FitnessGoal::WeightLoss => 1.2,
        FitnessGoal::Maintenance => 1.0,
        FitnessGoal::MuscleGain => 1.2,
        FitnessGoal::ExtremeGain => 1.1,
    }
}

/// Compute the daily calorie goal in kcal.
///
/// Returns [`DEFAULT_CALORIE_GOAL`] when age, weight, or height is
/// missing, or when the computation does not produce a finite number.
pub fn daily_calorie_goal(inputs: &GoalInputs) -> i64 {
    let (age, weight, height) = match (inputs.age, inputs.weight_kg, inputs.height_cm) {
        (Some(a), Some(w), Some(h)) => (a, w, h),
        _ => return DEFAULT_CALORIE_GOAL,
    };

    let result = bmr(inputs.gender, age, weight, height)
        * activity_multiplier(inputs.activity_level)
        * goal_multiplier(inputs.fitness_goal);

    if !result.is_finite() {
        return DEFAULT_CALORIE_GOAL;
    }

    result.round() as i64
}

/// Compute the daily protein goal in grams.
///
/// Returns [`DEFAULT_PROTEIN_GOAL`] when weight is missing or not finite.
pub fn daily_protein_goal(
    weight_kg: Option<f64>,
    activity_level: ActivityLevel,
    fitness_goal: FitnessGoal,
) -> i64 {
    let weight = match weight_kg {
        Some(w) if w.is_finite() => w,
        _ => return DEFAULT_PROTEIN_GOAL,
    };

    (weight * protein_factor(activity_level) * protein_goal_factor(fitness_goal)).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(age: f64, weight: f64, height: f64, gender: Gender) -> GoalInputs {
        GoalInputs {
            age: Some(age),
            weight_kg: Some(weight),
            height_cm: Some(height),
            gender,
            activity_level: ActivityLevel::Moderate,
            fitness_goal: FitnessGoal::Maintenance,
        }
    }

    #[test]
    fn test_reference_male_profile() {
        // BMR = 88.362 + 13.397*80 + 4.799*180 - 5.677*30 = 1853.632
        // 1853.632 * 1.55 * 1.0 = 2873.13 -> 2873
        let goal = daily_calorie_goal(&inputs(30.0, 80.0, 180.0, Gender::Male));
        assert_eq!(goal, 2873);
    }

    #[test]
    fn test_female_formula() {
        // BMR = 447.593 + 9.247*60 + 3.098*165 - 4.330*25 = 1405.08
        let b = bmr(Gender::Female, 25.0, 60.0, 165.0);
        assert!((b - 1405.083).abs() < 0.001);
    }

    #[test]
    fn test_unspecified_gender_is_mean_of_formulas() {
        let male = bmr(Gender::Male, 30.0, 80.0, 180.0);
        let female = bmr(Gender::Female, 30.0, 80.0, 180.0);
        let other = bmr(Gender::Unspecified, 30.0, 80.0, 180.0);
        assert!((other - (male + female) / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_strictly_increasing_in_weight() {
        let mut previous = 0;
        for weight in [50.0, 60.0, 70.0, 80.0, 90.0, 100.0] {
            let goal = daily_calorie_goal(&inputs(30.0, weight, 180.0, Gender::Female));
            assert!(goal > previous);
            previous = goal;
        }
    }

    #[test]
    fn test_result_is_positive_for_valid_profiles() {
        for gender in [Gender::Male, Gender::Female, Gender::Unspecified] {
            for age in [18.0, 40.0, 75.0] {
                let goal = daily_calorie_goal(&GoalInputs {
                    age: Some(age),
                    weight_kg: Some(45.0),
                    height_cm: Some(150.0),
                    gender,
                    activity_level: ActivityLevel::Sedentary,
                    fitness_goal: FitnessGoal::WeightLoss,
                });
                assert!(goal > 0);
            }
        }
    }

    #[test]
    fn test_missing_inputs_fall_back_to_default() {
        assert_eq!(daily_calorie_goal(&GoalInputs::default()), DEFAULT_CALORIE_GOAL);

        let mut partial = inputs(30.0, 80.0, 180.0, Gender::Male);
        partial.height_cm = None;
        assert_eq!(daily_calorie_goal(&partial), DEFAULT_CALORIE_GOAL);
    }

    #[test]
    fn test_non_finite_input_falls_back_to_default() {
        let nan = inputs(30.0, f64::NAN, 180.0, Gender::Male);
        assert_eq!(daily_calorie_goal(&nan), DEFAULT_CALORIE_GOAL);
    }

    #[test]
    fn test_protein_goal_reference_value() {
        let goal = daily_protein_goal(
            Some(70.0),
            ActivityLevel::Moderate,
            FitnessGoal::Maintenance,
        );
        assert_eq!(goal, 140); // 70 * 2.0 * 1.0
    }

    #[test]
    fn test_protein_goal_missing_weight() {
        let goal = daily_protein_goal(None, ActivityLevel::Active, FitnessGoal::MuscleGain);
        assert_eq!(goal, DEFAULT_PROTEIN_GOAL);
    }

    #[test]
    fn test_unknown_activity_decodes_to_moderate_deterministically() {
        // "foo" decodes to Moderate, so the 1.55 multiplier applies on
        // every call.
        let level = ActivityLevel::from_str("foo");
        let first = daily_calorie_goal(&GoalInputs {
            activity_level: level,
            ..inputs(30.0, 80.0, 180.0, Gender::Male)
        });
        let second = daily_calorie_goal(&GoalInputs {
            activity_level: ActivityLevel::from_str("foo"),
            ..inputs(30.0, 80.0, 180.0, Gender::Male)
        });
        assert_eq!(first, 2873);
        assert_eq!(first, second);
    }

    #[test]
    fn test_goal_multipliers() {
        let base = inputs(30.0, 80.0, 180.0, Gender::Male);
        let loss = daily_calorie_goal(&GoalInputs {
            fitness_goal: FitnessGoal::WeightLoss,
            ..base
        });
        let gain = daily_calorie_goal(&GoalInputs {
            fitness_goal: FitnessGoal::ExtremeGain,
            ..base
        });
        assert_eq!(loss, (1853.632_f64 * 1.55 * 0.8).round() as i64);
        assert_eq!(gain, (1853.632_f64 * 1.55 * 1.2).round() as i64);
    }
}
