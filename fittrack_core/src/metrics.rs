//! Metrics engine: body metrics, calorie/macro recommendations, and
//! profile validation.
//!
//! Every function here is a pure numeric/string transform with no I/O.
//! Missing numeric input is signalled by zero, not by an error: the guards
//! return a 0 sentinel (or skip a validation rule) and the caller decides
//! how to present it. Validation findings are values, never errors.

use crate::types::{ActivityLevel, Experience, FitnessDetails, Gender, WorkoutTime};

/// Body Mass Index from weight in kg and height in cm, rounded to two
/// decimal places. Returns 0 when either input is zero (not computable).
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if weight_kg == 0.0 || height_cm == 0.0 {
        return 0.0;
    }
    // Height stays in cm; the 10000 factor converts cm^2 to m^2.
    let raw = weight_kg / (height_cm * height_cm) * 10000.0;
    (raw * 100.0).round() / 100.0
}

/// Standard WHO bucketing. No lower bound: a zero/negative BMI lands in
/// Underweight, so callers must guard the zero sentinel themselves.
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Kilograms left to lose, clamped at zero. Zero inputs mean "absent".
pub fn weight_to_lose(current: f64, target: f64) -> f64 {
    if current == 0.0 || target == 0.0 {
        return 0.0;
    }
    (current - target).max(0.0)
}

/// Percentage of the way from the starting weight to the target.
///
/// Capped at 100 but not floored: regaining past the start weight yields
/// a negative percentage. A start weight already at the target counts as
/// 100% done.
pub fn weight_progress(current: f64, target: f64, start_weight: f64) -> f64 {
    if current == 0.0 || target == 0.0 || start_weight == 0.0 {
        return 0.0;
    }
    let total_to_lose = start_weight - target;
    let already_lost = start_weight - current;
    if total_to_lose == 0.0 {
        return 100.0;
    }
    (already_lost / total_to_lose * 100.0).round().min(100.0)
}

/// Daily calorie recommendation in kcal.
///
/// Harris-Benedict BMR scaled by the activity multiplier. Returns 0 when
/// weight, height, or age is missing.
pub fn calorie_recommendation(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    activity_level: ActivityLevel,
) -> i64 {
    if weight_kg == 0.0 || height_cm == 0.0 || age == 0 {
        return 0;
    }

    let age = f64::from(age);
    let bmr = match gender {
        Gender::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        _ => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.33 * age,
    };

    let multiplier = match activity_level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::ModeratelyActive => 1.55,
        ActivityLevel::VeryActive => 1.725,
        ActivityLevel::ExtremelyActive => 1.9,
    };

    (bmr * multiplier).round() as i64
}

/// Daily macro-nutrient allocation in grams
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MacroSplit {
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
}

/// Split a calorie budget into protein/carb/fat grams based on the
/// stated goal.
///
/// The goal is matched case-insensitively: "muscle"/"build" wins over
/// "weight"/"lose", anything else gets the maintenance split. Protein
/// and carbs count 4 kcal/g, fat 9 kcal/g.
pub fn macro_recommendation(calories: i64, goal: &str) -> MacroSplit {
    let goal = goal.to_lowercase();

    let (protein_pct, carbs_pct, fats_pct) = if goal.contains("muscle") || goal.contains("build") {
        (35.0, 40.0, 25.0)
    } else if goal.contains("weight") || goal.contains("lose") {
        (35.0, 35.0, 30.0)
    } else {
        (30.0, 40.0, 30.0)
    };

    let calories = calories as f64;
    MacroSplit {
        protein: (calories * protein_pct / 100.0 / 4.0).round() as i64,
        carbs: (calories * carbs_pct / 100.0 / 4.0).round() as i64,
        fats: (calories * fats_pct / 100.0 / 9.0).round() as i64,
    }
}

/// Outcome of a profile validation pass
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Check the advisory ranges on a fitness profile.
///
/// A zero field counts as "not provided" and skips its own rule, which
/// means an explicit `workout_frequency` of 0 is never range-checked.
/// That truthiness quirk is kept deliberately for parity with existing
/// stored data. The result never blocks a save.
pub fn validate_fitness_details(details: &FitnessDetails) -> Validation {
    let mut errors = Vec::new();

    if details.height != 0.0 && !(50.0..=300.0).contains(&details.height) {
        errors.push("Height must be between 50 and 300 cm".to_string());
    }

    if details.current_weight != 0.0 && !(10.0..=500.0).contains(&details.current_weight) {
        errors.push("Current weight must be between 10 and 500 kg".to_string());
    }

    if details.target_weight != 0.0 && !(10.0..=500.0).contains(&details.target_weight) {
        errors.push("Target weight must be between 10 and 500 kg".to_string());
    }

    if details.age != 0 && !(8..=120).contains(&details.age) {
        errors.push("Age must be between 8 and 120".to_string());
    }

    if details.workout_frequency != 0 && details.workout_frequency > 7 {
        errors.push("Workout frequency must be between 0 and 7 days per week".to_string());
    }

    if details.max_budget < 0.0 {
        errors.push("Budget cannot be negative".to_string());
    }

    if details.current_weight != 0.0
        && details.target_weight != 0.0
        && details.current_weight <= details.target_weight
    {
        errors.push(
            "Current weight should be greater than target weight for weight loss goals"
                .to_string(),
        );
    }

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

pub fn experience_description(level: Option<Experience>) -> &'static str {
    match level {
        Some(Experience::Beginner) => "New to fitness, just starting your journey",
        Some(Experience::Intermediate) => "Have some experience with exercise routines",
        Some(Experience::Advanced) => "Experienced with structured training programs",
        None => "Not specified",
    }
}

pub fn workout_time_description(time: Option<WorkoutTime>) -> &'static str {
    match time {
        Some(WorkoutTime::Morning) => "Early morning sessions (5-9 AM)",
        Some(WorkoutTime::Afternoon) => "Afternoon sessions (12-4 PM)",
        Some(WorkoutTime::Evening) => "Evening sessions (4-7 PM)",
        Some(WorkoutTime::Night) => "Late night sessions (7+ PM)",
        None => "Not specified",
    }
}

pub fn activity_description(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Sedentary => "Little or no exercise",
        ActivityLevel::LightlyActive => "Light exercise 1-3 days per week",
        ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days per week",
        ActivityLevel::VeryActive => "Very active 6-7 days per week",
        ActivityLevel::ExtremelyActive => "Extremely active or twice per day exercise",
    }
}

/// Human-readable profile summary lines, in a fixed order.
///
/// Each line appears only when its inputs are present; an empty profile
/// yields an empty list, never an error.
pub fn fitness_summary(details: &FitnessDetails) -> Vec<String> {
    let mut summary = Vec::new();

    if !details.fitness_goal.is_empty() {
        summary.push(format!("Goal: {}", details.fitness_goal));
    }

    if details.age != 0 && details.current_weight != 0.0 && details.height != 0.0 {
        let bmi = bmi(details.current_weight, details.height);
        if bmi > 0.0 {
            summary.push(format!("BMI: {} ({})", bmi, bmi_category(bmi)));
        }
    }

    if details.experience.is_some() {
        summary.push(format!("Level: {}", experience_description(details.experience)));
    }

    if details.preferred_workout_time.is_some() {
        summary.push(format!(
            "Prefers: {}",
            workout_time_description(details.preferred_workout_time)
        ));
    }

    if details.workout_frequency != 0 {
        summary.push(format!("{} workouts per week", details.workout_frequency));
    }

    if !details.injuries.is_empty() {
        summary.push(format!("Restrictions: {}", details.injuries));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_known_value() {
        assert_eq!(bmi(70.0, 175.0), 22.86);
    }

    #[test]
    fn test_bmi_zero_inputs_return_sentinel() {
        assert_eq!(bmi(0.0, 175.0), 0.0);
        assert_eq!(bmi(70.0, 0.0), 0.0);
        assert_eq!(bmi(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        // 80 / 1.8^2 = 24.6913... -> 24.69
        assert_eq!(bmi(80.0, 180.0), 24.69);
        // 100 / 1.6^2 = 39.0625 -> 39.06
        assert_eq!(bmi(100.0, 160.0), 39.06);
    }

    #[test]
    fn test_bmi_category_boundaries() {
        assert_eq!(bmi_category(18.4), "Underweight");
        assert_eq!(bmi_category(18.5), "Normal weight");
        assert_eq!(bmi_category(24.99), "Normal weight");
        assert_eq!(bmi_category(25.0), "Overweight");
        assert_eq!(bmi_category(29.9), "Overweight");
        assert_eq!(bmi_category(30.0), "Obese");
    }

    #[test]
    fn test_bmi_category_no_lower_bound() {
        assert_eq!(bmi_category(0.0), "Underweight");
        assert_eq!(bmi_category(-5.0), "Underweight");
    }

    #[test]
    fn test_weight_to_lose() {
        assert_eq!(weight_to_lose(90.0, 80.0), 10.0);
        // Never negative
        assert_eq!(weight_to_lose(80.0, 90.0), 0.0);
        // Zero means absent
        assert_eq!(weight_to_lose(0.0, 80.0), 0.0);
        assert_eq!(weight_to_lose(90.0, 0.0), 0.0);
    }

    #[test]
    fn test_weight_progress_halfway() {
        assert_eq!(weight_progress(85.0, 80.0, 90.0), 50.0);
    }

    #[test]
    fn test_weight_progress_degenerate_start_at_target() {
        assert_eq!(weight_progress(80.0, 80.0, 80.0), 100.0);
    }

    #[test]
    fn test_weight_progress_caps_at_100() {
        // Lost more than needed
        assert_eq!(weight_progress(75.0, 80.0, 90.0), 100.0);
    }

    #[test]
    fn test_weight_progress_can_go_negative() {
        // Gained weight past the start: no lower clamp
        assert_eq!(weight_progress(95.0, 80.0, 90.0), -50.0);
    }

    #[test]
    fn test_weight_progress_zero_inputs() {
        assert_eq!(weight_progress(0.0, 80.0, 90.0), 0.0);
        assert_eq!(weight_progress(85.0, 0.0, 90.0), 0.0);
        assert_eq!(weight_progress(85.0, 80.0, 0.0), 0.0);
    }

    #[test]
    fn test_calorie_recommendation_male_sedentary() {
        // BMR = 88.362 + 13.397*70 + 4.799*175 - 5.677*30 = 1695.667
        // 1695.667 * 1.2 = 2034.8004 -> 2035
        let kcal = calorie_recommendation(70.0, 175.0, 30, Gender::Male, ActivityLevel::Sedentary);
        assert_eq!(kcal, 2035);
    }

    #[test]
    fn test_calorie_recommendation_female_formula() {
        // BMR = 447.593 + 9.247*60 + 3.098*165 - 4.33*25 = 1405.333
        // 1405.333 * 1.55 = 2178.266 -> 2178
        let kcal = calorie_recommendation(
            60.0,
            165.0,
            25,
            Gender::Female,
            ActivityLevel::ModeratelyActive,
        );
        assert_eq!(kcal, 2178);
    }

    #[test]
    fn test_calorie_recommendation_other_uses_female_formula() {
        let female = calorie_recommendation(60.0, 165.0, 25, Gender::Female, ActivityLevel::Sedentary);
        let other = calorie_recommendation(60.0, 165.0, 25, Gender::Other, ActivityLevel::Sedentary);
        assert_eq!(female, other);
    }

    #[test]
    fn test_calorie_recommendation_missing_inputs() {
        assert_eq!(
            calorie_recommendation(0.0, 175.0, 30, Gender::Male, ActivityLevel::Sedentary),
            0
        );
        assert_eq!(
            calorie_recommendation(70.0, 0.0, 30, Gender::Male, ActivityLevel::Sedentary),
            0
        );
        assert_eq!(
            calorie_recommendation(70.0, 175.0, 0, Gender::Male, ActivityLevel::Sedentary),
            0
        );
    }

    #[test]
    fn test_macro_recommendation_build_muscle() {
        let split = macro_recommendation(2000, "build muscle");
        assert_eq!(
            split,
            MacroSplit {
                protein: 175,
                carbs: 200,
                fats: 56
            }
        );
    }

    #[test]
    fn test_macro_recommendation_lose_weight() {
        let split = macro_recommendation(2000, "Lose Weight");
        assert_eq!(
            split,
            MacroSplit {
                protein: 175,
                carbs: 175,
                fats: 67
            }
        );
    }

    #[test]
    fn test_macro_recommendation_default_split() {
        let split = macro_recommendation(2000, "stay healthy");
        assert_eq!(
            split,
            MacroSplit {
                protein: 150,
                carbs: 200,
                fats: 67
            }
        );
    }

    #[test]
    fn test_macro_recommendation_muscle_beats_lose() {
        // First matching branch wins: "build" checked before "lose"
        let split = macro_recommendation(2000, "lose fat and build muscle");
        assert_eq!(split.fats, 56);
    }

    #[test]
    fn test_validate_empty_details_is_valid() {
        let result = validate_fitness_details(&FitnessDetails::default());
        assert!(result.valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_validate_height_out_of_range() {
        let details = FitnessDetails {
            height: 10.0,
            ..Default::default()
        };
        let result = validate_fitness_details(&details);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Height"));
    }

    #[test]
    fn test_validate_zero_skips_rule() {
        // workout_frequency of 0 is "not provided" and never checked
        let details = FitnessDetails {
            workout_frequency: 0,
            ..Default::default()
        };
        assert!(validate_fitness_details(&details).valid);

        let details = FitnessDetails {
            workout_frequency: 9,
            ..Default::default()
        };
        let result = validate_fitness_details(&details);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("Workout frequency"));
    }

    #[test]
    fn test_validate_cross_field_weight_check() {
        let details = FitnessDetails {
            current_weight: 70.0,
            target_weight: 80.0,
            ..Default::default()
        };
        let result = validate_fitness_details(&details);
        assert!(!result.valid);
        assert!(result.errors[0].contains("greater than target weight"));

        // Equal weights also trip the loss-goal check
        let details = FitnessDetails {
            current_weight: 80.0,
            target_weight: 80.0,
            ..Default::default()
        };
        assert!(!validate_fitness_details(&details).valid);
    }

    #[test]
    fn test_validate_errors_in_fixed_order() {
        let details = FitnessDetails {
            height: 10.0,
            current_weight: 5.0,
            age: 200,
            max_budget: -1.0,
            ..Default::default()
        };
        let result = validate_fitness_details(&details);
        assert_eq!(result.errors.len(), 4);
        assert!(result.errors[0].contains("Height"));
        assert!(result.errors[1].contains("Current weight"));
        assert!(result.errors[2].contains("Age"));
        assert!(result.errors[3].contains("Budget"));
    }

    #[test]
    fn test_validate_negative_budget() {
        let details = FitnessDetails {
            max_budget: -50.0,
            ..Default::default()
        };
        let result = validate_fitness_details(&details);
        assert_eq!(result.errors, vec!["Budget cannot be negative".to_string()]);
    }

    #[test]
    fn test_summary_empty_details() {
        assert!(fitness_summary(&FitnessDetails::default()).is_empty());
    }

    #[test]
    fn test_summary_full_profile_ordering() {
        let details = FitnessDetails {
            height: 175.0,
            current_weight: 70.0,
            age: 30,
            fitness_goal: "lose weight".into(),
            experience: Some(Experience::Intermediate),
            preferred_workout_time: Some(WorkoutTime::Evening),
            workout_frequency: 4,
            injuries: "knee".into(),
            ..Default::default()
        };

        let summary = fitness_summary(&details);
        assert_eq!(
            summary,
            vec![
                "Goal: lose weight".to_string(),
                "BMI: 22.86 (Normal weight)".to_string(),
                "Level: Have some experience with exercise routines".to_string(),
                "Prefers: Evening sessions (4-7 PM)".to_string(),
                "4 workouts per week".to_string(),
                "Restrictions: knee".to_string(),
            ]
        );
    }

    #[test]
    fn test_summary_skips_bmi_without_age() {
        // BMI line requires age, weight, and height all present
        let details = FitnessDetails {
            height: 175.0,
            current_weight: 70.0,
            age: 0,
            ..Default::default()
        };
        assert!(fitness_summary(&details).is_empty());
    }

    #[test]
    fn test_descriptions_not_specified_fallback() {
        assert_eq!(experience_description(None), "Not specified");
        assert_eq!(workout_time_description(None), "Not specified");
        assert_eq!(
            activity_description(ActivityLevel::Sedentary),
            "Little or no exercise"
        );
    }

    #[test]
    fn test_pure_functions_are_idempotent() {
        // Same inputs, same outputs, every time
        for _ in 0..3 {
            assert_eq!(bmi(82.5, 177.0), bmi(82.5, 177.0));
            assert_eq!(
                macro_recommendation(2400, "build"),
                macro_recommendation(2400, "build")
            );
            assert_eq!(
                weight_progress(85.0, 80.0, 90.0),
                weight_progress(85.0, 80.0, 90.0)
            );
        }
    }
}
