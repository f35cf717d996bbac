//! Core domain types for the Fittrack system.
//!
//! This module defines the fundamental types used throughout the system:
//! - User records and their owned logs
//! - Fitness details (the per-user profile the metrics engine reads)
//! - Measurements, workouts, and transformation entries
//! - Partial-update types for merge-style saves

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Profile Enums
// ============================================================================

/// User gender, as entered on the profile form
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a form value; unrecognized input falls back to Other
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" | "m" => Gender::Male,
            "female" | "f" => Gender::Female,
            _ => Gender::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Day-to-day activity level, drives the calorie multiplier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    #[default]
    ModeratelyActive,
    VeryActive,
    ExtremelyActive,
}

impl ActivityLevel {
    /// Parse a form value; unrecognized input falls back to moderately active
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sedentary" => ActivityLevel::Sedentary,
            "lightly_active" => ActivityLevel::LightlyActive,
            "moderately_active" => ActivityLevel::ModeratelyActive,
            "very_active" => ActivityLevel::VeryActive,
            "extremely_active" => ActivityLevel::ExtremelyActive,
            _ => ActivityLevel::ModeratelyActive,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtremelyActive => "extremely_active",
        }
    }
}

/// Training experience bracket
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Experience::Intermediate,
            "advanced" => Experience::Advanced,
            _ => Experience::Beginner,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }
}

/// Preferred time of day for workouts
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutTime {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl WorkoutTime {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "afternoon" => WorkoutTime::Afternoon,
            "evening" => WorkoutTime::Evening,
            "night" => WorkoutTime::Night,
            _ => WorkoutTime::Morning,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutTime::Morning => "morning",
            WorkoutTime::Afternoon => "afternoon",
            WorkoutTime::Evening => "evening",
            WorkoutTime::Night => "night",
        }
    }
}

// ============================================================================
// Fitness Details
// ============================================================================

/// Per-user fitness profile read by the metrics engine.
///
/// Numeric fields use 0 as "not provided" (registration seeds zeros, the
/// forms only overwrite what the user filled in). The metrics engine
/// depends on that sentinel convention.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct FitnessDetails {
    /// Height in cm
    #[serde(default)]
    pub height: f64,
    /// Current weight in kg
    #[serde(default)]
    pub current_weight: f64,
    /// Target weight in kg
    #[serde(default)]
    pub target_weight: f64,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub fitness_goal: String,
    /// None until the user picks a level; the summary omits it entirely
    #[serde(default)]
    pub experience: Option<Experience>,
    #[serde(default)]
    pub preferred_workout_time: Option<WorkoutTime>,
    /// Workout days per week (0-7)
    #[serde(default)]
    pub workout_frequency: u32,
    #[serde(default)]
    pub dietary_preference: String,
    #[serde(default)]
    pub injuries: String,
    #[serde(default)]
    pub medical_conditions: String,
    /// Monthly gym/equipment budget
    #[serde(default)]
    pub max_budget: f64,
    /// Stamped on every profile save
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Partial fitness-details update applied with merge semantics
///
/// Every field is optional; `apply` overwrites only what is present.
/// This is the `write_profile(partial)` input type.
#[derive(Clone, Debug, Default)]
pub struct FitnessDetailsUpdate {
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub target_weight: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<String>,
    pub experience: Option<Experience>,
    pub preferred_workout_time: Option<WorkoutTime>,
    pub workout_frequency: Option<u32>,
    pub dietary_preference: Option<String>,
    pub injuries: Option<String>,
    pub medical_conditions: Option<String>,
    pub max_budget: Option<f64>,
}

impl FitnessDetailsUpdate {
    /// Merge the provided fields onto `details`. Does not stamp
    /// `last_updated`; the store does that on save.
    pub fn apply(&self, details: &mut FitnessDetails) {
        if let Some(v) = self.height {
            details.height = v;
        }
        if let Some(v) = self.current_weight {
            details.current_weight = v;
        }
        if let Some(v) = self.target_weight {
            details.target_weight = v;
        }
        if let Some(v) = self.age {
            details.age = v;
        }
        if let Some(v) = self.gender {
            details.gender = v;
        }
        if let Some(v) = self.activity_level {
            details.activity_level = v;
        }
        if let Some(ref v) = self.fitness_goal {
            details.fitness_goal = v.clone();
        }
        if let Some(v) = self.experience {
            details.experience = Some(v);
        }
        if let Some(v) = self.preferred_workout_time {
            details.preferred_workout_time = Some(v);
        }
        if let Some(v) = self.workout_frequency {
            details.workout_frequency = v;
        }
        if let Some(ref v) = self.dietary_preference {
            details.dietary_preference = v.clone();
        }
        if let Some(ref v) = self.injuries {
            details.injuries = v.clone();
        }
        if let Some(ref v) = self.medical_conditions {
            details.medical_conditions = v.clone();
        }
        if let Some(v) = self.max_budget {
            details.max_budget = v;
        }
    }

    /// True if no field is set (nothing to save)
    pub fn is_empty(&self) -> bool {
        self.height.is_none()
            && self.current_weight.is_none()
            && self.target_weight.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.activity_level.is_none()
            && self.fitness_goal.is_none()
            && self.experience.is_none()
            && self.preferred_workout_time.is_none()
            && self.workout_frequency.is_none()
            && self.dietary_preference.is_none()
            && self.injuries.is_none()
            && self.medical_conditions.is_none()
            && self.max_budget.is_none()
    }
}

// ============================================================================
// Log Entries
// ============================================================================

/// A body-measurement log entry
///
/// Body weight is tracked in lbs and girths in inches on the measurement
/// log (display units are configurable); the profile itself stays metric.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Uuid,
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub waist: Option<f64>,
    pub chest: Option<f64>,
    pub bicep: Option<f64>,
    pub thigh: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

/// A logged workout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: u32,
    #[serde(default)]
    pub exercises: String,
    #[serde(default)]
    pub notes: String,
}

/// A transformation-gallery entry (photo reference, not the photo itself)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transformation {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    pub date: NaiveDate,
}

// ============================================================================
// User Record
// ============================================================================

/// A registered user and everything they own.
///
/// The password is stored in plaintext by design: login is a local
/// convenience match, not a security boundary.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub bio: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub details: FitnessDetails,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
    #[serde(default)]
    pub workouts: Vec<Workout>,
    #[serde(default)]
    pub transformations: Vec<Transformation>,
}

impl UserRecord {
    /// Create a fresh record with empty logs and zeroed fitness details
    pub fn new(email: impl Into<String>, password: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password: password.into(),
            name: name.into(),
            bio: String::new(),
            created_at: Utc::now(),
            details: FitnessDetails::default(),
            measurements: Vec::new(),
            workouts: Vec::new(),
            transformations: Vec::new(),
        }
    }
}
