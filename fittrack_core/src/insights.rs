//! Derived statistics over a single user's logs.
//!
//! First-vs-latest measurement deltas and workout totals, matching what
//! the dashboard renders. Pure aggregation, no I/O.

use crate::{Measurement, Workout};

/// First-vs-latest measurement deltas
///
/// Positive deltas mean the value went up; which direction counts as
/// progress depends on the field (waist down, bicep up) and is left to
/// the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressInsights {
    pub weight_change: f64,
    pub waist_change: f64,
    pub chest_change: f64,
    pub bicep_change: f64,
    pub thigh_change: f64,
    pub days_tracking: i64,
    pub measurement_count: usize,
}

/// Compare the first and latest measurements.
///
/// Returns None with fewer than two entries; there is nothing to compare
/// yet. Missing fields read as 0, the same as an unfilled form input.
pub fn progress_insights(measurements: &[Measurement]) -> Option<ProgressInsights> {
    if measurements.len() < 2 {
        return None;
    }

    let first = &measurements[0];
    let latest = &measurements[measurements.len() - 1];

    let delta = |a: Option<f64>, b: Option<f64>| b.unwrap_or(0.0) - a.unwrap_or(0.0);

    Some(ProgressInsights {
        weight_change: delta(first.weight, latest.weight),
        waist_change: delta(first.waist, latest.waist),
        chest_change: delta(first.chest, latest.chest),
        bicep_change: delta(first.bicep, latest.bicep),
        thigh_change: delta(first.thigh, latest.thigh),
        days_tracking: (latest.date - first.date).num_days(),
        measurement_count: measurements.len(),
    })
}

/// Workout log totals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct WorkoutStats {
    pub total: usize,
    pub total_minutes: u64,
    pub avg_duration_minutes: u64,
}

/// Count, total minutes, and rounded average duration. All zeros for an
/// empty log.
pub fn workout_stats(workouts: &[Workout]) -> WorkoutStats {
    let total = workouts.len();
    let total_minutes: u64 = workouts.iter().map(|w| u64::from(w.duration_minutes)).sum();
    let avg_duration_minutes = if total > 0 {
        ((total_minutes as f64) / (total as f64)).round() as u64
    } else {
        0
    };

    WorkoutStats {
        total,
        total_minutes,
        avg_duration_minutes,
    }
}
