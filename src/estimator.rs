//! Calorie estimation
//!
//! Pure energy-expenditure model. Input validation (positive duration,
//! non-negative weight) happens in the parser, not here.

use chrono::{DateTime, Utc};

use crate::types::{NewWorkoutRecord, UserId, WorkoutDraft};

/// Energy units burned per minute per kilogram. Fixed domain constant.
pub const CALORIE_RATE: f64 = 5.0;

/// Calories burned for a workout of `duration_minutes` at `weight_kg`.
pub fn calories_burned(duration_minutes: f64, weight_kg: f64) -> f64 {
    duration_minutes * weight_kg * CALORIE_RATE
}

/// Annotate a parsed draft with its derived calorie value, producing a
/// record ready for persistence.
pub fn annotate(draft: WorkoutDraft, owner: UserId, date: DateTime<Utc>) -> NewWorkoutRecord {
    let calories_burned = calories_burned(draft.duration, draft.weight);
    NewWorkoutRecord {
        owner,
        category: draft.category,
        name: draft.name,
        sets: draft.sets,
        reps: draft.reps,
        weight: draft.weight,
        duration: draft.duration,
        calories_burned,
        date,
    }
}
