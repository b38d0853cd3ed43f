//! Core types for the fittrack pipeline
//!
//! This module defines the data structures that flow through each stage:
//! parsed drafts, annotated records ready for persistence, persisted workout
//! records, and the derived summary shapes served to the dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque user identifier supplied by the identity collaborator.
///
/// The core trusts it without re-validating; it is only used as a grouping
/// key for storage and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A parsed workout entry before calorie annotation and persistence.
///
/// Produced by the parser; `calories_burned` and `date` are not yet set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    /// Category from the `#` header line, non-empty.
    pub category: String,
    /// Exercise name, non-empty.
    pub name: String,
    /// Number of sets, positive.
    pub sets: u32,
    /// Repetitions per set, positive.
    pub reps: u32,
    /// Weight in kilograms, non-negative.
    pub weight: f64,
    /// Duration in minutes, positive.
    pub duration: f64,
}

/// An annotated workout awaiting persistence. The store assigns the
/// identifier on `create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutRecord {
    pub owner: UserId,
    pub category: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Duration in minutes.
    pub duration: f64,
    /// Derived by the calorie estimator, never supplied by the caller.
    pub calories_burned: f64,
    /// Defaults to creation time.
    pub date: DateTime<Utc>,
}

impl NewWorkoutRecord {
    /// Attach a store-assigned identifier, producing the persisted form.
    pub fn into_record(self, id: Uuid) -> WorkoutRecord {
        WorkoutRecord {
            id,
            owner: self.owner,
            category: self.category,
            name: self.name,
            sets: self.sets,
            reps: self.reps,
            weight: self.weight,
            duration: self.duration,
            calories_burned: self.calories_burned,
            date: self.date,
        }
    }
}

/// A persisted workout record. Immutable once created; the core defines no
/// update or delete operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub owner: UserId,
    pub category: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Weight in kilograms.
    pub weight: f64,
    /// Duration in minutes.
    pub duration: f64,
    /// Derived energy expenditure, non-negative.
    pub calories_burned: f64,
    pub date: DateTime<Utc>,
}

/// Calories attributed to one workout category within a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCalories {
    pub category: String,
    pub total_calories: f64,
}

/// Summary of a single calendar day, derived on read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub total_calories_burnt: f64,
    pub total_workouts: u64,
    /// `total_calories_burnt / total_workouts`, or 0 when there are no
    /// workouts. Explicit policy, not a fallback hiding an error.
    pub avg_calories_burnt_per_workout: f64,
    /// Grouped sums sorted by category label, so slice indices are stable
    /// across identical reads.
    pub category_breakdown: Vec<CategoryCalories>,
}

/// One day of the weekly series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    /// Ordinal day-of-month label ("15th", "21st").
    pub day_label: String,
    pub total_calories: f64,
}

/// Rolling 7-day calorie series, oldest first, last entry being the
/// reference date's own day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySeries {
    pub days: Vec<DayTotal>,
}

/// Weekly series in the parallel-array wire shape the dashboard chart
/// consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyCalories {
    pub weeks: Vec<String>,
    pub calories_burned: Vec<f64>,
}

impl From<WeeklySeries> for WeeklyCalories {
    fn from(series: WeeklySeries) -> Self {
        let mut weeks = Vec::with_capacity(series.days.len());
        let mut calories_burned = Vec::with_capacity(series.days.len());
        for day in series.days {
            weeks.push(day.day_label);
            calories_burned.push(day.total_calories);
        }
        Self {
            weeks,
            calories_burned,
        }
    }
}

/// One pie chart slice: stable index, calorie value, category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartSlice {
    pub id: usize,
    pub value: f64,
    pub label: String,
}

/// Response shape served to the dashboard caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_calories_burnt: f64,
    pub total_workouts: u64,
    pub avg_calories_burnt_per_workout: f64,
    pub total_weeks_calories_burnt: WeeklyCalories,
    pub pie_chart_data: Vec<PieChartSlice>,
}

/// A single day's workouts together with their calorie sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayWorkouts {
    pub todays_workouts: Vec<WorkoutRecord>,
    pub total_calories_burnt: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::new("u-42");
        assert_eq!(id.as_str(), "u-42");
        assert_eq!(id.to_string(), "u-42");

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"u-42\"");
    }

    #[test]
    fn test_record_wire_shape_is_camel_case() {
        let record = NewWorkoutRecord {
            owner: UserId::new("u-1"),
            category: "Legs".to_string(),
            name: "Back Squat".to_string(),
            sets: 5,
            reps: 15,
            weight: 30.0,
            duration: 10.0,
            calories_burned: 1500.0,
            date: Utc::now(),
        }
        .into_record(Uuid::new_v4());

        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert!(value.get("caloriesBurned").is_some());
        assert!(value.get("calories_burned").is_none());
    }

    #[test]
    fn test_weekly_series_to_parallel_arrays() {
        let series = WeeklySeries {
            days: vec![
                DayTotal {
                    day_label: "14th".to_string(),
                    total_calories: 0.0,
                },
                DayTotal {
                    day_label: "15th".to_string(),
                    total_calories: 1500.0,
                },
            ],
        };

        let wire = WeeklyCalories::from(series);
        assert_eq!(wire.weeks, vec!["14th", "15th"]);
        assert_eq!(wire.calories_burned, vec![0.0, 1500.0]);
    }
}
