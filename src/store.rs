//! Workout persistence
//!
//! `WorkoutStore` is the abstract contract between the core and whatever
//! persistence technology the surrounding system chooses. All range queries
//! use half-open `[start, end)` semantics matching calendar-day windows.
//!
//! `MemoryStore` is the in-process reference implementation, with JSON
//! snapshot helpers so state can survive across CLI invocations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::{NewWorkoutRecord, UserId, WorkoutRecord};

/// Abstract persistence contract consumed by the aggregation engine and
/// populated by the parser pipeline.
///
/// Atomicity of `create` and read-your-writes consistency are delegated to
/// the implementation; the core never retries a failed call.
pub trait WorkoutStore {
    /// Persist a record, assigning its identifier.
    fn create(&mut self, record: NewWorkoutRecord) -> Result<WorkoutRecord, CoreError>;

    /// All records for `user` with `start <= date < end`. Unordered.
    fn find_by_user_and_date_range(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, CoreError>;

    /// Number of records for `user` with `start <= date < end`.
    fn count_by_user_and_date_range(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, CoreError>;

    /// Calorie sums grouped by category within the window.
    fn sum_calories_by_category(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<HashMap<String, f64>, CoreError>;

    /// Calorie sums grouped by calendar day (UTC) within the window.
    fn sum_calories_by_day(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<HashMap<NaiveDate, f64>, CoreError>;
}

/// In-memory workout store keyed by owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    records: HashMap<UserId, Vec<WorkoutRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records across all users.
    pub fn len(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.values().all(Vec::is_empty)
    }

    /// Load a snapshot produced by [`MemoryStore::to_json`].
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the full store to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn in_range<'a>(
        &'a self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a WorkoutRecord> {
        self.records
            .get(user)
            .into_iter()
            .flatten()
            .filter(move |r| r.date >= start && r.date < end)
    }
}

impl WorkoutStore for MemoryStore {
    fn create(&mut self, record: NewWorkoutRecord) -> Result<WorkoutRecord, CoreError> {
        let record = record.into_record(Uuid::new_v4());
        self.records
            .entry(record.owner.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn find_by_user_and_date_range(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, CoreError> {
        Ok(self.in_range(user, start, end).cloned().collect())
    }

    fn count_by_user_and_date_range(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u64, CoreError> {
        Ok(self.in_range(user, start, end).count() as u64)
    }

    fn sum_calories_by_category(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<HashMap<String, f64>, CoreError> {
        let mut sums: HashMap<String, f64> = HashMap::new();
        for record in self.in_range(user, start, end) {
            *sums.entry(record.category.clone()).or_default() += record.calories_burned;
        }
        Ok(sums)
    }

    fn sum_calories_by_day(
        &self,
        user: &UserId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<HashMap<NaiveDate, f64>, CoreError> {
        let mut sums: HashMap<NaiveDate, f64> = HashMap::new();
        for record in self.in_range(user, start, end) {
            *sums.entry(record.date.date_naive()).or_default() += record.calories_burned;
        }
        Ok(sums)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn new_record(user: &str, category: &str, calories: f64, date: DateTime<Utc>) -> NewWorkoutRecord {
        NewWorkoutRecord {
            owner: UserId::new(user),
            category: category.to_string(),
            name: "Back Squat".to_string(),
            sets: 5,
            reps: 15,
            weight: 30.0,
            duration: 10.0,
            calories_burned: calories,
            date,
        }
    }

    #[test]
    fn test_create_assigns_id() {
        let mut store = MemoryStore::new();
        let a = store
            .create(new_record("u-1", "Legs", 100.0, at(2024, 1, 15, 8)))
            .unwrap();
        let b = store
            .create(new_record("u-1", "Legs", 100.0, at(2024, 1, 15, 9)))
            .unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_range_is_half_open() {
        let mut store = MemoryStore::new();
        let start = at(2024, 1, 15, 0);
        let end = at(2024, 1, 16, 0);

        store.create(new_record("u-1", "Legs", 1.0, start)).unwrap();
        store.create(new_record("u-1", "Legs", 2.0, at(2024, 1, 15, 23))).unwrap();
        store.create(new_record("u-1", "Legs", 4.0, end)).unwrap();

        let user = UserId::new("u-1");
        let found = store.find_by_user_and_date_range(&user, start, end).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(store.count_by_user_and_date_range(&user, start, end).unwrap(), 2);
    }

    #[test]
    fn test_queries_scoped_to_user() {
        let mut store = MemoryStore::new();
        let day = at(2024, 1, 15, 12);
        store.create(new_record("u-1", "Legs", 100.0, day)).unwrap();
        store.create(new_record("u-2", "Legs", 900.0, day)).unwrap();

        let sums = store
            .sum_calories_by_category(&UserId::new("u-1"), at(2024, 1, 15, 0), at(2024, 1, 16, 0))
            .unwrap();
        assert_eq!(sums["Legs"], 100.0);
    }

    #[test]
    fn test_sum_by_category() {
        let mut store = MemoryStore::new();
        let day = at(2024, 1, 15, 12);
        store.create(new_record("u-1", "Legs", 100.0, day)).unwrap();
        store.create(new_record("u-1", "Legs", 50.0, day)).unwrap();
        store.create(new_record("u-1", "Chest", 75.0, day)).unwrap();

        let sums = store
            .sum_calories_by_category(&UserId::new("u-1"), at(2024, 1, 15, 0), at(2024, 1, 16, 0))
            .unwrap();
        assert_eq!(sums.len(), 2);
        assert_eq!(sums["Legs"], 150.0);
        assert_eq!(sums["Chest"], 75.0);
    }

    #[test]
    fn test_sum_by_day() {
        let mut store = MemoryStore::new();
        store.create(new_record("u-1", "Legs", 100.0, at(2024, 1, 14, 12))).unwrap();
        store.create(new_record("u-1", "Legs", 50.0, at(2024, 1, 15, 8))).unwrap();
        store.create(new_record("u-1", "Chest", 25.0, at(2024, 1, 15, 20))).unwrap();

        let sums = store
            .sum_calories_by_day(&UserId::new("u-1"), at(2024, 1, 14, 0), at(2024, 1, 16, 0))
            .unwrap();
        assert_eq!(sums[&NaiveDate::from_ymd_opt(2024, 1, 14).unwrap()], 100.0);
        assert_eq!(sums[&NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()], 75.0);
    }

    #[test]
    fn test_empty_window_yields_empty_results() {
        let store = MemoryStore::new();
        let user = UserId::new("nobody");
        let (start, end) = (at(2024, 1, 15, 0), at(2024, 1, 16, 0));

        assert!(store.find_by_user_and_date_range(&user, start, end).unwrap().is_empty());
        assert_eq!(store.count_by_user_and_date_range(&user, start, end).unwrap(), 0);
        assert!(store.sum_calories_by_category(&user, start, end).unwrap().is_empty());
    }

    #[test]
    fn test_json_snapshot_roundtrip() {
        let mut store = MemoryStore::new();
        store.create(new_record("u-1", "Legs", 100.0, at(2024, 1, 15, 12))).unwrap();

        let json = store.to_json().unwrap();
        let loaded = MemoryStore::from_json(&json).unwrap();

        assert_eq!(loaded.len(), 1);
        let found = loaded
            .find_by_user_and_date_range(&UserId::new("u-1"), at(2024, 1, 15, 0), at(2024, 1, 16, 0))
            .unwrap();
        assert_eq!(found[0].calories_burned, 100.0);
    }
}
