//! Pipeline orchestration
//!
//! Wires the stages together: raw text -> parser -> calorie estimator ->
//! store, and store -> aggregation engine -> summary shapes.

use chrono::{DateTime, Utc};

use crate::aggregate;
use crate::error::CoreError;
use crate::estimator;
use crate::parser::WorkoutParser;
use crate::store::{MemoryStore, WorkoutStore};
use crate::types::{
    DailySummary, DashboardSummary, TodayWorkouts, UserId, WeeklySeries, WorkoutRecord,
};

/// Parse a workout text blob and persist the resulting records for `owner`,
/// dated `now`.
///
/// Fail-fast: the whole batch is parsed and annotated before the first store
/// write, so a malformed entry anywhere in the blob means nothing is
/// persisted.
pub fn log_workouts(
    store: &mut dyn WorkoutStore,
    owner: &UserId,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Vec<WorkoutRecord>, CoreError> {
    log_parsed(store, &WorkoutParser::new(), owner, text, now)
}

fn log_parsed(
    store: &mut dyn WorkoutStore,
    parser: &WorkoutParser,
    owner: &UserId,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Vec<WorkoutRecord>, CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::MalformedInput(
            "workout text is missing".to_string(),
        ));
    }

    let drafts = parser.parse(text)?;

    let mut saved = Vec::with_capacity(drafts.len());
    for draft in drafts {
        let record = estimator::annotate(draft, owner.clone(), now);
        saved.push(store.create(record)?);
    }
    Ok(saved)
}

/// Stateful façade owning a store, for callers that drive the whole
/// parse-log-aggregate cycle through one handle.
pub struct WorkoutTracker<S> {
    store: S,
    parser: WorkoutParser,
}

impl<S: WorkoutStore> WorkoutTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            parser: WorkoutParser::new(),
        }
    }

    /// Parse and persist a workout blob, dated now.
    pub fn log_workouts(
        &mut self,
        owner: &UserId,
        text: &str,
    ) -> Result<Vec<WorkoutRecord>, CoreError> {
        self.log_workouts_at(owner, text, Utc::now())
    }

    /// Parse and persist a workout blob with an explicit record date.
    pub fn log_workouts_at(
        &mut self,
        owner: &UserId,
        text: &str,
        date: DateTime<Utc>,
    ) -> Result<Vec<WorkoutRecord>, CoreError> {
        log_parsed(&mut self.store, &self.parser, owner, text, date)
    }

    pub fn daily_summary(
        &self,
        owner: &UserId,
        reference: DateTime<Utc>,
    ) -> Result<DailySummary, CoreError> {
        aggregate::compute_daily_summary(&self.store, owner, reference)
    }

    pub fn weekly_series(
        &self,
        owner: &UserId,
        reference: DateTime<Utc>,
    ) -> Result<WeeklySeries, CoreError> {
        aggregate::compute_weekly_series(&self.store, owner, reference)
    }

    pub fn dashboard(
        &self,
        owner: &UserId,
        reference: DateTime<Utc>,
    ) -> Result<DashboardSummary, CoreError> {
        aggregate::compute_dashboard(&self.store, owner, reference)
    }

    pub fn workouts_for_date(
        &self,
        owner: &UserId,
        date: Option<DateTime<Utc>>,
    ) -> Result<TodayWorkouts, CoreError> {
        aggregate::find_workouts_for_date(&self.store, owner, date)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl WorkoutTracker<MemoryStore> {
    /// Tracker backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Serialize the store for persistence across invocations.
    pub fn save_state(&self) -> Result<String, CoreError> {
        self.store
            .to_json()
            .map_err(|e| CoreError::StoreFailure(e.to_string()))
    }

    /// Restore a tracker from a snapshot produced by [`save_state`].
    ///
    /// [`save_state`]: WorkoutTracker::save_state
    pub fn load_state(json: &str) -> Result<Self, CoreError> {
        let store =
            MemoryStore::from_json(json).map_err(|e| CoreError::StoreFailure(e.to_string()))?;
        Ok(Self::new(store))
    }
}
