//! fittrack-core - Workout text parsing and calorie aggregation engine
//!
//! The core of a personal fitness tracker: a shorthand workout text format
//! parsed into structured records, a fixed calorie model, and time-windowed
//! aggregation over a per-user workout log.
//!
//! Pipeline: raw text -> parser -> calorie estimator -> store. On dashboard
//! reads: store -> aggregation engine -> summary shapes.
//!
//! All operations are synchronous, stateless request/response computations;
//! the store behind [`store::WorkoutStore`] is the only shared resource.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod estimator;
pub mod identity;
pub mod parser;
pub mod pipeline;
pub mod store;
pub mod types;

pub use config::AppConfig;
pub use error::CoreError;
pub use estimator::CALORIE_RATE;
pub use parser::WorkoutParser;
pub use pipeline::{log_workouts, WorkoutTracker};
pub use store::{MemoryStore, WorkoutStore};
pub use types::{UserId, WorkoutDraft, WorkoutRecord};

/// Crate version embedded in CLI output.
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
