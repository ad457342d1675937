//! Student record store contract.
//!
//! The bot never caches records; every operation goes back to the store.
//! Failures surface as plain `anyhow` errors and are collapsed to fixed
//! user messages at the handler boundary.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

pub mod mongo;

pub use mongo::MongoStudentStore;

/// Whether an upsert created a new record or merged into an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub created: bool,
}

/// Persistent record store keyed by student id.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Point lookup by exact id. `Ok(None)` when no record exists.
    async fn fetch_by_id(&self, student_id: &str) -> Result<Option<Value>>;

    /// Merge a partial record into the record at `student_id`, creating
    /// it if absent. Fields not present in `partial` are left untouched.
    async fn upsert_by_id(&self, student_id: &str, partial: &Value) -> Result<UpsertOutcome>;
}
