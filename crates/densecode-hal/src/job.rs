//! Job bookkeeping.
//!
//! A job starts `Queued`, may pass through `Running`, and ends in exactly one
//! of `Completed`, `Failed` or `Cancelled`. Once ended it never changes again,
//! and only a `Completed` job has a result to fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque job handle returned by `Backend::submit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Wrap an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted, not started.
    Queued,
    /// Executing.
    Running,
    /// Finished with a result.
    Completed,
    /// Finished without a result; carries the reason.
    Failed(String),
    /// Stopped on request.
    Cancelled,
}

impl JobStatus {
    /// Whether the job has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Queued | JobStatus::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobStatus::Queued => "Queued",
            JobStatus::Running => "Running",
            JobStatus::Completed => "Completed",
            JobStatus::Cancelled => "Cancelled",
            JobStatus::Failed(reason) => return write!(f, "Failed: {reason}"),
        };
        f.write_str(label)
    }
}

/// A backend's record of one submitted circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Handle given back to the caller.
    pub id: JobId,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Requested shot count.
    pub shots: u32,
    /// Name of the submitted circuit, e.g. `superdense_11`.
    pub circuit_name: String,
    /// Backend that accepted the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    /// When the job was accepted.
    pub created_at: DateTime<Utc>,
    /// When the job ended, once it has.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// A freshly queued job.
    pub fn new(id: impl Into<JobId>, circuit_name: impl Into<String>, shots: u32) -> Self {
        Self {
            id: id.into(),
            status: JobStatus::Queued,
            shots,
            circuit_name: circuit_name.into(),
            backend: None,
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Record which backend owns the job.
    #[must_use]
    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    /// Move to `status` unless the job has already ended. Ending stamps
    /// `finished_at`.
    pub fn transition(&mut self, status: JobStatus) {
        if self.status.is_terminal() {
            return;
        }
        if status.is_terminal() {
            self.finished_at = Some(Utc::now());
        }
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed("boom".into()).is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
        assert_eq!(JobStatus::Failed("boom".into()).to_string(), "Failed: boom");
    }

    #[test]
    fn test_new_job_is_queued() {
        let job = Job::new("job-123", "superdense_11", 1000).with_backend("density_matrix");

        assert_eq!(job.id.to_string(), "job-123");
        assert_eq!(job.shots, 1000);
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.backend.as_deref(), Some("density_matrix"));
        assert!(job.finished_at.is_none());
    }

    #[test]
    fn test_ended_jobs_stay_ended() {
        let mut job = Job::new("job-1", "superdense_00", 10);
        job.transition(JobStatus::Running);
        assert!(job.finished_at.is_none());
        job.transition(JobStatus::Completed);
        let finished = job.finished_at;
        assert!(finished.is_some());

        job.transition(JobStatus::Cancelled);
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.finished_at, finished);
    }
}
