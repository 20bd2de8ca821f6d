//! Backend trait and configuration.
//!
//! The [`Backend`] trait defines the lifecycle of a job:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ submit() ──→ status() ──→ result()
//!    (sync, &ref)       (async)       (async)      (async)      (async)
//! ```
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `capabilities()` | sync | yes | `&Capabilities` |
//! | `availability()` | async | yes | `HalResult<BackendAvailability>` |
//! | `validate()` | async | yes | `HalResult<ValidationResult>` |
//! | `submit()` | async | yes | `HalResult<JobId>` |
//! | `status()` | async | yes | `HalResult<JobStatus>` |
//! | `result()` | async | yes | `HalResult<ExecutionResult>` |
//! | `cancel()` | async | yes | `HalResult<()>` |
//! | `wait()` | async | provided | `HalResult<ExecutionResult>` |

use std::time::Duration;

use async_trait::async_trait;
use densecode_ir::Circuit;
use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Configuration for a backend instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Name of the backend.
    pub name: String,
    /// Backend-specific settings.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BackendConfig {
    /// Create a new backend configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Deserialize the extra setting `key` into `T`, if present.
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> HalResult<Option<T>> {
        self.extra
            .get(key)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .map_err(HalError::from)
    }
}

/// Trait for circuit execution backends.
///
/// - `capabilities()` is synchronous and infallible; implementations cache
///   it at construction time.
/// - `validate()` checks a circuit against backend constraints before
///   submission.
/// - `submit()` returns a `JobId` whose initial status is `Queued` or later.
/// - `result()` is only valid once the job is `Completed`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Check backend availability.
    async fn availability(&self) -> HalResult<BackendAvailability>;

    /// Validate a circuit against backend constraints.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    /// Submit a circuit for execution.
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    /// Get the status of a job.
    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Get the result of a completed job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    /// Cancel a job that has not finished.
    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Wait for a job to complete and return its result.
    ///
    /// Default implementation polls every 500ms for up to 5 minutes.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let poll_interval = Duration::from_millis(500);
        let max_polls = 600;

        for _ in 0..max_polls {
            match self.status(job_id).await? {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(msg) => return Err(HalError::JobFailed(msg)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {
                    tracing::trace!(job = %job_id, "job pending, polling again");
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }

        Err(HalError::Timeout(job_id.0.clone()))
    }
}

/// Backend availability information.
#[derive(Debug, Clone)]
pub struct BackendAvailability {
    /// Whether the backend is currently accepting jobs.
    pub is_available: bool,
    /// Number of jobs currently in queue (if known).
    pub queue_depth: Option<u32>,
    /// Human-readable status message.
    pub status_message: Option<String>,
}

impl BackendAvailability {
    /// Availability for a local backend with no queue.
    pub fn always_available() -> Self {
        Self {
            is_available: true,
            queue_depth: Some(0),
            status_message: None,
        }
    }

    /// Availability for an offline backend.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            is_available: false,
            queue_depth: None,
            status_message: Some(reason.into()),
        }
    }
}

/// Result of circuit validation against backend constraints.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Circuit is valid and can be submitted directly.
    Valid,
    /// Circuit is invalid for this backend.
    Invalid {
        /// Reasons the circuit is invalid.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check if the circuit is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Turn an `Invalid` result into [`HalError::InvalidCircuit`].
    pub fn into_result(self) -> HalResult<()> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid { reasons } => {
                Err(HalError::InvalidCircuit(reasons.join("; ")))
            }
        }
    }
}

/// Trait for creating backends from configuration.
pub trait BackendFactory: Backend + Sized {
    /// Create a backend from configuration.
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_backend_config_extra() {
        let config = BackendConfig::new("test")
            .with_extra("seed", serde_json::json!(42))
            .with_extra("label", serde_json::json!("x"));

        assert_eq!(config.name, "test");
        assert_eq!(config.get::<u64>("seed").unwrap(), Some(42));
        assert_eq!(config.get::<u64>("missing").unwrap(), None);
        assert!(config.get::<u64>("label").is_err());
    }

    #[test]
    fn test_backend_availability() {
        let avail = BackendAvailability::always_available();
        assert!(avail.is_available);
        assert_eq!(avail.queue_depth, Some(0));

        let avail = BackendAvailability::unavailable("maintenance");
        assert!(!avail.is_available);
        assert_eq!(avail.status_message.as_deref(), Some("maintenance"));
    }

    #[test]
    fn test_validation_result() {
        assert!(ValidationResult::Valid.is_valid());
        let invalid = ValidationResult::Invalid {
            reasons: vec!["a".into(), "b".into()],
        };
        assert!(!invalid.is_valid());
        let err = invalid.into_result().unwrap_err();
        assert!(err.to_string().contains("a; b"));
    }

    /// Backend whose jobs complete after a fixed number of status polls.
    struct SlowBackend {
        caps: Capabilities,
        polls: AtomicU32,
        ready_after: u32,
    }

    #[async_trait]
    impl Backend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }
        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }
        async fn availability(&self) -> HalResult<BackendAvailability> {
            Ok(BackendAvailability::always_available())
        }
        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }
        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::new("job-0"))
        }
        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let n = self.polls.fetch_add(1, Ordering::SeqCst);
            Ok(if n >= self.ready_after {
                JobStatus::Completed
            } else {
                JobStatus::Running
            })
        }
        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            Ok(ExecutionResult::new(Counts::new(), 0))
        }
        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_wait_polls_until_complete() {
        let backend = SlowBackend {
            caps: Capabilities::simulator(2),
            polls: AtomicU32::new(0),
            ready_after: 3,
        };
        let job = backend.submit(&Circuit::new("c"), 1).await.unwrap();
        let result = backend.wait(&job).await.unwrap();
        assert_eq!(result.shots, 0);
        assert_eq!(backend.polls.load(Ordering::SeqCst), 4);
    }
}
