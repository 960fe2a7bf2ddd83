use async_trait::async_trait;

use crate::domain::{Job, JobId, JobStatus, Row};

use super::RepositoryError;

/// Partial update applied atomically to a single job. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobUpdate {
    pub status: Option<JobStatus>,
    pub message: Option<String>,
    pub rows: Option<Vec<Row>>,
    pub report: Option<String>,
}

impl JobUpdate {
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            rows: Some(rows),
            ..Self::default()
        }
    }

    pub fn completed(rows: Vec<Row>, report: String, message: impl Into<String>) -> Self {
        Self {
            status: Some(JobStatus::Completed),
            message: Some(message.into()),
            rows: Some(rows),
            report: Some(report),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(JobStatus::Failed),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Fails with `ConstraintViolation` when the id is already taken.
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Unknown ids are a logged no-op. Non-monotonic status changes fail with `InvalidTransition`.
    async fn update(&self, id: JobId, update: JobUpdate) -> Result<(), RepositoryError>;

    async fn health_check(&self) -> Result<(), RepositoryError>;
}
