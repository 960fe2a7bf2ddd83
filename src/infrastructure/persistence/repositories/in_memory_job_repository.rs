use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::ports::{JobRepository, JobUpdate, RepositoryError};
use crate::domain::{Job, JobId};

/// Process-local store for development and tests. Jobs are lost on restart.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        if jobs.contains_key(&job.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "job {} already exists",
                job.id
            )));
        }
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self.jobs.read().await.get(&id).cloned())
    }

    async fn update(&self, id: JobId, update: JobUpdate) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.get_mut(&id) else {
            tracing::warn!(job_id = %id, "Update for unknown job ignored");
            return Ok(());
        };

        if let Some(next) = update.status {
            if !job.status.can_transition_to(next) {
                return Err(RepositoryError::InvalidTransition(format!(
                    "{} -> {}",
                    job.status, next
                )));
            }
            job.status = next;
        }
        if let Some(message) = update.message {
            job.message = message;
        }
        if let Some(rows) = update.rows {
            job.rows = rows;
        }
        if let Some(report) = update.report {
            job.report = Some(report);
        }
        job.updated_at = Utc::now();

        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
