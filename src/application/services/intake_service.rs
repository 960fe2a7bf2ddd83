use std::sync::Arc;

use crate::application::ports::{
    JobRepository, JobUpdate, RepositoryError, RowParser, RowParserError, WebhookNotifier,
    WebhookStatus,
};
use crate::domain::{Job, JobId, Row};

use super::batch_processor::BatchProcessor;
use super::row_validator::{RowValidationError, validate_rows};

/// Admits an uploaded batch: job record, parse, validation, then hand-off to the processor.
pub struct IntakeService {
    row_parser: Arc<dyn RowParser>,
    job_repository: Arc<dyn JobRepository>,
    notifier: Arc<dyn WebhookNotifier>,
    batch_processor: Arc<BatchProcessor>,
}

impl IntakeService {
    pub fn new(
        row_parser: Arc<dyn RowParser>,
        job_repository: Arc<dyn JobRepository>,
        notifier: Arc<dyn WebhookNotifier>,
        batch_processor: Arc<BatchProcessor>,
    ) -> Self {
        Self {
            row_parser,
            job_repository,
            notifier,
            batch_processor,
        }
    }

    pub async fn admit(&self, callback_url: &str, data: &[u8]) -> Result<JobId, IntakeError> {
        let job = Job::new(callback_url);
        let job_id = job.id;

        self.job_repository
            .create(&job)
            .await
            .map_err(IntakeError::Repository)?;

        tracing::info!(job_id = %job_id, bytes = data.len(), "Processing request initiated");

        match self.prepare(job_id, data).await {
            Ok(rows) => {
                // detached: the caller only ever observes the job through the store
                drop(
                    self.batch_processor
                        .spawn(job_id, callback_url.to_string(), rows),
                );
                Ok(job_id)
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(job_id = %job_id, error = %message, "Batch rejected during intake");
                if let Err(update_err) = self
                    .job_repository
                    .update(job_id, JobUpdate::failed(message.clone()))
                    .await
                {
                    tracing::error!(
                        job_id = %job_id,
                        error = %update_err,
                        "Failed to mark job as failed"
                    );
                }
                self.notifier
                    .notify(job_id, callback_url, WebhookStatus::Failed, Some(&message))
                    .await;
                Err(e)
            }
        }
    }

    async fn prepare(&self, job_id: JobId, data: &[u8]) -> Result<Vec<Row>, IntakeError> {
        let raw_rows = self.row_parser.parse(data).map_err(IntakeError::Parse)?;
        tracing::info!(job_id = %job_id, rows = raw_rows.len(), "CSV parsing completed");

        let rows = validate_rows(raw_rows).map_err(IntakeError::Validation)?;

        self.job_repository
            .update(job_id, JobUpdate::rows(rows.clone()))
            .await
            .map_err(IntakeError::Repository)?;

        Ok(rows)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("parse: {0}")]
    Parse(RowParserError),
    #[error("{0}")]
    Validation(RowValidationError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
