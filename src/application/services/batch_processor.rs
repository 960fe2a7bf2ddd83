use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::ports::{
    JobRepository, JobUpdate, RepositoryError, WebhookNotifier, WebhookStatus,
};
use crate::domain::{JobId, JobReport, JobStatus, ReportError, Row};

use super::image_transformer::{ImageTransformError, ImageTransformer};

pub const COMPLETED_MESSAGE: &str = "Image processing completed";

/// Drives one job from validated rows to a terminal state.
pub struct BatchProcessor {
    transformer: Arc<ImageTransformer>,
    job_repository: Arc<dyn JobRepository>,
    notifier: Arc<dyn WebhookNotifier>,
    job_deadline: Duration,
}

impl BatchProcessor {
    pub fn new(
        transformer: Arc<ImageTransformer>,
        job_repository: Arc<dyn JobRepository>,
        notifier: Arc<dyn WebhookNotifier>,
        job_deadline: Duration,
    ) -> Self {
        Self {
            transformer,
            job_repository,
            notifier,
            job_deadline,
        }
    }

    /// Runs the job on its own task. Progress is only observable through the job store.
    pub fn spawn(
        self: &Arc<Self>,
        job_id: JobId,
        callback_url: String,
        rows: Vec<Row>,
    ) -> JoinHandle<JobStatus> {
        let processor = Arc::clone(self);
        let span = tracing::info_span!("batch_job", job_id = %job_id, rows = rows.len());
        tokio::spawn(
            async move { processor.process(job_id, &callback_url, rows).await }.instrument(span),
        )
    }

    pub async fn process(&self, job_id: JobId, callback_url: &str, rows: Vec<Row>) -> JobStatus {
        tracing::info!("Batch processing started");

        match self.run(job_id, rows).await {
            Ok(()) => {
                tracing::info!("Batch processing completed");
                self.notifier
                    .notify(job_id, callback_url, WebhookStatus::Completed, None)
                    .await;
                JobStatus::Completed
            }
            Err(e) => {
                tracing::error!(error = %e, "Batch processing failed");
                let error_text = e.to_string();
                if let Err(update_err) = self
                    .job_repository
                    .update(
                        job_id,
                        JobUpdate::failed(format!("Image processing failed: {}", error_text)),
                    )
                    .await
                {
                    tracing::error!(error = %update_err, "Failed to mark job as failed");
                }
                self.notifier
                    .notify(job_id, callback_url, WebhookStatus::Failed, Some(&error_text))
                    .await;
                JobStatus::Failed
            }
        }
    }

    async fn run(&self, job_id: JobId, rows: Vec<Row>) -> Result<(), BatchError> {
        let processed = tokio::time::timeout(self.job_deadline, self.transform_rows(job_id, rows))
            .await
            .map_err(|_| BatchError::DeadlineExceeded(self.job_deadline))??;

        let report = JobReport::from_rows(&processed).map_err(BatchError::Report)?;

        self.job_repository
            .update(
                job_id,
                JobUpdate::completed(processed, report.into_string(), COMPLETED_MESSAGE),
            )
            .await
            .map_err(BatchError::Repository)
    }

    async fn transform_rows(&self, job_id: JobId, rows: Vec<Row>) -> Result<Vec<Row>, BatchError> {
        let mut processed = Vec::with_capacity(rows.len());

        for (row_index, row) in rows.into_iter().enumerate() {
            let mut outputs = Vec::with_capacity(row.input_image_urls.len());

            for (image_index, url) in row.input_image_urls.iter().enumerate() {
                match self
                    .transformer
                    .transform(job_id, row_index, image_index, url)
                    .await
                {
                    Ok(output_url) => outputs.push(Some(output_url)),
                    Err(e) if e.is_fatal() => {
                        return Err(BatchError::Transform {
                            row_index,
                            image_index,
                            source: e,
                        });
                    }
                    Err(e) => {
                        tracing::warn!(row_index, image_index, error = %e, "Image skipped");
                        outputs.push(None);
                    }
                }
            }

            let failed = outputs.iter().filter(|o| o.is_none()).count();
            tracing::info!(row_index, images = outputs.len(), failed, "Row processed");
            processed.push(row.with_outputs(outputs));
        }

        Ok(processed)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("row {row_index}, image {image_index}: {source}")]
    Transform {
        row_index: usize,
        image_index: usize,
        source: ImageTransformError,
    },
    #[error("job deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
    #[error("report: {0}")]
    Report(ReportError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
