use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{JobRepository, WebhookNotifier, WebhookStatus};
use crate::domain::{JobId, Row};
use crate::infrastructure::observability::sanitize_url;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub request_id: String,
    pub status: WebhookStatus,
    pub data: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POSTs the terminal state of a job once. Nothing is retried or propagated.
pub struct HttpWebhookNotifier {
    client: Client,
    job_repository: Arc<dyn JobRepository>,
}

impl HttpWebhookNotifier {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            job_repository,
        })
    }

    async fn current_rows(&self, job_id: JobId) -> Vec<Row> {
        match self.job_repository.get_by_id(job_id).await {
            Ok(Some(job)) => job.rows,
            Ok(None) => {
                tracing::warn!(job_id = %job_id, "Job missing while building webhook payload");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    job_id = %job_id,
                    error = %e,
                    "Job lookup failed while building webhook payload"
                );
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl WebhookNotifier for HttpWebhookNotifier {
    async fn notify(
        &self,
        job_id: JobId,
        callback_url: &str,
        status: WebhookStatus,
        error: Option<&str>,
    ) {
        let payload = WebhookPayload {
            request_id: job_id.to_string(),
            status,
            data: self.current_rows(job_id).await,
            error: error.map(String::from),
        };

        let result = self
            .client
            .post(callback_url)
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(response) => tracing::info!(
                job_id = %job_id,
                status = %status,
                http_status = response.status().as_u16(),
                "Webhook delivered"
            ),
            Err(e) => tracing::error!(
                job_id = %job_id,
                status = %status,
                callback_url = %sanitize_url(callback_url),
                error = %e,
                "Webhook delivery failed"
            ),
        }
    }
}
