use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::JobId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Completed,
    Failed,
}

impl WebhookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookStatus::Completed => "completed",
            WebhookStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for WebhookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single best-effort delivery. Implementations log failures and never return them.
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    async fn notify(
        &self,
        job_id: JobId,
        callback_url: &str,
        status: WebhookStatus,
        error: Option<&str>,
    );
}
