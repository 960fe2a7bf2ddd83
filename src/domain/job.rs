use chrono::{DateTime, Utc};

use super::{JobId, JobStatus, Row};

pub const INITIAL_MESSAGE: &str = "Request in progress";

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub message: String,
    pub callback_url: String,
    pub rows: Vec<Row>,
    pub report: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(callback_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            status: JobStatus::Processing,
            message: INITIAL_MESSAGE.to_string(),
            callback_url: callback_url.into(),
            rows: Vec::new(),
            report: None,
            created_at: now,
            updated_at: now,
        }
    }
}
