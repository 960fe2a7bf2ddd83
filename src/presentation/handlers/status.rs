use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::{Job, JobId, JobStatus, Row};
use crate::presentation::handlers::error_response::error_response;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    pub request_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub request_id: String,
    pub status: JobStatus,
    pub message: String,
    pub data: Vec<Row>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for StatusResponse {
    fn from(job: Job) -> Self {
        Self {
            request_id: job.id.to_string(),
            status: job.status,
            message: job.message,
            data: job.rows,
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }
}

pub async fn status_query_handler(
    State(state): State<AppState>,
    Query(request): Query<StatusRequest>,
) -> Response {
    job_status(&state, request.request_id).await
}

pub async fn status_body_handler(
    State(state): State<AppState>,
    Json(request): Json<StatusRequest>,
) -> Response {
    job_status(&state, request.request_id).await
}

#[tracing::instrument(skip(state))]
async fn job_status(state: &AppState, request_id: Option<String>) -> Response {
    let Some(request_id) = request_id.filter(|id| !id.trim().is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "requestId is required");
    };

    let not_found = || {
        error_response(
            StatusCode::NOT_FOUND,
            format!("Request ID not found: {}", request_id),
        )
    };

    let Ok(job_id) = request_id.parse::<JobId>() else {
        return not_found();
    };

    match state.job_repository.get_by_id(job_id).await {
        Ok(Some(Job {
            id,
            status: JobStatus::Completed,
            report: Some(report),
            ..
        })) => report_response(id, report),
        Ok(Some(job)) => (StatusCode::OK, Json(StatusResponse::from(job))).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error checking request status: {}", e),
            )
        }
    }
}

fn report_response(job_id: JobId, report: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.csv\"", job_id),
            ),
        ],
        report,
    )
        .into_response()
}
