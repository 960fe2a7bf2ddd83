use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::presentation::handlers::error_response::error_response;
use crate::presentation::state::AppState;

pub const CSV_FIELD: &str = "csv";
pub const CALLBACK_URL_FIELD: &str = "callbackUrl";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub request_id: String,
}

struct UploadedFile {
    content_type: String,
    data: Bytes,
}

/// Parameters such as `charset` are ignored.
pub fn is_csv_media_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    matches!(essence.as_str(), "text/csv" | "application/csv")
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut file: Option<UploadedFile> = None;
    let mut callback_url: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            CSV_FIELD => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                match field.bytes().await {
                    Ok(data) => file = Some(UploadedFile { content_type, data }),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read uploaded file");
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read file: {}", e),
                        );
                    }
                }
            }
            CALLBACK_URL_FIELD => match field.text().await {
                Ok(text) => {
                    callback_url = Some(text.trim().to_string()).filter(|url| !url.is_empty())
                }
                Err(e) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read callback URL: {}", e),
                    );
                }
            },
            other => tracing::debug!(field = %other, "Ignoring unexpected multipart field"),
        }
    }

    let Some(file) = file else {
        tracing::warn!("Upload request with no CSV file");
        return error_response(StatusCode::BAD_REQUEST, "No CSV file uploaded");
    };

    let Some(callback_url) = callback_url else {
        tracing::warn!("Upload request with no callback URL");
        return error_response(StatusCode::BAD_REQUEST, "No callback URL provided");
    };

    if !is_csv_media_type(&file.content_type) {
        tracing::warn!(content_type = %file.content_type, "Rejected non-CSV upload");
        return error_response(StatusCode::BAD_REQUEST, "Only CSV files are allowed");
    }

    if Url::parse(&callback_url).is_err() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid callback URL: {}", callback_url),
        );
    }

    tracing::debug!(bytes = file.data.len(), "CSV file received");

    match state.intake_service.admit(&callback_url, &file.data).await {
        Ok(job_id) => (
            StatusCode::ACCEPTED,
            Json(UploadResponse {
                request_id: job_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error processing the CSV data: {}", e),
        ),
    }
}
