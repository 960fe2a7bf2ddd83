mod error_response;
mod health;
mod openapi;
mod status;
mod upload;

pub use error_response::{ErrorResponse, error_response};
pub use health::health_handler;
pub use openapi::openapi_handler;
pub use status::{StatusRequest, StatusResponse, status_body_handler, status_query_handler};
pub use upload::{
    CALLBACK_URL_FIELD, CSV_FIELD, UploadResponse, is_csv_media_type, upload_handler,
};
