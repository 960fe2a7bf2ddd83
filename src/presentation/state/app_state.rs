use std::sync::Arc;

use crate::application::ports::JobRepository;
use crate::application::services::IntakeService;

#[derive(Clone)]
pub struct AppState {
    pub intake_service: Arc<IntakeService>,
    pub job_repository: Arc<dyn JobRepository>,
    pub max_upload_bytes: usize,
}
