use std::fmt;

use super::{ImageFormat, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    /// `<job>/<row>/<image>.<ext>`, unique per image slot of a job.
    pub fn for_image(
        job_id: &JobId,
        row_index: usize,
        image_index: usize,
        format: ImageFormat,
    ) -> Self {
        Self(format!(
            "{}/{}/{}.{}",
            job_id.as_uuid(),
            row_index,
            image_index,
            format.extension()
        ))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
