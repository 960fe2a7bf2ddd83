mod image_format;
mod job;
mod job_id;
mod job_report;
mod job_status;
mod row;
mod serial_number;
mod storage_path;

pub use image_format::ImageFormat;
pub use job::{INITIAL_MESSAGE, Job};
pub use job_id::JobId;
pub use job_report::{JobReport, LIST_DELIMITER, ReportError};
pub use job_status::JobStatus;
pub use row::{RawRow, Row};
pub use serial_number::SerialNumber;
pub use storage_path::StoragePath;
