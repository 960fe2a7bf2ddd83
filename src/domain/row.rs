use serde::{Deserialize, Serialize};

use super::SerialNumber;

/// A row as read from the uploaded file, before any schema checks.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub serial_number: serde_json::Value,
    pub product_name: String,
    pub input_image_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub serial_number: SerialNumber,
    pub product_name: String,
    pub input_image_urls: Vec<String>,
    /// Index-aligned with `input_image_urls` once processed; `None` marks a failed image.
    #[serde(default)]
    pub output_image_urls: Vec<Option<String>>,
}

impl Row {
    pub fn new(
        serial_number: SerialNumber,
        product_name: String,
        input_image_urls: Vec<String>,
    ) -> Self {
        Self {
            serial_number,
            product_name,
            input_image_urls,
            output_image_urls: Vec::new(),
        }
    }

    pub fn with_outputs(mut self, output_image_urls: Vec<Option<String>>) -> Self {
        self.output_image_urls = output_image_urls;
        self
    }
}
