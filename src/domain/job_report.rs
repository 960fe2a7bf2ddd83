use serde::Serialize;

use super::Row;

pub const LIST_DELIMITER: &str = ",";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("csv write failed: {0}")]
    Write(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Buffer(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportLine<'a> {
    serial_number: String,
    product_name: &'a str,
    input_image_urls: String,
    output_image_urls: String,
}

/// Flattened CSV export of a processed job, one line per row in job order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport(String);

impl JobReport {
    pub fn from_rows(rows: &[Row]) -> Result<Self, ReportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        // serde writes the header from the first record, so an empty job needs it explicitly
        if rows.is_empty() {
            writer.write_record([
                "serialNumber",
                "productName",
                "inputImageUrls",
                "outputImageUrls",
            ])?;
        }

        for row in rows {
            let outputs: Vec<&str> = row
                .output_image_urls
                .iter()
                .map(|url| url.as_deref().unwrap_or(""))
                .collect();
            writer.serialize(ReportLine {
                serial_number: row.serial_number.to_string(),
                product_name: &row.product_name,
                input_image_urls: row.input_image_urls.join(LIST_DELIMITER),
                output_image_urls: outputs.join(LIST_DELIMITER),
            })?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ReportError::Buffer(e.to_string()))?;
        String::from_utf8(bytes)
            .map(Self)
            .map_err(|e| ReportError::Buffer(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
