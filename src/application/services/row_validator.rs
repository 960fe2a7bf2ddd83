use url::Url;

use crate::domain::{RawRow, Row, SerialNumber};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation error in row at index {index}: {}", violations.join("; "))]
pub struct RowValidationError {
    pub index: usize,
    pub violations: Vec<String>,
}

/// Validates the whole batch in order and stops at the first offending row.
pub fn validate_rows(raw_rows: Vec<RawRow>) -> Result<Vec<Row>, RowValidationError> {
    let mut rows = Vec::with_capacity(raw_rows.len());

    for (index, raw) in raw_rows.into_iter().enumerate() {
        match validate_row(raw) {
            Ok(row) => {
                tracing::debug!(index, "Row is valid");
                rows.push(row);
            }
            Err(violations) => {
                tracing::warn!(index, violations = ?violations, "Row failed validation");
                return Err(RowValidationError { index, violations });
            }
        }
    }

    Ok(rows)
}

fn validate_row(raw: RawRow) -> Result<Row, Vec<String>> {
    let mut violations = Vec::new();

    let serial_number = SerialNumber::from_value(&raw.serial_number);
    if serial_number.is_none() {
        violations.push(format!(
            "serialNumber must be an integer or a string of digits, got {}",
            raw.serial_number
        ));
    }

    if raw.product_name.trim().is_empty() {
        violations.push("productName must not be empty".to_string());
    }

    if raw.input_image_urls.is_empty() {
        violations.push("inputImageUrls must contain at least one URL".to_string());
    }
    for (position, candidate) in raw.input_image_urls.iter().enumerate() {
        if let Err(e) = Url::parse(candidate) {
            violations.push(format!(
                "inputImageUrls[{}] is not a valid URI ({:?}): {}",
                position, candidate, e
            ));
        }
    }

    match serial_number {
        Some(serial_number) if violations.is_empty() => Ok(Row::new(
            serial_number,
            raw.product_name,
            raw.input_image_urls,
        )),
        _ => Err(violations),
    }
}
