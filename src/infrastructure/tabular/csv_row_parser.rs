use csv::{ReaderBuilder, StringRecord, Trim};

use crate::application::ports::{RowParser, RowParserError};
use crate::domain::RawRow;

pub const SERIAL_NUMBER_COLUMN: &str = "Serial Number";
pub const PRODUCT_NAME_COLUMN: &str = "Product Name";
pub const INPUT_IMAGE_URLS_COLUMN: &str = "Input Image Urls";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads the upload format: one product per record, image URLs comma-separated inside one cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRowParser;

struct ColumnIndices {
    serial_number: usize,
    product_name: usize,
    input_image_urls: usize,
}

impl ColumnIndices {
    fn locate(headers: &StringRecord) -> Result<Self, RowParserError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| RowParserError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            serial_number: find(SERIAL_NUMBER_COLUMN)?,
            product_name: find(PRODUCT_NAME_COLUMN)?,
            input_image_urls: find(INPUT_IMAGE_URLS_COLUMN)?,
        })
    }
}

impl RowParser for CsvRowParser {
    fn parse(&self, data: &[u8]) -> Result<Vec<RawRow>, RowParserError> {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        if data.iter().all(u8::is_ascii_whitespace) {
            return Err(RowParserError::Empty);
        }

        let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(data);

        let headers = reader.headers().map_err(malformed)?.clone();
        let columns = ColumnIndices::locate(&headers)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            let cell = |index: usize| record.get(index).unwrap_or_default();

            rows.push(RawRow {
                serial_number: serde_json::Value::String(cell(columns.serial_number).to_string()),
                product_name: cell(columns.product_name).to_string(),
                input_image_urls: split_urls(cell(columns.input_image_urls)),
            });
        }

        if rows.is_empty() {
            return Err(RowParserError::NoRows);
        }

        Ok(rows)
    }
}

fn split_urls(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(String::from)
        .collect()
}

fn malformed(e: csv::Error) -> RowParserError {
    RowParserError::Malformed {
        line: e.position().map(|p| p.line()).unwrap_or(0),
        reason: e.to_string(),
    }
}
