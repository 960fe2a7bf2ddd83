mod csv_row_parser;

pub use csv_row_parser::{
    CsvRowParser, INPUT_IMAGE_URLS_COLUMN, PRODUCT_NAME_COLUMN, SERIAL_NUMBER_COLUMN,
};
