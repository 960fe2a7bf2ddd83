use crate::domain::RawRow;

pub trait RowParser: Send + Sync {
    fn parse(&self, data: &[u8]) -> Result<Vec<RawRow>, RowParserError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RowParserError {
    #[error("file is empty")]
    Empty,
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("file contains no data rows")]
    NoRows,
}
