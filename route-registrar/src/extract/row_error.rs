/// reasons a single CSV row is skipped during extraction.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RowParseError {
    #[error("missing value for column '{0}'")]
    MissingColumn(String),
    #[error("could not parse combined coordinates in column '{column}' from '{value}'")]
    InvalidCoordinatePair { column: String, value: String },
    #[error("could not parse number in column '{column}' from '{value}'")]
    InvalidNumber { column: String, value: String },
    #[error("malformed CSV record: {0}")]
    MalformedRecord(String),
}
