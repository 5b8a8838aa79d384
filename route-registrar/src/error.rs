use std::path::PathBuf;

/// failures that stop a registration run (setup errors) or a single
/// stage of it (token acquisition, transport).
#[derive(thiserror::Error, Debug)]
pub enum RouteRegistrationError {
    #[error("configuration file '{0}' not found")]
    ConfigNotFound(PathBuf),
    #[error("failed to parse configuration file '{path}': {message}")]
    ConfigParseError { path: PathBuf, message: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failure reading CSV file '{path}': {message}")]
    CsvReadError { path: PathBuf, message: String },
    #[error("CSV headers [{}] do not match any coordinate format in the configuration", .headers.join(", "))]
    FormatMismatch { headers: Vec<String> },
    #[error("failed to generate access token: {0}")]
    TokenGenerationError(String),
    #[error("failed to send request to '{url}': {message}")]
    RequestError { url: String, message: String },
    #[error("failure opening log file '{path}': {source}")]
    LogFileError {
        path: PathBuf,
        source: std::io::Error,
    },
}
