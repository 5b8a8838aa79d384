use std::{path::Path, time::Duration};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use super::CsvFormatConfig;
use crate::error::RouteRegistrationError;

/// file extensions the `config` crate maps to a parser.
const KNOWN_CONFIG_EXTENSIONS: [&str; 7] = ["yaml", "yml", "toml", "json", "json5", "ini", "ron"];

/// configuration for a route registration run, read from YAML (or any
/// other format the `config` crate infers from the file extension).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegistrarConfig {
    /// cloud project that owns the created routes and is billed for requests.
    #[serde(alias = "project_id")]
    pub google_project_id: String,
    #[serde(default)]
    pub csv_format: CsvFormatConfig,
    /// prepended to every derived route identifier.
    #[serde(default)]
    pub route_name_prefix: String,
    /// stop once this many routes have been created successfully.
    #[serde(default = "default_max_routes_to_create")]
    pub max_routes_to_create: usize,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    /// command printing a bearer token to stdout. split on whitespace.
    #[serde(default = "default_auth_command")]
    pub auth_command: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// pause between rows, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// base name for routes whose row carries no usable segment name.
    #[serde(default = "default_fallback_route_name")]
    pub fallback_route_name: String,
}

fn default_max_routes_to_create() -> usize {
    100
}

fn default_log_file() -> String {
    String::from("route_creator_log.txt")
}

fn default_auth_command() -> String {
    String::from("gcloud auth application-default print-access-token")
}

fn default_api_base_url() -> String {
    String::from("https://roads.googleapis.com/selection/v1")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_request_delay_ms() -> u64 {
    200
}

fn default_fallback_route_name() -> String {
    String::from("salt-lake-city")
}

impl RegistrarConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// confirms the fields serde cannot check on its own.
    pub fn validate(&self) -> Result<(), RouteRegistrationError> {
        if self.google_project_id.trim().is_empty() {
            return Err(RouteRegistrationError::InvalidConfig(String::from(
                "'google_project_id' is empty",
            )));
        }
        if self.csv_format.combined_coordinates.is_none()
            && self.csv_format.separate_coordinates.is_none()
        {
            return Err(RouteRegistrationError::InvalidConfig(String::from(
                "'csv_format' must define 'combined_coordinates' or 'separate_coordinates'",
            )));
        }
        if self.auth_command.split_whitespace().next().is_none() {
            return Err(RouteRegistrationError::InvalidConfig(String::from(
                "'auth_command' is empty",
            )));
        }
        Ok(())
    }
}

/// reads and validates a [`RegistrarConfig`] from a file on disk.
pub fn load_config(filepath: &Path) -> Result<RegistrarConfig, RouteRegistrationError> {
    if !filepath.is_file() {
        return Err(RouteRegistrationError::ConfigNotFound(filepath.to_owned()));
    }
    let parse_error = |message: String| RouteRegistrationError::ConfigParseError {
        path: filepath.to_owned(),
        message,
    };
    let has_known_extension = filepath
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| KNOWN_CONFIG_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    let source = if has_known_extension {
        File::from(filepath)
    } else {
        File::from(filepath).format(FileFormat::Yaml)
    };
    let config = Config::builder()
        .add_source(source)
        .build()
        .map_err(|e| parse_error(e.to_string()))?;
    let registrar_config = config
        .try_deserialize::<RegistrarConfig>()
        .map_err(|e| parse_error(e.to_string()))?;
    registrar_config.validate()?;
    Ok(registrar_config)
}
