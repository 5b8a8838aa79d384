use std::path::Path;

use clap::Parser;

use super::{run_batch, RunTally};
use crate::{
    activity_log::ActivityLog,
    auth::{CommandTokenSource, StaticTokenSource},
    config::load_config,
    error::RouteRegistrationError,
    submit::{DryRunRouteClient, HttpRouteClient},
};

/// Create Roads Selection API routes from a file of road-segment coordinates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct RegistrarApp {
    /// path to the input CSV file.
    pub input_file: String,

    /// path to the configuration file.
    #[arg(long, default_value_t = String::from("config.yaml"))]
    pub config: String,

    /// parse the input and log each request without fetching tokens or
    /// contacting the API.
    #[arg(long)]
    pub dry_run: bool,
}

impl RegistrarApp {
    /// loads the configuration, opens the activity log and runs the batch.
    /// any error returned here is a setup failure; a batch that stopped
    /// early on a token failure is still `Ok`.
    pub fn run(&self) -> Result<RunTally, RouteRegistrationError> {
        let config = load_config(Path::new(&self.config))?;
        let mut log = ActivityLog::create(Path::new(&config.log_file))?;
        log.info("Route registration started.");
        let input_file = Path::new(&self.input_file);

        let result = if self.dry_run {
            log.info("Dry run: no tokens will be fetched and no requests will be sent.");
            run_batch(
                &config,
                input_file,
                StaticTokenSource::new("dry-run"),
                DryRunRouteClient,
                &mut log,
            )
        } else {
            CommandTokenSource::new(&config.auth_command).and_then(|token_source| {
                let client = HttpRouteClient::new(config.request_timeout())?;
                run_batch(&config, input_file, token_source, client, &mut log)
            })
        };

        if let Err(e) = &result {
            log.error(&format!("Exiting due to error: {e}"));
            if let Some(path) = log.path().map(Path::to_path_buf) {
                let shown = std::path::absolute(&path).unwrap_or(path);
                log.error(&format!("Also check log file: {}", shown.display()));
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        RegistrarApp::command().debug_assert();
    }

    #[test]
    fn test_default_config_path() {
        let app = RegistrarApp::parse_from(["route-registrar", "segments.csv"]);
        assert_eq!(app.input_file, "segments.csv");
        assert_eq!(app.config, "config.yaml");
        assert!(!app.dry_run);
    }

    #[test]
    fn test_dry_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("segments.csv");
        std::fs::write(
            &csv,
            "olat,olon,dlat,dlon\n40.1,-111.9,40.2,-111.8\n40.3,-111.7,40.4,-111.6\n",
        )
        .unwrap();
        let log_file = dir.path().join("dry.log");
        let config = dir.path().join("config.yaml");
        std::fs::write(
            &config,
            format!(
                "google_project_id: p\nrequest_delay_ms: 0\nmax_routes_to_create: 1\nlog_file: {:?}\ncsv_format:\n  separate_coordinates:\n    origin_lat_column: olat\n    origin_lon_column: olon\n    destination_lat_column: dlat\n    destination_lon_column: dlon\n",
                log_file.display().to_string()
            ),
        )
        .unwrap();
        let app = RegistrarApp::parse_from([
            "route-registrar",
            csv.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "--dry-run",
        ]);
        let tally = app.run().unwrap();
        assert_eq!(tally.available, 2);
        assert_eq!(tally.attempted, 1);
        assert_eq!(tally.created, 1);
        let log = std::fs::read_to_string(&log_file).unwrap();
        assert!(log.contains("Route registration started."));
        assert!(log.contains("salt-lake-city-1"));
        assert!(log.contains("Reached maximum of 1 routes to create. Stopping."));
    }

    #[test]
    fn test_setup_failure_points_at_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("segments.csv");
        std::fs::write(&csv, "lat,lon\n1,2\n").unwrap();
        let log_file = dir.path().join("mismatch.log");
        let config = dir.path().join("settings");
        std::fs::write(
            &config,
            format!(
                "google_project_id: p\nlog_file: {:?}\ncsv_format:\n  combined_coordinates:\n    origin_coord_column: origin\n    destination_coord_column: dest\n",
                log_file.display().to_string()
            ),
        )
        .unwrap();
        let app = RegistrarApp {
            input_file: csv.display().to_string(),
            config: config.display().to_string(),
            dry_run: true,
        };
        assert!(matches!(
            app.run(),
            Err(RouteRegistrationError::FormatMismatch { .. })
        ));
        let log = std::fs::read_to_string(&log_file).unwrap();
        assert!(log.contains("Exiting due to error: CSV headers [lat, lon]"));
        assert!(log.contains("Also check log file: "));
        assert!(log.contains("mismatch.log"));
    }

    #[test]
    fn test_missing_config_is_setup_failure() {
        let dir = tempfile::tempdir().unwrap();
        let app = RegistrarApp {
            input_file: String::from("segments.csv"),
            config: dir.path().join("missing.yaml").display().to_string(),
            dry_run: true,
        };
        assert!(matches!(
            app.run(),
            Err(RouteRegistrationError::ConfigNotFound(_))
        ));
    }
}
