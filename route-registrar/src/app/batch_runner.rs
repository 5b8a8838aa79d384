use std::{path::Path, time::Duration};

use super::{RunTally, StopReason};
use crate::{
    activity_log::ActivityLog,
    auth::TokenSource,
    config::RegistrarConfig,
    error::RouteRegistrationError,
    extract::{extract_coordinates, CoordinateRecord},
    submit::{RouteClient, RouteIdentifier, RouteSubmitter},
};

/// submits extracted records one at a time, fetching a fresh token for
/// each, until the records run out, the creation cap is reached, or a
/// token cannot be obtained.
pub struct BatchRunner<T: TokenSource, C: RouteClient> {
    token_source: T,
    submitter: RouteSubmitter<C>,
    route_name_prefix: String,
    fallback_route_name: String,
    max_routes_to_create: usize,
    request_delay: Duration,
}

impl<T: TokenSource, C: RouteClient> BatchRunner<T, C> {
    pub fn new(config: &RegistrarConfig, token_source: T, client: C) -> Self {
        Self {
            token_source,
            submitter: RouteSubmitter::new(
                client,
                &config.api_base_url,
                &config.google_project_id,
            ),
            route_name_prefix: config.route_name_prefix.clone(),
            fallback_route_name: config.fallback_route_name.clone(),
            max_routes_to_create: config.max_routes_to_create,
            request_delay: config.request_delay(),
        }
    }

    #[cfg(test)]
    pub(crate) fn submitter(&self) -> &RouteSubmitter<C> {
        &self.submitter
    }

    pub fn run(&self, records: &[CoordinateRecord], log: &mut ActivityLog) -> RunTally {
        let mut tally = RunTally {
            available: records.len(),
            ..RunTally::empty()
        };

        for record in records {
            if tally.created >= self.max_routes_to_create {
                log.info(&format!(
                    "Reached maximum of {} routes to create. Stopping.",
                    self.max_routes_to_create
                ));
                tally.stop_reason = StopReason::LimitReached;
                break;
            }
            tally.attempted += 1;
            let route_id = RouteIdentifier::derive(
                &self.route_name_prefix,
                record.label.as_deref(),
                &self.fallback_route_name,
                tally.attempted,
            );

            log.info(&format!(
                "Attempting to fetch access token via {}...",
                self.token_source.describe()
            ));
            let token = match self.token_source.fetch_token() {
                Ok(token) => {
                    log.info("Successfully fetched access token.");
                    token
                }
                Err(e) => {
                    log.error(&format!(
                        "Failed to obtain access token for entry {} (route {route_id}): {e}",
                        tally.attempted
                    ));
                    log.error("Skipping further route creations.");
                    tally.stop_reason = StopReason::TokenUnavailable;
                    break;
                }
            };

            if self.submitter.submit(token, record, &route_id, log).is_created() {
                tally.created += 1;
            }

            if !self.request_delay.is_zero() {
                std::thread::sleep(self.request_delay);
            }
        }
        tally
    }
}

/// extracts records from `input_file` and runs them through a
/// [`BatchRunner`]. setup failures (unreadable input, no matching
/// coordinate format) are returned as errors; a batch that stops early
/// still produces a tally.
pub fn run_batch<T: TokenSource, C: RouteClient>(
    config: &RegistrarConfig,
    input_file: &Path,
    token_source: T,
    client: C,
    log: &mut ActivityLog,
) -> Result<RunTally, RouteRegistrationError> {
    let extraction = extract_coordinates(input_file, config)?;
    for skipped in extraction.skipped.iter() {
        log.warn(&format!("Warning: {skipped}"));
    }
    if extraction.records.is_empty() {
        log.info("No data found in the input file. Exiting.");
        return Ok(RunTally::empty());
    }
    if let Some(encoding) = extraction.encoding.as_ref() {
        log.info(&format!(
            "Parsed {} records from '{}' using {} ({} rows skipped).",
            extraction.records.len(),
            input_file.display(),
            encoding.name(),
            extraction.skipped.len()
        ));
    }

    let runner = BatchRunner::new(config, token_source, client);
    let tally = runner.run(&extraction.records, log);

    log.info("Route registration finished.");
    for line in tally.summary_lines() {
        log.info(&line);
    }
    Ok(tally)
}
