use super::{CreateRouteRequest, RouteClient, RouteIdentifier};
use crate::{activity_log::ActivityLog, auth::AccessToken, extract::CoordinateRecord};

/// characters of an error response body kept in the activity log.
const RESPONSE_PREVIEW_CHARS: usize = 1000;

/// how a single create-route request ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmissionOutcome {
    Created { status: u16 },
    Rejected { status: u16 },
    Failed { message: String },
}

impl SubmissionOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// issues one create-route request per record. failures of any kind are
/// logged and returned as an outcome; nothing here stops the batch.
pub struct RouteSubmitter<C: RouteClient> {
    client: C,
    api_base_url: String,
    project_id: String,
}

impl<C: RouteClient> RouteSubmitter<C> {
    pub fn new(client: C, api_base_url: &str, project_id: &str) -> Self {
        Self {
            client,
            api_base_url: api_base_url.to_string(),
            project_id: project_id.to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    pub fn submit(
        &self,
        token: AccessToken,
        record: &CoordinateRecord,
        route_id: &RouteIdentifier,
        log: &mut ActivityLog,
    ) -> SubmissionOutcome {
        log.info(&format!(
            "Attempting to create route: {route_id} with Origin: {}, Dest: {}",
            record.origin, record.destination
        ));
        let request = match CreateRouteRequest::new(
            &self.api_base_url,
            &self.project_id,
            route_id,
            record,
            token,
        ) {
            Ok(request) => request,
            Err(e) => {
                log.error(&format!("Failed to build request for route {route_id}: {e}"));
                return SubmissionOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        match self.client.send(&request) {
            Ok(reply) if reply.status == 200 || reply.status == 201 => {
                log.info(&format!(
                    "Successfully created route: {route_id}. Status: {}",
                    reply.status
                ));
                SubmissionOutcome::Created {
                    status: reply.status,
                }
            }
            Ok(reply) => {
                log.error(&format!(
                    "Failed to create route {route_id}. Status: {}.\nURL: {}\nPayload: {}\nResponse: {}",
                    reply.status,
                    request.url,
                    request.pretty_payload(),
                    truncate_chars(&reply.body, RESPONSE_PREVIEW_CHARS)
                ));
                SubmissionOutcome::Rejected {
                    status: reply.status,
                }
            }
            Err(e) => {
                log.error(&format!(
                    "Request failed for route {route_id}: {e}\nURL: {}\nPayload: {}",
                    request.url,
                    request.pretty_payload()
                ));
                SubmissionOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
