use std::time::Duration;

use reqwest::blocking::Client;

use super::CreateRouteRequest;
use crate::error::RouteRegistrationError;

const USER_PROJECT_HEADER: &str = "X-Goog-User-Project";

/// status code and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// sends a create-route request. an `Err` means no HTTP response was
/// received (connection failure, timeout); non-2xx statuses come back as
/// an `Ok` reply for the caller to classify.
pub trait RouteClient {
    fn send(&self, request: &CreateRouteRequest) -> Result<HttpReply, RouteRegistrationError>;
}

impl<C: RouteClient + ?Sized> RouteClient for &C {
    fn send(&self, request: &CreateRouteRequest) -> Result<HttpReply, RouteRegistrationError> {
        (**self).send(request)
    }
}

/// blocking reqwest transport with a per-request timeout.
pub struct HttpRouteClient {
    client: Client,
}

impl HttpRouteClient {
    pub fn new(timeout: Duration) -> Result<Self, RouteRegistrationError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            RouteRegistrationError::RequestError {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            }
        })?;
        Ok(Self { client })
    }
}

impl RouteClient for HttpRouteClient {
    fn send(&self, request: &CreateRouteRequest) -> Result<HttpReply, RouteRegistrationError> {
        let response = self
            .client
            .post(request.url.clone())
            .bearer_auth(request.token.secret())
            .header(USER_PROJECT_HEADER, &request.project_id)
            .json(&request.payload)
            .send()
            .map_err(|e| {
                let kind = if e.is_timeout() { "timeout" } else { "request error" };
                RouteRegistrationError::RequestError {
                    url: request.url.to_string(),
                    message: format!("{kind}: {e}"),
                }
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .unwrap_or_else(|e| format!("<unreadable response body: {e}>"));
        Ok(HttpReply { status, body })
    }
}

/// reports every request as created without contacting the service.
#[derive(Default)]
pub struct DryRunRouteClient;

impl RouteClient for DryRunRouteClient {
    fn send(&self, request: &CreateRouteRequest) -> Result<HttpReply, RouteRegistrationError> {
        log::info!(
            "dry run: would POST {} with payload {}",
            request.url,
            serde_json::to_string(&request.payload).unwrap_or_default()
        );
        Ok(HttpReply {
            status: 200,
            body: String::new(),
        })
    }
}
