use reqwest::Url;
use serde::Serialize;

use super::RouteIdentifier;
use crate::{
    auth::AccessToken,
    error::RouteRegistrationError,
    extract::{CoordinateRecord, LatLon},
};

/// JSON body of a `selectedRoutes` create call.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RoutePayload {
    pub dynamic_route: DynamicRoute,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DynamicRoute {
    pub origin: LatLon,
    pub destination: LatLon,
}

impl From<&CoordinateRecord> for RoutePayload {
    fn from(value: &CoordinateRecord) -> Self {
        Self {
            dynamic_route: DynamicRoute {
                origin: value.origin,
                destination: value.destination,
            },
        }
    }
}

/// everything needed to send one create-route request.
#[derive(Clone, Debug)]
pub struct CreateRouteRequest {
    pub url: Url,
    pub project_id: String,
    pub token: AccessToken,
    pub payload: RoutePayload,
}

impl CreateRouteRequest {
    /// targets `{api_base_url}/projects/{project_id}/selectedRoutes` with the
    /// route identifier as the `selectedRouteId` query parameter.
    pub fn new(
        api_base_url: &str,
        project_id: &str,
        route_id: &RouteIdentifier,
        record: &CoordinateRecord,
        token: AccessToken,
    ) -> Result<Self, RouteRegistrationError> {
        let endpoint = format!(
            "{}/projects/{project_id}/selectedRoutes",
            api_base_url.trim_end_matches('/')
        );
        let url = Url::parse_with_params(&endpoint, &[("selectedRouteId", route_id.as_str())])
            .map_err(|e| RouteRegistrationError::RequestError {
                url: endpoint.clone(),
                message: format!("invalid URL: {e}"),
            })?;
        Ok(Self {
            url,
            project_id: project_id.to_string(),
            token,
            payload: RoutePayload::from(record),
        })
    }

    pub fn pretty_payload(&self) -> String {
        serde_json::to_string_pretty(&self.payload).unwrap_or_else(|e| format!("<{e}>"))
    }
}
