mod route_client;
mod route_identifier;
mod route_request;
mod route_submitter;

pub use route_client::{DryRunRouteClient, HttpReply, HttpRouteClient, RouteClient};
pub use route_identifier::{slugify, RouteIdentifier};
pub use route_request::{CreateRouteRequest, DynamicRoute, RoutePayload};
pub use route_submitter::{RouteSubmitter, SubmissionOutcome};
