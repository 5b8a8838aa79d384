//! batch registration of road-segment routes. coordinates are read from a
//! CSV file, each row is submitted as a `selectedRoutes` create call using a
//! bearer token from an external auth command, and every step is recorded
//! in a timestamped activity log.
pub mod activity_log;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod submit;
