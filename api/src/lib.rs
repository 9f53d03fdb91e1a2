//! HTTP API for the Smashers content review workflow.

pub mod auth;
pub mod response;
pub mod routes;
pub mod services;
