//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/faculty` → faculty records and their review workflow
//! - `/events` → event records and their review workflow
//! - `/me` → caller-specific endpoints (authenticated)

use axum::{Router, middleware::from_fn};
use services::{EventDomain, FacultyDomain};
use util::state::AppState;

use crate::auth::guards::allow_authenticated;
use crate::routes::{health::health_routes, me::me_routes, review::review_routes};

pub mod common;
pub mod health;
pub mod me;
pub mod review;

/// Builds the complete `/api` router with `app_state` applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/faculty", review_routes::<FacultyDomain>())
        .nest("/events", review_routes::<EventDomain>())
        .nest("/me", me_routes().route_layer(from_fn(allow_authenticated)))
        .with_state(app_state)
}
