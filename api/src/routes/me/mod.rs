//! Routes about the authenticated caller, mounted under `/me`.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/update-quota", get(get::get_update_quota))
}
