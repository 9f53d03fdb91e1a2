//! Routes shared by every reviewable domain, mounted once per domain:
//!
//! - `GET /` and `GET /{id}`: read records (authenticated)
//! - `POST /submit-addition`, `POST /submit-update`: propose changes (authenticated, quota-limited)
//! - `GET /my-submissions`: the caller's proposals (authenticated)
//! - `GET /pending-additions`, `GET /pending-updates`: review queue (admin)
//! - `POST /approve-{addition|update}`, `POST /reject-{addition|update}`: review (admin)
//! - `POST /`, `PUT /{id}`, `DELETE /{id}`: direct record management (admin)

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use services::ReviewDomain;
use util::state::AppState;

use crate::auth::guards::{allow_admin, allow_authenticated};

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_record;
use get::{get_record, list_records, my_submissions, pending_additions, pending_updates};
use post::{
    approve_addition, approve_update, create_record, reject_addition, reject_update,
    submit_addition, submit_update,
};
use put::update_record;

pub fn review_routes<D: ReviewDomain>() -> Router<AppState> {
    let authenticated = Router::new()
        .route("/", get(list_records::<D>))
        .route("/{id}", get(get_record::<D>))
        .route("/submit-addition", post(submit_addition::<D>))
        .route("/submit-update", post(submit_update::<D>))
        .route("/my-submissions", get(my_submissions::<D>))
        .route_layer(from_fn(allow_authenticated));

    let admin = Router::new()
        .route("/", post(create_record::<D>))
        .route("/{id}", put(update_record::<D>).delete(delete_record::<D>))
        .route("/pending-additions", get(pending_additions::<D>))
        .route("/pending-updates", get(pending_updates::<D>))
        .route("/approve-addition", post(approve_addition::<D>))
        .route("/approve-update", post(approve_update::<D>))
        .route("/reject-addition", post(reject_addition::<D>))
        .route("/reject-update", post(reject_update::<D>))
        .route_layer(from_fn(allow_admin));

    authenticated.merge(admin)
}
