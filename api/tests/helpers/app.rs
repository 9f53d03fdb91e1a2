use axum::Router;
use db::test_utils::setup_test_db;
use std::sync::Arc;
use util::config::AppConfig;
use util::notify::{LogNotifier, NotificationQueue};
use util::state::AppState;

use api::routes::routes;

pub const TEST_JWT_SECRET: &str = "test-secret";

/// Router mounted under `/api` over a fresh in-memory database.
///
/// `log_request` is left out since `oneshot` requests carry no `ConnectInfo`.
pub async fn make_test_app() -> (Router, AppState) {
    AppConfig::set_jwt_secret(TEST_JWT_SECRET);
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_daily_update_limit(5);

    let (notifications, _worker) = NotificationQueue::spawn(Arc::new(LogNotifier));
    let app_state = AppState::new(setup_test_db().await, notifications);

    let app = Router::new().nest("/api", routes(app_state.clone()));
    (app, app_state)
}
