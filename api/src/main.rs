use api::auth::middleware::log_request;
use api::routes::routes;
use api::services::email::EmailNotifier;
use axum::{Router, middleware::from_fn};
use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use util::notify::{LogNotifier, NotificationQueue, Notifier};
use util::{config, state::AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let _log_guard = init_logging(&config::log_file(), &config::log_level());

    if config::jwt_secret().is_empty() {
        error!("JWT_SECRET must be set");
        return ExitCode::FAILURE;
    }

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, path = %config::database_path(), "Failed to open database");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        error!(error = %e, "Failed to run migrations");
        return ExitCode::FAILURE;
    }

    let (notifications, _notification_worker) = NotificationQueue::spawn(build_notifier());
    let app_state = AppState::new(db, notifications);

    let app = Router::new()
        .nest("/api", routes(app_state))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config::request_timeout_secs(),
        )))
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive());

    let addr: SocketAddr = match format!("{}:{}", config::host(), config::port()).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "Invalid HOST/PORT");
            return ExitCode::FAILURE;
        }
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(error = %e, %addr, "Failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Starting {} on http://{} (env = {}, daily update limit = {})",
        config::project_name(),
        addr,
        config::env(),
        config::daily_update_limit()
    );

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        error!(error = %e, "Server crashed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// SMTP when Gmail credentials are configured, otherwise log-only delivery.
fn build_notifier() -> Arc<dyn Notifier> {
    match EmailNotifier::from_config() {
        Ok(Some(email)) => {
            info!("Review notifications will be sent by email");
            Arc::new(email)
        }
        Ok(None) => {
            info!("No mail credentials configured; review notifications will be logged");
            Arc::new(LogNotifier)
        }
        Err(e) => {
            warn!(error = %e, "Mail transport misconfigured; review notifications will be logged");
            Arc::new(LogNotifier)
        }
    }
}

fn init_logging(log_file: &str, log_level: &str) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config::log_to_stdout().then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
