//! Application state container shared across Axum route handlers and services.
//!
//! This struct holds shared resources such as the database connection and the
//! notification queue. It is cloned into route handlers via Axum's `State<T>` extractor.

use crate::notify::NotificationQueue;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
///
/// This includes:
/// - A cloned, thread-safe database connection for use with SeaORM.
/// - The sending half of the notification pipeline.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    notifications: NotificationQueue,
}

impl AppState {
    /// Creates a new `AppState` with the given database connection and notification queue.
    pub fn new(db: DatabaseConnection, notifications: NotificationQueue) -> Self {
        Self { db, notifications }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the notification queue.
    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for async contexts or spawning tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
