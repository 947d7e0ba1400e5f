/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use todovault_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool);
/// let app = todovault_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    routing::{get, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use todovault_store::repo::{PgUserStore, UserStore};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Handlers go through the `store` capability set; the raw pool is kept
/// only for the health check.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// User/task repository facade
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Creates new application state backed by the Postgres store
    pub fn new(db: PgPool) -> Self {
        Self {
            store: Arc::new(PgUserStore::new(db.clone())),
            db,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                              # Health check (public)
/// └── /v1/                                 # API v1 (versioned)
///     └── /users/
///         ├── GET    /                     # All users with their tasks
///         ├── POST   /                     # Add user
///         ├── PUT    /:user_id             # Update user
///         ├── DELETE /:user_id             # Delete user and its tasks
///         ├── GET    /:user_id/tasks       # Tasks for one user
///         ├── POST   /:user_id/tasks       # Add task
///         ├── PUT    /:user_id/tasks/:task_id    # Update task
///         └── DELETE /:user_id/tasks/:task_id    # Delete task
/// ```
///
/// # Example
///
/// ```no_run
/// use todovault_api::app::{AppState, build_router};
/// use sqlx::PgPool;
/// use todovault_api::config::Config;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool);
///
/// let app = build_router(state);
///
/// // Start server
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // User and task resources
    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::add_user),
        )
        .route(
            "/:user_id",
            put(routes::users::update_user).delete(routes::users::delete_user),
        )
        .route(
            "/:user_id/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::add_task),
        )
        .route(
            "/:user_id/tasks/:task_id",
            put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        );

    let v1_routes = Router::new().nest("/users", user_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_router_accepts_lazy_pool() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost:5432/unreachable")
            .expect("Lazy pool should not connect eagerly");

        let _app = build_router(AppState::new(pool));
    }
}
