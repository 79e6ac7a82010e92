//! volunteer-hub server entry point.
//!
//! Starts the Axum HTTP server, optionally restoring state from the
//! latest PostgreSQL snapshot and scheduling periodic snapshot writes.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use volunteer_hub::api;
use volunteer_hub::app_state::AppState;
use volunteer_hub::config::HubConfig;
use volunteer_hub::domain::{BookmarkStore, EventRegistry, FeedbackStore, RegistrationStore};
use volunteer_hub::persistence::postgres::PostgresPersistence;
use volunteer_hub::service::{
    BadgeService, DashboardService, EventService, FeedbackService, RegistrationService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = HubConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting volunteer-hub");

    // Build domain layer
    let events = Arc::new(EventRegistry::new());
    let registrations = Arc::new(RegistrationStore::new());
    let feedback = Arc::new(FeedbackStore::new());
    let bookmarks = Arc::new(BookmarkStore::new());

    // Optionally restore state and schedule periodic snapshots
    if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        sqlx::migrate!().run(&pool).await?;
        let persistence = PostgresPersistence::new(pool);

        persistence
            .restore_state(&events, &registrations, &feedback, &bookmarks)
            .await?;

        let snapshot_interval = Duration::from_secs(config.snapshot_interval_secs);
        let cleanup_after_days = config.cleanup_after_days;
        let events = events.clone();
        let registrations = registrations.clone();
        let feedback = feedback.clone();
        let bookmarks = bookmarks.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(snapshot_interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = persistence
                    .save_state(&events, &registrations, &feedback, &bookmarks)
                    .await
                {
                    tracing::warn!(error = %e, "state snapshot failed");
                }
                if cleanup_after_days > 0 {
                    match persistence.delete_old_snapshots(cleanup_after_days).await {
                        Ok(deleted) if deleted > 0 => {
                            tracing::info!(deleted, "pruned old snapshots");
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!(error = %e, "snapshot cleanup failed"),
                    }
                }
            }
        });
    }

    // Build service layer
    let app_state = AppState {
        event_service: Arc::new(EventService::new(events.clone())),
        registration_service: Arc::new(RegistrationService::new(
            events.clone(),
            registrations.clone(),
            config.lock_wait_timeout,
        )),
        dashboard_service: Arc::new(DashboardService::new(events.clone(), feedback.clone())),
        badge_service: Arc::new(BadgeService::new(events.clone(), registrations.clone())),
        feedback_service: Arc::new(FeedbackService::new(events, feedback)),
        bookmarks,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
