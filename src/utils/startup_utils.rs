use std::sync::Arc;

use axum::{Router, extract::FromRef, http::{HeaderValue, Method, header::CONTENT_TYPE}, routing::{get, post, put}};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::{api::{activities::{create_activity, create_random_activity, delete_activity, read_activities, update_activity}, health::health_check}, error::ApiError, services::{activity_controller::ActivityController, bored_client::{BoredClient, RandomActivitySource}, database::{ActivityStore, Database}, memory_store::MemoryStore}, utils::app_config::AppConfig};

pub fn get_app_config() -> AppConfig {
    AppConfig::from_env()
}

pub async fn get_store(config: &AppConfig) -> Result<Arc<dyn ActivityStore>, ApiError> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, activities will be kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = get_pg_pool(database_url).await
        .map_err(|e| ApiError::StartupError(format!("Could not create the database connection pool: {}", e)))?;

    let db = Database::new(pool);
    db.ensure_schema().await?;

    Ok(Arc::new(db))
}

async fn get_pg_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;
    info!("Database connected!");

    Ok(pool)
}

pub fn get_random_source(config: &AppConfig) -> Arc<dyn RandomActivitySource> {
    Arc::new(BoredClient::new(config.random_activity_url.clone()))
}

pub fn get_activity_controller(store: Arc<dyn ActivityStore>, random_source: Arc<dyn RandomActivitySource>) -> ActivityController {
    ActivityController::new(store, random_source)
}

#[derive(Clone)]
pub struct AppState {
    pub activity_controller: Arc<ActivityController>,
}

// Allow extracting ActivityController from AppState
impl FromRef<AppState> for Arc<ActivityController> {
    fn from_ref(state: &AppState) -> Arc<ActivityController> {
        state.activity_controller.clone()
    }
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, ApiError> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::StartupError(format!("Invalid CORS origin '{}': {}", allowed_origin, e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]))
}

pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/activities", post(create_activity).get(read_activities))
        .route("/activities/random", post(create_random_activity))
        .route("/activities/{id}", put(update_activity).delete(delete_activity))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

pub async fn create_server(config: &AppConfig, activity_controller: Arc<ActivityController>) -> Result<(), ApiError> {
    let state = AppState {
        activity_controller,
    };

    let app = create_app(state, cors_layer(&config.cors_allowed_origin)?);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .map_err(|e| ApiError::StartupError(format!("Failed to bind {}: {}", config.bind_addr, e)))?;

    info!("Server running on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::StartupError(format!("Server error: {}", e)))?;

    Ok(())
}
