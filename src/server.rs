use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, StorageBackend};
use crate::database::{DatabaseError, DatabaseManager, MemoryStore, PgStore, PortalStore};
use crate::handlers::{project, system, AppState};

/// Build the store selected by `config.database.backend`
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn PortalStore>, DatabaseError> {
    match config.database.backend {
        StorageBackend::Postgres => {
            let pool = DatabaseManager::pool(&config.database).await?;
            let store = PgStore::new(pool);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(project_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    let router = if config.security.enable_cors {
        router.layer(cors_layer(&config.security.cors_origins))
    } else {
        router
    };

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn project_routes() -> Router<AppState> {
    Router::new().route(
        "/api/project",
        get(project::get).post(project::post).patch(project::patch),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers([header::CONTENT_TYPE])
}

/// Serve the API on an already-bound listener until the task is dropped
pub async fn serve(listener: TcpListener, state: AppState, config: &AppConfig) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Mentor portal listening on http://{}", addr);
    }
    axum::serve(listener, app(state, config)).await
}
