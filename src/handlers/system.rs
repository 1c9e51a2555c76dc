use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;

use super::AppState;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "message": "Mentor Portal API",
        "data": {
            "name": "mentor-portal",
            "version": version,
            "endpoints": {
                "health": "GET /health",
                "project": "POST, GET [?mentorId=], PATCH /api/project",
            }
        }
    }))
}

/// GET /health - Store liveness
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => Ok(ApiResponse::success(
            "ok",
            json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            }),
        )),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
