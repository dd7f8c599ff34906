//! Catalog statistics and health.

use crate::api::index::{EndpointInfo, ENDPOINTS};
use crate::api::{ErrorResponse, API_VERSION};
use crate::get_conn;
use crate::store::count_recipes;
use crate::AppState;
use axum::{
    extract::State, http::StatusCode, response::IntoResponse, response::Response, routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub total_recipes: i64,
    pub api_version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub data: StatsData,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub recipes_in_database: i64,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<HealthData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/health", get(health_check))
}

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "meta",
    responses(
        (status = 200, description = "Catalog statistics", body = StatsResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn get_stats(State(state): State<AppState>) -> Response {
    let mut conn = get_conn!(state);

    let total_recipes = match count_recipes(&mut conn) {
        Ok(n) => n,
        Err(e) => return super::internal_error(&state, "Failed to fetch statistics", e),
    };

    (
        StatusCode::OK,
        Json(StatsResponse {
            success: true,
            data: StatsData {
                total_recipes,
                api_version: API_VERSION,
                endpoints: ENDPOINTS.to_vec(),
            },
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "meta",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Database unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let count = state
        .pool
        .get()
        .map_err(|e| e.to_string())
        .and_then(|mut conn| count_recipes(&mut conn).map_err(|e| e.to_string()));

    match count {
        Ok(recipes_in_database) => (
            StatusCode::OK,
            Json(HealthResponse {
                success: true,
                status: "healthy",
                timestamp: Utc::now(),
                data: Some(HealthData {
                    recipes_in_database,
                    uptime_seconds: state.started_at.elapsed().as_secs(),
                }),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            let error = if state.config.exposes_error_detail() {
                e
            } else {
                "Internal server error".to_string()
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    success: false,
                    status: "unhealthy",
                    timestamp: Utc::now(),
                    data: None,
                    error: Some(error),
                }),
            )
                .into_response()
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(get_stats, health_check),
    components(schemas(StatsResponse, StatsData, HealthResponse, HealthData))
)]
pub struct ApiDoc;
