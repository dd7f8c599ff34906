//! Service info, API index and the JSON 404 fallback.

use crate::api::API_VERSION;
use crate::AppState;
use axum::{http::StatusCode, http::Uri, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

const AVAILABLE_ENDPOINTS: &[&str] = &[
    "/api",
    "/api/recipes",
    "/api/recipes/search",
    "/api/stats",
    "/api/health",
];

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EndpointInfo {
    pub route: &'static str,
    pub description: &'static str,
}

pub const ENDPOINTS: &[EndpointInfo] = &[
    EndpointInfo {
        route: "GET /api/recipes",
        description: "Get all recipes (paginated)",
    },
    EndpointInfo {
        route: "GET /api/recipes/search",
        description: "Search recipes with filters",
    },
    EndpointInfo {
        route: "GET /api/recipes/{id}",
        description: "Get recipe by ID",
    },
    EndpointInfo {
        route: "GET /api/stats",
        description: "Get API statistics",
    },
    EndpointInfo {
        route: "GET /api/health",
        description: "Health check",
    },
];

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceInfoResponse {
    pub success: bool,
    pub message: String,
    pub version: &'static str,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub endpoints: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiIndexResponse {
    pub success: bool,
    pub message: String,
    pub version: &'static str,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub success: bool,
    pub message: String,
    pub path: String,
    pub available_endpoints: Vec<&'static str>,
}

/// Routes mounted at the root
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(service_info))
}

/// Routes mounted at /api
pub fn api_router() -> Router<AppState> {
    Router::new().route("/", get(api_index))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "Service information", body = ServiceInfoResponse)
    )
)]
pub async fn service_info() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        success: true,
        message: "Recipe Catalog API".to_string(),
        version: API_VERSION,
        status: "running",
        timestamp: Utc::now(),
        endpoints: AVAILABLE_ENDPOINTS.to_vec(),
    })
}

#[utoipa::path(
    get,
    path = "/api",
    tag = "meta",
    responses(
        (status = 200, description = "API index", body = ApiIndexResponse)
    )
)]
pub async fn api_index() -> Json<ApiIndexResponse> {
    Json(ApiIndexResponse {
        success: true,
        message: "Recipe API".to_string(),
        version: API_VERSION,
        endpoints: ENDPOINTS.to_vec(),
    })
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            success: false,
            message: "Endpoint not found".to_string(),
            path: uri.to_string(),
            available_endpoints: AVAILABLE_ENDPOINTS.to_vec(),
        }),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(service_info, api_index),
    components(schemas(ServiceInfoResponse, ApiIndexResponse, EndpointInfo, NotFoundResponse))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use crate::api::{app, test_support::unconnected_state};
    use crate::config::Environment;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = app(unconnected_state(Environment::Production));
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_service_info() {
        let (status, body) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["status"], "running");
    }

    #[tokio::test]
    async fn test_api_index_lists_endpoints() {
        let (status, body) = get_json("/api").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn test_unknown_path_is_json_404() {
        let (status, body) = get_json("/api/nope?x=1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Endpoint not found");
        assert_eq!(body["path"], "/api/nope?x=1");
        assert!(body["availableEndpoints"].is_array());
    }
}
