pub mod index;
pub mod recipes;
pub mod stats;

use crate::AppState;
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json, Router};
use serde::Serialize;
use std::fmt::Display;
use utoipa::{OpenApi, ToSchema};

use crate::models::Recipe;

pub const API_VERSION: &str = "1.0.0";

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    /// Underlying error detail in development, a generic message otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            message: message.to_string(),
            error: None,
        }),
    )
        .into_response()
}

/// 500 response. The full error is always logged; it only reaches the client
/// in development.
pub fn internal_error(state: &AppState, message: &str, err: impl Display) -> Response {
    tracing::error!(error = %err, "{}", message);

    let error = if state.config.exposes_error_detail() {
        err.to_string()
    } else {
        "Internal server error".to_string()
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            success: false,
            message: message.to_string(),
            error: Some(error),
        }),
    )
        .into_response()
}

/// Check out a pooled connection or return a 500 from the enclosing handler.
#[macro_export]
macro_rules! get_conn {
    ($state:expr) => {
        match $state.pool.get() {
            Ok(c) => c,
            Err(e) => return $crate::api::internal_error(&$state, "Database connection failed", e),
        }
    };
}

/// Every route the server exposes, with state attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(index::router())
        .nest("/api", index::api_router())
        .nest("/api/recipes", recipes::router())
        .merge(stats::router())
        .fallback(index::not_found)
        .with_state(state)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Recipe Catalog API", version = "1.0.0"),
        components(schemas(ErrorResponse, Recipe))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        index::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        stats::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}
