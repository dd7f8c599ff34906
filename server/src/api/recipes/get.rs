use crate::api::{error_response, ErrorResponse};
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub success: bool,
    pub data: Recipe,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 400, description = "ID is not an integer", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn get_recipe(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.trim().parse::<i32>() else {
        return error_response(StatusCode::BAD_REQUEST, "Valid recipe ID is required");
    };

    let mut conn = get_conn!(state);

    let recipe = match recipes::table
        .filter(recipes::id.eq(id))
        .select(Recipe::as_select())
        .first(&mut conn)
    {
        Ok(r) => r,
        Err(diesel::NotFound) => {
            return error_response(StatusCode::NOT_FOUND, "Recipe not found");
        }
        Err(e) => return crate::api::internal_error(&state, "Failed to fetch recipe", e),
    };

    (
        StatusCode::OK,
        Json(RecipeResponse {
            success: true,
            data: recipe,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use crate::api::{app, test_support::unconnected_state};
    use crate::config::Environment;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_non_integer_id_is_bad_request() {
        for uri in ["/api/recipes/abc", "/api/recipes/1.5", "/api/recipes/99999999999"] {
            let response = app(unconnected_state(Environment::Production))
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Valid recipe ID is required");
        }
    }

    #[tokio::test]
    async fn test_search_is_not_treated_as_an_id() {
        let response = app(unconnected_state(Environment::Production))
            .oneshot(
                Request::get("/api/recipes/search")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Reaches the search handler, which fails on the missing database.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
