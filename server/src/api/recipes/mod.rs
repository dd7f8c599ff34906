pub mod get;
pub mod list;
pub mod search;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes))
        .route("/search", get(search::search_recipes))
        .route("/{id}", get(get::get_recipe))
}

/// `%`, `_` and `\` are literal in user search text.
pub(crate) fn like_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_recipes, search::search_recipes, get::get_recipe),
    components(schemas(
        list::ListRecipesResponse,
        search::SearchRecipesResponse,
        search::AppliedFilters,
        get::RecipeResponse,
    ))
)]
pub struct ApiDoc;
