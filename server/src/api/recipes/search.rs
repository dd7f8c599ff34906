use super::like_pattern;
use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Recipe;
use crate::raw_sql::{CALORIES_EXPR, TOTAL_TIME_EXPR};
use crate::schema::recipes;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{parse_filter, Filter, FilterOp};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchRecipesParams {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the cuisine
    pub cuisine: Option<String>,
    /// Rating filter, e.g. `>=4.5`
    pub rating: Option<String>,
    /// Total time filter in minutes, e.g. `<=30`
    pub total_time: Option<String>,
    /// Calories filter, e.g. `<400`
    pub calories: Option<String>,
}

/// Echo of the parameters that were supplied with a value.
#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct AppliedFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchRecipesResponse {
    pub success: bool,
    pub filters: AppliedFilters,
    pub count: usize,
    pub data: Vec<Recipe>,
}

/// Parsed form of the search parameters. Numeric filters that don't parse
/// are dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<Filter>,
    pub total_time: Option<Filter>,
    pub calories: Option<Filter>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl SearchRecipesParams {
    pub fn applied(&self) -> AppliedFilters {
        AppliedFilters {
            title: non_empty(&self.title).map(str::to_string),
            cuisine: non_empty(&self.cuisine).map(str::to_string),
            rating: non_empty(&self.rating).map(str::to_string),
            total_time: non_empty(&self.total_time).map(str::to_string),
            calories: non_empty(&self.calories).map(str::to_string),
        }
    }

    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria {
            title: non_empty(&self.title).map(str::to_string),
            cuisine: non_empty(&self.cuisine).map(str::to_string),
            rating: non_empty(&self.rating).and_then(parse_filter),
            total_time: non_empty(&self.total_time).and_then(parse_filter),
            calories: non_empty(&self.calories).and_then(parse_filter),
        }
    }
}

fn build_query(criteria: &SearchCriteria) -> recipes::BoxedQuery<'static, Pg> {
    let mut query = recipes::table.into_boxed();

    if let Some(title) = &criteria.title {
        query = query.filter(recipes::title.ilike(like_pattern(title)));
    }
    if let Some(cuisine) = &criteria.cuisine {
        query = query.filter(recipes::cuisine.ilike(like_pattern(cuisine)));
    }
    if let Some(rating) = criteria.rating {
        let v = rating.value;
        query = match rating.op {
            FilterOp::Eq => query.filter(recipes::rating.eq(v)),
            FilterOp::Gt => query.filter(recipes::rating.gt(v)),
            FilterOp::Ge => query.filter(recipes::rating.ge(v)),
            FilterOp::Lt => query.filter(recipes::rating.lt(v)),
            FilterOp::Le => query.filter(recipes::rating.le(v)),
        };
    }
    if let Some(total_time) = criteria.total_time {
        query = query.filter(crate::numeric_filter!(TOTAL_TIME_EXPR, total_time));
    }
    if let Some(calories) = criteria.calories {
        query = query.filter(crate::numeric_filter!(CALORIES_EXPR, calories));
    }

    query.order((recipes::rating.desc().nulls_last(), recipes::title.asc()))
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchRecipesParams),
    responses(
        (status = 200, description = "Matching recipes", body = SearchRecipesResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchRecipesParams>,
) -> Response {
    let criteria = params.criteria();
    let mut conn = get_conn!(state);

    let data: Vec<Recipe> = match build_query(&criteria)
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => return crate::api::internal_error(&state, "Failed to search recipes", e),
    };

    tracing::debug!(?criteria, count = data.len(), "Recipe search");

    (
        StatusCode::OK,
        Json(SearchRecipesResponse {
            success: true,
            filters: params.applied(),
            count: data.len(),
            data,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{app, test_support::unconnected_state};
    use crate::config::Environment;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use diesel::debug_query;
    use tower::ServiceExt;

    fn params(rating: &str, total_time: &str, calories: &str) -> SearchRecipesParams {
        SearchRecipesParams {
            title: Some("pie".to_string()),
            cuisine: Some(String::new()),
            rating: Some(rating.to_string()),
            total_time: Some(total_time.to_string()),
            calories: Some(calories.to_string()),
        }
    }

    #[test]
    fn test_unparsable_filters_are_ignored() {
        let criteria = params("abc", "30", "lots").criteria();
        assert_eq!(criteria.title.as_deref(), Some("pie"));
        assert_eq!(criteria.cuisine, None);
        assert_eq!(criteria.rating, None);
        assert_eq!(
            criteria.total_time,
            Some(Filter {
                op: FilterOp::Eq,
                value: 30.0
            })
        );
        assert_eq!(criteria.calories, None);
    }

    #[test]
    fn test_applied_filters_echo_raw_values() {
        let applied = params("abc", ">=4", "").applied();
        assert_eq!(applied.rating.as_deref(), Some("abc"));
        assert_eq!(applied.total_time.as_deref(), Some(">=4"));
        assert_eq!(applied.cuisine, None);
        assert_eq!(applied.calories, None);

        let json = serde_json::to_value(&applied).unwrap();
        assert!(json.get("cuisine").is_none());
    }

    #[test]
    fn test_query_shape() {
        let criteria = params(">=4.5", "<=30", "<400").criteria();
        let sql = debug_query::<Pg, _>(&build_query(&criteria)).to_string();

        assert!(sql.contains("ILIKE"));
        assert!(sql.contains("recipes.total_time <= "));
        assert!(sql.contains("REGEXP_REPLACE"));
        assert!(sql.contains("NULLS LAST"));
        assert!(!sql.contains("'%pie%'"), "search text must be bound: {sql}");
    }

    #[tokio::test]
    async fn test_database_failure_detail_only_in_development() {
        for (environment, expected) in [
            (Environment::Production, Some("Internal server error")),
            (Environment::Development, None),
        ] {
            let response = app(unconnected_state(environment))
                .oneshot(
                    Request::get("/api/recipes/search?title=pie")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["message"], "Database connection failed");
            match expected {
                Some(masked) => assert_eq!(body["error"], masked),
                None => assert_ne!(body["error"], "Internal server error"),
            }
        }
    }
}
