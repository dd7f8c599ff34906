use crate::api::ErrorResponse;
use crate::get_conn;
use crate::models::Recipe;
use crate::raw_sql::order_clause;
use crate::schema::recipes;
use crate::store::count_recipes;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Columns the listing may be sorted by. Anything else falls back to rating.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Title,
    #[default]
    Rating,
    PrepTime,
    CookTime,
    TotalTime,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(SortColumn::Id),
            "title" => Some(SortColumn::Title),
            "rating" => Some(SortColumn::Rating),
            "prep_time" => Some(SortColumn::PrepTime),
            "cook_time" => Some(SortColumn::CookTime),
            "total_time" => Some(SortColumn::TotalTime),
            "created_at" => Some(SortColumn::CreatedAt),
            "updated_at" => Some(SortColumn::UpdatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Title => "title",
            SortColumn::Rating => "rating",
            SortColumn::PrepTime => "prep_time",
            SortColumn::CookTime => "cook_time",
            SortColumn::TotalTime => "total_time",
            SortColumn::CreatedAt => "created_at",
            SortColumn::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Raw query parameters. Kept as strings so malformed values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesParams {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<String>,
    /// Items per page (default: 10, clamped to 1..=100)
    pub limit: Option<String>,
    /// One of id, title, rating, prep_time, cook_time, total_time,
    /// created_at, updated_at (default: rating)
    pub sort_by: Option<String>,
    /// ASC or DESC (default: DESC)
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub sort: SortColumn,
    pub order: SortOrder,
}

impl Pagination {
    pub fn from_params(params: &ListRecipesParams) -> Self {
        let page = parse_int(params.page.as_deref()).unwrap_or(1).max(1);
        let limit = parse_int(params.limit.as_deref())
            .unwrap_or(DEFAULT_LIMIT)
            .clamp(1, MAX_LIMIT);
        let sort = params
            .sort_by
            .as_deref()
            .and_then(SortColumn::parse)
            .unwrap_or_default();
        let order = params
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default();

        Self {
            page,
            limit,
            sort,
            order,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        (total + self.limit - 1) / self.limit
    }
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value?.trim().parse().ok()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRecipesResponse {
    pub success: bool,
    pub page: i64,
    pub limit: i64,
    /// Total number of recipes in the catalog
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
    pub data: Vec<Recipe>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Page of recipes", body = ListRecipesResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> Response {
    let pagination = Pagination::from_params(&params);
    let mut conn = get_conn!(state);

    let total = match count_recipes(&mut conn) {
        Ok(n) => n,
        Err(e) => return crate::api::internal_error(&state, "Failed to fetch recipes", e),
    };

    let data: Vec<Recipe> = match recipes::table
        .select(Recipe::as_select())
        .order(order_clause(
            pagination.sort.as_str(),
            pagination.order.as_sql(),
            pagination.sort == SortColumn::Rating,
        ))
        .limit(pagination.limit)
        .offset(pagination.offset())
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(e) => return crate::api::internal_error(&state, "Failed to fetch recipes", e),
    };

    let total_pages = pagination.total_pages(total);

    (
        StatusCode::OK,
        Json(ListRecipesResponse {
            success: true,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
            data,
        }),
    )
        .into_response()
}
