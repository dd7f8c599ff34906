use catalog_core::CanonicalRecipe;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Queryable, Selectable, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub cuisine: Option<String>,
    pub title: String,
    pub rating: Option<f64>,
    /// Minutes
    pub prep_time: Option<i32>,
    /// Minutes
    pub cook_time: Option<i32>,
    /// Minutes
    pub total_time: Option<i32>,
    pub description: Option<String>,
    /// Nutrient name -> amount, e.g. `{"calories": "389 kcal"}`
    #[schema(value_type = Option<Object>)]
    pub nutrients: Option<serde_json::Value>,
    pub serves: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub cuisine: Option<&'a str>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub serves: Option<&'a str>,
    pub nutrients: Option<serde_json::Value>,
}

impl<'a> From<&'a CanonicalRecipe> for NewRecipe<'a> {
    fn from(recipe: &'a CanonicalRecipe) -> Self {
        Self {
            title: &recipe.title,
            description: recipe.description.as_deref(),
            cuisine: recipe.cuisine.as_deref(),
            rating: recipe.rating,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            serves: recipe.serves.as_deref(),
            nutrients: recipe.nutrients.clone(),
        }
    }
}
