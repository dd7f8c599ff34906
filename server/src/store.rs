//! Diesel-backed persistence for the import command.

use catalog_core::{CanonicalRecipe, RecipeSink, SinkError};
use diesel::prelude::*;

use crate::models::NewRecipe;
use crate::schema::recipes;

/// Writes each recipe in its own statement, so one failed insert leaves the
/// rows before it committed.
pub struct DieselRecipeStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> DieselRecipeStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl RecipeSink for DieselRecipeStore<'_> {
    fn insert(&mut self, recipe: &CanonicalRecipe) -> Result<i32, SinkError> {
        diesel::insert_into(recipes::table)
            .values(NewRecipe::from(recipe))
            .returning(recipes::id)
            .get_result(&mut *self.conn)
            .map_err(|e| SinkError::new(e.to_string()))
    }
}

pub fn count_recipes(conn: &mut PgConnection) -> QueryResult<i64> {
    recipes::table.count().get_result(conn)
}

pub fn delete_all_recipes(conn: &mut PgConnection) -> QueryResult<usize> {
    let deleted = diesel::delete(recipes::table).execute(conn)?;
    tracing::info!(deleted, "All existing recipes deleted");
    Ok(deleted)
}
