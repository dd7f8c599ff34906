use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized recipe, ready to be written to the catalog store.
///
/// `title` is always non-empty and trimmed. Durations are whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecipe {
    pub title: String,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    /// Free text such as "4 servings"; never parsed as a number
    pub serves: Option<String>,
    /// Nutrient name -> amount, kept structured so sub-fields stay queryable
    pub nutrients: Option<Value>,
}
