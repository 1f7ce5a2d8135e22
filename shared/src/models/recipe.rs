//! Recipe Models
//!
//! The write models (`RecipeCreate` / `RecipeUpdate`) and the read model
//! (`RecipeRead`) are distinct types: handlers pick one by operation kind
//! instead of switching serializers at runtime.

use serde::{Deserialize, Serialize};

use super::tag::Tag;
use super::user::UserRead;

/// Recipe row (菜谱)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Recipe {
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    /// Relative media path, e.g. "recipes/images/<uuid>.jpg"
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
    pub created_at: i64,
}

/// One ingredient entry in a recipe write payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub id: i64,
    pub amount: i64,
}

/// Create recipe payload
///
/// `image` is a base64 data URL; `tags` are tag IDs; `ingredients` pair
/// ingredient IDs with amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeCreate {
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
    pub image: String,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Update recipe payload
///
/// Scalar fields are optional (patch semantics); the tag and ingredient
/// sets are required and replace the existing sets entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeUpdate {
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
    /// New base64 image; the stored image is kept when absent
    pub image: Option<String>,
    pub tags: Vec<i64>,
    pub ingredients: Vec<IngredientAmount>,
}

/// Resolved ingredient as nested in the read representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeIngredientRead {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

/// Full read representation (list and detail)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRead {
    pub id: i64,
    pub author: UserRead,
    pub name: String,
    /// Media URL, e.g. "/media/recipes/images/<uuid>.jpg"
    pub image: String,
    pub text: String,
    pub ingredients: Vec<RecipeIngredientRead>,
    pub tags: Vec<Tag>,
    pub cooking_time: i64,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Summary view (favorite/cart responses, subscription recipe lists)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

/// One aggregated shopping-list line: total amount per distinct
/// (ingredient name, measurement unit) pair across the user's cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CartIngredient {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}
