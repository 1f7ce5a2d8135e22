//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Ingredient entity (食材)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    /// Free-text unit string, e.g. "g", "pieces"
    pub measurement_unit: String,
}

/// Bulk-import entry (`import-ingredients` command)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientSeed {
    pub name: String,
    pub measurement_unit: String,
}
