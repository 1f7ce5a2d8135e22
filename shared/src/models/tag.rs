//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity (标签)
///
/// Reference data: name, color and slug are each globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Hex color string, e.g. "#E26C2D"
    pub color: String,
    pub slug: String,
}
