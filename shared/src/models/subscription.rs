//! Subscription Model
//!
//! Subscription join rows never surface directly through the API; the
//! read representation is the followed user annotated with recipes.

use serde::{Deserialize, Serialize};

use super::recipe::RecipeSummary;

/// Followed user annotated with their recipes
///
/// `recipes` is optionally truncated by the caller-supplied
/// `recipes_limit`; `recipes_count` is always the full count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRead {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}
