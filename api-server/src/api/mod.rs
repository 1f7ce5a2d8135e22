//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 登录/登出接口
//! - [`users`] - 用户注册、资料、订阅接口
//! - [`tags`] - 标签查询接口
//! - [`ingredients`] - 食材查询接口
//! - [`recipes`] - 菜谱 CRUD、收藏、购物车接口

pub mod convert;
pub mod pagination;

pub mod auth;
pub mod health;
pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::AppResult;

/// 合并所有业务路由
pub fn router() -> Router<ServerState> {
    health::router()
        .merge(auth::router())
        .merge(users::router())
        .merge(tags::router())
        .merge(ingredients::router())
        .merge(recipes::router())
}
