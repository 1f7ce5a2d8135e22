//! Recipe API 模块
//!
//! 菜谱 CRUD 加收藏 / 购物车动作接口。读取接口对匿名开放；
//! 写入和动作接口通过 [`crate::auth::CurrentUser`] 提取器要求登录。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/recipes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/download_shopping_cart", get(handler::download_shopping_cart))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .patch(handler::update)
                .delete(handler::delete),
        )
        .route(
            "/{id}/favorite",
            post(handler::favorite_add).delete(handler::favorite_remove),
        )
        .route(
            "/{id}/shopping_cart",
            post(handler::cart_add).delete(handler::cart_remove),
        )
}
