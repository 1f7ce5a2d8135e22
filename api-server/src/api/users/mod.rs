//! User API 模块
//!
//! 注册、资料查询与订阅接口。读取接口对匿名开放
//! (`is_subscribed` 恒为 false)，订阅操作要求登录。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::register))
        .route("/me", get(handler::me))
        .route("/set_password", post(handler::set_password))
        .route("/subscriptions", get(handler::subscriptions))
        .route("/{id}", get(handler::get_by_id))
        .route(
            "/{id}/subscribe",
            post(handler::subscribe).delete(handler::unsubscribe),
        )
}
