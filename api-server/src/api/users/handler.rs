//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use shared::PaginatedResponse;
use shared::models::{SetPasswordRequest, SubscriptionRead, UserCreate, UserRead};

use crate::api::convert;
use crate::api::pagination::PageQuery;
use crate::auth::{CurrentUser, MaybeUser, password};
use crate::core::ServerState;
use crate::db::repository::{subscription, user};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 用户列表默认每页数量 (按 id 升序)
const PAGE_SIZE: u32 = 6;

/// 订阅列表默认每页数量 (按订阅时间升序)
const SUBSCRIPTION_PAGE_SIZE: u32 = 6;

fn validate_password(value: &str) -> AppResult<()> {
    if value.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }
    if value.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

/// POST /api/users - 注册新用户
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserRead>)> {
    validate_email(&payload.email)?;
    validate_required_text(&payload.username, "username", MAX_NAME_LEN)?;
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_password(&payload.password)?;

    if user::find_by_email(&state.pool, &payload.email).await?.is_some() {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let password_hash = password::hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let created = user::create(&state.pool, &payload, &password_hash).await?;

    tracing::info!(user_id = %created.id, email = %created.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(UserRead::from_user(&created, false)),
    ))
}

/// GET /api/users - 用户列表 (分页)
pub async fn list(
    State(state): State<ServerState>,
    viewer: MaybeUser,
    Query(page_query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<UserRead>>> {
    let (page, limit) = page_query.resolve(PAGE_SIZE);
    let offset = PageQuery::offset(page, limit);

    let total = user::count_all(&state.pool).await?;
    let rows = user::find_all(&state.pool, limit as i64, offset).await?;

    let mut users = Vec::with_capacity(rows.len());
    for row in &rows {
        users.push(convert::user_read(&state.pool, row, viewer.id()).await?);
    }

    Ok(Json(PaginatedResponse::new(users, total as u64, page, limit)))
}

/// GET /api/users/me - 当前用户资料
pub async fn me(State(state): State<ServerState>, user: CurrentUser) -> AppResult<Json<UserRead>> {
    let row = user::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", user.id))
        })?;
    Ok(Json(UserRead::from_user(&row, false)))
}

/// POST /api/users/set_password - 修改密码
pub async fn set_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SetPasswordRequest>,
) -> AppResult<StatusCode> {
    let row = user::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", user.id))
        })?;

    let current_valid = password::verify_password(&payload.current_password, &row.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;
    if !current_valid {
        return Err(AppError::validation("Current password is incorrect"));
    }

    validate_password(&payload.new_password)?;

    let new_hash = password::hash_password(&payload.new_password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
    user::update_password(&state.pool, user.id, &new_hash).await?;

    tracing::info!(user_id = %user.id, "Password changed");

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, serde::Deserialize)]
pub struct SubscriptionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<i64>,
}

/// GET /api/users/subscriptions?recipes_limit=N - 已关注用户列表 (分页)
pub async fn subscriptions(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<SubscriptionsQuery>,
) -> AppResult<Json<PaginatedResponse<SubscriptionRead>>> {
    let page_query = PageQuery {
        page: query.page,
        limit: query.limit,
    };
    let (page, limit) = page_query.resolve(SUBSCRIPTION_PAGE_SIZE);
    let offset = PageQuery::offset(page, limit);

    let total = subscription::count_following(&state.pool, user.id).await?;
    let rows = subscription::find_following(&state.pool, user.id, limit as i64, offset).await?;

    let mut followed = Vec::with_capacity(rows.len());
    for row in &rows {
        followed
            .push(convert::subscription_read(&state.pool, row, user.id, query.recipes_limit).await?);
    }

    Ok(Json(PaginatedResponse::new(
        followed,
        total as u64,
        page,
        limit,
    )))
}

/// GET /api/users/:id - 用户资料
pub async fn get_by_id(
    State(state): State<ServerState>,
    viewer: MaybeUser,
    Path(id): Path<i64>,
) -> AppResult<Json<UserRead>> {
    let row = user::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", id))
    })?;
    Ok(Json(convert::user_read(&state.pool, &row, viewer.id()).await?))
}

#[derive(Debug, serde::Deserialize)]
pub struct SubscribeQuery {
    pub recipes_limit: Option<i64>,
}

/// POST /api/users/:id/subscribe - 关注用户
pub async fn subscribe(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<SubscribeQuery>,
) -> AppResult<(StatusCode, Json<SubscriptionRead>)> {
    let followed = user::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", id))
    })?;

    if followed.id == user.id {
        return Err(AppError::new(ErrorCode::SelfSubscription));
    }
    if subscription::exists(&state.pool, user.id, followed.id).await? {
        return Err(AppError::new(ErrorCode::AlreadySubscribed));
    }

    subscription::create(&state.pool, user.id, followed.id).await?;

    tracing::info!(user_id = %user.id, following_id = %followed.id, "Subscription created");

    let body =
        convert::subscription_read(&state.pool, &followed, user.id, query.recipes_limit).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// DELETE /api/users/:id/subscribe - 取消关注
pub async fn unsubscribe(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let followed = user::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", id))
    })?;

    if !subscription::exists(&state.pool, user.id, followed.id).await? {
        return Err(AppError::new(ErrorCode::NotSubscribed));
    }

    subscription::delete(&state.pool, user.id, followed.id).await?;

    tracing::info!(user_id = %user.id, following_id = %followed.id, "Subscription removed");

    Ok(StatusCode::NO_CONTENT)
}
