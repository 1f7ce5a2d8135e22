//! Authentication Handlers
//!
//! Handles login and logout; tokens are JWT Bearer tokens.

use std::time::Duration;

use axum::{Json, extract::State};

use shared::models::{LoginRequest, LoginResponse};

use crate::auth::{CurrentUser, password};
use crate::core::ServerState;
use crate::db::repository::user;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/token/login - 登录，返回 JWT
///
/// Authenticates email + password and returns a Bearer token.
/// Uses a unified error message to prevent email enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let account = user::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let account = match account {
        Some(account) => {
            let password_valid = password::verify_password(&req.password, &account.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            account
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    // Generate JWT token
    let jwt_service = state.get_jwt_service();
    let token = jwt_service
        .generate_token(account.id, &account.email, &account.username)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %account.id,
        email = %account.email,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse { token }))
}

/// POST /api/auth/token/logout - 登出
///
/// Tokens are stateless; logout is recorded for the audit trail and the
/// client discards its token.
pub async fn logout(user: CurrentUser) -> AppResult<Json<()>> {
    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        "User logged out"
    );

    Ok(Json(()))
}
