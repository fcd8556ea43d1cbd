use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    AppState, cache,
    db::models::{
        api::ApiResponse,
        auth::{AuthUser, LoginRequest, LoginResponse, RegisterRequest, UpdateProfileRequest, UserInfo},
    },
    error::AppError,
    middleware::auth::TokenSession,
    services::{RequestContext, UsersService},
    validation::{ValidatedJson, auth::validate_register_request},
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Checked here as well so invalid input never reaches bcrypt.
    validate_register_request(&payload.name, &payload.email, &payload.password, payload.role)?;

    let password_hash =
        UsersService::hash_password(payload.password.clone(), state.config.bcrypt_cost).await?;

    let mut conn = state.db.get()?;
    let user = UsersService::register(&mut conn, &payload, password_hash)?;
    let info = UserInfo::from_user(user, Vec::new(), &state.asset_helper);

    let response = ApiResponse::created(info, "User registered successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user = {
        let mut conn = state.db.get()?;
        UsersService::find_for_login(&mut conn, &payload)?
    };

    let is_valid =
        UsersService::verify_password(payload.password.clone(), user.password_hash.clone()).await?;
    if !is_valid {
        tracing::warn!(user_id = %user.id, "Login failed - invalid password");
        return Err(UsersService::invalid_credentials());
    }

    let auth_user = AuthUser::from(user.clone());
    let token = state.auth_service.generate_access_token(&auth_user)?;

    let mut conn = state.db.get()?;
    let user_info = UsersService::user_info(&mut conn, user, &state.asset_helper)?;

    tracing::info!(user_id = %auth_user.id, role = %auth_user.role, "Login successful");

    let login_data = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth_service.access_token_expires_in(),
        user: user_info,
    };

    Ok((StatusCode::OK, Json(ApiResponse::success(login_data, "Login successful"))))
}

/// Revokes the presented token for the rest of its lifetime.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<TokenSession>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    cache::revoke_token(&state.redis, &session.jti, session.remaining_secs()).await?;
    if let Err(e) = state.user_cache.invalidate_user(user.id).await {
        tracing::warn!(user_id = %user.id, "Failed to invalidate cached user: {}", e);
    }

    tracing::info!(user_id = %user.id, "Logout successful");
    Ok((StatusCode::OK, Json(ApiResponse::<()>::ok("Logout successful"))))
}

pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let profile = UsersService::profile(&mut conn, &ctx, &state.asset_helper)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(profile, "Profile retrieved successfully"))))
}

pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);

    let password_hash = match payload.password.clone() {
        Some(password) => Some(UsersService::hash_password(password, state.config.bcrypt_cost).await?),
        None => None,
    };

    let profile = {
        let mut conn = state.db.get()?;
        UsersService::update_profile(&mut conn, &ctx, &payload, password_hash, &state.asset_helper)?
    };
    if let Err(e) = state.user_cache.invalidate_user(user.id).await {
        tracing::warn!(user_id = %user.id, "Failed to invalidate cached user: {}", e);
    }

    Ok((StatusCode::OK, Json(ApiResponse::success(profile, "Profile updated successfully"))))
}

/// The caller as the auth layer sees it.
pub async fn me(user: AuthUser) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(user, "Current user retrieved successfully")))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.db.get()?;
    let users = UsersService::directory(&mut conn, &state.asset_helper)?;
    let total = users.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(users, total, "Users retrieved successfully"))))
}
