use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::{AuthUser, UpdateRoleRequest, UserDirectoryEntry},
    },
    error::AppError,
    services::{AdminService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_all_projects(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let projects = AdminService::list_projects(&mut conn, &ctx, &state.asset_helper)?;
    let total = projects.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(projects, total, "Projects retrieved successfully"))))
}

pub async fn get_project_details(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let details = AdminService::project_details(&mut conn, &ctx, project_id, &state.asset_helper)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(details, "Project retrieved successfully"))))
}

pub async fn get_all_users(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let users = AdminService::list_users(&mut conn, &ctx, &state.asset_helper)?;
    let total = users.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(users, total, "Users retrieved successfully"))))
}

pub async fn update_user_role(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateRoleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let new_role = AdminService::prepare_role_change(&ctx, &payload)?;

    // Cached snapshots carry the role. Outdate them before the write so a
    // failure here leaves the role unchanged, and again after commit for
    // snapshots built from rows read in between.
    state.user_cache.invalidate_user(payload.user_id).await?;

    let updated = {
        let mut conn = state.db.get()?;
        AdminService::change_role(&mut conn, &ctx, payload.user_id, new_role)?
    };

    if let Err(e) = state.user_cache.invalidate_user(updated.id).await {
        tracing::error!(user_id = %updated.id, "Failed to invalidate cached user after role change: {}", e);
    }

    let entry = UserDirectoryEntry::from_user(&updated, &state.asset_helper);
    Ok((StatusCode::OK, Json(ApiResponse::success(entry, "User role updated successfully"))))
}
