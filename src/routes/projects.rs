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
        auth::AuthUser,
        project::{CreateProjectRequest, UpdateProjectRequest, UpdateProjectStatusRequest},
    },
    error::AppError,
    services::{ProjectsService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_projects(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let projects = ProjectsService::list_own(&mut conn, &ctx, &state.asset_helper)?;
    let total = projects.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(projects, total, "Projects retrieved successfully"))))
}

pub async fn get_project_leaders(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let leaders = ProjectsService::leaders(&mut conn, &ctx)?;
    let total = leaders.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(leaders, total, "Project leaders retrieved successfully"))))
}

pub async fn get_project_details(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let details = ProjectsService::details(&mut conn, &ctx, project_id, &state.asset_helper)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(details, "Project retrieved successfully"))))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let project = ProjectsService::create(&mut conn, &ctx, &payload, &state.asset_helper)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(project, "Project created successfully"))))
}

pub async fn update_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let project =
        ProjectsService::update(&mut conn, &ctx, project_id, &payload, &state.asset_helper)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(project, "Project updated successfully"))))
}

pub async fn update_project_status(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<Uuid>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProjectStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let project =
        ProjectsService::update_status(&mut conn, &ctx, project_id, &payload, &state.asset_helper)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(project, "Project status updated successfully"))))
}
