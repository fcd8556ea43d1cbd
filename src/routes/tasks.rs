use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState,
    db::models::{
        api::ApiResponse,
        auth::AuthUser,
        task::{CreateTaskRequest, TaskListQuery, UpdateTaskRequest},
    },
    error::AppError,
    services::{RequestContext, TasksService},
    validation::ValidatedJson,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectNameQuery {
    pub project_id: Uuid,
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let task = TasksService::create(&mut conn, &ctx, &payload)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(task, "Task created successfully"))))
}

pub async fn get_tasks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TaskListQuery>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let tasks = TasksService::list(&mut conn, &ctx, &params)?;
    let total = tasks.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(tasks, total, "Tasks retrieved successfully"))))
}

pub async fn get_all_tasks(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let projects = TasksService::all_for_leader(&mut conn, &ctx)?;
    let total = projects.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(projects, total, "Tasks retrieved successfully"))))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let task = TasksService::update(&mut conn, &ctx, task_id, &payload)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(task, "Task updated successfully"))))
}

pub async fn submit_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    TasksService::ensure_submitter(&ctx)?;

    let mut conn = state.db.get()?;
    let task = TasksService::submit(&mut conn, &ctx, task_id)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(task, "Task submitted successfully"))))
}

pub async fn get_team_members(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let members = TasksService::members(&mut conn, &ctx)?;
    let total = members.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(members, total, "Team members retrieved successfully"))))
}

pub async fn get_project_name(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProjectNameQuery>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let project = TasksService::project_name(&mut conn, &ctx, params.project_id)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(project, "Project name retrieved successfully"))))
}
