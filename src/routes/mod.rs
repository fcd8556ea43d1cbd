pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod meetings;
pub mod projects;
pub mod tasks;

use crate::{
    AppState, cache,
    db::models::api::ApiResponse,
    middleware::{
        auth::{auth_middleware, require_admin},
        request_tracking::request_tracking_middleware,
    },
};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Serialize;
use std::sync::Arc;

pub fn create_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/profile", get(auth::get_profile))
        .route("/auth/profile/edit", put(auth::edit_profile))
        .route("/auth/me", get(auth::me))
        .route("/auth/users", get(auth::list_users))
        .route("/auth/allUsers", get(auth::list_users))
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route("/project", get(projects::get_projects))
        .route("/project/leaders", get(projects::get_project_leaders))
        .route("/project/details/:project_id", get(projects::get_project_details))
        .route("/project/createProject", post(projects::create_project))
        .route("/project/updateProject/:project_id", put(projects::update_project))
        .route("/project/updateStatus/:project_id", put(projects::update_project_status))
        .route("/meetings", get(meetings::get_meetings))
        .route("/meetings", post(meetings::create_meeting))
        .route("/meetings/:meeting_id", delete(meetings::delete_meeting))
        .merge(admin_routes())
        .merge(task_routes())
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(request_tracking_middleware))
        .with_state(state)
}

/// Admin console. Expects `AuthUser` in the request extensions and refuses
/// non-Admins before any handler extracts the body.
pub fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/projects", get(admin::get_all_projects))
        .route("/admin/projects/:project_id", get(admin::get_project_details))
        .route("/admin/users", get(admin::get_all_users))
        .route("/admin/users/role", put(admin::update_user_role))
        .route_layer(from_fn(require_admin))
}

/// Expects `AuthUser` in the request extensions.
pub fn task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(tasks::get_tasks))
        .route("/tasks/createTask", post(tasks::create_task))
        .route("/tasks/allTasks", get(tasks::get_all_tasks))
        .route("/tasks/updateTask/:task_id", put(tasks::update_task))
        .route("/tasks/submit/:task_id", put(tasks::submit_task))
        .route("/tasks/members", get(tasks::get_team_members))
        .route("/tasks/projectName", get(tasks::get_project_name))
}

#[derive(Serialize)]
struct HealthStatus {
    database: bool,
    redis: bool,
}

/// Liveness plus reachability of the two backing stores.
async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = state.db.get().is_ok();
    let redis = cache::redis_health_check(&state.redis).await.unwrap_or(false);

    let status = HealthStatus { database, redis };
    if database && redis {
        (StatusCode::OK, Json(ApiResponse::success(status, "Service is healthy")))
    } else {
        tracing::warn!(database, redis, "Health check degraded");
        let mut response = ApiResponse::success(status, "Service is degraded");
        response.success = false;
        response.code = StatusCode::SERVICE_UNAVAILABLE.as_u16();
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
