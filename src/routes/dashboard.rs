use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::{
    AppState,
    db::models::{api::ApiResponse, auth::AuthUser},
    error::AppError,
    services::{DashboardService, RequestContext},
};

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let stats = DashboardService::stats(&mut conn, &ctx)?;

    Ok((StatusCode::OK, Json(ApiResponse::success(stats, "Dashboard stats retrieved successfully"))))
}
