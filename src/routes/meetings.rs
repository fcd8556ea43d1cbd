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
    db::models::{api::ApiResponse, auth::AuthUser, meeting::CreateMeetingRequest},
    error::AppError,
    services::{MeetingsService, RequestContext},
    validation::ValidatedJson,
};

pub async fn get_meetings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let meetings = MeetingsService::list(&mut conn, &ctx)?;
    let total = meetings.len();

    Ok((StatusCode::OK, Json(ApiResponse::list(meetings, total, "Meetings retrieved successfully"))))
}

pub async fn create_meeting(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateMeetingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    let meeting = MeetingsService::create(&mut conn, &ctx, &payload)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::created(meeting, "Meeting scheduled successfully"))))
}

pub async fn delete_meeting(
    State(state): State<Arc<AppState>>,
    Path(meeting_id): Path<Uuid>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let ctx = RequestContext::from(&user);
    let mut conn = state.db.get()?;
    MeetingsService::delete(&mut conn, &ctx, meeting_id)?;

    Ok((StatusCode::OK, Json(ApiResponse::<()>::ok("Meeting deleted successfully"))))
}
