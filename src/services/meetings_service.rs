use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::{
    db::enums::UserRole,
    db::models::meeting::{CreateMeetingRequest, Meeting, NewMeeting},
    db::repositories::{meetings::MeetingsRepo, users::UsersRepo},
    error::AppError,
    services::context::RequestContext,
    services::permissions::{Operation, authorize},
    validation::meeting::validate_create_meeting,
};

pub struct MeetingsService;

impl MeetingsService {
    /// Admins see every meeting; everyone else sees the ones they created or
    /// were invited to.
    pub fn list(conn: &mut PgConnection, ctx: &RequestContext) -> Result<Vec<Meeting>, AppError> {
        let meetings = match ctx.role {
            UserRole::Admin => MeetingsRepo::list_all(conn)?,
            _ => MeetingsRepo::list_for_user(conn, ctx.user_id)?,
        };
        Ok(meetings)
    }

    pub fn create(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &CreateMeetingRequest,
    ) -> Result<Meeting, AppError> {
        authorize(ctx, Operation::ScheduleMeeting)?;
        validate_create_meeting(&req.title, req.scheduled_time, Utc::now(), &req.participants)?;

        let mut participants = req.participants.clone();
        participants.sort_unstable();
        participants.dedup();

        let known = UsersRepo::find_basic_by_ids(conn, &participants)?;
        if known.len() != participants.len() {
            return Err(AppError::validation("Unknown participant"));
        }

        let new_meeting = NewMeeting {
            title: req.title.trim().to_string(),
            scheduled_time: req.scheduled_time,
            zoom_join_link: req.zoom_join_link.clone(),
            participants,
            created_by: ctx.user_id,
        };
        let meeting = MeetingsRepo::insert(conn, &new_meeting)?;

        tracing::info!(
            meeting_id = %meeting.id,
            created_by = %ctx.user_id,
            participants = meeting.participants.len(),
            "Meeting scheduled"
        );
        Ok(meeting)
    }

    pub fn delete(conn: &mut PgConnection, ctx: &RequestContext, meeting_id: Uuid) -> Result<(), AppError> {
        let meeting = MeetingsRepo::find_by_id(conn, meeting_id)?
            .ok_or_else(|| AppError::not_found("Meeting"))?;
        authorize(
            ctx,
            Operation::DeleteMeeting {
                created_by: meeting.created_by,
            },
        )?;

        MeetingsRepo::delete_by_id(conn, meeting.id)?;
        tracing::info!(meeting_id = %meeting.id, user_id = %ctx.user_id, "Meeting deleted");
        Ok(())
    }
}
