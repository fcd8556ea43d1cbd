use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::AppError;

pub fn validate_create_meeting(
    title: &str,
    scheduled_time: DateTime<Utc>,
    now: DateTime<Utc>,
    participants: &[Uuid],
) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Meeting title is required"));
    }
    if scheduled_time < now {
        return Err(AppError::validation(
            "Meeting cannot be scheduled in the past",
        ));
    }
    if participants.is_empty() {
        return Err(AppError::validation(
            "At least one participant is required",
        ));
    }
    Ok(())
}
