use chrono::NaiveDate;

use crate::db::enums::UserRole;
use crate::error::AppError;

pub fn validate_create_project(
    name: &str,
    deadline: NaiveDate,
    today: NaiveDate,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Project name is required"));
    }
    if deadline < today {
        return Err(AppError::validation("Deadline cannot be in the past"));
    }
    Ok(())
}

pub struct UpdateProjectChanges<'a> {
    pub name: Option<&'a str>,
    pub description_present: bool,
    pub leader_present: bool,
    pub deadline: Option<NaiveDate>,
    pub file_count: usize,
}

pub fn validate_update_project(changes: &UpdateProjectChanges) -> Result<(), AppError> {
    if changes.name.is_none()
        && !changes.description_present
        && !changes.leader_present
        && changes.deadline.is_none()
        && changes.file_count == 0
    {
        return Err(AppError::validation("No update data provided"));
    }
    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Project name cannot be empty"));
        }
    }
    Ok(())
}

/// A project leader reference must point at a user holding that role.
pub fn validate_leader_role(role: UserRole) -> Result<(), AppError> {
    if role != UserRole::ProjectLeader {
        return Err(AppError::validation(
            "Selected user is not a Project Leader",
        ));
    }
    Ok(())
}
