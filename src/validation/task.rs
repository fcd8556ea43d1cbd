use crate::db::enums::UserRole;
use crate::error::AppError;

pub fn validate_create_task(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::validation("Task title is required"));
    }
    Ok(())
}

pub fn validate_assignee_role(role: UserRole) -> Result<(), AppError> {
    if role != UserRole::TeamMember {
        return Err(AppError::validation(
            "Tasks can only be assigned to Team Members",
        ));
    }
    Ok(())
}
