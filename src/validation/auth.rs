use crate::db::enums::UserRole;
use crate::error::AppError;

pub fn validate_register_request(
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    if email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(AppError::validation("Invalid email format"));
    }

    if password.len() < 6 {
        return Err(AppError::validation(
            "Password must be at least 6 characters",
        ));
    }

    // Admin accounts are provisioned out of band, never self-registered.
    if !role.is_assignable() {
        return Err(AppError::validation("Invalid role"));
    }

    Ok(())
}

pub fn validate_login_request(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() {
        return Err(AppError::validation("Email is required"));
    }

    if password.trim().is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    Ok(())
}

pub struct UpdateProfileChanges<'a> {
    pub name: Option<&'a str>,
    pub password: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
}

pub fn validate_update_profile(changes: &UpdateProfileChanges) -> Result<(), AppError> {
    if changes.name.is_none() && changes.password.is_none() && changes.profile_picture.is_none() {
        return Err(AppError::validation("No update data provided"));
    }

    if let Some(name) = changes.name {
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
    }

    if let Some(password) = changes.password {
        if password.len() < 6 {
            return Err(AppError::validation(
                "Password must be at least 6 characters",
            ));
        }
    }

    Ok(())
}

/// Only Manager, Project Leader and Team Member can be handed out.
pub fn validate_role_change(new_role: &str) -> Result<UserRole, AppError> {
    match new_role.parse::<UserRole>() {
        Ok(role) if role.is_assignable() => Ok(role),
        _ => Err(AppError::validation("Invalid role")),
    }
}
