use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::db::enums::UserRole;
use crate::error::AppError;
use crate::utils::AssetUrlHelper;
use crate::validation::rules::{validate_asset_path, validate_password_strength};

// User models
#[derive(Queryable, Selectable, Clone, Debug)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub profile_picture: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The authenticated caller, inserted into request extensions by the auth
/// middleware and cached in Redis.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            profile_picture: user.profile_picture,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::auth("Unauthorized"))
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub role: UserRole,

    #[validate(custom(function = "validate_asset_path"))]
    pub profile_picture: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserInfo,
}

#[derive(Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: Option<String>,

    #[validate(custom(function = "validate_asset_path"))]
    pub profile_picture: Option<String>,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub user_id: Uuid,
    /// Kept as text so an unknown role is reported as `Invalid role` once the
    /// caller has passed the Admin check.
    pub new_role: String,
}

/// Full view of a user, as returned by profile endpoints.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
    pub assigned_projects: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl UserInfo {
    pub fn from_user(user: User, assigned_projects: Vec<Uuid>, assets: &AssetUrlHelper) -> Self {
        Self {
            profile_picture: user.get_processed_profile_picture(assets),
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            assigned_projects,
            created_at: user.created_at,
        }
    }
}

/// `name email` projection used when embedding users in project and task
/// payloads.
#[derive(Serialize, Deserialize, Clone, Debug, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserBasicInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Directory listing entry (`name role profilePicture`).
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserDirectoryEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub profile_picture: Option<String>,
}

impl UserDirectoryEntry {
    pub fn from_user(user: &User, assets: &AssetUrlHelper) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            profile_picture: user.get_processed_profile_picture(assets),
        }
    }
}

impl User {
    pub fn get_processed_profile_picture(&self, assets: &AssetUrlHelper) -> Option<String> {
        self.profile_picture
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| assets.process_url(path))
    }
}
