use chrono::Utc;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tokio::task;
use uuid::Uuid;

use crate::{
    db::models::api::error_codes,
    db::models::auth::{
        AuthUser, LoginRequest, NewUser, RegisterRequest, UpdateProfileRequest, User, UserChanges,
        UserDirectoryEntry, UserInfo,
    },
    db::repositories::users::UsersRepo,
    error::AppError,
    services::context::RequestContext,
    utils::AssetUrlHelper,
    validation::auth::{
        UpdateProfileChanges, validate_login_request, validate_register_request,
        validate_update_profile,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct UsersService;

impl UsersService {
    /// Hashes off the async runtime; bcrypt is deliberately slow.
    pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
        task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(AppError::from)
    }

    pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
        task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {}", e)))?
            .map_err(AppError::from)
    }

    pub fn register(
        conn: &mut PgConnection,
        req: &RegisterRequest,
        password_hash: String,
    ) -> Result<User, AppError> {
        validate_register_request(&req.name, &req.email, &req.password, req.role)?;

        if UsersRepo::exists_by_email(conn, &req.email)? {
            return Err(email_taken());
        }

        let new_user = NewUser {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_lowercase(),
            password_hash,
            role: req.role,
            profile_picture: req.profile_picture.clone(),
        };

        let user = UsersRepo::insert_user(conn, &new_user).map_err(|e| match e {
            // Lost the race against a concurrent registration.
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => email_taken(),
            other => AppError::from(other),
        })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Looks up the account for a login attempt. Unknown emails get the same
    /// error as a wrong password.
    pub fn find_for_login(conn: &mut PgConnection, req: &LoginRequest) -> Result<User, AppError> {
        validate_login_request(&req.email, &req.password)?;

        UsersRepo::find_by_email(conn, &req.email.trim().to_lowercase())?.ok_or_else(|| {
            tracing::warn!(email = %req.email, "Login failed - unknown email");
            AppError::auth(INVALID_CREDENTIALS)
        })
    }

    pub fn invalid_credentials() -> AppError {
        AppError::auth(INVALID_CREDENTIALS)
    }

    pub fn load_auth_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<AuthUser>, AppError> {
        Ok(UsersRepo::find_by_id(conn, user_id)?.map(AuthUser::from))
    }

    pub fn user_info(
        conn: &mut PgConnection,
        user: User,
        assets: &AssetUrlHelper,
    ) -> Result<UserInfo, AppError> {
        let assigned = UsersRepo::assigned_project_ids(conn, user.id)?;
        Ok(UserInfo::from_user(user, assigned, assets))
    }

    pub fn profile(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        assets: &AssetUrlHelper,
    ) -> Result<UserInfo, AppError> {
        let user = UsersRepo::find_by_id(conn, ctx.user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        Self::user_info(conn, user, assets)
    }

    /// `password_hash` is the already-hashed form of `req.password`.
    pub fn update_profile(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &UpdateProfileRequest,
        password_hash: Option<String>,
        assets: &AssetUrlHelper,
    ) -> Result<UserInfo, AppError> {
        validate_update_profile(&UpdateProfileChanges {
            name: req.name.as_deref(),
            password: req.password.as_deref(),
            profile_picture: req.profile_picture.as_deref(),
        })?;

        let changes = UserChanges {
            name: req.name.as_ref().map(|name| name.trim().to_string()),
            password_hash,
            profile_picture: req.profile_picture.clone(),
            updated_at: Some(Utc::now()),
        };

        let user = UsersRepo::update_user(conn, ctx.user_id, &changes)
            .optional()?
            .ok_or_else(|| AppError::not_found("User"))?;

        tracing::info!(user_id = %user.id, "Profile updated");
        Self::user_info(conn, user, assets)
    }

    /// Every user, for participant pickers.
    pub fn directory(
        conn: &mut PgConnection,
        assets: &AssetUrlHelper,
    ) -> Result<Vec<UserDirectoryEntry>, AppError> {
        let users = UsersRepo::list_all(conn)?;
        Ok(users
            .iter()
            .map(|user| UserDirectoryEntry::from_user(user, assets))
            .collect())
    }
}

fn email_taken() -> AppError {
    AppError::conflict_with_code(
        "Email address already exists",
        Some("email".to_string()),
        error_codes::USER_EMAIL_EXISTS,
    )
}
