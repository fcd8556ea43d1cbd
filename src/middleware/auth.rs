use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AppState, cache,
    config::AuthConfig,
    db::enums::UserRole,
    db::models::AuthUser,
    error::AppError,
    services::UsersService,
    services::context::RequestContext,
    services::permissions::{Operation, authorize},
};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub email: String,
    pub role: UserRole,
    pub exp: u64,
    pub iat: u64,
    pub jti: String, // token id, the revocation key
}

/// The token the current request was authenticated with.
#[derive(Debug, Clone)]
pub struct TokenSession {
    pub jti: String,
    pub expires_at: u64,
}

impl TokenSession {
    /// Seconds until the token expires on its own.
    pub fn remaining_secs(&self) -> u64 {
        self.expires_at.saturating_sub(now_secs())
    }
}

fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn access_token_expires_in(&self) -> u64 {
        self.config.access_token_expires_in
    }

    pub fn generate_access_token(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = now_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: now + self.config.access_token_expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_ref()),
        )?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_ref()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Authenticates the request: bearer token, signature and expiry, revocation
/// list, then the user itself. Inserts `AuthUser` and `TokenSession` into the
/// request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next<Body>,
) -> Result<Response, AppError> {
    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| AppError::auth("Missing or invalid authorization header"))?;

    let claims = state.auth_service.verify_token(bearer.token()).map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::auth("Invalid or expired token")
    })?;

    if cache::is_token_revoked(&state.redis, &claims.jti).await? {
        return Err(AppError::auth("Token has been revoked"));
    }

    let user = load_user(&state, claims.sub).await?;

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(TokenSession {
        jti: claims.jti,
        expires_at: claims.exp,
    });

    Ok(next.run(request).await)
}

/// Admin-only gate for a route group. Runs after `auth_middleware` and before
/// any extractor reads the body, so a non-Admin is refused whatever it sends.
pub async fn require_admin<B>(request: Request<B>, next: Next<B>) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| AppError::auth("Unauthorized"))?;
    authorize(&RequestContext::from(user), Operation::AccessAdminConsole)?;

    Ok(next.run(request).await)
}

/// Cache first. A cache outage degrades to the database.
async fn load_user(state: &AppState, user_id: Uuid) -> Result<AuthUser, AppError> {
    match state.user_cache.get_user(user_id).await {
        Ok(Some(user)) => return Ok(user),
        Ok(None) => {}
        Err(e) => tracing::warn!(user_id = %user_id, "User cache read failed: {}", e),
    }

    // Read before the row so a concurrent invalidation outdates this snapshot.
    let generation = match state.user_cache.generation(user_id).await {
        Ok(generation) => Some(generation),
        Err(e) => {
            tracing::warn!(user_id = %user_id, "User cache generation read failed: {}", e);
            None
        }
    };

    let user = {
        let mut conn = state.db.get()?;
        UsersService::load_auth_user(&mut conn, user_id)?
            .ok_or_else(|| AppError::auth("User not found"))?
    };

    if let Some(generation) = generation {
        if let Err(e) = state.user_cache.cache_user(&user, generation).await {
            tracing::warn!(user_id = %user_id, "Failed to cache user: {}", e);
        }
    }

    Ok(user)
}
