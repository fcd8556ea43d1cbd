pub mod auth;
pub mod meeting;
pub mod project;
pub mod task;

use async_trait::async_trait;
use axum::{
    Json,
    extract::FromRequest,
    http::Request,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON extractor that runs `validator` rules before the handler sees the
/// payload. Malformed JSON and rule violations both surface as 400.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S, axum::body::Body> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<axum::body::Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected request body: {}", rejection);
                AppError::validation("Invalid JSON format")
            })?;

        value.validate().map_err(|errors| {
            let first = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, field_errors)| {
                    field_errors.iter().map(move |error| {
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation failed for field: {}", field))
                    })
                })
                .next();

            AppError::validation(first.unwrap_or_else(|| "Validation failed".to_string()))
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Shared field rules used by `#[validate(custom(...))]`.
pub mod rules {
    use validator::ValidationError;

    const MAX_ASSET_PATH_LEN: usize = 512;

    fn rule(code: &'static str, message: &'static str) -> ValidationError {
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        error
    }

    /// At least three of: 8+ chars, lowercase, uppercase, digit, symbol.
    pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
        let checks = [
            password.len() >= 8,
            password.chars().any(|c| c.is_lowercase()),
            password.chars().any(|c| c.is_uppercase()),
            password.chars().any(|c| c.is_numeric()),
            password.chars().any(|c| "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)),
        ];
        let score = checks.iter().filter(|passed| **passed).count();

        if password.len() < 6 || score < 3 {
            return Err(rule("weak_password", "Password is too weak"));
        }

        Ok(())
    }

    /// Stored asset references are relative paths handed over by the
    /// uploader, or absolute http(s) URLs.
    pub fn validate_asset_path(path: &str) -> Result<(), ValidationError> {
        if path.trim().is_empty() {
            return Err(rule("empty_asset_path", "File path cannot be empty"));
        }
        if path.len() > MAX_ASSET_PATH_LEN {
            return Err(rule("asset_path_too_long", "File path is too long"));
        }
        if path.split('/').any(|segment| segment == "..") {
            return Err(rule("asset_path_traversal", "File path cannot contain '..'"));
        }
        Ok(())
    }

    pub fn validate_asset_paths(paths: &[String]) -> Result<(), ValidationError> {
        paths.iter().try_for_each(|path| validate_asset_path(path))
    }

    pub fn validate_join_link(link: &str) -> Result<(), ValidationError> {
        match url::Url::parse(link) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
            _ => Err(rule("invalid_join_link", "Join link must be an http(s) URL")),
        }
    }

}
