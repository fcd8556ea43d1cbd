use serde::Serialize;

/// Envelope shared by every JSON response. Error bodies always carry a
/// top-level `message`.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetail>>,
    pub timestamp: String,
}

#[derive(Serialize)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<i64>,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    fn build(
        success: bool,
        code: u16,
        message: &str,
        data: Option<T>,
        meta: Option<ResponseMeta>,
        errors: Option<Vec<ErrorDetail>>,
    ) -> Self {
        Self {
            success,
            code,
            message: message.to_string(),
            data,
            meta,
            errors,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn failure(code: u16, error_code: &str, message: &str, field: Option<String>) -> Self {
        Self::build(
            false,
            code,
            message,
            None,
            None,
            Some(vec![ErrorDetail {
                field,
                code: error_code.to_string(),
                message: message.to_string(),
            }]),
        )
    }

    pub fn success(data: T, message: &str) -> Self {
        Self::build(true, 200, message, Some(data), None, None)
    }

    /// List responses carry the item count in `meta`.
    pub fn list(data: T, total_count: usize, message: &str) -> Self {
        let meta = ResponseMeta {
            total_count: Some(total_count as i64),
        };
        Self::build(true, 200, message, Some(data), Some(meta), None)
    }

    pub fn created(data: T, message: &str) -> Self {
        Self::build(true, 201, message, Some(data), None, None)
    }

    pub fn ok(message: &str) -> Self {
        Self::build(true, 200, message, None, None, None)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::failure(401, "UNAUTHORIZED", message, None)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::failure(403, "FORBIDDEN", message, None)
    }

    pub fn not_found(message: &str) -> Self {
        Self::failure(404, "NOT_FOUND", message, None)
    }

    pub fn conflict(message: &str, field: Option<String>, error_code: &str) -> Self {
        Self::failure(409, error_code, message, field)
    }

    pub fn bad_request(message: &str) -> Self {
        Self::failure(400, "BAD_REQUEST", message, None)
    }

    pub fn internal_error(message: &str) -> Self {
        Self::failure(500, "INTERNAL_ERROR", message, None)
    }
}

pub mod error_codes {
    pub const USER_EMAIL_EXISTS: &str = "USER_EMAIL_EXISTS";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_has_top_level_message() {
        let body = serde_json::to_value(ApiResponse::<()>::forbidden("Access Denied")).unwrap();
        assert_eq!(body["message"], "Access Denied");
        assert_eq!(body["code"], 403);
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    #[test]
    fn list_response_reports_count() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3], 3, "ok")).unwrap();
        assert_eq!(body["meta"]["total_count"], 3);
        assert_eq!(body["data"].as_array().map(|a| a.len()), Some(3));
    }
}
