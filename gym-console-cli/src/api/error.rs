use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Response body of a failed request, kept for user-facing messages
#[derive(Debug, Clone)]
pub struct ErrorBody {
    pub status: StatusCode,
    pub raw: String,
    pub json: Option<Value>,
}

impl ErrorBody {
    pub fn new(status: StatusCode, raw: String) -> Self {
        let json = serde_json::from_str(&raw).ok();
        Self { status, raw, json }
    }

    /// First message reported for a form field, e.g. `{"password": ["Too short"]}`
    pub fn field_message(&self, field: &str) -> Option<String> {
        match self.json.as_ref()?.get(field)? {
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Generic `detail` message
    pub fn detail(&self) -> Option<String> {
        self.json
            .as_ref()?
            .get("detail")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(detail) = self.detail() {
            return f.write_str(&detail);
        }

        let raw = self.raw.trim();
        if raw.is_empty() {
            f.write_str(self.status.canonical_reason().unwrap_or("Unknown error"))
        } else {
            f.write_str(raw)
        }
    }
}

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authorized: {0}")]
    Unauthorized(ErrorBody),

    #[error("Resource not found: {0}")]
    NotFound(ErrorBody),

    #[error("Bad request: {0}")]
    BadRequest(ErrorBody),

    #[error("Server error: {0}")]
    ServerError(ErrorBody),

    #[error("Unexpected status: {0}")]
    Unknown(ErrorBody),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let body = ErrorBody::new(status, message);

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(body),
            StatusCode::FORBIDDEN => ApiError::Unauthorized(body),
            StatusCode::NOT_FOUND => ApiError::NotFound(body),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(body),
            status if status.is_server_error() => ApiError::ServerError(body),
            status if status.is_client_error() => ApiError::BadRequest(body),
            _ => ApiError::Unknown(body),
        }
    }

    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            ApiError::Unauthorized(body)
            | ApiError::NotFound(body)
            | ApiError::BadRequest(body)
            | ApiError::ServerError(body)
            | ApiError::Unknown(body) => Some(body),
            ApiError::NetworkError(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.body().map(|b| b.status)
    }

    /// Inline message for auth screens: the first field-specific message among
    /// `fields`, then `detail`, then `fallback`
    pub fn user_message(&self, fields: &[&str], fallback: &str) -> String {
        let Some(body) = self.body() else {
            return fallback.to_string();
        };

        fields
            .iter()
            .find_map(|field| body.field_message(field))
            .or_else(|| body.detail())
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}
