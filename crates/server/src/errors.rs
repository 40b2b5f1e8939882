use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::validation::FieldError;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Wire-level error codes carried in the `error.code` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ParseError,
    BadRequest,
    NotFound,
    Conflict,
    MethodNotSupported,
    InternalServerError,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::ParseError | ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::MethodNotSupported => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error, Serialize)]
#[error("{message}")]
pub struct RpcError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl RpcError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), details: None }
    }

    pub fn parse(message: impl Into<String>) -> Self { Self::new(ErrorCode::ParseError, message) }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(ErrorCode::BadRequest, message) }

    /// A single failing field, reported the same way as validation errors.
    pub fn invalid_field(field: impl Into<String>, rule: &str, message: impl Into<String>) -> Self {
        let error = FieldError { field: field.into(), rule: rule.to_string(), message: message.into() };
        Self {
            code: ErrorCode::BadRequest,
            message: format!("validation failed: {} {}", error.field, error.message),
            details: Some(vec![error]),
        }
    }

    pub fn unknown_procedure(name: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("no procedure named '{name}'"))
    }

    pub fn method_not_supported(name: &str) -> Self {
        Self::new(ErrorCode::MethodNotSupported, format!("'{name}' is a mutation and must be sent with POST"))
    }

    /// Logs the cause; callers only ever see a generic message.
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "rpc internal error");
        Self::new(ErrorCode::InternalServerError, "internal server error")
    }
}

impl From<ServiceError> for RpcError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errs) => Self {
                code: ErrorCode::BadRequest,
                message: errs.to_string(),
                details: Some(errs.0),
            },
            ServiceError::Conflict(msg) => Self::new(ErrorCode::Conflict, msg),
            ServiceError::NotFound(msg) => Self::new(ErrorCode::NotFound, msg),
            ServiceError::Db(msg) => Self::internal(msg),
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        (status, Json(serde_json::json!({ "error": self }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::validation::{self, ValidationErrors};

    #[test]
    fn validation_maps_to_bad_request_with_details() {
        let errs = ValidationErrors::single("email", validation::email("nope").unwrap_err());
        let rpc = RpcError::from(ServiceError::Validation(errs));
        assert_eq!(rpc.code, ErrorCode::BadRequest);
        let details = rpc.details.as_ref().expect("details");
        assert_eq!(details[0].field, "email");
        assert_eq!(details[0].rule, "email");
    }

    #[test]
    fn storage_errors_are_sanitised() {
        let rpc = RpcError::from(ServiceError::Db("relation \"service\" does not exist".into()));
        assert_eq!(rpc.code, ErrorCode::InternalServerError);
        assert_eq!(rpc.message, "internal server error");
        assert_eq!(rpc.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn codes_serialize_in_screaming_case() {
        let v = serde_json::to_value(RpcError::method_not_supported("createService")).unwrap();
        assert_eq!(v["code"], "METHOD_NOT_SUPPORTED");
        assert!(v.get("details").is_none());
        assert_eq!(ErrorCode::MethodNotSupported.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ErrorCode::Conflict.status(), StatusCode::CONFLICT);
    }
}
