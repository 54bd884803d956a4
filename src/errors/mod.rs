use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Database { message: String, detail: String },
    Store { message: String, detail: String },
}

impl AppError {
    pub fn database(message: impl Into<String>, detail: impl ToString) -> Self {
        AppError::Database {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn store(message: impl Into<String>, detail: impl ToString) -> Self {
        AppError::Store {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Database { message, detail } => {
                write!(f, "Database Error: {}: {}", message, detail)
            }
            AppError::Store { message, detail } => {
                write!(f, "Store Error: {}: {}", message, detail)
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => HttpResponse::BadRequest().json(ErrorResponse {
                message: msg.clone(),
                error: None,
            }),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(ErrorResponse {
                message: msg.clone(),
                error: None,
            }),
            // 500 responses carry the raw backend error text in an `error` field.
            AppError::Database { message, detail } | AppError::Store { message, detail } => {
                HttpResponse::InternalServerError().json(ErrorResponse {
                    message: message.clone(),
                    error: Some(detail.clone()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::Validation("missing".to_string())
                .error_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("no such user".to_string())
                .error_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::database("Failed to fetch users", "connection reset")
                .error_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::store("Failed to upload object", "access denied")
                .error_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_includes_detail() {
        let err = AppError::store("Failed to upload object", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "Store Error: Failed to upload object: quota exceeded"
        );
    }
}
