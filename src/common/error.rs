use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid request body: {0}")]
    JsonRejection(#[from] axum::extract::rejection::JsonRejection),

    #[error("Invalid path parameter: {0}")]
    PathRejection(#[from] axum::extract::rejection::PathRejection),

    #[error("Invalid query string: {0}")]
    QueryRejection(#[from] axum::extract::rejection::QueryRejection),

    // Validation failures that don't come from a `Validate` derive (query strings, enums).
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::JsonRejection(_)
            | AppError::PathRejection(_)
            | AppError::QueryRejection(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UsernameAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::JsonRejection(rejection) => rejection.body_text(),
            AppError::PathRejection(rejection) => rejection.body_text(),
            AppError::QueryRejection(rejection) => rejection.body_text(),
            AppError::BadRequest(message) => message,
            AppError::InvalidCredentials => "Invalid username or password.".to_string(),
            AppError::Unauthenticated => "Unauthorized".to_string(),
            ref e @ (AppError::NotFound(_) | AppError::UsernameAlreadyExists) => e.to_string(),

            // Everything else is a 500; details stay in the logs.
            ref e => {
                match e {
                    AppError::DatabaseError(inner) => tracing::error!("Internal server error: {}: {}", e, inner),
                    AppError::InternalServerError(inner) => tracing::error!("Internal server error: {:#}", inner),
                    _ => tracing::error!("Internal server error: {}", e),
                }
                "An unexpected error occurred.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
