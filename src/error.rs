use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use thiserror::Error;

const FALLBACK_MESSAGE: &str = "An error occurred";

/// Erreurs renvoyées par les services et les routes
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("You must be signed in to perform this action")]
    AuthRequired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Already enrolled in this course")]
    AlreadyEnrolled,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Transient(String),
}

impl AppError {
    pub fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{} not found", what))
    }

    /// Message du backend si disponible, sinon message générique
    pub fn transient(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            AppError::Transient(FALLBACK_MESSAGE.to_string())
        } else {
            AppError::Transient(message)
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(what) => AppError::NotFound(what),
            // Contraintes comprises: le contexte métier est ajouté par l'appelant
            other => AppError::transient(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthRequired | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::AlreadyEnrolled => StatusCode::CONFLICT,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Transient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Transient(message) => tracing::error!(error = %message, "backend call failed"),
            other => tracing::warn!(error = %other, "request rejected"),
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_uses_fallback_for_empty_message() {
        let err = AppError::transient("   ");
        assert_eq!(err.to_string(), FALLBACK_MESSAGE);

        let err = AppError::transient("connection reset");
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn test_db_errors_become_transient() {
        let err: AppError = DbErr::Custom("pool timed out".to_string()).into();
        assert!(matches!(err, AppError::Transient(ref m) if m.contains("pool timed out")));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_constraint_errors_are_not_enrollment_conflicts() {
        let err: AppError = DbErr::Custom(
            "duplicate key value violates unique constraint \"lessons_section_id_order_index_key\"".to_string(),
        )
        .into();
        assert!(matches!(err, AppError::Transient(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("Course").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::AuthRequired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::AlreadyEnrolled.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Validation("bad".into()).status_code(), StatusCode::BAD_REQUEST);
    }
}
