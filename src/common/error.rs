use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::valuation::ValuationError;

// Todos os erros da API saem no formato { "error": ..., "status": ... }
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo JSON malformado ou id inválido na URL
    #[error("{0}")]
    InvalidPayload(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("The referenced {0} does not exist.")]
    InvalidReference(String),

    #[error("{0}")]
    Valuation(#[from] ValuationError),

    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidPayload(_)
            | AppError::AlreadyExists(_)
            | AppError::InvalidReference(_)
            | AppError::Valuation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidToken | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => describe_validation(errors),
            e if e.status().is_server_error() => {
                "A problem has occurred with the server.".to_string()
            }
            e => e.to_string(),
        }
    }
}

// "campo: mensagem; campo: mensagem", em ordem alfabética de campo
fn describe_validation(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(m) => m.to_string(),
                    None => format!("invalid ({})", e.code),
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();
    fields.sort();

    if fields.is_empty() {
        "The information received is invalid or necessary information is missing.".to_string()
    } else {
        fields.join("; ")
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidPayload(format!(
            "The information received is invalid or necessary information is missing: {}",
            rejection.body_text()
        ))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidPayload(format!("Invalid identifier: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // O `tracing` registra o detalhe; o cliente só recebe a mensagem genérica.
        if status.is_server_error() {
            tracing::error!("Internal server error: {}", self);
        }

        let body = Json(json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;
    use validator::Validate;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "Name must contain at least one character."))]
        name: String,
        #[validate(email(message = "A valid email address is required."))]
        email: String,
    }

    #[tokio::test]
    async fn not_found_is_404_with_entity_name() {
        let (status, body) = body_of(AppError::NotFound("Client")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Client not found.");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn validation_errors_are_400_and_list_every_field() {
        let sample = Sample { name: String::new(), email: "nope".into() };
        let errors = sample.validate().unwrap_err();

        let (status, body) = body_of(AppError::ValidationError(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "email: A valid email address is required.; name: Name must contain at least one character."
        );
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let (status, body) = body_of(AppError::DatabaseError(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "A problem has occurred with the server.");
        assert_eq!(body["status"], 500);
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let (status, body) = body_of(AppError::InvalidToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid token");
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn bad_references_are_client_errors() {
        let (status, body) = body_of(AppError::InvalidReference("insurance".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "The referenced insurance does not exist.");

        let (status, _) = body_of(AppError::Valuation(ValuationError::NoInsurance)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = body_of(AppError::AlreadyExists("dup".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
