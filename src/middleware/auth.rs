use axum::{extract::Request, middleware::Next, response::Response};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};

use crate::common::error::AppError;

/// Guardião das rotas de entidades.
///
/// Só confere se existe um token Bearer não vazio no `Authorization`; a
/// assinatura não é validada aqui.
pub async fn bearer_guard(request: Request, next: Next) -> Result<Response, AppError> {
    let has_token = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .is_some_and(|auth| !auth.token().trim().is_empty());

    if !has_token {
        tracing::debug!(path = %request.uri().path(), "request rejected without bearer token");
        return Err(AppError::InvalidToken);
    }

    Ok(next.run(request).await)
}
