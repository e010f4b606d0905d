// src/handlers/user.rs

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::MessageResponse},
    config::AppState,
    models::user::{AuthResponse, CreateUserPayload, LoginPayload, UpdateUserPayload, User},
};

const NOT_FOUND: AppError = AppError::NotFound("User");

#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses((status = 200, body = Vec<User>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = app_state.user_repo.list(&app_state.db_pool).await?;
    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, body = User),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<User>, AppError> {
    app_state
        .user_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    post,
    path = "/user/new",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 200, description = "Usuário criado", body = User),
        (status = 400, description = "Dados inválidos ou e-mail repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUserPayload>, AppError>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;
    let user = app_state.auth_service.create_user(&payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, body = User),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateUserPayload>, AppError>,
) -> Result<Json<User>, AppError> {
    payload.validate()?;
    let user = app_state.auth_service.update_user(id, &payload).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    if !app_state.user_repo.delete(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    Ok(Json(MessageResponse::deleted("User")))
}

// Handler de login (rota pública)
#[utoipa::path(
    post,
    path = "/user/login",
    tag = "Users",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Token JWT", body = AuthResponse),
        (status = 401, description = "E-mail ou senha inválidos")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginPayload>, AppError>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token }))
}
