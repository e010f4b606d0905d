// src/handlers/client.rs

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
    models::client::{ClientDetail, CreateClientPayload, UpdateClientPayload},
};

const NOT_FOUND: AppError = AppError::NotFound("Client");

#[utoipa::path(
    get,
    path = "/client",
    tag = "Clients",
    responses((status = 200, body = Vec<ClientDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_clients(State(app_state): State<AppState>) -> Result<Json<Vec<ClientDetail>>, AppError> {
    let clients = app_state.client_repo.list(&app_state.db_pool).await?;
    Ok(Json(clients))
}

#[utoipa::path(
    get,
    path = "/client/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, body = ClientDetail),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<ClientDetail>, AppError> {
    app_state
        .client_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

// insured / insured_value são calculados pelo ClientService
#[utoipa::path(
    post,
    path = "/client/new",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 200, description = "Cliente criado e avaliado", body = ClientDetail),
        (status = 400, description = "Dados inválidos, e-mail repetido ou seguro inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateClientPayload>, AppError>,
) -> Result<Json<ClientDetail>, AppError> {
    payload.validate()?;
    let client = app_state.client_service.create_client(&payload).await?;
    Ok(Json(client))
}

#[utoipa::path(
    put,
    path = "/client/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "Cliente atualizado e reavaliado", body = ClientDetail),
        (status = 400, description = "Dados inválidos ou cliente sem seguro"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateClientPayload>, AppError>,
) -> Result<Json<ClientDetail>, AppError> {
    payload.validate()?;
    let client = app_state.client_service.update_client(id, &payload).await?;
    Ok(Json(client))
}

#[utoipa::path(
    delete,
    path = "/client/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    if !app_state.client_repo.delete(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    Ok(Json(MessageResponse::deleted("Client")))
}
