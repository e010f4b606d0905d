// src/handlers/insurance.rs

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
    models::{
        client::ClientDetail,
        insurance::{CreateInsurancePayload, InsuranceDetail, UpdateInsurancePayload},
    },
};

const NOT_FOUND: AppError = AppError::NotFound("Insurance");

#[utoipa::path(
    get,
    path = "/insurance",
    tag = "Insurances",
    responses((status = 200, body = Vec<InsuranceDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_insurances(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<InsuranceDetail>>, AppError> {
    let insurances = app_state.insurance_repo.list(&app_state.db_pool).await?;
    Ok(Json(insurances))
}

#[utoipa::path(
    get,
    path = "/insurance/{id}",
    tag = "Insurances",
    params(("id" = Uuid, Path, description = "ID do seguro")),
    responses(
        (status = 200, body = InsuranceDetail),
        (status = 404, description = "Seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_insurance(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<InsuranceDetail>, AppError> {
    app_state
        .insurance_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    get,
    path = "/insurance/{id}/client",
    tag = "Insurances",
    params(("id" = Uuid, Path, description = "ID do seguro")),
    responses(
        (status = 200, description = "Clientes do seguro", body = Vec<ClientDetail>),
        (status = 404, description = "Seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_insurance_clients(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<ClientDetail>>, AppError> {
    if app_state
        .insurance_repo
        .find_plain(&app_state.db_pool, id)
        .await?
        .is_none()
    {
        return Err(NOT_FOUND);
    }
    let clients = app_state.client_repo.list_by_insurance(&app_state.db_pool, id).await?;
    Ok(Json(clients))
}

#[utoipa::path(
    post,
    path = "/insurance/new",
    tag = "Insurances",
    request_body = CreateInsurancePayload,
    responses(
        (status = 200, description = "Seguro criado", body = InsuranceDetail),
        (status = 400, description = "Dados inválidos ou tipo de seguro inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_insurance(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateInsurancePayload>, AppError>,
) -> Result<Json<InsuranceDetail>, AppError> {
    payload.validate()?;

    let id = app_state.insurance_repo.create(&app_state.db_pool, &payload).await?;

    app_state
        .insurance_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    put,
    path = "/insurance/{id}",
    tag = "Insurances",
    params(("id" = Uuid, Path, description = "ID do seguro")),
    request_body = UpdateInsurancePayload,
    responses(
        (status = 200, body = InsuranceDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_insurance(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateInsurancePayload>, AppError>,
) -> Result<Json<InsuranceDetail>, AppError> {
    payload.validate()?;

    if !app_state.insurance_repo.update(&app_state.db_pool, id, &payload).await? {
        return Err(NOT_FOUND);
    }

    app_state
        .insurance_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/insurance/{id}",
    tag = "Insurances",
    params(("id" = Uuid, Path, description = "ID do seguro")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_insurance(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    if !app_state.insurance_repo.delete(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    Ok(Json(MessageResponse::deleted("Insurance")))
}
