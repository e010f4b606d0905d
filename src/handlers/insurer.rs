// src/handlers/insurer.rs

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
        insurance_type::InsuranceType,
        insurer::{CreateInsurerPayload, InsurerDetail, UpdateInsurerPayload},
    },
};

const NOT_FOUND: AppError = AppError::NotFound("Insurer");

#[utoipa::path(
    get,
    path = "/insurer",
    tag = "Insurers",
    responses((status = 200, body = Vec<InsurerDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_insurers(State(app_state): State<AppState>) -> Result<Json<Vec<InsurerDetail>>, AppError> {
    let insurers = app_state.insurer_repo.list(&app_state.db_pool).await?;
    Ok(Json(insurers))
}

#[utoipa::path(
    get,
    path = "/insurer/{id}",
    tag = "Insurers",
    params(("id" = Uuid, Path, description = "ID da seguradora")),
    responses(
        (status = 200, body = InsurerDetail),
        (status = 404, description = "Seguradora não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_insurer(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<InsurerDetail>, AppError> {
    app_state
        .insurer_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    get,
    path = "/insurer/{id}/insurancetype",
    tag = "Insurers",
    params(("id" = Uuid, Path, description = "ID da seguradora")),
    responses(
        (status = 200, description = "Tipos de seguro da seguradora", body = Vec<InsuranceType>),
        (status = 404, description = "Seguradora não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_insurer_insurance_types(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<InsuranceType>>, AppError> {
    if !app_state.insurer_repo.exists(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    let types = app_state
        .insurance_type_repo
        .list_by_insurer(&app_state.db_pool, id)
        .await?;
    Ok(Json(types))
}

#[utoipa::path(
    post,
    path = "/insurer/new",
    tag = "Insurers",
    request_body = CreateInsurerPayload,
    responses(
        (status = 200, description = "Seguradora criada", body = InsurerDetail),
        (status = 400, description = "Dados inválidos, e-mail repetido ou referência inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_insurer(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateInsurerPayload>, AppError>,
) -> Result<Json<InsurerDetail>, AppError> {
    payload.validate()?;

    let id = app_state.insurer_repo.create(&app_state.db_pool, &payload).await?;

    app_state
        .insurer_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    put,
    path = "/insurer/{id}",
    tag = "Insurers",
    params(("id" = Uuid, Path, description = "ID da seguradora")),
    request_body = UpdateInsurerPayload,
    responses(
        (status = 200, body = InsurerDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Seguradora não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_insurer(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateInsurerPayload>, AppError>,
) -> Result<Json<InsurerDetail>, AppError> {
    payload.validate()?;

    if !app_state.insurer_repo.update(&app_state.db_pool, id, &payload).await? {
        return Err(NOT_FOUND);
    }

    app_state
        .insurer_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/insurer/{id}",
    tag = "Insurers",
    params(("id" = Uuid, Path, description = "ID da seguradora")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Seguradora não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_insurer(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    if !app_state.insurer_repo.delete(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    Ok(Json(MessageResponse::deleted("Insurer")))
}
