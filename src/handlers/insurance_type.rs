// src/handlers/insurance_type.rs

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
        insurance::Insurance,
        insurance_type::{CreateInsuranceTypePayload, InsuranceTypeDetail, UpdateInsuranceTypePayload},
    },
};

const NOT_FOUND: AppError = AppError::NotFound("Insurance type");

#[utoipa::path(
    get,
    path = "/insurancetype",
    tag = "Insurance types",
    responses((status = 200, body = Vec<InsuranceTypeDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_insurance_types(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<InsuranceTypeDetail>>, AppError> {
    let types = app_state.insurance_type_repo.list(&app_state.db_pool).await?;
    Ok(Json(types))
}

#[utoipa::path(
    get,
    path = "/insurancetype/{id}",
    tag = "Insurance types",
    params(("id" = Uuid, Path, description = "ID do tipo de seguro")),
    responses(
        (status = 200, body = InsuranceTypeDetail),
        (status = 404, description = "Tipo de seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_insurance_type(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<InsuranceTypeDetail>, AppError> {
    app_state
        .insurance_type_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    get,
    path = "/insurancetype/{id}/insurance",
    tag = "Insurance types",
    params(("id" = Uuid, Path, description = "ID do tipo de seguro")),
    responses(
        (status = 200, description = "Seguros do tipo", body = Vec<Insurance>),
        (status = 404, description = "Tipo de seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_type_insurances(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<Insurance>>, AppError> {
    if !app_state.insurance_type_repo.exists(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    let insurances = app_state.insurance_repo.list_by_type(&app_state.db_pool, id).await?;
    Ok(Json(insurances))
}

#[utoipa::path(
    post,
    path = "/insurancetype/new",
    tag = "Insurance types",
    request_body = CreateInsuranceTypePayload,
    responses(
        (status = 200, description = "Tipo de seguro criado", body = InsuranceTypeDetail),
        (status = 400, description = "Dados inválidos, nome repetido ou seguradora inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_insurance_type(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateInsuranceTypePayload>, AppError>,
) -> Result<Json<InsuranceTypeDetail>, AppError> {
    payload.validate()?;

    let id = app_state
        .insurance_type_repo
        .create(&app_state.db_pool, &payload)
        .await?;

    app_state
        .insurance_type_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    put,
    path = "/insurancetype/{id}",
    tag = "Insurance types",
    params(("id" = Uuid, Path, description = "ID do tipo de seguro")),
    request_body = UpdateInsuranceTypePayload,
    responses(
        (status = 200, body = InsuranceTypeDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Tipo de seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_insurance_type(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateInsuranceTypePayload>, AppError>,
) -> Result<Json<InsuranceTypeDetail>, AppError> {
    payload.validate()?;

    if !app_state
        .insurance_type_repo
        .update(&app_state.db_pool, id, &payload)
        .await?
    {
        return Err(NOT_FOUND);
    }

    app_state
        .insurance_type_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/insurancetype/{id}",
    tag = "Insurance types",
    params(("id" = Uuid, Path, description = "ID do tipo de seguro")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Tipo de seguro não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_insurance_type(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    if !app_state.insurance_type_repo.delete(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    Ok(Json(MessageResponse::deleted("Insurance type")))
}
