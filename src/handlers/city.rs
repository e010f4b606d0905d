// src/handlers/city.rs

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
    models::city::{CityDetail, CreateCityPayload, UpdateCityPayload},
};

const NOT_FOUND: AppError = AppError::NotFound("City");

#[utoipa::path(
    get,
    path = "/city",
    tag = "Cities",
    responses((status = 200, body = Vec<CityDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_cities(State(app_state): State<AppState>) -> Result<Json<Vec<CityDetail>>, AppError> {
    let cities = app_state.city_repo.list(&app_state.db_pool).await?;
    Ok(Json(cities))
}

#[utoipa::path(
    get,
    path = "/city/{id}",
    tag = "Cities",
    params(("id" = Uuid, Path, description = "ID da cidade")),
    responses(
        (status = 200, body = CityDetail),
        (status = 404, description = "Cidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_city(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<CityDetail>, AppError> {
    app_state
        .city_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    post,
    path = "/city/new",
    tag = "Cities",
    request_body = CreateCityPayload,
    responses(
        (status = 200, description = "Cidade criada", body = CityDetail),
        (status = 400, description = "Dados inválidos, nome repetido ou departamento inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_city(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateCityPayload>, AppError>,
) -> Result<Json<CityDetail>, AppError> {
    payload.validate()?;

    let id = app_state
        .city_repo
        .create(&app_state.db_pool, &payload.name, payload.department_id)
        .await?;

    app_state
        .city_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    put,
    path = "/city/{id}",
    tag = "Cities",
    params(("id" = Uuid, Path, description = "ID da cidade")),
    request_body = UpdateCityPayload,
    responses(
        (status = 200, body = CityDetail),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_city(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateCityPayload>, AppError>,
) -> Result<Json<CityDetail>, AppError> {
    payload.validate()?;

    let updated = app_state
        .city_repo
        .update(&app_state.db_pool, id, payload.name.as_deref(), payload.department_id)
        .await?;
    if !updated {
        return Err(NOT_FOUND);
    }

    app_state
        .city_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/city/{id}",
    tag = "Cities",
    params(("id" = Uuid, Path, description = "ID da cidade")),
    responses(
        (status = 200, body = MessageResponse),
        (status = 404, description = "Cidade não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_city(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    if !app_state.city_repo.delete(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    Ok(Json(MessageResponse::deleted("City")))
}
