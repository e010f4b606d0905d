// src/handlers/department.rs

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
        city::City,
        department::{CreateDepartmentPayload, DepartmentWithCities, UpdateDepartmentPayload},
    },
};

const NOT_FOUND: AppError = AppError::NotFound("Department");

#[utoipa::path(
    get,
    path = "/department",
    tag = "Departments",
    responses(
        (status = 200, description = "Departamentos com suas cidades", body = Vec<DepartmentWithCities>),
        (status = 401, description = "Token ausente")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<DepartmentWithCities>>, AppError> {
    let departments = app_state.department_repo.list(&app_state.db_pool).await?;
    Ok(Json(departments))
}

#[utoipa::path(
    get,
    path = "/department/{id}",
    tag = "Departments",
    params(("id" = Uuid, Path, description = "ID do departamento")),
    responses(
        (status = 200, body = DepartmentWithCities),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_department(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<DepartmentWithCities>, AppError> {
    app_state
        .department_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    get,
    path = "/department/{id}/city",
    tag = "Departments",
    params(("id" = Uuid, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Cidades do departamento", body = Vec<City>),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_department_cities(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<Vec<City>>, AppError> {
    if !app_state.department_repo.exists(&app_state.db_pool, id).await? {
        return Err(NOT_FOUND);
    }
    let cities = app_state.city_repo.list_by_department(&app_state.db_pool, id).await?;
    Ok(Json(cities))
}

#[utoipa::path(
    post,
    path = "/department/new",
    tag = "Departments",
    request_body = CreateDepartmentPayload,
    responses(
        (status = 200, description = "Departamento criado", body = DepartmentWithCities),
        (status = 400, description = "Dados inválidos ou nome repetido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateDepartmentPayload>, AppError>,
) -> Result<Json<DepartmentWithCities>, AppError> {
    payload.validate()?;

    let department = app_state
        .department_repo
        .create(&app_state.db_pool, &payload.name)
        .await?;

    // Recém-criado: ainda não tem cidades
    Ok(Json(DepartmentWithCities {
        department,
        cities: sqlx::types::Json(Vec::new()),
    }))
}

#[utoipa::path(
    put,
    path = "/department/{id}",
    tag = "Departments",
    params(("id" = Uuid, Path, description = "ID do departamento")),
    request_body = UpdateDepartmentPayload,
    responses(
        (status = 200, body = DepartmentWithCities),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateDepartmentPayload>, AppError>,
) -> Result<Json<DepartmentWithCities>, AppError> {
    payload.validate()?;

    let updated = app_state
        .department_repo
        .update(&app_state.db_pool, id, payload.name.as_deref())
        .await?;
    if !updated {
        return Err(NOT_FOUND);
    }

    app_state
        .department_repo
        .find_by_id(&app_state.db_pool, id)
        .await?
        .map(Json)
        .ok_or(NOT_FOUND)
}

#[utoipa::path(
    delete,
    path = "/department/{id}",
    tag = "Departments",
    params(("id" = Uuid, Path, description = "ID do departamento")),
    responses(
        (status = 200, description = "Departamento e cidades órfãs apagados", body = MessageResponse),
        (status = 404, description = "Departamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_department(
    State(app_state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    app_state.department_service.delete_department(id).await?;
    Ok(Json(MessageResponse::deleted("Department")))
}
