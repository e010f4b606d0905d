// src/models/department.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::city::City;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Department {
    pub id: Uuid,

    #[schema(example = "Antioquia")]
    pub name: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// Departamento com as cidades aninhadas (sem o department_id)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DepartmentWithCities {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub department: Department,

    #[schema(value_type = Vec<City>)]
    pub cities: Json<Vec<City>>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentPayload {
    #[validate(length(min = 1, max = 100, message = "Department must contain at least one character."))]
    #[schema(example = "Antioquia")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentPayload {
    #[validate(length(min = 1, max = 100, message = "Department must contain at least one character."))]
    #[schema(example = "Cundinamarca")]
    pub name: Option<String>,
}
