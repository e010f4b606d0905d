// src/models/city.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::department::Department;

// A cidade "pura": o department_id nunca sai na resposta
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct City {
    pub id: Uuid,

    #[schema(example = "Medellín")]
    pub name: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CityDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub city: City,

    #[schema(value_type = Option<Department>)]
    pub department: Option<Json<Department>>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCityPayload {
    #[validate(length(min = 1, max = 100, message = "City must contain at least one character."))]
    #[schema(example = "Medellín")]
    pub name: String,

    pub department_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCityPayload {
    #[validate(length(min = 1, max = 100, message = "City must contain at least one character."))]
    #[schema(example = "Envigado")]
    pub name: Option<String>,

    pub department_id: Option<Uuid>,
}
