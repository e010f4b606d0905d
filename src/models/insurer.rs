// src/models/insurer.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{city::City, default_true, department::Department};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Insurer {
    pub id: Uuid,

    #[schema(example = "Seguros del Valle")]
    pub name: String,

    // Número de identificação tributária
    #[schema(example = "900123456-7")]
    pub nit: String,

    #[schema(example = "Calle 10 # 43-12")]
    pub address: String,

    #[schema(example = "6041234567")]
    pub phone: String,

    #[schema(example = "contacto@segurosdelvalle.co")]
    pub email: String,

    pub available: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InsurerDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub insurer: Insurer,

    #[schema(value_type = Option<Department>)]
    pub department: Option<Json<Department>>,

    #[schema(value_type = Option<City>)]
    pub city: Option<Json<City>>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInsurerPayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    #[schema(example = "Seguros del Valle")]
    pub name: String,

    #[validate(length(min = 5, max = 255, message = "NIT must contain at least five characters."))]
    #[schema(example = "900123456-7")]
    pub nit: String,

    #[validate(length(min = 6, max = 255, message = "Address must contain at least six characters."))]
    #[schema(example = "Calle 10 # 43-12")]
    pub address: String,

    #[validate(length(min = 6, max = 25, message = "Phone must contain at least six characters."))]
    #[schema(example = "6041234567")]
    pub phone: String,

    #[validate(
        email(message = "A valid email address is required."),
        length(min = 6, max = 255, message = "Email must contain at least six characters.")
    )]
    #[schema(example = "contacto@segurosdelvalle.co")]
    pub email: String,

    #[serde(default = "default_true")]
    pub available: bool,

    pub department_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInsurerPayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    pub name: Option<String>,

    #[validate(length(min = 5, max = 255, message = "NIT must contain at least five characters."))]
    pub nit: Option<String>,

    #[validate(length(min = 6, max = 255, message = "Address must contain at least six characters."))]
    pub address: Option<String>,

    #[validate(length(min = 6, max = 25, message = "Phone must contain at least six characters."))]
    pub phone: Option<String>,

    #[validate(
        email(message = "A valid email address is required."),
        length(min = 6, max = 255, message = "Email must contain at least six characters.")
    )]
    pub email: Option<String>,

    pub available: Option<bool>,
    pub department_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
}
