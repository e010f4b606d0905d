// src/models/insurance_type.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{default_true, insurer::InsurerDetail};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InsuranceType {
    pub id: Uuid,

    #[schema(example = "Vehicular")]
    pub name: String,

    pub available: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InsuranceTypeDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub insurance_type: InsuranceType,

    #[schema(value_type = Option<InsurerDetail>)]
    pub insurer: Option<Json<InsurerDetail>>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInsuranceTypePayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    #[schema(example = "Vehicular")]
    pub name: String,

    #[serde(default = "default_true")]
    pub available: bool,

    pub insurer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInsuranceTypePayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    pub name: Option<String>,

    pub available: Option<bool>,
    pub insurer_id: Option<Uuid>,
}
