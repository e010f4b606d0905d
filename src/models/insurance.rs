// src/models/insurance.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{default_true, insurance_type::InsuranceTypeDetail},
    services::valuation::Coverage,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Insurance {
    pub id: Uuid,

    #[schema(example = "Todo riesgo")]
    pub name: String,

    // Percentual do valor declarado que o seguro cobre (0..=100)
    #[schema(example = 80)]
    pub percentage_to_insure: i32,

    // Valor mínimo declarado para o cliente ficar segurado
    #[schema(example = 1000000)]
    pub min_to_insure: i32,

    pub available: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Insurance {
    pub fn coverage(&self) -> Coverage {
        Coverage {
            percentage_to_insure: self.percentage_to_insure,
            min_to_insure: self.min_to_insure,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct InsuranceDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub insurance: Insurance,

    #[schema(value_type = Option<InsuranceTypeDetail>)]
    pub insurance_type: Option<Json<InsuranceTypeDetail>>,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInsurancePayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    #[schema(example = "Todo riesgo")]
    pub name: String,

    #[validate(range(min = 0, max = 100, message = "Percentage to insure must be between 0 and 100."))]
    #[serde(default)]
    #[schema(example = 80)]
    pub percentage_to_insure: i32,

    #[validate(range(min = 0, message = "Minimum to insure cannot be negative."))]
    #[serde(default)]
    #[schema(example = 1000000)]
    pub min_to_insure: i32,

    #[serde(default = "default_true")]
    pub available: bool,

    pub insurance_type_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateInsurancePayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 100, message = "Percentage to insure must be between 0 and 100."))]
    pub percentage_to_insure: Option<i32>,

    #[validate(range(min = 0, message = "Minimum to insure cannot be negative."))]
    pub min_to_insure: Option<i32>,

    pub available: Option<bool>,
    pub insurance_type_id: Option<Uuid>,
}
