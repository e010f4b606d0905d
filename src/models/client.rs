// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    models::{city::City, department::Department, insurance::Insurance},
    services::valuation::StoredValuation,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,

    #[schema(example = "Ana")]
    pub name: String,

    #[schema(example = "Restrepo")]
    pub last_name: String,

    #[schema(example = "ana.restrepo@email.com")]
    pub email: String,

    #[schema(example = "Natural")]
    pub client_type: String,

    #[schema(example = "Cédula")]
    pub dni_type: String,

    #[schema(example = "1020304050")]
    pub dni_number: String,

    #[schema(example = "3001234567")]
    pub phone: String,

    #[schema(example = 34)]
    pub age: i32,

    #[schema(example = "Carrera 7 # 12-34")]
    pub address: String,

    #[schema(example = 1000000)]
    pub value_to_insure: i32,

    // Derivados do seguro: nunca vêm do payload
    pub insured: bool,
    #[schema(example = 800000)]
    pub insured_value: i64,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ClientDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub client: Client,

    #[schema(value_type = Option<Department>)]
    pub department: Option<Json<Department>>,

    #[schema(value_type = Option<City>)]
    pub city: Option<Json<City>>,

    #[schema(value_type = Option<Insurance>)]
    pub insurance: Option<Json<Insurance>>,
}

/// Só o que a regra de avaliação precisa da linha gravada.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ClientValuationRow {
    pub insurance_id: Option<Uuid>,
    pub value_to_insure: i32,
}

impl From<ClientValuationRow> for StoredValuation {
    fn from(row: ClientValuationRow) -> Self {
        StoredValuation {
            insurance_id: row.insurance_id,
            value_to_insure: row.value_to_insure,
        }
    }
}

// ---
// Payloads
// ---

// insured e insured_value não são aceitos: sempre saem da regra de avaliação
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientPayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    #[schema(example = "Ana")]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Last name must contain at least one character."))]
    #[schema(example = "Restrepo")]
    pub last_name: String,

    #[validate(
        email(message = "A valid email address is required."),
        length(min = 6, max = 255, message = "Email must contain at least six characters.")
    )]
    #[schema(example = "ana.restrepo@email.com")]
    pub email: String,

    #[validate(length(min = 5, max = 255, message = "Client type must contain at least five characters."))]
    #[schema(example = "Natural")]
    pub client_type: String,

    #[validate(length(min = 5, max = 255, message = "Dni type must contain at least five characters."))]
    #[schema(example = "Cédula")]
    pub dni_type: String,

    #[validate(length(min = 5, max = 255, message = "Dni number must contain at least five characters."))]
    #[schema(example = "1020304050")]
    pub dni_number: String,

    #[validate(length(min = 6, max = 25, message = "Phone must contain at least six characters."))]
    #[schema(example = "3001234567")]
    pub phone: String,

    #[validate(range(min = 0, message = "Age cannot be negative."))]
    #[schema(example = 34)]
    pub age: i32,

    #[validate(length(min = 6, max = 255, message = "Address must contain at least six characters."))]
    #[schema(example = "Carrera 7 # 12-34")]
    pub address: String,

    #[validate(range(min = 0, message = "Value to insure cannot be negative."))]
    #[serde(default)]
    #[schema(example = 1000000)]
    pub value_to_insure: i32,

    pub department_id: Option<Uuid>,
    pub city_id: Option<Uuid>,

    // Obrigatório: sem seguro não há como avaliar o cliente
    pub insurance_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClientPayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Last name must contain at least one character."))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "A valid email address is required."),
        length(min = 6, max = 255, message = "Email must contain at least six characters.")
    )]
    pub email: Option<String>,

    #[validate(length(min = 5, max = 255, message = "Client type must contain at least five characters."))]
    pub client_type: Option<String>,

    #[validate(length(min = 5, max = 255, message = "Dni type must contain at least five characters."))]
    pub dni_type: Option<String>,

    #[validate(length(min = 5, max = 255, message = "Dni number must contain at least five characters."))]
    pub dni_number: Option<String>,

    #[validate(length(min = 6, max = 25, message = "Phone must contain at least six characters."))]
    pub phone: Option<String>,

    #[validate(range(min = 0, message = "Age cannot be negative."))]
    pub age: Option<i32>,

    #[validate(length(min = 6, max = 255, message = "Address must contain at least six characters."))]
    pub address: Option<String>,

    #[validate(range(min = 0, message = "Value to insure cannot be negative."))]
    pub value_to_insure: Option<i32>,

    pub department_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub insurance_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_client() -> serde_json::Value {
        json!({
            "name": "Ana",
            "last_name": "Restrepo",
            "email": "ana.restrepo@email.com",
            "client_type": "Natural",
            "dni_type": "Cedula",
            "dni_number": "1020304050",
            "phone": "3001234567",
            "age": 34,
            "address": "Carrera 7 # 12-34",
            "value_to_insure": 1000,
            "insurance_id": "6f1c3b5e-8a2d-4f5e-9c7b-1a2b3c4d5e6f"
        })
    }

    #[test]
    fn a_complete_client_is_valid() {
        let payload: CreateClientPayload = serde_json::from_value(valid_client()).unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.department_id, None);
    }

    #[test]
    fn value_to_insure_defaults_to_zero() {
        let mut raw = valid_client();
        raw.as_object_mut().unwrap().remove("value_to_insure");
        let payload: CreateClientPayload = serde_json::from_value(raw).unwrap();
        assert_eq!(payload.value_to_insure, 0);
    }

    #[test]
    fn insurance_is_required_on_create() {
        let mut raw = valid_client();
        raw.as_object_mut().unwrap().remove("insurance_id");
        assert!(serde_json::from_value::<CreateClientPayload>(raw).is_err());
    }

    #[test]
    fn short_fields_and_bad_email_fail_validation() {
        let mut raw = valid_client();
        raw["email"] = json!("not-an-email");
        raw["dni_type"] = json!("CC");
        raw["value_to_insure"] = json!(-5);
        let payload: CreateClientPayload = serde_json::from_value(raw).unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("dni_type"));
        assert!(fields.contains_key("value_to_insure"));
        assert!(!fields.contains_key("name"));
    }

    #[test]
    fn partial_updates_only_validate_present_fields() {
        let payload: UpdateClientPayload =
            serde_json::from_value(json!({ "value_to_insure": 2000 })).unwrap();
        assert!(payload.validate().is_ok());

        let payload: UpdateClientPayload =
            serde_json::from_value(json!({ "phone": "123" })).unwrap();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn derived_fields_are_ignored_on_input() {
        let mut raw = valid_client();
        raw["insured"] = json!(true);
        raw["insured_value"] = json!(999999);
        // Campos desconhecidos são descartados pelo serde
        assert!(serde_json::from_value::<CreateClientPayload>(raw).is_ok());
    }
}
