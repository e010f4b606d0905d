// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,

    #[schema(example = "Carlos")]
    pub name: String,

    #[schema(example = "Gómez")]
    pub last_name: String,

    #[schema(example = "carlos@email.com")]
    pub email: String,

    #[schema(example = "3109876543")]
    pub phone: String,

    pub is_admin: bool,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserPayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    #[schema(example = "Carlos")]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Last name must contain at least one character."))]
    #[schema(example = "Gómez")]
    pub last_name: String,

    #[validate(
        email(message = "A valid email address is required."),
        length(min = 6, max = 255, message = "Email must contain at least six characters.")
    )]
    #[schema(example = "carlos@email.com")]
    pub email: String,

    #[validate(length(min = 6, max = 25, message = "Phone must contain at least six characters."))]
    #[schema(example = "3109876543")]
    pub phone: String,

    #[serde(default)]
    pub is_admin: bool,

    #[validate(length(min = 8, max = 200, message = "Password must contain at least eight characters."))]
    #[schema(example = "s3cret-pass")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, max = 255, message = "Name must contain at least one character."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Last name must contain at least one character."))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "A valid email address is required."),
        length(min = 6, max = 255, message = "Email must contain at least six characters.")
    )]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 25, message = "Phone must contain at least six characters."))]
    pub phone: Option<String>,

    pub is_admin: Option<bool>,

    #[validate(length(min = 8, max = 200, message = "Password must contain at least eight characters."))]
    pub password: Option<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "A valid email address is required."))]
    #[schema(example = "carlos@email.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Carlos".into(),
            last_name: "Gómez".into(),
            email: "carlos@email.com".into(),
            phone: "3109876543".into(),
            is_admin: false,
            password_hash: "$2b$12$hash".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let body = serde_json::to_value(&user).unwrap();
        assert!(body.get("password_hash").is_none());
        assert!(body.get("createdAt").is_some());
        assert_eq!(body["is_admin"], false);
    }

    #[test]
    fn short_passwords_are_rejected() {
        let payload: CreateUserPayload = serde_json::from_value(json!({
            "name": "Carlos",
            "last_name": "Gómez",
            "email": "carlos@email.com",
            "phone": "3109876543",
            "password": "short"
        }))
        .unwrap();
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
