// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::user::{Claims, CreateUserPayload, UpdateUserPayload, User},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    user_repo: UserRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(pool: PgPool, user_repo: UserRepository, jwt_secret: String) -> Self {
        Self { pool, user_repo, jwt_secret }
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        let password_hash = hash_password(&payload.password).await?;
        self.user_repo.create(&self.pool, payload, &password_hash).await
    }

    pub async fn update_user(&self, id: Uuid, payload: &UpdateUserPayload) -> Result<User, AppError> {
        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password).await?),
            None => None,
        };

        self.user_repo
            .update(&self.pool, id, payload, password_hash.as_deref())
            .await?
            .ok_or(AppError::NotFound("User"))
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let Some(user) = self.user_repo.find_by_email(&self.pool, email).await? else {
            tracing::warn!(email, "login attempt for unknown email");
            return Err(AppError::InvalidCredentials);
        };

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("password verification task failed: {}", e))??;

        if !is_password_valid {
            tracing::warn!(user_id = %user.id, "login attempt with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        // Header::default() é HS256
        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// bcrypt é caro; fica fora do runtime assíncrono
async fn hash_password(password: &str) -> Result<String, AppError> {
    let password_clone = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("password hashing task failed: {}", e))??;
    Ok(hashed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use sqlx::postgres::PgPoolOptions;

    fn service() -> AuthService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        AuthService::new(pool, UserRepository::new(), "test-secret".to_string())
    }

    #[tokio::test]
    async fn tokens_carry_the_user_and_a_seven_day_expiry() {
        let user_id = Uuid::new_v4();
        let token = service().create_token(user_id).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id);
        let ttl = data.claims.exp - data.claims.iat;
        assert_eq!(ttl, 7 * 24 * 60 * 60);
    }

    #[tokio::test]
    async fn tokens_signed_with_another_secret_are_rejected() {
        let token = service().create_token(Uuid::new_v4()).unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn hashed_passwords_verify() {
        let hashed = hash_password("s3cret-pass").await.unwrap();
        assert_ne!(hashed, "s3cret-pass");
        assert!(verify("s3cret-pass", &hashed).unwrap());
        assert!(!verify("wrong-pass", &hashed).unwrap());
    }
}
