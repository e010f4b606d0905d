// src/config.rs

use anyhow::{anyhow, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use crate::{
    db::{
        CityRepository, ClientRepository, DepartmentRepository, InsuranceRepository,
        InsuranceTypeRepository, InsurerRepository, UserRepository,
    },
    services::{auth::AuthService, client_service::ClientService, department_service::DepartmentService},
};

const DEFAULT_API_VERSION: &str = "/v1";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuração lida do ambiente (ou do `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Prefixo das rotas, sempre no formato `/v1`.
    pub api_version: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;
        let jwt_secret = lookup("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;

        let api_version = normalize_version(
            lookup("API_VERSION").as_deref().unwrap_or(DEFAULT_API_VERSION),
        );

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().with_context(|| format!("PORT is not a valid port: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            api_version,
            host,
            port,
            max_connections,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

// "v1", "/v1/", "//v1" -> "/v1"; vazio -> "" (rotas na raiz)
fn normalize_version(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,

    pub department_repo: DepartmentRepository,
    pub city_repo: CityRepository,
    pub insurer_repo: InsurerRepository,
    pub insurance_type_repo: InsuranceTypeRepository,
    pub insurance_repo: InsuranceRepository,
    pub client_repo: ClientRepository,
    pub user_repo: UserRepository,

    pub department_service: DepartmentService,
    pub client_service: ClientService,
    pub auth_service: AuthService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre uma pool já criada.
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let department_repo = DepartmentRepository::new();
        let city_repo = CityRepository::new();
        let insurance_repo = InsuranceRepository::new();
        let client_repo = ClientRepository::new();
        let user_repo = UserRepository::new();

        let department_service =
            DepartmentService::new(db_pool.clone(), department_repo.clone(), city_repo.clone());
        let client_service =
            ClientService::new(db_pool.clone(), client_repo.clone(), insurance_repo.clone());
        let auth_service =
            AuthService::new(db_pool.clone(), user_repo.clone(), config.jwt_secret.clone());

        Self {
            db_pool,
            config: Arc::new(config),
            department_repo,
            city_repo,
            insurer_repo: InsurerRepository::new(),
            insurance_type_repo: InsuranceTypeRepository::new(),
            insurance_repo,
            client_repo,
            user_repo,
            department_service,
            client_service,
            auth_service,
        }
    }
}
