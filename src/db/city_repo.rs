// src/db/city_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::projections::{columns, department_json, nullable},
    models::city::{City, CityDetail},
};

const TABLE: &str = "cities";
const ENTITY: &str = "City";
const CITY_COLUMNS: [&str; 4] = ["id", "name", "created_at", "updated_at"];

static SELECT_DETAIL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, {} AS department \
         FROM cities c \
         LEFT JOIN departments d ON d.id = c.department_id",
        columns("c", &CITY_COLUMNS),
        nullable("d", &department_json("d")),
    )
});

static LIST: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY c.name ASC", *SELECT_DETAIL));

static BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE c.id = $1", *SELECT_DETAIL));

#[derive(Clone, Default)]
pub struct CityRepository;

impl CityRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<CityDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cities = sqlx::query_as::<_, CityDetail>(LIST.as_str())
            .fetch_all(executor)
            .await?;
        Ok(cities)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<CityDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let city = sqlx::query_as::<_, CityDetail>(BY_ID.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(city)
    }

    /// Cidades de um departamento, sem o department_id.
    pub async fn list_by_department<'e, E>(
        &self,
        executor: E,
        department_id: Uuid,
    ) -> Result<Vec<City>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let cities = sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM cities
            WHERE department_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(department_id)
        .fetch_all(executor)
        .await?;
        Ok(cities)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        department_id: Option<Uuid>,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO cities (name, department_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(department_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        department_id: Option<Uuid>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE cities
            SET name = COALESCE($2, name),
                department_id = COALESCE($3, department_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(department_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))?;
        Ok(updated.is_some())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cities WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apaga toda cidade que ficou sem departamento. Retorna quantas foram.
    pub async fn delete_orphans<'e, E>(&self, executor: E) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cities WHERE department_id IS NULL")
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
