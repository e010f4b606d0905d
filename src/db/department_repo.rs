// src/db/department_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::projections::{city_json, columns},
    models::department::{Department, DepartmentWithCities},
};

const TABLE: &str = "departments";
const ENTITY: &str = "Department";

// Departamento + cidades agregadas num array JSONB
static SELECT_WITH_CITIES: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, \
         COALESCE((SELECT jsonb_agg({} ORDER BY c.name) FROM cities c WHERE c.department_id = d.id), \
         '[]'::jsonb) AS cities \
         FROM departments d",
        columns("d", &["id", "name", "created_at", "updated_at"]),
        city_json("c"),
    )
});

static LIST: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY d.name ASC", *SELECT_WITH_CITIES));

static BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE d.id = $1", *SELECT_WITH_CITIES));

#[derive(Clone, Default)]
pub struct DepartmentRepository;

impl DepartmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<DepartmentWithCities>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let departments = sqlx::query_as::<_, DepartmentWithCities>(LIST.as_str())
            .fetch_all(executor)
            .await?;
        Ok(departments)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<DepartmentWithCities>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department = sqlx::query_as::<_, DepartmentWithCities>(BY_ID.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(department)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM departments WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    pub async fn create<'e, E>(&self, executor: E, name: &str) -> Result<Department, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Department>(
            "INSERT INTO departments (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))
    }

    /// Atualização parcial: `None` mantém o valor gravado.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE departments
            SET name = COALESCE($2, name), updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))?;
        Ok(updated.is_some())
    }

    /// Retorna `false` quando não havia linha com esse id.
    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
