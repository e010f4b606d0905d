// src/db/insurance_type_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::projections::{columns, insurer_detail_json, nullable},
    models::insurance_type::{
        CreateInsuranceTypePayload, InsuranceType, InsuranceTypeDetail, UpdateInsuranceTypePayload,
    },
};

const TABLE: &str = "insurance_types";
const ENTITY: &str = "Insurance type";
const TYPE_COLUMNS: [&str; 5] = ["id", "name", "available", "created_at", "updated_at"];

static SELECT_DETAIL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, {} AS insurer \
         FROM insurance_types t \
         LEFT JOIN insurers i ON i.id = t.insurer_id \
         LEFT JOIN departments d ON d.id = i.department_id \
         LEFT JOIN cities c ON c.id = i.city_id",
        columns("t", &TYPE_COLUMNS),
        nullable("i", &insurer_detail_json("i", "d", "c")),
    )
});

static LIST: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY t.name ASC", *SELECT_DETAIL));

static BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE t.id = $1", *SELECT_DETAIL));

#[derive(Clone, Default)]
pub struct InsuranceTypeRepository;

impl InsuranceTypeRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<InsuranceTypeDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let types = sqlx::query_as::<_, InsuranceTypeDetail>(LIST.as_str())
            .fetch_all(executor)
            .await?;
        Ok(types)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InsuranceTypeDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurance_type = sqlx::query_as::<_, InsuranceTypeDetail>(BY_ID.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(insurance_type)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM insurance_types WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    /// Tipos de seguro de uma seguradora, sem o insurer_id.
    pub async fn list_by_insurer<'e, E>(
        &self,
        executor: E,
        insurer_id: Uuid,
    ) -> Result<Vec<InsuranceType>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let types = sqlx::query_as::<_, InsuranceType>(
            r#"
            SELECT id, name, available, created_at, updated_at
            FROM insurance_types
            WHERE insurer_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(insurer_id)
        .fetch_all(executor)
        .await?;
        Ok(types)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateInsuranceTypePayload,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO insurance_types (name, available, insurer_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.available)
        .bind(input.insurer_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateInsuranceTypePayload,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE insurance_types
            SET name = COALESCE($2, name),
                available = COALESCE($3, available),
                insurer_id = COALESCE($4, insurer_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.available)
        .bind(input.insurer_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))?;
        Ok(updated.is_some())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM insurance_types WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
