// src/db/insurance_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::projections::{columns, insurance_type_detail_json, nullable},
    models::insurance::{
        CreateInsurancePayload, Insurance, InsuranceDetail, UpdateInsurancePayload,
    },
};

const TABLE: &str = "insurances";
const ENTITY: &str = "Insurance";
const INSURANCE_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "percentage_to_insure",
    "min_to_insure",
    "available",
    "created_at",
    "updated_at",
];

// Seguro -> tipo -> seguradora -> (departamento, cidade)
static SELECT_DETAIL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, {} AS insurance_type \
         FROM insurances s \
         LEFT JOIN insurance_types t ON t.id = s.insurance_type_id \
         LEFT JOIN insurers i ON i.id = t.insurer_id \
         LEFT JOIN departments d ON d.id = i.department_id \
         LEFT JOIN cities c ON c.id = i.city_id",
        columns("s", &INSURANCE_COLUMNS),
        nullable("t", &insurance_type_detail_json("t", "i", "d", "c")),
    )
});

static LIST: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY s.name ASC", *SELECT_DETAIL));

static BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE s.id = $1", *SELECT_DETAIL));

#[derive(Clone, Default)]
pub struct InsuranceRepository;

impl InsuranceRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<InsuranceDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurances = sqlx::query_as::<_, InsuranceDetail>(LIST.as_str())
            .fetch_all(executor)
            .await?;
        Ok(insurances)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InsuranceDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurance = sqlx::query_as::<_, InsuranceDetail>(BY_ID.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(insurance)
    }

    /// A linha "plana", usada pela avaliação dos clientes.
    pub async fn find_plain<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Insurance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurance = sqlx::query_as::<_, Insurance>(
            r#"
            SELECT id, name, percentage_to_insure, min_to_insure, available, created_at, updated_at
            FROM insurances
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(insurance)
    }

    /// Seguros de um tipo, sem o insurance_type_id.
    pub async fn list_by_type<'e, E>(
        &self,
        executor: E,
        insurance_type_id: Uuid,
    ) -> Result<Vec<Insurance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurances = sqlx::query_as::<_, Insurance>(
            r#"
            SELECT id, name, percentage_to_insure, min_to_insure, available, created_at, updated_at
            FROM insurances
            WHERE insurance_type_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(insurance_type_id)
        .fetch_all(executor)
        .await?;
        Ok(insurances)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateInsurancePayload,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO insurances (
                name, percentage_to_insure, min_to_insure, available, insurance_type_id
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.percentage_to_insure)
        .bind(input.min_to_insure)
        .bind(input.available)
        .bind(input.insurance_type_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))
    }

    // Mudar percentual/mínimo não reavalia os clientes já gravados:
    // eles só são recalculados na próxima escrita de cada cliente.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateInsurancePayload,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE insurances
            SET name = COALESCE($2, name),
                percentage_to_insure = COALESCE($3, percentage_to_insure),
                min_to_insure = COALESCE($4, min_to_insure),
                available = COALESCE($5, available),
                insurance_type_id = COALESCE($6, insurance_type_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.percentage_to_insure)
        .bind(input.min_to_insure)
        .bind(input.available)
        .bind(input.insurance_type_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))?;
        Ok(updated.is_some())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM insurances WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
