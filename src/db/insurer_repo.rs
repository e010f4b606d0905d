// src/db/insurer_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::projections::{city_json, columns, department_json, nullable},
    models::insurer::{CreateInsurerPayload, InsurerDetail, UpdateInsurerPayload},
};

const TABLE: &str = "insurers";
const ENTITY: &str = "Insurer";

const INSURER_COLUMNS: [&str; 9] = [
    "id", "name", "nit", "address", "phone", "email", "available", "created_at", "updated_at",
];

static SELECT_DETAIL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, {} AS department, {} AS city \
         FROM insurers i \
         LEFT JOIN departments d ON d.id = i.department_id \
         LEFT JOIN cities c ON c.id = i.city_id",
        columns("i", &INSURER_COLUMNS),
        nullable("d", &department_json("d")),
        nullable("c", &city_json("c")),
    )
});

static LIST: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY i.name ASC", *SELECT_DETAIL));

static BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE i.id = $1", *SELECT_DETAIL));

#[derive(Clone, Default)]
pub struct InsurerRepository;

impl InsurerRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<InsurerDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurers = sqlx::query_as::<_, InsurerDetail>(LIST.as_str())
            .fetch_all(executor)
            .await?;
        Ok(insurers)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<InsurerDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let insurer = sqlx::query_as::<_, InsurerDetail>(BY_ID.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(insurer)
    }

    pub async fn exists<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM insurers WHERE id = $1)")
                .bind(id)
                .fetch_one(executor)
                .await?;
        Ok(exists)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateInsurerPayload,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO insurers (
                name, nit, address, phone, email, available, department_id, city_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.nit)
        .bind(&input.address)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(input.available)
        .bind(input.department_id)
        .bind(input.city_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateInsurerPayload,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE insurers
            SET name = COALESCE($2, name),
                nit = COALESCE($3, nit),
                address = COALESCE($4, address),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                available = COALESCE($7, available),
                department_id = COALESCE($8, department_id),
                city_id = COALESCE($9, city_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.nit.as_deref())
        .bind(input.address.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.email.as_deref())
        .bind(input.available)
        .bind(input.department_id)
        .bind(input.city_id)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))?;
        Ok(updated.is_some())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM insurers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
