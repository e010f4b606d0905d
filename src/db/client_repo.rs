// src/db/client_repo.rs

use std::sync::LazyLock;

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::projections::{city_json, columns, department_json, insurance_json, nullable},
    models::client::{
        ClientDetail, ClientValuationRow, CreateClientPayload, UpdateClientPayload,
    },
    services::valuation::Valuation,
};

const TABLE: &str = "clients";
const ENTITY: &str = "Client";
const CLIENT_COLUMNS: [&str; 15] = [
    "id",
    "name",
    "last_name",
    "email",
    "client_type",
    "dni_type",
    "dni_number",
    "phone",
    "age",
    "address",
    "value_to_insure",
    "insured",
    "insured_value",
    "created_at",
    "updated_at",
];

static SELECT_DETAIL: LazyLock<String> = LazyLock::new(|| {
    format!(
        "SELECT {}, {} AS department, {} AS city, {} AS insurance \
         FROM clients cl \
         LEFT JOIN departments d ON d.id = cl.department_id \
         LEFT JOIN cities c ON c.id = cl.city_id \
         LEFT JOIN insurances s ON s.id = cl.insurance_id",
        columns("cl", &CLIENT_COLUMNS),
        nullable("d", &department_json("d")),
        nullable("c", &city_json("c")),
        nullable("s", &insurance_json("s")),
    )
});

static LIST: LazyLock<String> =
    LazyLock::new(|| format!("{} ORDER BY cl.last_name ASC, cl.name ASC", *SELECT_DETAIL));

static BY_ID: LazyLock<String> =
    LazyLock::new(|| format!("{} WHERE cl.id = $1", *SELECT_DETAIL));

static BY_INSURANCE: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{} WHERE cl.insurance_id = $1 ORDER BY cl.last_name ASC, cl.name ASC",
        *SELECT_DETAIL
    )
});

#[derive(Clone, Default)]
pub struct ClientRepository;

impl ClientRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<ClientDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, ClientDetail>(LIST.as_str())
            .fetch_all(executor)
            .await?;
        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<ClientDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, ClientDetail>(BY_ID.as_str())
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    pub async fn list_by_insurance<'e, E>(
        &self,
        executor: E,
        insurance_id: Uuid,
    ) -> Result<Vec<ClientDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let clients = sqlx::query_as::<_, ClientDetail>(BY_INSURANCE.as_str())
            .bind(insurance_id)
            .fetch_all(executor)
            .await?;
        Ok(clients)
    }

    /// Seguro e valor gravados, com `FOR UPDATE` para travar a linha
    /// durante o recalculo.
    pub async fn find_valuation<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<ClientValuationRow>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, ClientValuationRow>(
            "SELECT insurance_id, value_to_insure FROM clients WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        input: &CreateClientPayload,
        valuation: Valuation,
    ) -> Result<Uuid, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO clients (
                name, last_name, email, client_type, dni_type, dni_number, phone,
                age, address, value_to_insure, insured, insured_value,
                department_id, city_id, insurance_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.client_type)
        .bind(&input.dni_type)
        .bind(&input.dni_number)
        .bind(&input.phone)
        .bind(input.age)
        .bind(&input.address)
        .bind(input.value_to_insure)
        .bind(valuation.insured)
        .bind(valuation.insured_value)
        .bind(input.department_id)
        .bind(input.city_id)
        .bind(input.insurance_id)
        .fetch_one(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))
    }

    /// Aplica o payload e grava a avaliação recalculada.
    ///
    /// `insurance_id` e `value_to_insure` vêm já resolvidos pelo plano de
    /// atualização, então são gravados sempre, nunca via COALESCE.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateClientPayload,
        insurance_id: Uuid,
        value_to_insure: i32,
        valuation: Valuation,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE clients
            SET name = COALESCE($2, name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                client_type = COALESCE($5, client_type),
                dni_type = COALESCE($6, dni_type),
                dni_number = COALESCE($7, dni_number),
                phone = COALESCE($8, phone),
                age = COALESCE($9, age),
                address = COALESCE($10, address),
                department_id = COALESCE($11, department_id),
                city_id = COALESCE($12, city_id),
                insurance_id = $13,
                value_to_insure = $14,
                insured = $15,
                insured_value = $16,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.last_name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.client_type.as_deref())
        .bind(input.dni_type.as_deref())
        .bind(input.dni_number.as_deref())
        .bind(input.phone.as_deref())
        .bind(input.age)
        .bind(input.address.as_deref())
        .bind(input.department_id)
        .bind(input.city_id)
        .bind(insurance_id)
        .bind(value_to_insure)
        .bind(valuation.insured)
        .bind(valuation.insured_value)
        .fetch_optional(executor)
        .await
        .map_err(|e| map_write_error(TABLE, ENTITY, e))?;
        Ok(updated.is_some())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
