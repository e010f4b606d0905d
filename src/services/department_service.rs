// src/services/department_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CityRepository, DepartmentRepository},
};

#[derive(Clone)]
pub struct DepartmentService {
    pool: PgPool,
    department_repo: DepartmentRepository,
    city_repo: CityRepository,
}

impl DepartmentService {
    pub fn new(pool: PgPool, department_repo: DepartmentRepository, city_repo: CityRepository) -> Self {
        Self { pool, department_repo, city_repo }
    }

    /// Apaga o departamento e, na mesma transação, toda cidade sem departamento.
    ///
    /// A FK zera o `department_id` das cidades do departamento apagado, então
    /// elas entram na limpeza junto com qualquer órfã que já existisse.
    pub async fn delete_department(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        if !self.department_repo.delete(&mut *tx, id).await? {
            // Drop do tx faz o rollback
            return Err(AppError::NotFound("Department"));
        }

        let removed = self.city_repo.delete_orphans(&mut *tx).await?;

        tx.commit().await?;

        tracing::info!(department_id = %id, cities_removed = removed, "department deleted");
        Ok(())
    }
}
