// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, InsuranceRepository},
    models::client::{ClientDetail, CreateClientPayload, UpdateClientPayload},
    services::valuation::{self, Threshold},
};

/// Escritas de clientes: toda criação e atualização passa pela regra de
/// avaliação antes de chegar ao banco.
#[derive(Clone)]
pub struct ClientService {
    pool: PgPool,
    client_repo: ClientRepository,
    insurance_repo: InsuranceRepository,
}

impl ClientService {
    pub fn new(pool: PgPool, client_repo: ClientRepository, insurance_repo: InsuranceRepository) -> Self {
        Self { pool, client_repo, insurance_repo }
    }

    pub async fn create_client(&self, payload: &CreateClientPayload) -> Result<ClientDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let insurance = self
            .insurance_repo
            .find_plain(&mut *tx, payload.insurance_id)
            .await?
            .ok_or_else(|| AppError::InvalidReference("insurance".to_string()))?;

        let valuation = valuation::evaluate(
            payload.value_to_insure,
            insurance.coverage(),
            Threshold::AtLeast,
        );

        let id = self.client_repo.create(&mut *tx, payload, valuation).await?;
        let created = self
            .client_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;

        tx.commit().await?;

        tracing::info!(
            client_id = %id,
            insured = valuation.insured,
            insured_value = valuation.insured_value,
            "client created"
        );
        Ok(created)
    }

    pub async fn update_client(
        &self,
        id: Uuid,
        payload: &UpdateClientPayload,
    ) -> Result<ClientDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let stored = self
            .client_repo
            .find_valuation(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;

        let plan = valuation::plan_update(stored.into(), payload.insurance_id, payload.value_to_insure)?;

        let insurance = self
            .insurance_repo
            .find_plain(&mut *tx, plan.insurance_id)
            .await?
            .ok_or_else(|| AppError::InvalidReference("insurance".to_string()))?;

        let valuation = plan.apply(insurance.coverage());

        self.client_repo
            .update(&mut *tx, id, payload, plan.insurance_id, plan.value_to_insure, valuation)
            .await?;

        let updated = self
            .client_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Client"))?;

        tx.commit().await?;

        tracing::info!(
            client_id = %id,
            insurance_changed = plan.insurance_changed,
            insured = valuation.insured,
            "client updated"
        );
        Ok(updated)
    }
}
