// src/services/valuation.rs

//! Regra de avaliação do seguro de um cliente.
//!
//! Deriva `insured` e `insured_value` a partir do valor declarado pelo cliente
//! e da cobertura (percentual e mínimo) do seguro referenciado.

use thiserror::Error;
use uuid::Uuid;

/// Percentual e mínimo do seguro usado no cálculo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub percentage_to_insure: i32,
    pub min_to_insure: i32,
}

/// Comparador usado contra o `min_to_insure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    /// `value_to_insure >= min_to_insure`
    AtLeast,
    /// `value_to_insure > min_to_insure`
    Above,
}

impl Threshold {
    fn admits(self, value_to_insure: i32, min_to_insure: i32) -> bool {
        match self {
            Threshold::AtLeast => value_to_insure >= min_to_insure,
            Threshold::Above => value_to_insure > min_to_insure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Valuation {
    pub insured: bool,
    pub insured_value: i64,
}

/// `floor(value_to_insure * percentage_to_insure / 100)`, em 64 bits.
pub fn insured_value(value_to_insure: i32, percentage_to_insure: i32) -> i64 {
    (i64::from(value_to_insure) * i64::from(percentage_to_insure)).div_euclid(100)
}

pub fn evaluate(value_to_insure: i32, coverage: Coverage, threshold: Threshold) -> Valuation {
    Valuation {
        insured: threshold.admits(value_to_insure, coverage.min_to_insure),
        insured_value: insured_value(value_to_insure, coverage.percentage_to_insure),
    }
}

// ---
// Recalculo na atualização
// ---

/// O que está gravado hoje na linha do cliente.
#[derive(Debug, Clone, Copy)]
pub struct StoredValuation {
    pub insurance_id: Option<Uuid>,
    pub value_to_insure: i32,
}

/// Qual seguro buscar, com qual valor e com qual comparador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdatePlan {
    pub insurance_id: Uuid,
    pub value_to_insure: i32,
    pub threshold: Threshold,
    pub insurance_changed: bool,
}

impl UpdatePlan {
    pub fn apply(&self, coverage: Coverage) -> Valuation {
        evaluate(self.value_to_insure, coverage, self.threshold)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValuationError {
    #[error("The client has no insurance; an insurance_id is required.")]
    NoInsurance,
}

/// Decide como recalcular um cliente numa atualização.
///
/// - Seguro trocado: usa o novo seguro, o valor novo (ou o gravado) e `>=`.
/// - Seguro mantido com valor novo: usa o seguro atual e `>`.
/// - Seguro mantido sem valor novo: usa o valor gravado e `>=`, para que
///   editar outros campos nunca mude o `insured`.
pub fn plan_update(
    stored: StoredValuation,
    requested_insurance: Option<Uuid>,
    requested_value: Option<i32>,
) -> Result<UpdatePlan, ValuationError> {
    let value_to_insure = requested_value.unwrap_or(stored.value_to_insure);

    match requested_insurance {
        Some(id) if stored.insurance_id != Some(id) => Ok(UpdatePlan {
            insurance_id: id,
            value_to_insure,
            threshold: Threshold::AtLeast,
            insurance_changed: true,
        }),
        _ => {
            let insurance_id = stored.insurance_id.ok_or(ValuationError::NoInsurance)?;
            let threshold = if requested_value.is_some() {
                Threshold::Above
            } else {
                Threshold::AtLeast
            };
            Ok(UpdatePlan {
                insurance_id,
                value_to_insure,
                threshold,
                insurance_changed: false,
            })
        }
    }
}
