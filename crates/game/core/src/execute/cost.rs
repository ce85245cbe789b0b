//! Affordability checks and cost payment.
//!
//! The calculator is stateless. Payment re-checks every resource before the
//! first debit, so a failed payment never leaves a partial debit behind.

use crate::ability::Cost;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::ActorId;
use crate::state::{LedgerError, ResourceKind, ResourceLedger, WorldState};

/// Errors raised while paying a cost.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    #[error("not enough {resource}: need {required}, have {available}")]
    Insufficient {
        resource: ResourceKind,
        required: u32,
        available: i64,
    },

    #[error("paying actor `{0}` is not in the world")]
    PayerMissing(ActorId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl GameError for CostError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Insufficient { .. } => ErrorSeverity::Recoverable,
            Self::PayerMissing(_) | Self::Ledger(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Insufficient { .. } => "COST_INSUFFICIENT",
            Self::PayerMissing(_) => "COST_PAYER_MISSING",
            Self::Ledger(_) => "COST_LEDGER",
        }
    }
}

/// What a successful payment debited.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaymentReceipt {
    pub paid: Cost,
    pub total_cash_paid: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CostCalculator;

impl CostCalculator {
    pub fn can_afford(cost: &Cost, ledger: &ResourceLedger) -> bool {
        Self::shortfall(cost, ledger).is_none()
    }

    /// First resource the ledger cannot cover, in resource order.
    pub fn shortfall(cost: &Cost, ledger: &ResourceLedger) -> Option<CostError> {
        cost.iter()
            .find(|&(resource, amount)| !ledger.has_enough(resource, i64::from(amount)))
            .map(|(resource, amount)| CostError::Insufficient {
                resource,
                required: amount,
                available: ledger.balance(resource),
            })
    }

    /// Debits `cost` from the shared ledger on behalf of `payer`.
    ///
    /// Cash spent is also credited to the payer's personal cash pool.
    pub fn pay(
        cost: &Cost,
        world: &mut WorldState,
        payer: &ActorId,
        reason: &str,
    ) -> Result<PaymentReceipt, CostError> {
        if let Some(shortfall) = Self::shortfall(cost, &world.resources) {
            return Err(shortfall);
        }

        let actor = world
            .actors
            .iter_mut()
            .find(|actor| &actor.id == payer)
            .ok_or_else(|| CostError::PayerMissing(payer.clone()))?;

        for (resource, amount) in cost.iter() {
            world
                .resources
                .modify(resource, -i64::from(amount), reason)?;
        }

        let total_cash_paid = cost.get(ResourceKind::Cash);
        if total_cash_paid > 0 {
            actor.credit(ResourceKind::Cash, i64::from(total_cash_paid));
        }

        Ok(PaymentReceipt {
            paid: cost.clone(),
            total_cash_paid,
        })
    }
}
