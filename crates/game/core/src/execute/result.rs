//! Structured outcomes returned to callers.
//!
//! Nothing in the execution pipeline surfaces a Rust error to the host: every
//! attempt ends in an [`ExecutionResult`], with a closed [`ReasonCode`] when it
//! did not run.

use crate::ability::EffectKind;
use crate::error::GameError;
use crate::events::AbilityEvent;
use crate::execute::{ExecutionContext, PaymentReceipt};
use crate::ids::{AbilityId, ActorId, ExecutionId};

// ============================================================================
// Reasons
// ============================================================================

/// Why an execution did not run.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReasonCode {
    ActorNotFound,
    ActorIncapacitated,
    AbilityNotFound,
    InsufficientResources,
    OnCooldown,
    RequirementsNotMet,
    /// Internal failure; the player only sees a generic message.
    ExecutionError,
}

/// Result of one validator, or of the whole chain.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub reason: Option<ReasonCode>,
    /// Human-readable, suitable for direct display.
    pub message: String,
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
            message: String::new(),
        }
    }

    pub fn fail(reason: ReasonCode, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
            message: message.into(),
        }
    }
}

// ============================================================================
// Effect Results
// ============================================================================

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EffectStatus {
    Applied,
    /// Deferred by a `delayed` effect.
    Scheduled,
    /// No handler for this kind; soft failure.
    Unknown,
    Failed,
}

/// Outcome of one effect in an ability's list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EffectResult {
    /// Position in the ability's effect list.
    pub index: usize,
    pub kind: EffectKind,
    pub status: EffectStatus,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl EffectResult {
    pub const UNKNOWN_EFFECT: &'static str = "unknown_effect";

    pub fn applied(index: usize, kind: EffectKind, detail: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            status: EffectStatus::Applied,
            detail: detail.into(),
            error_code: None,
        }
    }

    pub fn unknown(index: usize, kind: EffectKind) -> Self {
        Self {
            index,
            kind,
            status: EffectStatus::Unknown,
            detail: format!("no handler for effect kind `{kind}`"),
            error_code: Some(Self::UNKNOWN_EFFECT.to_string()),
        }
    }

    pub fn failed<E: GameError>(index: usize, kind: EffectKind, error: &E) -> Self {
        Self {
            index,
            kind,
            status: EffectStatus::Failed,
            detail: error.to_string(),
            error_code: Some(error.error_code().to_string()),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self.status, EffectStatus::Applied | EffectStatus::Scheduled)
    }
}

// ============================================================================
// Execution Result
// ============================================================================

/// What the engine returns for every `execute_ability` call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionResult {
    pub execution_id: ExecutionId,
    pub actor: ActorId,
    pub ability: AbilityId,
    pub day: u32,
    pub passive: bool,
    pub success: bool,
    pub reason: Option<ReasonCode>,
    pub message: String,
    pub payment: Option<PaymentReceipt>,
    pub effects: Vec<EffectResult>,
    /// Domain events to publish, in emission order.
    pub events: Vec<AbilityEvent>,
}

impl ExecutionResult {
    /// Rejected before anything ran.
    pub fn rejected(ctx: &ExecutionContext, outcome: ValidationOutcome) -> Self {
        Self {
            execution_id: ctx.execution_id,
            actor: ctx.actor.clone(),
            ability: ctx.ability.clone(),
            day: ctx.day(),
            passive: ctx.passive,
            success: false,
            reason: outcome.reason,
            message: outcome.message,
            payment: None,
            effects: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Ran, with per-effect results.
    pub fn completed(
        ctx: &ExecutionContext,
        payment: PaymentReceipt,
        effects: Vec<EffectResult>,
        events: Vec<AbilityEvent>,
    ) -> Self {
        Self {
            execution_id: ctx.execution_id,
            actor: ctx.actor.clone(),
            ability: ctx.ability.clone(),
            day: ctx.day(),
            passive: ctx.passive,
            success: true,
            reason: None,
            message: String::new(),
            payment: Some(payment),
            effects,
            events,
        }
    }

    pub fn failed_effects(&self) -> impl Iterator<Item = &EffectResult> {
        self.effects.iter().filter(|effect| !effect.is_applied())
    }
}
