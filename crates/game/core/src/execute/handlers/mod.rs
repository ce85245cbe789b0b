//! Effect handlers: the only code that mutates the world on behalf of an ability.
//!
//! Each [`EffectKind`] maps to one boxed [`EffectHandler`]. The registry applies
//! an ability's effect list strictly in order; a failing handler is recorded in
//! the per-effect results and the remaining effects still run.
//!
//! # Adding a handler
//!
//! 1. Implement [`EffectHandler`] for a unit struct
//! 2. Return the variant you handle from `kind()`
//! 3. Register it with [`EffectHandlerRegistry::register`]

mod actor;
mod narrative;
mod request;
mod resource;
mod room;
mod schedule;
mod state;

pub use actor::{DetectInfectionHandler, HealHandler};
pub use narrative::LogHandler;
pub use request::{ImproveSatisfactionHandler, RequestRemovalHandler};
pub use resource::ResourceDeltaHandler;
pub use room::{ReinforceHandler, RepairHandler};
pub use schedule::{DelayedHandler, EffectSchedule, ScheduledEffect};
pub use state::{AdjustStateHandler, SetStateHandler};

use std::collections::HashMap;

use tracing::warn;

use crate::ability::{EffectDescriptor, EffectKind, TargetSelector};
use crate::error::{ErrorSeverity, GameError};
use crate::events::AbilityEvent;
use crate::execute::{EffectResult, EffectStatus, ExecutionContext};
use crate::ids::{ActorId, RoomId};
use crate::state::{LedgerError, StateError, WorldState};

// ============================================================================
// Errors & Outcomes
// ============================================================================

/// Errors raised by an effect handler. Recorded per effect, never propagated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectError {
    #[error("handler for `{expected}` received a `{found}` effect")]
    KindMismatch { expected: EffectKind, found: EffectKind },

    #[error("no target available for `{kind}`")]
    NoTarget { kind: EffectKind },

    #[error("actor `{0}` not found")]
    ActorNotFound(ActorId),

    #[error("room `{0}` not found")]
    RoomNotFound(RoomId),

    #[error("delayed effect needs at least one day, got {days}")]
    InvalidDelay { days: u32 },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::KindMismatch { .. } => ErrorSeverity::Internal,
            Self::InvalidDelay { .. } => ErrorSeverity::Validation,
            Self::Ledger(_) => ErrorSeverity::Recoverable,
            Self::State(err) => err.severity(),
            Self::NoTarget { .. } | Self::ActorNotFound(_) | Self::RoomNotFound(_) => {
                ErrorSeverity::Recoverable
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::KindMismatch { .. } => "EFFECT_KIND_MISMATCH",
            Self::NoTarget { .. } => "EFFECT_NO_TARGET",
            Self::ActorNotFound(_) => "EFFECT_ACTOR_NOT_FOUND",
            Self::RoomNotFound(_) => "EFFECT_ROOM_NOT_FOUND",
            Self::InvalidDelay { .. } => "EFFECT_INVALID_DELAY",
            Self::Ledger(err) => err.error_code(),
            Self::State(err) => err.error_code(),
        }
    }
}

/// What a handler reports after a successful application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectOutcome {
    pub status: EffectStatus,
    pub detail: String,
}

impl EffectOutcome {
    pub fn applied(detail: impl Into<String>) -> Self {
        Self {
            status: EffectStatus::Applied,
            detail: detail.into(),
        }
    }

    pub fn scheduled(detail: impl Into<String>) -> Self {
        Self {
            status: EffectStatus::Scheduled,
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Context
// ============================================================================

/// Mutable view handed to every handler.
pub struct EffectContext<'a> {
    pub execution: &'a ExecutionContext,

    pub world: &'a mut WorldState,

    /// Pending `delayed` effects.
    pub schedule: &'a mut EffectSchedule,

    /// Domain events emitted so far in this execution.
    pub events: &'a mut Vec<AbilityEvent>,
}

impl EffectContext<'_> {
    pub fn caster(&self) -> &ActorId {
        &self.execution.actor
    }

    pub fn emit(&mut self, event: AbilityEvent) {
        self.events.push(event);
    }

    /// Resolves a target selector against the current roster.
    pub fn resolve_target(&self, selector: &TargetSelector) -> Option<ActorId> {
        match selector {
            TargetSelector::Caster => Some(self.caster().clone()),
            TargetSelector::FirstIncapacitated => self
                .world
                .incapacitated_actors()
                .next()
                .map(|actor| actor.id.clone()),
            TargetSelector::Actor(id) => self.world.actor(id).map(|actor| actor.id.clone()),
        }
    }
}

// ============================================================================
// Handler Trait & Registry
// ============================================================================

pub trait EffectHandler: Send + Sync {
    /// The descriptor variant this handler applies.
    fn kind(&self) -> EffectKind;

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError>;
}

/// Guard for handlers receiving a descriptor meant for someone else.
pub(crate) fn mismatch(expected: EffectKind, effect: &EffectDescriptor) -> EffectError {
    EffectError::KindMismatch {
        expected,
        found: effect.kind(),
    }
}

/// Maps effect kinds to their handlers.
pub struct EffectHandlerRegistry {
    handlers: HashMap<EffectKind, Box<dyn EffectHandler>>,
}

impl Default for EffectHandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl EffectHandlerRegistry {
    /// Registry with no handlers; every effect is reported unknown.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with a handler for every built-in effect kind.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(ResourceDeltaHandler);
        registry.register(SetStateHandler);
        registry.register(AdjustStateHandler);
        registry.register(HealHandler);
        registry.register(RepairHandler);
        registry.register(ReinforceHandler);
        registry.register(DetectInfectionHandler);
        registry.register(LogHandler);
        registry.register(DelayedHandler);
        registry.register(RequestRemovalHandler);
        registry.register(ImproveSatisfactionHandler);
        registry
    }

    /// Registers `handler`, replacing any previous handler for the same kind.
    pub fn register(&mut self, handler: impl EffectHandler + 'static) -> &mut Self {
        self.handlers.insert(handler.kind(), Box::new(handler));
        self
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Applies one effect and converts the outcome into a result entry.
    pub fn apply(
        &self,
        index: usize,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> EffectResult {
        let kind = effect.kind();
        let Some(handler) = self.handlers.get(&kind) else {
            warn!(
                target: "engine::effects",
                execution = %ctx.execution.execution_id,
                ability = %ctx.execution.ability,
                kind = %kind,
                "No handler for effect kind"
            );
            return EffectResult::unknown(index, kind);
        };

        match handler.handle(effect, ctx) {
            Ok(outcome) => EffectResult {
                index,
                kind,
                status: outcome.status,
                detail: outcome.detail,
                error_code: None,
            },
            Err(error) => {
                warn!(
                    target: "engine::effects",
                    execution = %ctx.execution.execution_id,
                    ability = %ctx.execution.ability,
                    kind = %kind,
                    code = error.error_code(),
                    error = %error,
                    "Effect failed"
                );
                EffectResult::failed(index, kind, &error)
            }
        }
    }

    /// Applies `effects` in declared order. Failures never stop the list.
    pub fn apply_all(
        &self,
        effects: &[EffectDescriptor],
        ctx: &mut EffectContext<'_>,
    ) -> Vec<EffectResult> {
        effects
            .iter()
            .enumerate()
            .map(|(index, effect)| self.apply(index, effect, ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::ExecuteOptions;
    use crate::state::{Actor, ResourceKind, ResourceLedger};

    pub(super) fn execution() -> ExecutionContext {
        ExecutionContext::new(1, 1, "Doc".into(), "test".into(), ExecuteOptions::explicit())
    }

    #[test]
    fn list_continues_past_failures_and_unknown_kinds() {
        let registry = EffectHandlerRegistry::standard();
        let execution = execution();
        let mut world = WorldState::new(1)
            .with_actor(Actor::new("Doc", "doctor"))
            .with_resources(ResourceLedger::new().with_balance(ResourceKind::Food, 1));
        let mut schedule = EffectSchedule::new();
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution: &execution,
            world: &mut world,
            schedule: &mut schedule,
            events: &mut events,
        };

        let effects = vec![
            EffectDescriptor::resource_delta(ResourceKind::Food, -5),
            EffectDescriptor::Unknown,
            EffectDescriptor::resource_delta(ResourceKind::Water, 2),
        ];
        let results = registry.apply_all(&effects, &mut ctx);

        assert_eq!(results[0].status, EffectStatus::Failed);
        assert_eq!(results[0].error_code.as_deref(), Some("LEDGER_INSUFFICIENT"));
        assert_eq!(results[1].status, EffectStatus::Unknown);
        assert_eq!(results[1].error_code.as_deref(), Some(EffectResult::UNKNOWN_EFFECT));
        assert_eq!(results[2].status, EffectStatus::Applied);
        assert_eq!(world.resources.balance(ResourceKind::Water), 2);
    }

    #[test]
    fn unregistered_kind_is_soft_failure() {
        let registry = EffectHandlerRegistry::empty();
        let execution = execution();
        let mut world = WorldState::new(1);
        let mut schedule = EffectSchedule::new();
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution: &execution,
            world: &mut world,
            schedule: &mut schedule,
            events: &mut events,
        };

        let result = registry.apply(0, &EffectDescriptor::log("hi"), &mut ctx);
        assert_eq!(result.status, EffectStatus::Unknown);
        assert!(events.is_empty());
    }
}
