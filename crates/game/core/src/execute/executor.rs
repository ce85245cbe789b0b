//! Category executors.
//!
//! Every executor shares the base pipeline (pay cost, then apply effects in
//! declared order) and differs only in the category event it adds. Executors
//! hold no state between calls.

use crate::ability::{AbilityCategory, AbilityDefinition};
use crate::error::{ErrorSeverity, GameError};
use crate::events::AbilityEvent;
use crate::execute::handlers::{EffectContext, EffectHandlerRegistry, EffectSchedule};
use crate::execute::{CostCalculator, CostError, EffectResult, ExecutionContext, PaymentReceipt};
use crate::state::WorldState;

/// Errors that abort an execution after validation passed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    #[error("cost payment failed: {0}")]
    Payment(#[from] CostError),

    #[error("ability `{ability}` vanished from the registry after validation")]
    AbilityMissing { ability: String },
}

impl GameError for ExecutionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Payment(err) => err.error_code(),
            Self::AbilityMissing { .. } => "EXECUTION_ABILITY_MISSING",
        }
    }
}

/// Everything an executor needs for one run.
pub struct ExecutionScope<'a> {
    pub ability: &'a AbilityDefinition,
    pub execution: &'a ExecutionContext,
    pub world: &'a mut WorldState,
    pub handlers: &'a EffectHandlerRegistry,
    pub schedule: &'a mut EffectSchedule,
}

/// What an executor produced; the façade post-processes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub payment: PaymentReceipt,
    pub effects: Vec<EffectResult>,
    pub events: Vec<AbilityEvent>,
    /// Count this run in the passive-occurrence statistics.
    pub passive_occurrence: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Executor {
    /// Pay, apply, aggregate. No category event.
    Base,
    Active,
    Passive,
    Special,
}

impl Executor {
    pub fn for_category(category: AbilityCategory) -> Self {
        match category {
            AbilityCategory::Active => Self::Active,
            AbilityCategory::Passive => Self::Passive,
            AbilityCategory::Special => Self::Special,
        }
    }

    pub fn execute(self, scope: ExecutionScope<'_>) -> Result<ExecutionOutcome, ExecutionError> {
        let ability = scope.ability;
        let execution = scope.execution;
        let mut outcome = Self::run_base(scope)?;

        let category_event = match self {
            Self::Base => None,
            Self::Active => Some(AbilityEvent::ActiveAbilityUsed {
                actor: execution.actor.clone(),
                ability: ability.id.clone(),
            }),
            Self::Passive => {
                outcome.passive_occurrence = true;
                Some(AbilityEvent::PassiveAbilityTriggered {
                    actor: execution.actor.clone(),
                    ability: ability.id.clone(),
                    trigger: execution.trigger.clone(),
                })
            }
            Self::Special => Some(AbilityEvent::SpecialAbilityUsed {
                actor: execution.actor.clone(),
                ability: ability.id.clone(),
                permanent: ability.cooldown.is_permanent(),
            }),
        };
        outcome.events.extend(category_event);

        Ok(outcome)
    }

    fn run_base(scope: ExecutionScope<'_>) -> Result<ExecutionOutcome, ExecutionError> {
        let ExecutionScope {
            ability,
            execution,
            world,
            handlers,
            schedule,
        } = scope;

        // 1. Pay. Nothing has been mutated if this fails.
        let payment =
            CostCalculator::pay(&ability.cost, world, &execution.actor, &execution.ledger_reason())?;

        // 2. Apply effects in order; failures are recorded, never refunded.
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution,
            world,
            schedule,
            events: &mut events,
        };
        let effects = handlers.apply_all(&ability.effects, &mut ctx);

        Ok(ExecutionOutcome {
            payment,
            effects,
            events,
            passive_occurrence: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{EffectDescriptor, TargetSelector};
    use crate::execute::{EffectStatus, ExecuteOptions};
    use crate::state::{Actor, ResourceKind, ResourceLedger};

    fn world() -> WorldState {
        WorldState::new(3)
            .with_actor(Actor::new("Doc", "doctor"))
            .with_actor(Actor::new("Bob", "farmer").incapacitated())
            .with_resources(ResourceLedger::new().with_balance(ResourceKind::Medical, 5))
    }

    fn run(executor: Executor, ability: &AbilityDefinition, world: &mut WorldState) -> ExecutionOutcome {
        let handlers = EffectHandlerRegistry::standard();
        let mut schedule = EffectSchedule::new();
        let execution = ExecutionContext::new(
            7,
            world.day,
            "Doc".into(),
            ability.id.clone(),
            ExecuteOptions::passive("daily_cycle"),
        );
        executor
            .execute(ExecutionScope {
                ability,
                execution: &execution,
                world,
                handlers: &handlers,
                schedule: &mut schedule,
            })
            .unwrap()
    }

    #[test]
    fn category_selects_executor_event() {
        let ability = AbilityDefinition::new("vigil", "Vigil", AbilityCategory::Passive)
            .with_effect(EffectDescriptor::log("watching"));
        let outcome = run(Executor::for_category(ability.category), &ability, &mut world());

        assert!(outcome.passive_occurrence);
        assert_eq!(
            outcome.events.last(),
            Some(&AbilityEvent::PassiveAbilityTriggered {
                actor: "Doc".into(),
                ability: "vigil".into(),
                trigger: Some("daily_cycle".into()),
            })
        );

        let outcome = run(Executor::Base, &ability, &mut world());
        assert_eq!(outcome.events.len(), 1, "only the log event");
        assert!(!outcome.passive_occurrence);
    }

    #[test]
    fn failing_effect_keeps_cost_paid_and_later_effects_run() {
        let ability = AbilityDefinition::new("bad_heal", "Bad Heal", AbilityCategory::Active)
            .with_cost(ResourceKind::Medical, 2)
            .with_effect(EffectDescriptor::heal(TargetSelector::Actor("Nobody".into())))
            .with_effect(EffectDescriptor::heal(TargetSelector::FirstIncapacitated));
        let mut world = world();

        let outcome = run(Executor::Active, &ability, &mut world);

        assert_eq!(outcome.effects[0].status, EffectStatus::Failed);
        assert_eq!(outcome.effects[1].status, EffectStatus::Applied);
        assert_eq!(world.resources.balance(ResourceKind::Medical), 3);
        assert!(!world.actor(&"Bob".into()).unwrap().incapacitated);
    }
}
