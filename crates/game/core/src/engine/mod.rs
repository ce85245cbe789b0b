//! Ability engine façade.
//!
//! [`AbilityEngine`] owns the registry, handlers, validation chain and all
//! dynamic bookkeeping (cooldowns, usage, history, scheduled effects). The
//! world is borrowed per call, so the host decides where state lives and how
//! access is serialized.
//!
//! Every public operation returns a structured result. Internal failures are
//! logged with detail and reported to callers as `execution_error` with a
//! generic message.

mod available;
mod day;
mod dispatch;
mod snapshot;

pub use available::AnnotatedAbility;
pub use day::DayReport;
pub use snapshot::{EngineSnapshot, SnapshotError};

use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::ability::AbilityRegistry;
use crate::config::EngineConfig;
use crate::env::{PcgRng, RngOracle, compute_seed, hash_key};
use crate::error::GameError;
use crate::events::AbilityEvent;
use crate::execute::{
    CooldownLedger, EffectHandlerRegistry, EffectSchedule, ExecuteOptions, ExecutionContext,
    ExecutionError, ExecutionHistory, ExecutionRecord, ExecutionResult, ExecutionScope, Executor,
    ReasonCode, UsageLedger, ValidationChain, ValidationContext, ValidationOutcome,
};
use crate::ids::{AbilityId, ActorId};
use crate::state::WorldState;

pub struct AbilityEngine {
    config: EngineConfig,
    registry: AbilityRegistry,
    handlers: EffectHandlerRegistry,
    validation: ValidationChain,
    rng: Box<dyn RngOracle>,

    cooldowns: CooldownLedger,
    usage: UsageLedger,
    history: ExecutionHistory,
    schedule: EffectSchedule,
    passive_occurrences: BTreeMap<AbilityId, u64>,
    sequence: u64,
}

impl AbilityEngine {
    /// Engine with standard handlers, the standard chain and the PCG oracle.
    pub fn new(registry: AbilityRegistry, config: EngineConfig) -> Self {
        Self::builder(registry).config(config).build()
    }

    pub fn builder(registry: AbilityRegistry) -> AbilityEngineBuilder {
        AbilityEngineBuilder::new(registry)
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Validates and runs one ability for one actor.
    ///
    /// A rejected execution mutates nothing and is not recorded in history.
    /// The candidate's own cooldown entry is pruned first if it has expired.
    pub fn execute_ability(
        &mut self,
        world: &mut WorldState,
        actor: &ActorId,
        ability: &AbilityId,
        options: ExecuteOptions,
    ) -> ExecutionResult {
        self.sequence += 1;
        let execution = ExecutionContext::new(
            self.sequence,
            world.day,
            actor.clone(),
            ability.clone(),
            options,
        );

        // Evicts an expired entry before the read-only validators see it.
        self.cooldowns.is_on_cooldown(actor, ability, world.day);

        let outcome = self.validate(world, &execution);
        if !outcome.valid {
            debug!(
                target: "engine::execute",
                execution = %execution.execution_id,
                actor = %actor,
                ability = %ability,
                reason = ?outcome.reason,
                "Execution rejected"
            );
            return ExecutionResult::rejected(&execution, outcome);
        }

        match self.run(world, &execution) {
            Ok(result) => result,
            Err(err) => {
                error!(
                    target: "engine::execute",
                    execution = %execution.execution_id,
                    actor = %actor,
                    ability = %ability,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    error = %err,
                    "Execution failed after validation"
                );
                let result = ExecutionResult::rejected(
                    &execution,
                    ValidationOutcome::fail(ReasonCode::ExecutionError, EngineConfig::ANOMALY_MESSAGE),
                );
                self.history.push(ExecutionRecord::from(&result));
                result
            }
        }
    }

    fn validate(&self, world: &WorldState, execution: &ExecutionContext) -> ValidationOutcome {
        self.validation.validate(&ValidationContext {
            execution,
            world,
            registry: &self.registry,
            cooldowns: &self.cooldowns,
            usage: &self.usage,
            rng: self.rng.as_ref(),
            seed: self.roll_seed(execution.day(), &execution.actor, &execution.ability),
        })
    }

    fn run(
        &mut self,
        world: &mut WorldState,
        execution: &ExecutionContext,
    ) -> Result<ExecutionResult, ExecutionError> {
        let ability = world
            .actor(&execution.actor)
            .and_then(|actor| self.registry.granted(&actor.kind, &execution.ability))
            .ok_or_else(|| ExecutionError::AbilityMissing {
                ability: execution.ability.to_string(),
            })?;

        let outcome = Executor::for_category(ability.category).execute(ExecutionScope {
            ability,
            execution,
            world,
            handlers: &self.handlers,
            schedule: &mut self.schedule,
        })?;

        // Post-processing: cooldown, usage, statistics, history.
        self.cooldowns.set_cooldown(
            &execution.actor,
            &ability.id,
            ability.cooldown.0,
            execution.day(),
        );
        self.usage.increment(&execution.actor, &ability.id);
        if outcome.passive_occurrence {
            *self
                .passive_occurrences
                .entry(ability.id.clone())
                .or_insert(0) += 1;
        }

        let mut events = outcome.events;
        events.push(AbilityEvent::AbilityExecuted {
            execution_id: execution.execution_id,
            actor: execution.actor.clone(),
            ability: ability.id.clone(),
            day: execution.day(),
            passive: execution.passive,
        });

        let result = ExecutionResult::completed(execution, outcome.payment, outcome.effects, events);
        self.history.push(ExecutionRecord::from(&result));

        debug!(
            target: "engine::execute",
            execution = %execution.execution_id,
            actor = %execution.actor,
            ability = %ability.id,
            passive = execution.passive,
            failed_effects = result.failed_effects().count(),
            "Execution completed"
        );
        Ok(result)
    }

    /// Seed for chance requirements. Identical for the dispatcher's match
    /// and the validator's check on the same day.
    fn roll_seed(&self, day: u32, actor: &ActorId, ability: &AbilityId) -> u64 {
        compute_seed(
            self.config.game_seed,
            day,
            hash_key(actor.as_str()),
            hash_key(ability.as_str()),
        )
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &AbilityRegistry {
        &self.registry
    }

    pub fn validation_mut(&mut self) -> &mut ValidationChain {
        &mut self.validation
    }

    pub fn handlers_mut(&mut self) -> &mut EffectHandlerRegistry {
        &mut self.handlers
    }

    pub fn cooldowns(&self) -> &CooldownLedger {
        &self.cooldowns
    }

    pub fn history(&self) -> &ExecutionHistory {
        &self.history
    }

    pub fn schedule(&self) -> &EffectSchedule {
        &self.schedule
    }

    pub fn usage_count(&self, actor: &ActorId, ability: &AbilityId) -> u32 {
        self.usage.count(actor, ability)
    }

    /// How often each passive ability fired, across all actors.
    pub fn passive_occurrences(&self) -> &BTreeMap<AbilityId, u64> {
        &self.passive_occurrences
    }
}

// ============================================================================
// Builder
// ============================================================================

pub struct AbilityEngineBuilder {
    registry: AbilityRegistry,
    config: EngineConfig,
    handlers: Option<EffectHandlerRegistry>,
    validation: Option<ValidationChain>,
    rng: Option<Box<dyn RngOracle>>,
}

impl AbilityEngineBuilder {
    fn new(registry: AbilityRegistry) -> Self {
        Self {
            registry,
            config: EngineConfig::default(),
            handlers: None,
            validation: None,
            rng: None,
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn handlers(mut self, handlers: EffectHandlerRegistry) -> Self {
        self.handlers = Some(handlers);
        self
    }

    pub fn validation(mut self, validation: ValidationChain) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn boxed_rng(mut self, rng: Box<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn build(self) -> AbilityEngine {
        let history = ExecutionHistory::with_capacity(self.config.history_capacity);
        AbilityEngine {
            registry: self.registry,
            handlers: self.handlers.unwrap_or_else(EffectHandlerRegistry::standard),
            validation: self.validation.unwrap_or_else(ValidationChain::standard),
            rng: self.rng.unwrap_or_else(|| Box::new(PcgRng)),
            cooldowns: CooldownLedger::new(),
            usage: UsageLedger::new(),
            history,
            schedule: EffectSchedule::new(),
            passive_occurrences: BTreeMap::new(),
            sequence: 0,
            config: self.config,
        }
    }
}
