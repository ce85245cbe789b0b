//! Pre-execution validation chain.
//!
//! A chain is an ordered list of named, pure validator functions. The first
//! failing validator decides the outcome; later ones never run. Validators
//! only read, so a rejected execution has no side effects.
//!
//! Standard order:
//! `actor_exists` → `actor_capable` → `ability_exists` → `affordability` →
//! `cooldown` → `requirements`

use crate::ability::{AbilityDefinition, AbilityRegistry, ConditionContext, first_unmet};
use crate::env::RngOracle;
use crate::execute::{
    CooldownLedger, CostCalculator, ExecutionContext, ReasonCode, UsageLedger, ValidationOutcome,
};
use crate::state::{Actor, WorldState};

/// Read-only inputs for validators.
pub struct ValidationContext<'a> {
    pub execution: &'a ExecutionContext,
    pub world: &'a WorldState,
    pub registry: &'a AbilityRegistry,
    pub cooldowns: &'a CooldownLedger,
    pub usage: &'a UsageLedger,
    pub rng: &'a dyn RngOracle,
    /// Seed for chance requirements of this (day, actor, ability).
    pub seed: u64,
}

impl ValidationContext<'_> {
    pub fn actor(&self) -> Option<&Actor> {
        self.world.actor(&self.execution.actor)
    }

    /// The ability, only if granted to the actor's type.
    pub fn ability(&self) -> Option<&AbilityDefinition> {
        let actor = self.actor()?;
        self.registry.granted(&actor.kind, &self.execution.ability)
    }
}

pub type Validator = fn(&ValidationContext<'_>) -> ValidationOutcome;

#[derive(Clone, Copy)]
pub struct NamedValidator {
    pub name: &'static str,
    pub check: Validator,
}

impl std::fmt::Debug for NamedValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Clone, Debug)]
pub struct ValidationChain {
    validators: Vec<NamedValidator>,
}

impl Default for ValidationChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl ValidationChain {
    pub fn empty() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn standard() -> Self {
        let mut chain = Self::empty();
        chain
            .append("actor_exists", actor_exists)
            .append("actor_capable", actor_capable)
            .append("ability_exists", ability_exists)
            .append("affordability", affordability)
            .append("cooldown", cooldown)
            .append("requirements", requirements);
        chain
    }

    pub fn append(&mut self, name: &'static str, check: Validator) -> &mut Self {
        self.validators.push(NamedValidator { name, check });
        self
    }

    /// Inserts before `anchor`. Returns false (and appends) if `anchor` is absent.
    pub fn insert_before(&mut self, anchor: &str, name: &'static str, check: Validator) -> bool {
        let validator = NamedValidator { name, check };
        match self.position(anchor) {
            Some(index) => {
                self.validators.insert(index, validator);
                true
            }
            None => {
                self.validators.push(validator);
                false
            }
        }
    }

    /// Inserts after `anchor`. Returns false (and appends) if `anchor` is absent.
    pub fn insert_after(&mut self, anchor: &str, name: &'static str, check: Validator) -> bool {
        let validator = NamedValidator { name, check };
        match self.position(anchor) {
            Some(index) => {
                self.validators.insert(index + 1, validator);
                true
            }
            None => {
                self.validators.push(validator);
                false
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.validators.len();
        self.validators.retain(|validator| validator.name != name);
        before != self.validators.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|validator| validator.name).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.validators
            .iter()
            .position(|validator| validator.name == name)
    }

    /// Runs validators in order, stopping at the first failure.
    pub fn validate(&self, ctx: &ValidationContext<'_>) -> ValidationOutcome {
        self.validators
            .iter()
            .map(|validator| (validator.check)(ctx))
            .find(|outcome| !outcome.valid)
            .unwrap_or_else(ValidationOutcome::ok)
    }
}

// ============================================================================
// Standard Validators
// ============================================================================

pub fn actor_exists(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    match ctx.actor() {
        Some(_) => ValidationOutcome::ok(),
        None => ValidationOutcome::fail(
            ReasonCode::ActorNotFound,
            format!("No tenant named {} lives here.", ctx.execution.actor),
        ),
    }
}

pub fn actor_capable(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    match ctx.actor() {
        Some(actor) if !actor.is_capable() => ValidationOutcome::fail(
            ReasonCode::ActorIncapacitated,
            format!("{} is too sick to do anything.", actor.id),
        ),
        _ => ValidationOutcome::ok(),
    }
}

pub fn ability_exists(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    match ctx.ability() {
        Some(_) => ValidationOutcome::ok(),
        None => ValidationOutcome::fail(
            ReasonCode::AbilityNotFound,
            format!(
                "{} does not know how to {}.",
                ctx.execution.actor, ctx.execution.ability
            ),
        ),
    }
}

pub fn affordability(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    let Some(ability) = ctx.ability() else {
        return ValidationOutcome::ok();
    };
    match CostCalculator::shortfall(&ability.cost, &ctx.world.resources) {
        Some(shortfall) => {
            ValidationOutcome::fail(ReasonCode::InsufficientResources, format!("{shortfall}."))
        }
        None => ValidationOutcome::ok(),
    }
}

/// Day cooldowns, `max_uses` and one-time-permanent exhaustion.
pub fn cooldown(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    let Some(ability) = ctx.ability() else {
        return ValidationOutcome::ok();
    };
    let (actor, id) = (&ctx.execution.actor, &ability.id);

    let remaining = ctx.cooldowns.remaining(actor, id, ctx.execution.day());
    if remaining > 0 {
        return ValidationOutcome::fail(
            ReasonCode::OnCooldown,
            format!("{} is on cooldown for {remaining} more day(s).", ability.name),
        );
    }

    let used = ctx.usage.count(actor, id);
    if ability.max_uses.is_some_and(|max| used >= max) {
        return ValidationOutcome::fail(
            ReasonCode::OnCooldown,
            format!("{} has no uses remaining.", ability.name),
        );
    }
    if ability.cooldown.is_permanent() && used > 0 {
        return ValidationOutcome::fail(
            ReasonCode::OnCooldown,
            format!("{} can only be used once.", ability.name),
        );
    }

    ValidationOutcome::ok()
}

pub fn requirements(ctx: &ValidationContext<'_>) -> ValidationOutcome {
    let Some(ability) = ctx.ability() else {
        return ValidationOutcome::ok();
    };
    let conditions = ConditionContext {
        world: ctx.world,
        trigger: ctx.execution.trigger(),
        rng: ctx.rng,
        seed: ctx.seed,
    };
    match first_unmet(&ability.requirements, &conditions) {
        Some(condition) => ValidationOutcome::fail(
            ReasonCode::RequirementsNotMet,
            format!("Requirement not met: {}.", condition.describe()),
        ),
        None => ValidationOutcome::ok(),
    }
}
