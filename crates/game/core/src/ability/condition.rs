//! Requirement conditions attached to abilities.
//!
//! All conditions of an ability must hold for it to execute. For passive
//! abilities the same conditions decide which world events fire them.

use serde_json::Value;

use crate::env::RngOracle;
use crate::state::WorldState;

/// A single requirement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Holds when the execution was fired by the named trigger.
    Trigger { name: String },

    /// Holds when the state value at `path` equals `value`.
    StateEquals { path: String, value: Value },

    /// Holds when the numeric state value at `path` is at least `min`.
    StateAtLeast { path: String, min: f64 },

    /// Holds with the given probability, rolled through the injected RNG.
    Chance { probability: f64 },

    /// Holds when at least one actor is incapacitated.
    IncapacitatedPresent,
}

/// Inputs a condition may look at.
pub struct ConditionContext<'a> {
    pub world: &'a WorldState,
    pub trigger: Option<&'a str>,
    pub rng: &'a dyn RngOracle,
    /// Seed for this (day, actor, ability) candidate.
    pub seed: u64,
}

impl Condition {
    pub fn trigger(name: impl Into<String>) -> Self {
        Self::Trigger { name: name.into() }
    }

    pub fn chance(probability: f64) -> Self {
        Self::Chance { probability }
    }

    /// Evaluates this condition. `index` separates rolls of several chance
    /// conditions on the same ability.
    pub fn holds(&self, ctx: &ConditionContext<'_>, index: usize) -> bool {
        match self {
            Self::Trigger { name } => ctx.trigger == Some(name.as_str()),
            Self::StateEquals { path, value } => ctx.world.values.get(path) == Some(value),
            Self::StateAtLeast { path, min } => ctx
                .world
                .values
                .number(path)
                .is_some_and(|current| current >= *min),
            Self::Chance { probability } => ctx
                .rng
                .chance(ctx.seed.wrapping_add(index as u64), *probability),
            Self::IncapacitatedPresent => ctx.world.incapacitated_actors().next().is_some(),
        }
    }

    /// Short human-readable description, used in failure messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Trigger { name } => format!("triggered by `{name}`"),
            Self::StateEquals { path, value } => format!("`{path}` is {value}"),
            Self::StateAtLeast { path, min } => format!("`{path}` is at least {min}"),
            Self::Chance { probability } => format!("{:.0}% chance", probability * 100.0),
            Self::IncapacitatedPresent => "someone is incapacitated".to_string(),
        }
    }
}

/// Returns the first condition that does not hold, if any.
pub fn first_unmet<'c>(
    conditions: &'c [Condition],
    ctx: &ConditionContext<'_>,
) -> Option<&'c Condition> {
    conditions
        .iter()
        .enumerate()
        .find(|(index, condition)| !condition.holds(ctx, *index))
        .map(|(_, condition)| condition)
}
