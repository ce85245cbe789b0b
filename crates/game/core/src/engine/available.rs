use crate::ability::AbilityDefinition;
use crate::engine::AbilityEngine;
use crate::execute::{CostCalculator, ExecuteOptions, ExecutionContext, ReasonCode};
use crate::ids::ActorId;
use crate::state::WorldState;

/// An ability annotated for presentation (UI, AI planners).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnotatedAbility {
    pub ability: AbilityDefinition,
    pub cooldown_remaining: u32,
    pub affordable: bool,
    pub usage_count: u32,
    /// `None` when the ability has no use limit.
    pub uses_remaining: Option<u32>,
    /// Whether an explicit execution right now would pass validation.
    pub can_use: bool,
    /// First validation failure, when `can_use` is false.
    pub blocked_by: Option<ReasonCode>,
}

impl AbilityEngine {
    /// Non-passive abilities of `actor`, annotated. Read-only.
    ///
    /// Unknown actors get an empty list.
    pub fn available_abilities(&self, world: &WorldState, actor: &ActorId) -> Vec<AnnotatedAbility> {
        let Some(kind) = world.actor(actor).map(|actor| actor.kind.as_str()) else {
            return Vec::new();
        };
        let day = world.day;

        self.registry
            .abilities_for(kind)
            .into_iter()
            .filter(|ability| !ability.is_passive())
            .map(|ability| {
                // Sequence 0; nothing is recorded.
                let candidate = ExecutionContext::new(
                    0,
                    day,
                    actor.clone(),
                    ability.id.clone(),
                    ExecuteOptions::explicit(),
                );
                let outcome = self.validate(world, &candidate);

                AnnotatedAbility {
                    cooldown_remaining: self.cooldowns.remaining(actor, &ability.id, day),
                    affordable: CostCalculator::can_afford(&ability.cost, &world.resources),
                    usage_count: self.usage.count(actor, &ability.id),
                    uses_remaining: self.usage.remaining(actor, &ability.id, ability.max_uses),
                    can_use: outcome.valid,
                    blocked_by: outcome.reason,
                    ability: ability.clone(),
                }
            })
            .collect()
    }
}
