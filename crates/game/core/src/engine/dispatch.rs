//! Passive dispatch: world events fire matching passive abilities.

use tracing::{debug, info};

use crate::ability::{ConditionContext, first_unmet};
use crate::engine::AbilityEngine;
use crate::events::WorldEvent;
use crate::execute::{ExecuteOptions, ExecutionResult};
use crate::ids::{AbilityId, ActorId};
use crate::state::WorldState;

impl AbilityEngine {
    /// Runs every passive ability whose requirements hold for `event`.
    ///
    /// Incapacitated actors are skipped. Passives without requirements never
    /// fire reactively. Each match is an independent execution: a failure is
    /// returned in its own result and does not stop the others.
    pub fn dispatch_passives(
        &mut self,
        world: &mut WorldState,
        event: &WorldEvent,
    ) -> Vec<ExecutionResult> {
        let trigger = event.trigger_name().to_owned();
        let candidates = self.passive_candidates(world, &trigger);

        debug!(
            target: "engine::dispatch",
            trigger = %trigger,
            candidates = candidates.len(),
            "Dispatching passives"
        );

        let results: Vec<_> = candidates
            .into_iter()
            .map(|(actor, ability)| {
                self.execute_ability(world, &actor, &ability, ExecuteOptions::passive(&trigger))
            })
            .collect();

        let fired = results.iter().filter(|result| result.success).count();
        if fired > 0 {
            info!(
                target: "engine::dispatch",
                trigger = %trigger,
                fired,
                rejected = results.len() - fired,
                "Passive abilities fired"
            );
        }
        results
    }

    /// (actor, ability) pairs whose passive requirements match `trigger`.
    fn passive_candidates(&self, world: &WorldState, trigger: &str) -> Vec<(ActorId, AbilityId)> {
        let mut candidates = Vec::new();
        for actor in world.actors().iter().filter(|actor| actor.is_capable()) {
            for ability in self.registry.abilities_for(&actor.kind) {
                if !ability.is_passive() || ability.requirements.is_empty() {
                    continue;
                }
                let conditions = ConditionContext {
                    world,
                    trigger: Some(trigger),
                    rng: self.rng.as_ref(),
                    seed: self.roll_seed(world.day, &actor.id, &ability.id),
                };
                if first_unmet(&ability.requirements, &conditions).is_none() {
                    candidates.push((actor.id.clone(), ability.id.clone()));
                }
            }
        }
        candidates
    }
}
