//! Handlers that touch tenants directly.

use crate::ability::{EffectDescriptor, EffectKind};
use crate::events::AbilityEvent;
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};

/// Clears the incapacitated flag of the selected target.
#[derive(Clone, Copy, Debug, Default)]
pub struct HealHandler;

impl EffectHandler for HealHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::Heal
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::Heal { target } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let target = ctx
            .resolve_target(target)
            .ok_or(EffectError::NoTarget { kind: self.kind() })?;
        let actor = ctx
            .world
            .actor_mut(&target)
            .ok_or_else(|| EffectError::ActorNotFound(target.clone()))?;

        let was_incapacitated = actor.incapacitated;
        actor.incapacitated = false;

        let healer = ctx.caster().clone();
        ctx.emit(AbilityEvent::ActorHealed {
            target: target.clone(),
            healer,
        });

        Ok(EffectOutcome::applied(if was_incapacitated {
            format!("{target} recovered")
        } else {
            format!("{target} was already healthy")
        }))
    }
}

/// Counts infected tenants and optionally reveals them to the player.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetectInfectionHandler;

impl EffectHandler for DetectInfectionHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::DetectInfection
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::DetectInfection { reveal } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let detector = ctx.caster().clone();
        let mut revealed = Vec::new();
        let mut count = 0;
        for actor in ctx.world.actors.iter_mut().filter(|actor| actor.incapacitated) {
            count += 1;
            if *reveal && !actor.infection_revealed {
                actor.infection_revealed = true;
                revealed.push(actor.id.clone());
            }
        }

        ctx.emit(AbilityEvent::InfectionDetected {
            detector: detector.clone(),
            count,
        });
        let newly_revealed = revealed.len();
        for actor in revealed {
            ctx.emit(AbilityEvent::InfectionRevealed {
                actor,
                detector: detector.clone(),
            });
        }

        Ok(EffectOutcome::applied(format!(
            "{count} infected, {newly_revealed} newly revealed"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::TargetSelector;
    use crate::execute::handlers::EffectSchedule;
    use crate::execute::handlers::tests::execution;
    use crate::state::{Actor, WorldState};

    #[test]
    fn heal_without_incapacitated_actor_has_no_target() {
        let execution = execution();
        let mut world = WorldState::new(1).with_actor(Actor::new("Doc", "doctor"));
        let mut schedule = EffectSchedule::new();
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution: &execution,
            world: &mut world,
            schedule: &mut schedule,
            events: &mut events,
        };

        let err = HealHandler
            .handle(&EffectDescriptor::heal(TargetSelector::FirstIncapacitated), &mut ctx)
            .unwrap_err();
        assert_eq!(err, EffectError::NoTarget { kind: EffectKind::Heal });
        assert!(events.is_empty());
    }

    #[test]
    fn detect_reveals_each_infected_actor_once() {
        let execution = execution();
        let mut world = WorldState::new(1)
            .with_actor(Actor::new("Doc", "doctor"))
            .with_actor(Actor::new("Bob", "farmer").incapacitated())
            .with_actor(Actor::new("Eve", "guard").incapacitated());
        let mut schedule = EffectSchedule::new();
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution: &execution,
            world: &mut world,
            schedule: &mut schedule,
            events: &mut events,
        };

        let scan = EffectDescriptor::DetectInfection { reveal: true };
        DetectInfectionHandler.handle(&scan, &mut ctx).unwrap();
        DetectInfectionHandler.handle(&scan, &mut ctx).unwrap();

        let revealed = events
            .iter()
            .filter(|event| matches!(event, AbilityEvent::InfectionRevealed { .. }))
            .count();
        assert_eq!(revealed, 2);
        assert_eq!(
            events[0],
            AbilityEvent::InfectionDetected {
                detector: "Doc".into(),
                count: 2,
            }
        );
        assert!(world.actors().iter().filter(|a| a.incapacitated).all(|a| a.infection_revealed));
    }
}
