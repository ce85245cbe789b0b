//! Requests addressed to the tenant-lifecycle layer.
//!
//! The engine does not own hiring, eviction or satisfaction. These handlers
//! only emit events; the lifecycle layer decides what happens.

use crate::ability::{EffectDescriptor, EffectKind};
use crate::events::AbilityEvent;
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};

#[derive(Clone, Copy, Debug, Default)]
pub struct RequestRemovalHandler;

impl EffectHandler for RequestRemovalHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::RequestRemoval
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::RequestRemoval { target, reason } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let target = ctx
            .resolve_target(target)
            .ok_or(EffectError::NoTarget { kind: self.kind() })?;
        let requested_by = ctx.caster().clone();
        ctx.emit(AbilityEvent::ActorRemovalRequested {
            target: target.clone(),
            requested_by,
            reason: reason.clone(),
        });
        Ok(EffectOutcome::applied(format!("removal of {target} requested")))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ImproveSatisfactionHandler;

impl EffectHandler for ImproveSatisfactionHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::ImproveSatisfaction
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::ImproveSatisfaction { amount } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let source = ctx.caster().clone();
        ctx.emit(AbilityEvent::SatisfactionImproved {
            source,
            amount: *amount,
        });
        Ok(EffectOutcome::applied(format!("satisfaction {amount:+}")))
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
    fn removal_request_leaves_roster_untouched() {
        let execution = execution();
        let mut world = WorldState::new(1)
            .with_actor(Actor::new("Doc", "doctor"))
            .with_actor(Actor::new("Bob", "farmer").incapacitated());
        let before = world.clone();
        let mut schedule = EffectSchedule::new();
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution: &execution,
            world: &mut world,
            schedule: &mut schedule,
            events: &mut events,
        };

        let effect = EffectDescriptor::RequestRemoval {
            target: TargetSelector::FirstIncapacitated,
            reason: "quarantine".into(),
        };
        RequestRemovalHandler.handle(&effect, &mut ctx).unwrap();

        assert_eq!(world, before);
        assert_eq!(
            events,
            vec![AbilityEvent::ActorRemovalRequested {
                target: "Bob".into(),
                requested_by: "Doc".into(),
                reason: "quarantine".into(),
            }]
        );
    }
}
