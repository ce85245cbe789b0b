//! Deferred effects created by `delayed`.
//!
//! A scheduled effect is a one-shot: it is applied on its due day by
//! [`crate::engine::AbilityEngine::advance_day`] and then forgotten. It carries
//! no cost and does not touch cooldowns or usage.

use crate::ability::{EffectDescriptor, EffectKind};
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};
use crate::ids::{AbilityId, ActorId, ExecutionId};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduledEffect {
    pub due_day: u32,
    pub actor: ActorId,
    pub ability: AbilityId,
    /// Execution that scheduled this effect.
    pub origin: ExecutionId,
    pub effect: EffectDescriptor,
}

/// Pending effects, kept in insertion order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EffectSchedule {
    pending: Vec<ScheduledEffect>,
}

impl EffectSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scheduled: ScheduledEffect) {
        self.pending.push(scheduled);
    }

    /// Removes and returns every effect due on or before `day`, oldest first.
    pub fn take_due(&mut self, day: u32) -> Vec<ScheduledEffect> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|scheduled| scheduled.due_day <= day);
        self.pending = pending;
        due
    }

    pub fn pending(&self) -> &[ScheduledEffect] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DelayedHandler;

impl EffectHandler for DelayedHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::Delayed
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::Delayed { days, effect: inner } = effect else {
            return Err(mismatch(self.kind(), effect));
        };
        if *days == 0 {
            return Err(EffectError::InvalidDelay { days: *days });
        }

        let due_day = ctx.execution.day().saturating_add(*days);
        ctx.schedule.push(ScheduledEffect {
            due_day,
            actor: ctx.execution.actor.clone(),
            ability: ctx.execution.ability.clone(),
            origin: ctx.execution.execution_id,
            effect: inner.as_ref().clone(),
        });
        Ok(EffectOutcome::scheduled(format!(
            "{} due on day {due_day}",
            inner.kind()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::EffectStatus;
    use crate::execute::handlers::tests::execution;
    use crate::state::WorldState;

    #[test]
    fn delayed_effect_is_queued_not_applied() {
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

        let outcome = DelayedHandler
            .handle(&EffectDescriptor::delayed(2, EffectDescriptor::log("later")), &mut ctx)
            .unwrap();
        let zero = EffectDescriptor::delayed(0, EffectDescriptor::log("now"));
        assert_eq!(
            DelayedHandler.handle(&zero, &mut ctx),
            Err(EffectError::InvalidDelay { days: 0 })
        );

        assert_eq!(outcome.status, EffectStatus::Scheduled);
        assert!(events.is_empty());
        assert_eq!(schedule.len(), 1);
        assert!(schedule.take_due(2).is_empty());
        let due = schedule.take_due(3);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].effect, EffectDescriptor::log("later"));
        assert!(schedule.is_empty());
    }
}
