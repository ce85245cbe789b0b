use tracing::info;

use crate::ability::{EffectDescriptor, EffectKind};
use crate::events::AbilityEvent;
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};

/// Emits an `AbilityLog` event for the player and a tracing line.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogHandler;

impl EffectHandler for LogHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::Log
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::Log { message } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        info!(
            target: "engine::effects",
            actor = %ctx.execution.actor,
            ability = %ctx.execution.ability,
            "{message}"
        );
        let event = AbilityEvent::AbilityLog {
            actor: ctx.execution.actor.clone(),
            ability: ctx.execution.ability.clone(),
            message: message.clone(),
        };
        ctx.emit(event);
        Ok(EffectOutcome::applied(message.clone()))
    }
}
