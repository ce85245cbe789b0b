use crate::ability::{EffectDescriptor, EffectKind};
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};

/// Applies `resource_delta` to the shared ledger. Underflow is an effect error.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResourceDeltaHandler;

impl EffectHandler for ResourceDeltaHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::ResourceDelta
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::ResourceDelta { resource, amount } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let reason = ctx.execution.ledger_reason();
        let balance = ctx.world.resources.modify(*resource, *amount, reason)?;
        Ok(EffectOutcome::applied(format!(
            "{resource} {amount:+} (now {balance})"
        )))
    }
}
