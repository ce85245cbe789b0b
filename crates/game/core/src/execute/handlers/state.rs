//! Path-addressed state writes.

use serde_json::Value;

use crate::ability::{EffectDescriptor, EffectKind};
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};

#[derive(Clone, Copy, Debug, Default)]
pub struct SetStateHandler;

impl EffectHandler for SetStateHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::SetState
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::SetState { path, value } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let previous = ctx.world.values.set(path, value.clone())?;
        Ok(EffectOutcome::applied(format!(
            "{path}: {} -> {value}",
            previous.unwrap_or(Value::Null)
        )))
    }
}

/// Adds to a numeric value; a missing value counts as zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdjustStateHandler;

impl EffectHandler for AdjustStateHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::AdjustState
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::AdjustState { path, delta } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let next = ctx.world.values.adjust(path, *delta)?;
        Ok(EffectOutcome::applied(format!("{path} {delta:+} (now {next})")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::execute::handlers::EffectSchedule;
    use crate::execute::handlers::tests::execution;
    use crate::state::WorldState;

    #[test]
    fn adjust_rejects_non_numeric_targets() {
        let execution = execution();
        let mut world = WorldState::new(1);
        world.set_state_value("weather", json!("storm")).unwrap();
        let mut schedule = EffectSchedule::new();
        let mut events = Vec::new();
        let mut ctx = EffectContext {
            execution: &execution,
            world: &mut world,
            schedule: &mut schedule,
            events: &mut events,
        };

        let set = EffectDescriptor::SetState {
            path: "shelter.morale".into(),
            value: json!(2),
        };
        SetStateHandler.handle(&set, &mut ctx).unwrap();
        let adjust = EffectDescriptor::AdjustState {
            path: "shelter.morale".into(),
            delta: 1.5,
        };
        AdjustStateHandler.handle(&adjust, &mut ctx).unwrap();
        let bad = EffectDescriptor::AdjustState {
            path: "weather".into(),
            delta: 1.0,
        };
        assert!(matches!(
            AdjustStateHandler.handle(&bad, &mut ctx),
            Err(EffectError::State(_))
        ));

        assert_eq!(world.values.number("shelter.morale"), Some(3.5));
    }
}
