use tracing::info;

use crate::engine::AbilityEngine;
use crate::events::AbilityEvent;
use crate::execute::{EffectContext, EffectResult, ExecuteOptions, ExecutionContext};
use crate::state::WorldState;

/// What happened while advancing one day.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DayReport {
    pub day: u32,
    pub expired_cooldowns: usize,
    /// Results of scheduled effects that came due, in scheduling order.
    pub scheduled: Vec<EffectResult>,
    pub events: Vec<AbilityEvent>,
}

impl AbilityEngine {
    /// Trigger name carried by contexts of scheduled effects.
    pub const SCHEDULED_TRIGGER: &'static str = "scheduled";

    /// Moves the world to the next day.
    ///
    /// Sweeps expired cooldowns and applies scheduled effects now due. Passive
    /// abilities are not fired here; the host dispatches
    /// [`crate::events::WorldEvent::DayAdvanced`] afterwards.
    pub fn advance_day(&mut self, world: &mut WorldState) -> DayReport {
        world.day += 1;
        let day = world.day;
        let expired_cooldowns = self.cooldowns.advance_day(day);

        let mut events = Vec::new();
        let mut scheduled = Vec::new();
        for due in self.schedule.take_due(day) {
            self.sequence += 1;
            let execution = ExecutionContext::new(
                self.sequence,
                day,
                due.actor,
                due.ability,
                ExecuteOptions::triggered(Self::SCHEDULED_TRIGGER),
            );
            let mut ctx = EffectContext {
                execution: &execution,
                world: &mut *world,
                schedule: &mut self.schedule,
                events: &mut events,
            };
            scheduled.push(self.handlers.apply(scheduled.len(), &due.effect, &mut ctx));
        }

        info!(
            target: "engine::day",
            day,
            expired_cooldowns,
            scheduled = scheduled.len(),
            "Day advanced"
        );

        DayReport {
            day,
            expired_cooldowns,
            scheduled,
            events,
        }
    }
}
