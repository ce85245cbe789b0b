use crate::ability::{EffectDescriptor, EffectKind};
use crate::events::AbilityEvent;
use crate::execute::handlers::{EffectContext, EffectError, EffectHandler, EffectOutcome, mismatch};
use crate::ids::RoomId;
use crate::state::Room;

/// Picks the explicit room, or the lowest-rated one by `rating`.
fn select_room(
    ctx: &EffectContext<'_>,
    explicit: Option<&RoomId>,
    kind: EffectKind,
    rating: fn(&Room) -> u32,
) -> Result<RoomId, EffectError> {
    match explicit {
        Some(id) => ctx
            .world
            .room(id)
            .map(|room| room.id.clone())
            .ok_or_else(|| EffectError::RoomNotFound(id.clone())),
        None => ctx
            .world
            .rooms
            .iter()
            .min_by_key(|room| rating(room))
            .map(|room| room.id.clone())
            .ok_or(EffectError::NoTarget { kind }),
    }
}

/// Raises a room's condition; defaults to the most damaged room.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepairHandler;

impl EffectHandler for RepairHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::Repair
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::Repair { room, amount } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let id = select_room(ctx, room.as_ref(), self.kind(), |room| room.condition)?;
        let room = ctx
            .world
            .room_mut(&id)
            .ok_or_else(|| EffectError::RoomNotFound(id.clone()))?;
        let applied = room.repair(*amount);
        let condition = room.condition;

        ctx.emit(AbilityEvent::RoomRepaired {
            room: id.clone(),
            amount: applied,
            condition,
        });
        Ok(EffectOutcome::applied(format!(
            "{id} condition +{applied} (now {condition})"
        )))
    }
}

/// Raises a room's defense; defaults to the least defended room.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReinforceHandler;

impl EffectHandler for ReinforceHandler {
    fn kind(&self) -> EffectKind {
        EffectKind::Reinforce
    }

    fn handle(
        &self,
        effect: &EffectDescriptor,
        ctx: &mut EffectContext<'_>,
    ) -> Result<EffectOutcome, EffectError> {
        let EffectDescriptor::Reinforce { room, amount } = effect else {
            return Err(mismatch(self.kind(), effect));
        };

        let id = select_room(ctx, room.as_ref(), self.kind(), |room| room.defense)?;
        let room = ctx
            .world
            .room_mut(&id)
            .ok_or_else(|| EffectError::RoomNotFound(id.clone()))?;
        let applied = room.reinforce(*amount);
        let defense = room.defense;

        ctx.emit(AbilityEvent::RoomReinforced {
            room: id.clone(),
            amount: applied,
            defense,
        });
        Ok(EffectOutcome::applied(format!(
            "{id} defense +{applied} (now {defense})"
        )))
    }
}
