use serde_json::Value;

use crate::ids::{ActorId, RoomId};
use crate::state::{Actor, ResourceLedger, Room, StateError, StateStore};

/// The slice of world state the ability engine reads and mutates.
///
/// The surrounding game owns this value; the engine borrows it mutably for
/// the duration of one execution or one day advance.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldState {
    /// Current in-game day (starts at 1 in a fresh game).
    pub day: u32,

    #[serde(default)]
    pub actors: Vec<Actor>,

    #[serde(default)]
    pub rooms: Vec<Room>,

    /// Shared shelter resources.
    #[serde(default)]
    pub resources: ResourceLedger,

    /// Loose path-addressed values published by other subsystems.
    #[serde(default)]
    pub values: StateStore,
}

impl WorldState {
    pub fn new(day: u32) -> Self {
        Self {
            day,
            ..Self::default()
        }
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_resources(mut self, resources: ResourceLedger) -> Self {
        self.resources = resources;
        self
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: &ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| &actor.id == id)
    }

    pub fn actor_mut(&mut self, id: &ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| &actor.id == id)
    }

    /// Actors currently flagged as incapacitated, in roster order.
    pub fn incapacitated_actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|actor| actor.incapacitated)
    }

    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    pub fn room_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| &room.id == id)
    }

    pub fn state_value(&self, path: &str, default: Value) -> Value {
        self.values.value_or(path, default)
    }

    pub fn set_state_value(&mut self, path: &str, value: Value) -> Result<(), StateError> {
        self.values.set(path, value).map(|_| ())
    }
}
