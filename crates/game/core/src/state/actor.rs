//! Tenants as seen by the ability engine.

use std::collections::BTreeMap;

use crate::ids::ActorId;
use crate::state::ResourceKind;

/// A tenant able to hold and use abilities.
///
/// The tenant-lifecycle layer owns hiring, eviction and satisfaction; the
/// engine only reads the type tag and mutates the fields exposed here through
/// effect handlers and the cost calculator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Actor {
    pub id: ActorId,

    /// Type tag used to look up abilities (`doctor`, `handyman`, ...).
    pub kind: String,

    /// Set while the tenant is infected and unable to act.
    #[serde(default)]
    pub incapacitated: bool,

    /// Set once a detection ability has exposed the infection to the player.
    #[serde(default)]
    pub infection_revealed: bool,

    /// Personal resource pool, separate from the shelter ledger.
    #[serde(default)]
    pub resources: BTreeMap<ResourceKind, i64>,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            incapacitated: false,
            infection_revealed: false,
            resources: BTreeMap::new(),
        }
    }

    /// Builder: mark the actor as incapacitated.
    pub fn incapacitated(mut self) -> Self {
        self.incapacitated = true;
        self
    }

    /// Builder: seed a personal resource amount.
    pub fn with_resource(mut self, resource: ResourceKind, amount: i64) -> Self {
        self.resources.insert(resource, amount);
        self
    }

    pub fn resource(&self, resource: ResourceKind) -> i64 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    /// Credits (or debits, for negative amounts) the personal pool.
    pub fn credit(&mut self, resource: ResourceKind, amount: i64) -> i64 {
        let balance = self.resources.entry(resource).or_insert(0);
        *balance += amount;
        *balance
    }

    /// Actors that can act: not incapacitated.
    pub fn is_capable(&self) -> bool {
        !self.incapacitated
    }
}
