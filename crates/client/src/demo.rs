//! Scripted shelter played through the runtime handle.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::broadcast;
use tracing::{debug, info};

use shelter_core::{
    Actor, ExecuteOptions, ResourceKind, ResourceLedger, Room, WorldEvent, WorldState,
};
use shelter_runtime::{Event, Runtime, RuntimeHandle, Topic};

/// Starting shelter: four tenants, one already infected.
pub fn initial_world() -> WorldState {
    WorldState::new(1)
        .with_actor(Actor::new("Dr. Ames", "doctor"))
        .with_actor(Actor::new("Hal", "handyman"))
        .with_actor(Actor::new("Greta", "guard"))
        .with_actor(Actor::new("Fern", "farmer"))
        .with_actor(Actor::new("Otto", "farmer").incapacitated())
        .with_room(Room::new("dormitory", 55).with_defense(20))
        .with_room(Room::new("infirmary", 70).with_defense(10))
        .with_room(Room::new("gate", 35).with_defense(40))
        .with_resources(
            ResourceLedger::new()
                .with_balance(ResourceKind::Cash, 40)
                .with_balance(ResourceKind::Food, 12)
                .with_balance(ResourceKind::Water, 10)
                .with_balance(ResourceKind::Medical, 6)
                .with_balance(ResourceKind::Materials, 14)
                .with_balance(ResourceKind::Fuel, 4),
        )
}

/// Plays `days` days. Each day every capable tenant uses their first usable
/// ability, a few world events fire, and the day advances.
pub async fn run(runtime: &Runtime, days: u32, seed: u64) -> anyhow::Result<()> {
    let handle = runtime.handle();
    let narrator = tokio::spawn(narrate(handle.subscribe(Topic::Ability)));
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..days {
        let world = handle.query_world().await?;
        info!(day = world.day, "Day begins");

        for actor in world.actors().iter().filter(|actor| actor.is_capable()) {
            act(&handle, &actor.id).await?;
        }

        if rng.gen_bool(0.3) {
            handle
                .update_world(|world| {
                    let _ = world.resources.modify(ResourceKind::Food, 6, "harvest");
                })
                .await?;
            handle.publish_world_event(WorldEvent::HarvestCompleted);
        }
        if rng.gen_bool(0.25) {
            handle.publish_world_event(WorldEvent::ScavengeStarted);
        }

        let report = handle.advance_day().await?;
        info!(
            day = report.day,
            expired_cooldowns = report.expired_cooldowns,
            scheduled = report.scheduled.len(),
            "Day advanced"
        );
    }

    summarize(&handle).await?;
    narrator.abort();
    Ok(())
}

async fn act(handle: &RuntimeHandle, actor: &shelter_core::ActorId) -> anyhow::Result<()> {
    let listing = handle.available_abilities(actor.clone()).await?;
    let Some(choice) = listing.into_iter().find(|entry| entry.can_use) else {
        debug!(actor = %actor, "Nothing to do");
        return Ok(());
    };

    let result = handle
        .execute_ability(actor.clone(), choice.ability.id.clone(), ExecuteOptions::explicit())
        .await?;
    info!(
        actor = %result.actor,
        ability = %result.ability,
        success = result.success,
        message = %result.message,
        "Ability used"
    );
    Ok(())
}

async fn narrate(mut events: broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(Event::Ability(event)) => info!(target: "shelter_sim::events", event = ?event, "{}", event.name()),
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn summarize(handle: &RuntimeHandle) -> anyhow::Result<()> {
    let world = handle.query_world().await?;
    let history = handle.history().await?;
    let snapshot = handle.snapshot().await?;

    let failed = history.iter().filter(|record| !record.success).count();
    info!(
        day = world.day,
        executions = history.len(),
        failed,
        passive_kinds = snapshot.passive_occurrences.len(),
        snapshot_bytes = snapshot.to_json()?.len(),
        "Simulation finished"
    );
    for (resource, balance) in world.resources.balances() {
        info!(resource = %resource, balance, "Final balance");
    }
    Ok(())
}
