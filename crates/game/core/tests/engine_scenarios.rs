use shelter_core::engine::AbilityEngine;
use shelter_core::{
    AbilityCategory, AbilityId, ActorId, AbilityDefinition, AbilityEvent, AbilityRegistry, Actor, Condition,
    EffectDescriptor, EffectStatus, EngineConfig, ExecuteOptions, FixedRng, ReasonCode,
    ResourceKind, ResourceLedger, Room, StaticAbilityOracle, TargetSelector, WorldEvent,
    WorldState,
};

fn engine_for(actor_type: &str, abilities: Vec<AbilityDefinition>) -> AbilityEngine {
    let oracle = StaticAbilityOracle::new().with_abilities(actor_type, abilities);
    AbilityEngine::new(
        AbilityRegistry::load(&oracle).expect("valid catalog"),
        EngineConfig::default(),
    )
}

fn heal_infection() -> AbilityDefinition {
    AbilityDefinition::new("heal_infection", "Heal Infection", AbilityCategory::Active)
        .with_cost(ResourceKind::Medical, 3)
        .with_cost(ResourceKind::Cash, 12)
        .with_effect(EffectDescriptor::heal(TargetSelector::FirstIncapacitated))
}

fn stocked(day: u32) -> WorldState {
    WorldState::new(day).with_resources(
        ResourceLedger::new()
            .with_balance(ResourceKind::Medical, 30)
            .with_balance(ResourceKind::Cash, 120)
            .with_balance(ResourceKind::Materials, 30),
    )
}

fn explicit() -> ExecuteOptions {
    ExecuteOptions::explicit()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn doctor_heals_the_incapacitated_tenant() {
    let mut engine = engine_for("doctor", vec![heal_infection()]);
    let mut world = stocked(1)
        .with_actor(Actor::new("Doc", "doctor"))
        .with_actor(Actor::new("Bob", "farmer").incapacitated());

    let result = engine.execute_ability(&mut world, &"Doc".into(), &"heal_infection".into(), explicit());

    assert!(result.success, "{}", result.message);
    assert!(!world.actor(&"Bob".into()).unwrap().incapacitated);
    assert_eq!(world.resources.net_change(ResourceKind::Medical), -3);
    assert_eq!(world.resources.net_change(ResourceKind::Cash), -12);
    assert!(result.events.contains(&AbilityEvent::ActorHealed {
        target: "Bob".into(),
        healer: "Doc".into(),
    }));
}

#[test]
fn cooldown_blocks_until_expiry_day() {
    let fortify = AbilityDefinition::new("fortify", "Fortify", AbilityCategory::Active)
        .with_cooldown(2)
        .with_effect(EffectDescriptor::Reinforce { room: None, amount: 5 });
    let mut engine = engine_for("guard", vec![fortify]);
    let mut world = stocked(5)
        .with_actor(Actor::new("X", "guard"))
        .with_room(Room::new("gate", 50));
    let (x, id): (ActorId, AbilityId) = ("X".into(), "fortify".into());

    assert!(engine.execute_ability(&mut world, &x, &id, explicit()).success);
    assert_eq!(engine.cooldowns().expiry(&x, &id), Some(7));

    world.day = 6;
    let blocked = engine.execute_ability(&mut world, &x, &id, explicit());
    assert_eq!(blocked.reason, Some(ReasonCode::OnCooldown));
    let listed = engine.available_abilities(&world, &x);
    assert_eq!(listed[0].cooldown_remaining, 1);
    assert!(!listed[0].can_use);

    world.day = 7;
    assert!(engine.execute_ability(&mut world, &x, &id, explicit()).success);
}

#[test]
fn daily_cycle_fires_passive_once_per_capable_actor() {
    let harvest_song = AbilityDefinition::new("harvest_song", "Harvest Song", AbilityCategory::Passive)
        .with_requirement(Condition::trigger("daily_cycle"))
        .with_effect(EffectDescriptor::AdjustState {
            path: "shelter.morale".into(),
            delta: 1.0,
        });
    let mut engine = engine_for("farmer", vec![harvest_song]);
    let mut world = stocked(1)
        .with_actor(Actor::new("Ann", "farmer"))
        .with_actor(Actor::new("Ben", "farmer"))
        .with_actor(Actor::new("Cal", "farmer").incapacitated())
        .with_actor(Actor::new("Doc", "doctor"));

    let results = engine.dispatch_passives(&mut world, &WorldEvent::DayAdvanced { day: 1 });

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|result| result.success && result.passive));
    assert_eq!(engine.history().len(), 2);
    assert!(engine.history().iter().all(|record| record.passive));
    assert_eq!(world.values.number("shelter.morale"), Some(2.0));
    assert_eq!(engine.passive_occurrences().get(&"harvest_song".into()), Some(&2));

    let other = engine.dispatch_passives(&mut world, &WorldEvent::HarvestCompleted);
    assert!(other.is_empty(), "trigger name must match exactly");
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn second_execution_inside_cooldown_debits_once() {
    let patch = AbilityDefinition::new("patch_walls", "Patch Walls", AbilityCategory::Active)
        .with_cost(ResourceKind::Materials, 4)
        .with_cooldown(3)
        .with_effect(EffectDescriptor::Repair { room: None, amount: 10 });
    let mut engine = engine_for("handyman", vec![patch]);
    let mut world = stocked(2)
        .with_actor(Actor::new("Hal", "handyman"))
        .with_room(Room::new("dorm", 30));

    let first = engine.execute_ability(&mut world, &"Hal".into(), &"patch_walls".into(), explicit());
    let second = engine.execute_ability(&mut world, &"Hal".into(), &"patch_walls".into(), explicit());

    assert!(first.success);
    assert_eq!(second.reason, Some(ReasonCode::OnCooldown));
    assert_eq!(world.resources.journal().len(), 1);
    assert_eq!(world.resources.net_change(ResourceKind::Materials), -4);
}

#[test]
fn cooldown_expiry_is_monotonic_in_days() {
    let scan = AbilityDefinition::new("scan", "Scan", AbilityCategory::Active).with_cooldown(4);
    let mut engine = engine_for("doctor", vec![scan]);
    let mut world = stocked(10).with_actor(Actor::new("Doc", "doctor"));
    let (doc, id): (ActorId, AbilityId) = ("Doc".into(), "scan".into());

    assert!(engine.execute_ability(&mut world, &doc, &id, explicit()).success);

    for day in 10..14 {
        world.day = day;
        assert_eq!(
            engine.execute_ability(&mut world, &doc, &id, explicit()).reason,
            Some(ReasonCode::OnCooldown),
            "day {day}"
        );
    }
    world.day = 14;
    assert!(engine.execute_ability(&mut world, &doc, &id, explicit()).success);
}

#[test]
fn max_uses_exhausts_permanently() {
    let rally = AbilityDefinition::new("rally", "Rally", AbilityCategory::Special)
        .with_max_uses(2)
        .with_effect(EffectDescriptor::ImproveSatisfaction { amount: 5 });
    let mut engine = engine_for("guard", vec![rally]);
    let mut world = stocked(1).with_actor(Actor::new("Gus", "guard"));
    let (gus, id): (ActorId, AbilityId) = ("Gus".into(), "rally".into());

    for _ in 0..2 {
        assert!(engine.execute_ability(&mut world, &gus, &id, explicit()).success);
    }
    for day in 2..5 {
        world.day = day;
        let listed = engine.available_abilities(&world, &gus);
        assert_eq!(listed[0].usage_count, 2);
        assert_eq!(listed[0].uses_remaining, Some(0));
        assert!(!listed[0].can_use);
        assert_eq!(
            engine.execute_ability(&mut world, &gus, &id, explicit()).reason,
            Some(ReasonCode::OnCooldown)
        );
    }
}

#[test]
fn history_keeps_only_the_newest_records() {
    let oracle = StaticAbilityOracle::new().with_abilities(
        "cook",
        vec![AbilityDefinition::new("stir", "Stir", AbilityCategory::Active)],
    );
    let config = EngineConfig::default().with_history_capacity(20);
    let mut engine = AbilityEngine::new(AbilityRegistry::load(&oracle).unwrap(), config);
    let mut world = WorldState::new(1).with_actor(Actor::new("Cy", "cook"));

    let ids: Vec<_> = (0..30)
        .map(|_| {
            engine
                .execute_ability(&mut world, &"Cy".into(), &"stir".into(), explicit())
                .execution_id
        })
        .collect();

    let kept: Vec<_> = engine.history().iter().map(|record| record.execution_id).collect();
    assert_eq!(kept.len(), 20);
    assert_eq!(kept, ids[10..]);
}

#[test]
fn failing_effect_does_not_refund_cost() {
    let botched = AbilityDefinition::new("botched", "Botched Surgery", AbilityCategory::Active)
        .with_cost(ResourceKind::Medical, 5)
        .with_effect(EffectDescriptor::heal(TargetSelector::FirstIncapacitated))
        .with_effect(EffectDescriptor::log("the patient is fine, probably"));
    let mut engine = engine_for("doctor", vec![botched]);
    // Nobody is incapacitated, so the heal has no target.
    let mut world = stocked(1).with_actor(Actor::new("Doc", "doctor"));

    let result = engine.execute_ability(&mut world, &"Doc".into(), &"botched".into(), explicit());

    assert!(result.success);
    assert_eq!(result.effects[0].status, EffectStatus::Failed);
    assert_eq!(result.effects[1].status, EffectStatus::Applied);
    assert_eq!(world.resources.net_change(ResourceKind::Medical), -5);
}

#[test]
fn unknown_effect_kind_is_soft() {
    let catalog = r#"{
        "id": "ritual",
        "name": "Ritual",
        "category": "active",
        "effects": [
            { "kind": "summon_raccoons", "count": 3 },
            { "kind": "log", "message": "nothing happens" }
        ]
    }"#;
    let ritual: AbilityDefinition = serde_json::from_str(catalog).unwrap();
    let mut engine = engine_for("mystic", vec![ritual]);
    let mut world = WorldState::new(1).with_actor(Actor::new("Mo", "mystic"));

    let result = engine.execute_ability(&mut world, &"Mo".into(), &"ritual".into(), explicit());

    assert!(result.success);
    assert_eq!(result.effects[0].status, EffectStatus::Unknown);
    assert_eq!(result.effects[0].error_code.as_deref(), Some("unknown_effect"));
    assert_eq!(result.effects[1].status, EffectStatus::Applied);
}

#[test]
fn permanent_special_is_single_use() {
    let last_stand = AbilityDefinition::new("last_stand", "Last Stand", AbilityCategory::Special)
        .with_cooldown(-1)
        .with_effect(EffectDescriptor::log("hold the line"));
    let mut engine = engine_for("guard", vec![last_stand]);
    let mut world = stocked(1).with_actor(Actor::new("Gus", "guard"));
    let (gus, id): (ActorId, AbilityId) = ("Gus".into(), "last_stand".into());

    let first = engine.execute_ability(&mut world, &gus, &id, explicit());
    assert!(first.events.contains(&AbilityEvent::SpecialAbilityUsed {
        actor: "Gus".into(),
        ability: "last_stand".into(),
        permanent: true,
    }));
    assert!(engine.cooldowns().is_empty());

    world.day = 40;
    assert_eq!(
        engine.execute_ability(&mut world, &gus, &id, explicit()).reason,
        Some(ReasonCode::OnCooldown)
    );
}

#[test]
fn passives_without_requirements_never_fire() {
    let aura = AbilityDefinition::new("aura", "Aura", AbilityCategory::Passive)
        .with_effect(EffectDescriptor::log("glow"));
    let mut engine = engine_for("mystic", vec![aura]);
    let mut world = WorldState::new(1).with_actor(Actor::new("Mo", "mystic"));

    assert!(engine.dispatch_passives(&mut world, &WorldEvent::DayAdvanced { day: 1 }).is_empty());
    assert!(engine.available_abilities(&world, &"Mo".into()).is_empty(), "passives are not listed");
}

#[test]
fn chance_requirement_rolls_through_injected_rng() {
    let lucky_find = AbilityDefinition::new("lucky_find", "Lucky Find", AbilityCategory::Passive)
        .with_requirement(Condition::trigger("scavenge_started"))
        .with_requirement(Condition::chance(0.25))
        .with_effect(EffectDescriptor::resource_delta(ResourceKind::Fuel, 2));
    let oracle = StaticAbilityOracle::new().with_abilities("scout", vec![lucky_find]);
    let registry = AbilityRegistry::load(&oracle).unwrap();

    let mut lucky = AbilityEngine::builder(registry.clone()).rng(FixedRng(0)).build();
    let mut unlucky = AbilityEngine::builder(registry).rng(FixedRng(u32::MAX)).build();
    let mut world = WorldState::new(1).with_actor(Actor::new("Sky", "scout"));

    assert_eq!(lucky.dispatch_passives(&mut world, &WorldEvent::ScavengeStarted).len(), 1);
    assert!(unlucky.dispatch_passives(&mut world, &WorldEvent::ScavengeStarted).is_empty());
    assert_eq!(world.resources.balance(ResourceKind::Fuel), 2);
}

#[test]
fn failed_validation_message_is_displayable() {
    let mut engine = engine_for("doctor", vec![heal_infection()]);
    let mut world = WorldState::new(1)
        .with_actor(Actor::new("Doc", "doctor"))
        .with_actor(Actor::new("Bob", "farmer").incapacitated());

    let result = engine.execute_ability(&mut world, &"Doc".into(), &"heal_infection".into(), explicit());

    assert_eq!(result.reason, Some(ReasonCode::InsufficientResources));
    assert!(result.message.contains("not enough cash"), "{}", result.message);
    assert!(world.actor(&"Bob".into()).unwrap().incapacitated);
}
