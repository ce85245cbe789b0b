use std::path::PathBuf;

use shelter_content::ContentFactory;
use shelter_core::{
    AbilityEngine, Actor, ExecuteOptions, RegistrySource, ResourceKind, ResourceLedger,
    Room, WorldState,
};

fn shipped_data() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn shipped_data_directory_drives_an_engine() {
    let factory = ContentFactory::new(shipped_data());
    let config = factory.load_config().unwrap();
    let registry = factory.build_registry(&config).unwrap();
    assert_eq!(registry.source(), RegistrySource::Catalog);

    let mut engine = AbilityEngine::new(registry, config);
    let mut world = WorldState::new(1)
        .with_actor(Actor::new("Gus", "guard"))
        .with_room(Room::new("gate", 40).with_defense(10))
        .with_resources(ResourceLedger::new().with_balance(ResourceKind::Materials, 3));

    let result = engine.execute_ability(
        &mut world,
        &"Gus".into(),
        &"fortify".into(),
        ExecuteOptions::explicit(),
    );
    assert!(result.success, "{}", result.message);
    assert_eq!(world.resources.balance(ResourceKind::Materials), 0);
    assert_eq!(world.rooms[0].defense, 25);
}

#[test]
fn empty_directory_falls_back_to_builtin_table() {
    let dir = tempfile::tempdir().unwrap();
    let factory = ContentFactory::new(dir.path());

    let config = factory.load_config_or_default().unwrap();
    let registry = factory.build_registry(&config).unwrap();

    assert_eq!(registry.source(), RegistrySource::Fallback);
    assert!(registry.granted("guard", &"last_stand".into()).is_some());
}

#[test]
fn invalid_catalog_without_fallback_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(ContentFactory::CONFIG_FILE),
        "fallback_on_missing_catalog = false\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(ContentFactory::ABILITIES_FILE),
        r#"
        [[actor]]
        type = "doctor"

        [[actor.abilities]]
        id = "hunch"
        name = "Hunch"
        category = "passive"
        requirements = [{ type = "chance", probability = 2.0 }]
        "#,
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    let err = factory.build_registry(&config).unwrap_err();
    assert!(err.to_string().contains("hunch"));
}
