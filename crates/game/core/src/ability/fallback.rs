//! Built-in ability table used when no catalog can be loaded.
//!
//! Kept deliberately small: one or two abilities per core tenant type, so a
//! session without content files still has a playable engine.

use crate::ability::{AbilityCategory, AbilityDefinition, Condition, EffectDescriptor, TargetSelector};
use crate::state::ResourceKind;

/// `(actor_type, abilities)` pairs in stable order.
pub fn fallback_table() -> Vec<(&'static str, Vec<AbilityDefinition>)> {
    vec![
        (
            "doctor",
            vec![
                AbilityDefinition::new("heal_infection", "Heal Infection", AbilityCategory::Active)
                    .with_description("Treat the first incapacitated tenant.")
                    .with_cost(ResourceKind::Medical, 3)
                    .with_cost(ResourceKind::Cash, 12)
                    .with_requirement(Condition::IncapacitatedPresent)
                    .with_effect(EffectDescriptor::heal(TargetSelector::FirstIncapacitated)),
                AbilityDefinition::new("screen_tenants", "Screen Tenants", AbilityCategory::Active)
                    .with_description("Examine everyone for signs of infection.")
                    .with_cost(ResourceKind::Medical, 1)
                    .with_cooldown(2)
                    .with_effect(EffectDescriptor::DetectInfection { reveal: true }),
            ],
        ),
        (
            "handyman",
            vec![
                AbilityDefinition::new("patch_walls", "Patch Walls", AbilityCategory::Active)
                    .with_description("Repair the most damaged room.")
                    .with_cost(ResourceKind::Materials, 2)
                    .with_cooldown(1)
                    .with_effect(EffectDescriptor::Repair { room: None, amount: 20 }),
                AbilityDefinition::new("daily_upkeep", "Daily Upkeep", AbilityCategory::Passive)
                    .with_description("Small repairs at the start of each day.")
                    .with_requirement(Condition::trigger("daily_cycle"))
                    .with_effect(EffectDescriptor::Repair { room: None, amount: 5 }),
            ],
        ),
        (
            "guard",
            vec![
                AbilityDefinition::new("fortify", "Fortify", AbilityCategory::Active)
                    .with_description("Reinforce the least defended room.")
                    .with_cost(ResourceKind::Materials, 3)
                    .with_cooldown(2)
                    .with_effect(EffectDescriptor::Reinforce { room: None, amount: 15 }),
                AbilityDefinition::new("last_stand", "Last Stand", AbilityCategory::Special)
                    .with_description("Once per game, turn every room into a bunker.")
                    .with_cooldown(-1)
                    .with_effect(EffectDescriptor::Reinforce { room: None, amount: 50 })
                    .with_effect(EffectDescriptor::log("The guard barricades the shelter.")),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fallback_ids_are_unique_and_valid() {
        let mut seen = HashSet::new();
        for (_, abilities) in fallback_table() {
            for ability in abilities {
                assert!(ability.cooldown.is_valid(), "{}", ability.id);
                assert!(seen.insert(ability.id.clone()), "duplicate {}", ability.id);
            }
        }
    }

    #[test]
    fn passive_fallbacks_declare_a_trigger() {
        let passives = fallback_table()
            .into_iter()
            .flat_map(|(_, abilities)| abilities)
            .filter(AbilityDefinition::is_passive);
        for ability in passives {
            assert!(
                ability
                    .requirements
                    .iter()
                    .any(|c| matches!(c, Condition::Trigger { .. })),
                "{} never fires",
                ability.id
            );
        }
    }
}
