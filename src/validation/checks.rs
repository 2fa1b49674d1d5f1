//! Semantic checks the JSON schema cannot express.
//!
//! Each check takes a `&Statblock` and returns a `ValidationResult` of
//! warnings. Paths point at the same locations the schema validator uses.

use std::collections::HashSet;

use crate::model::{AbilityType, Effect, Statblock, TierKey};

use super::warning::{Diagnostic, ValidationResult};

/// Warn when the statblock has no name.
pub fn check_name(statblock: &Statblock) -> ValidationResult {
    let mut result = ValidationResult::new();
    if statblock.name.trim().is_empty() {
        result.push(
            Diagnostic::warning("statblock::check::empty-name", "Statblock has no name")
                .at("/name")
                .with_help("The first line should read like `GOBLIN WARRIOR LEVEL 1 HORDE HARRIER`"),
        );
    }
    result
}

/// Warn when a trait and an ability share a name.
pub fn check_shared_names(statblock: &Statblock) -> ValidationResult {
    let mut result = ValidationResult::new();

    let abilities: HashSet<String> = statblock
        .abilities
        .iter()
        .map(|a| a.name.to_lowercase())
        .collect();

    for (i, t) in statblock.traits.iter().enumerate() {
        if abilities.contains(&t.name.to_lowercase()) {
            result.push(
                Diagnostic::warning(
                    "statblock::check::shared-name",
                    format!("'{}' is both a trait and an ability", t.name),
                )
                .at(format!("/traits/{}", i)),
            );
        }
    }

    result
}

/// Warn about ability types outside the known set.
pub fn check_ability_types(statblock: &Statblock) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (i, ability) in statblock.abilities.iter().enumerate() {
        if let AbilityType::Other(kind) = &ability.kind {
            result.push(
                Diagnostic::warning(
                    "statblock::check::ability-type",
                    format!("Ability '{}' has unknown type '{}'", ability.name, kind),
                )
                .at(format!("/abilities/{}/type", i))
                .with_allowed(AbilityType::allowed_values()),
            );
        }
    }

    result
}

/// Warn about power rolls with no tiers or with unrecognized tier keys.
pub fn check_power_rolls(statblock: &Statblock) -> ValidationResult {
    let mut result = ValidationResult::new();
    let allowed: Vec<String> = TierKey::known().iter().map(ToString::to_string).collect();

    for (i, ability) in statblock.abilities.iter().enumerate() {
        for (j, effect) in ability.effects.iter().enumerate() {
            let Effect::PowerRoll(roll) = effect else {
                continue;
            };
            let path = format!("/abilities/{}/effects/{}", i, j);

            if roll.tiers.is_empty() {
                result.push(
                    Diagnostic::warning(
                        "statblock::check::empty-roll",
                        format!("Power roll '{}' in '{}' has no tiers", roll.roll, ability.name),
                    )
                    .at(path.clone()),
                );
            }

            for key in roll.tiers.keys().filter(|k| !k.is_known()) {
                result.push(
                    Diagnostic::warning(
                        "statblock::check::tier-key",
                        format!("Unrecognized tier '{}' in '{}'", key, ability.name),
                    )
                    .at(path.clone())
                    .with_allowed(allowed.clone()),
                );
            }
        }
    }

    result
}
