//! Parser tests driven by the statblock text fixtures.

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use statblock::{
    extract_statblocks, parse_all, parse_statblock, AbilityType, Effect, NamedEffect, TierKey,
    TraitEffect,
};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("Failed to read fixture")
}

#[test]
fn test_goblin_header() {
    let s = parse_statblock(&fixture("goblin_assassin.txt"));

    assert_eq!(s.name, "GOBLIN ASSASSIN");
    assert_eq!(s.level, 1);
    assert_eq!(s.roles, vec!["MINION", "HARRIER"]);
    assert_eq!(s.ancestry, vec!["Humanoid", "Goblin"]);
    assert_eq!(s.stamina, 4);
    assert_eq!(s.speed, "6 (climb)");
    assert_eq!(s.size, "1S");
    assert_eq!(s.stability, 0);
    assert_eq!(s.free_strike, 1);
    assert_eq!(s.with_captain.as_deref(), Some("+2 bonus to speed"));
}

#[test]
fn test_attribute_signs() {
    let s = parse_statblock(&fixture("goblin_assassin.txt"));
    assert_eq!(
        (s.might, s.agility, s.reason, s.intuition, s.presence),
        (-2, 3, 0, 1, -1)
    );
}

#[test]
fn test_power_roll_tier_mapping() {
    let s = parse_statblock(&fixture("goblin_assassin.txt"));
    let stab = s.ability("Sword Stab").expect("Sword Stab parsed");

    let rolls: Vec<_> = stab.effects.iter().filter_map(Effect::as_power_roll).collect();
    assert_eq!(rolls.len(), 1);
    assert_eq!(rolls[0].roll, "2d10 + 3");
    assert_eq!(
        rolls[0].tiers.keys().cloned().collect::<Vec<_>>(),
        TierKey::known().to_vec()
    );

    let json = serde_json::to_value(rolls[0]).unwrap();
    assert_eq!(json["11 or lower"], "1 damage");
    assert_eq!(json["12-16"], "2 damage");
    assert_eq!(json["17+"], "3 damage");
}

#[test]
fn test_roll_taken_from_test_effect() {
    let s = parse_statblock(&fixture("goblin_assassin.txt"));
    let chains = s.ability("Shadow Chains").unwrap();

    assert_eq!(chains.kind, AbilityType::Maneuver);
    assert_eq!(chains.effects.len(), 1);
    let roll = chains.effects[0].as_power_roll().unwrap();
    assert_eq!(roll.roll, "The target makes an Agility test.");
    assert_eq!(roll.tier(&TierKey::Low), Some("restrained (save ends)"));
}

#[test]
fn test_trait_and_ability_split() {
    let s = parse_statblock(&fixture("goblin_assassin.txt"));

    let traits: Vec<&str> = s.traits.iter().map(|t| t.name.as_str()).collect();
    let abilities: Vec<&str> = s.abilities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(traits, vec!["Crafty"]);
    assert_eq!(abilities, vec!["Sword Stab", "Shadow Chains"]);
}

#[test]
fn test_ogre_malice_and_triggers() {
    let s = parse_statblock(&fixture("ogre_juggernaut.txt"));

    assert_eq!(s.name, "OGRE JUGGERNAUT");
    assert_eq!(s.level, 2);
    assert_eq!(s.immunities, vec!["poison 2"]);
    assert_eq!(s.weaknesses, vec!["psychic 3"]);

    let smash = s.ability("Club Smash").unwrap();
    assert_eq!(smash.cost.as_deref(), Some("Signature"));
    assert_eq!(
        smash.effects[1],
        Effect::costed("3 Malice", "The target is also knocked prone.")
    );

    let bloodlust = s.ability("Bloodlust").unwrap();
    assert_eq!(bloodlust.kind, AbilityType::TriggeredAction);
    assert_eq!(bloodlust.cost.as_deref(), Some("2 Malice"));
    assert_eq!(
        bloodlust.trigger.as_deref(),
        Some("The ogre takes damage from an enemy.")
    );
}

#[test]
fn test_ogre_traits() {
    let s = parse_statblock(&fixture("ogre_juggernaut.txt"));

    let stubborn = s.trait_named("Stubborn").unwrap();
    assert_eq!(
        stubborn.effects(),
        vec![TraitEffect::Named(NamedEffect {
            name: "Shapeshift Resistance".to_string(),
            effect: "The ogre can't be transformed against their will.".to_string(),
        })]
    );

    let end = s.trait_named("End Effect").unwrap();
    assert_eq!(
        end.effects(),
        vec![TraitEffect::Text(statblock::parser::DEFAULT_END_EFFECT.to_string())]
    );
}

#[test]
fn test_names_are_disjoint() {
    for name in ["goblin_assassin.txt", "ogre_juggernaut.txt", "bestiary.txt"] {
        for s in parse_all(&fixture(name)) {
            for t in &s.traits {
                assert!(
                    s.abilities.iter().all(|a| !a.name.eq_ignore_ascii_case(&t.name)),
                    "{} has both a trait and an ability named {}",
                    s.name,
                    t.name
                );
            }
        }
    }
}

#[test]
fn test_extract_bestiary() {
    let text = fixture("bestiary.txt");
    let blocks = extract_statblocks(&text);

    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("WOLF LEVEL 1"));
    assert!(!blocks.iter().any(|b| b.contains("Chapter 4")));
}

#[test]
fn test_villain_actions() {
    let all = parse_all(&fixture("bestiary.txt"));
    let chief = &all[1];

    assert_eq!(chief.name, "BANDIT CHIEF");
    assert_eq!(chief.ability("Shoot!").unwrap().kind, AbilityType::VillainAction(1));
    assert_eq!(
        chief.ability("Together!").unwrap().kind,
        AbilityType::VillainAction(2)
    );
    assert_eq!(
        chief.ability("Together!").unwrap().target.as_deref(),
        Some("Each ally in the area")
    );
    assert!(chief.trait_named("End Effect").is_some());

    let short = &all[2];
    assert_eq!(short.stamina, 120);
    assert!(short.abilities.is_empty());
}

#[test]
fn test_indented_copy_parses_the_same() {
    for name in ["goblin_assassin.txt", "ogre_juggernaut.txt"] {
        let text = fixture(name);
        let indented: String = text.lines().map(|line| format!("   {}\n", line)).collect();
        assert_eq!(parse_statblock(&indented), parse_statblock(&text), "{name}");
    }
}

#[test]
fn test_ability_mentions_inside_effects() {
    let text = fixture("goblin_assassin.txt").replace(
        "Effect The assassin can shift 1 square.",
        "Effect The assassin can use Shadow Chains (Maneuver) against the same target.",
    );
    let s = parse_statblock(&text);

    let abilities: Vec<&str> = s.abilities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(abilities, vec!["Sword Stab", "Shadow Chains"]);
    assert_eq!(
        s.ability("Sword Stab").unwrap().effects[1],
        Effect::text("The assassin can use Shadow Chains (Maneuver) against the same target.")
    );
}
