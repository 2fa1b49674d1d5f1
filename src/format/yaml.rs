use crate::error::{Result, StatblockError};
use crate::model::Statblock;

use super::Format;

/// YAML with the same structure as the JSON output.
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlFormat;

impl YamlFormat {
    pub const NAME: &'static str = "YAML";
}

impl Format for YamlFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Structured statblock as YAML"
    }

    fn extension(&self) -> &str {
        "yaml"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Statblock> {
        serde_yaml::from_str(source).map_err(|e| StatblockError::malformed(Self::NAME, e))
    }

    fn serialize(&self, statblock: &Statblock) -> Result<String> {
        serde_yaml::to_string(statblock).map_err(|e| StatblockError::Serialize {
            format: Self::NAME.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ability, AbilityType, Effect, Ev, Trait, TraitEffect};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip() {
        let mut statblock = Statblock::new("Bugbear Channeler");
        statblock.ev = Ev::Text("12".to_string());
        statblock.speed = "5".to_string();
        statblock.immunities = vec!["fire 5".to_string()];
        statblock.traits.push(Trait::new(
            "Shadow Chains",
            vec![TraitEffect::Text("Chains bind.".to_string())],
        ));
        let mut ability = Ability::new("Blistering Element", AbilityType::VillainAction(1));
        ability.effects.push(Effect::costed("2 Malice", "Burn."));
        statblock.abilities.push(ability);

        let text = YamlFormat.serialize(&statblock).unwrap();
        assert_eq!(YamlFormat.parse(&text).unwrap(), statblock);
    }

    #[test]
    fn test_lenient_fields() {
        let statblock = YamlFormat.parse("name: Wolf\nlevel: 2\n").unwrap();
        assert_eq!(statblock.name, "Wolf");
        assert_eq!(statblock.level, 2);
        assert!(statblock.abilities.is_empty());
    }

    #[test]
    fn test_malformed_input() {
        let err = YamlFormat.parse("name: [unclosed").unwrap_err();
        assert_eq!(err.to_string(), "Invalid YAML input.");
    }
}
