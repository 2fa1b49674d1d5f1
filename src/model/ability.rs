//! Abilities and their action categories.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::effect::Effect;

/// The action economy slot an ability uses.
///
/// Villain actions keep their ordinal. Category text that is not recognized
/// is preserved verbatim in `Other` rather than being coerced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AbilityType {
    #[default]
    Action,
    Maneuver,
    TriggeredAction,
    VillainAction(u32),
    Other(String),
}

impl AbilityType {
    /// Map a header category (`Main Action`, `Free Triggered Action`, ...)
    /// onto an ability type.
    pub fn from_category(category: &str) -> Self {
        let normalized = category.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.as_str() {
            "Action" | "Main Action" => AbilityType::Action,
            "Maneuver" | "Free Maneuver" => AbilityType::Maneuver,
            "Triggered Action" | "Free Triggered Action" => AbilityType::TriggeredAction,
            other => match other.strip_prefix("Villain Action") {
                Some(rest) => match rest.trim().parse::<u32>() {
                    Ok(n) => AbilityType::VillainAction(n),
                    Err(_) => AbilityType::Other(other.to_string()),
                },
                None => AbilityType::Other(other.to_string()),
            },
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, AbilityType::Other(_))
    }

    /// The closed set of literal type names, for diagnostics.
    pub fn allowed_values() -> Vec<String> {
        vec![
            "Action".to_string(),
            "Maneuver".to_string(),
            "Triggered Action".to_string(),
            "Villain Action N".to_string(),
        ]
    }
}

impl fmt::Display for AbilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbilityType::Action => write!(f, "Action"),
            AbilityType::Maneuver => write!(f, "Maneuver"),
            AbilityType::TriggeredAction => write!(f, "Triggered Action"),
            AbilityType::VillainAction(n) => write!(f, "Villain Action {}", n),
            AbilityType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AbilityType {
    fn from(s: &str) -> Self {
        match s {
            "Action" => AbilityType::Action,
            "Maneuver" => AbilityType::Maneuver,
            "Triggered Action" => AbilityType::TriggeredAction,
            other => match other
                .strip_prefix("Villain Action ")
                .and_then(|n| n.parse::<u32>().ok())
            {
                Some(n) if other == format!("Villain Action {}", n) => {
                    AbilityType::VillainAction(n)
                }
                _ => AbilityType::Other(other.to_string()),
            },
        }
    }
}

impl Serialize for AbilityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AbilityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AbilityType::from(s.as_str()))
    }
}

/// A named action a creature can take.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ability {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: AbilityType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,

    pub keywords: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,

    pub effects: Vec<Effect>,
}

impl Ability {
    pub fn new(name: impl Into<String>, kind: AbilityType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Default::default()
        }
    }
}
