//! The statblock root document and its traits.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::ability::Ability;
use super::effect::TraitEffect;

/// Encounter value. Source text often carries prose ("3 for four minions"),
/// so both numbers and free text are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ev {
    Number(i64),
    Text(String),
}

impl Default for Ev {
    fn default() -> Self {
        Ev::Number(0)
    }
}

impl fmt::Display for Ev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ev::Number(n) => write!(f, "{}", n),
            Ev::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Body of a trait: either a single effect string or a list of effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitBody {
    Effect {
        effect: String,
    },
    Effects {
        #[serde(default)]
        effects: Vec<TraitEffect>,
    },
}

impl Default for TraitBody {
    fn default() -> Self {
        TraitBody::Effects {
            effects: Vec::new(),
        }
    }
}

/// A passive, always-on property of a creature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    #[serde(flatten)]
    pub body: TraitBody,
}

impl Trait {
    pub fn new(name: impl Into<String>, effects: Vec<TraitEffect>) -> Self {
        Self {
            name: name.into(),
            body: TraitBody::Effects { effects },
        }
    }

    pub fn with_effect(name: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: TraitBody::Effect {
                effect: effect.into(),
            },
        }
    }

    /// Flatten the body into a list of effect entries.
    pub fn effects(&self) -> Vec<TraitEffect> {
        match &self.body {
            TraitBody::Effect { effect } => vec![TraitEffect::Text(effect.clone())],
            TraitBody::Effects { effects } => effects.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match &self.body {
            TraitBody::Effect { effect } => effect.trim().is_empty(),
            TraitBody::Effects { effects } => effects.is_empty(),
        }
    }
}

/// A structured creature description.
///
/// Field order here is the key order of the JSON and YAML output.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Statblock {
    pub name: String,
    pub level: u32,
    pub roles: Vec<String>,
    pub ancestry: Vec<String>,
    pub ev: Ev,
    pub stamina: u32,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub immunities: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<String>,

    #[serde(deserialize_with = "string_or_number")]
    pub speed: String,
    pub size: String,
    pub stability: i32,
    pub free_strike: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_captain: Option<String>,

    pub might: i32,
    pub agility: i32,
    pub reason: i32,
    pub intuition: i32,
    pub presence: i32,

    pub traits: Vec<Trait>,
    pub abilities: Vec<Ability>,
}

impl Statblock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The five attribute scores paired with their display names.
    pub fn attributes(&self) -> [(&'static str, i32); 5] {
        [
            ("Might", self.might),
            ("Agility", self.agility),
            ("Reason", self.reason),
            ("Intuition", self.intuition),
            ("Presence", self.presence),
        ]
    }

    pub fn ability(&self, name: &str) -> Option<&Ability> {
        self.abilities.iter().find(|a| a.name == name)
    }

    pub fn trait_named(&self, name: &str) -> Option<&Trait> {
        self.traits.iter().find(|t| t.name == name)
    }
}

/// Accept `6`, `"6"` or `"6 (fly)"` for the speed field.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}
