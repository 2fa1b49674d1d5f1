//! Effect variants attached to abilities and traits.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Result tier of a power roll.
///
/// Variants are declared low to high so a `BTreeMap<TierKey, _>` iterates
/// in table order. Thresholds that do not map onto one of the three known
/// tiers are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TierKey {
    Low,
    Middle,
    High,
    Other(String),
}

impl TierKey {
    pub const LOW: &'static str = "11 or lower";
    pub const MIDDLE: &'static str = "12-16";
    pub const HIGH: &'static str = "17+";

    /// The three recognized tiers in table order.
    pub fn known() -> [TierKey; 3] {
        [TierKey::Low, TierKey::Middle, TierKey::High]
    }

    /// Map an outcome threshold token (`≤11`, `12–16`, `17+`, `17`) to a tier.
    pub fn from_threshold(threshold: &str) -> Self {
        let threshold = threshold.trim();
        if threshold.contains('≤') {
            return TierKey::Low;
        }
        if threshold.ends_with('+') {
            return TierKey::High;
        }
        if threshold.contains('–') || threshold.contains('-') {
            let literal: String = threshold
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| if c == '–' { '-' } else { c })
                .collect();
            return TierKey::from(literal.as_str());
        }
        if !threshold.is_empty() && threshold.chars().all(|c| c.is_ascii_digit()) {
            return TierKey::High;
        }
        TierKey::Other(threshold.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            TierKey::Low => Self::LOW,
            TierKey::Middle => Self::MIDDLE,
            TierKey::High => Self::HIGH,
            TierKey::Other(s) => s,
        }
    }

    /// Outcome glyph conventionally printed in front of this tier.
    pub fn glyph(&self) -> &'static str {
        match self {
            TierKey::Low => "✦",
            TierKey::Middle => "★",
            TierKey::High | TierKey::Other(_) => "✸",
        }
    }

    /// Short threshold label (`≤11`, `12-16`, `17+`).
    pub fn threshold_label(&self) -> &str {
        match self {
            TierKey::Low => "≤11",
            other => other.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TierKey::Other(_))
    }
}

impl From<&str> for TierKey {
    fn from(s: &str) -> Self {
        match s {
            Self::LOW => TierKey::Low,
            Self::MIDDLE => TierKey::Middle,
            Self::HIGH => TierKey::High,
            other => TierKey::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TierKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TierKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TierKey::from(s.as_str()))
    }
}

/// A dice roll whose result is looked up in a tier table.
///
/// On the wire the tiers sit beside `roll` as flat keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerRoll {
    pub roll: String,
    #[serde(flatten)]
    pub tiers: BTreeMap<TierKey, String>,
}

impl PowerRoll {
    pub fn new(roll: impl Into<String>) -> Self {
        Self {
            roll: roll.into(),
            tiers: BTreeMap::new(),
        }
    }

    /// Builder-style tier insertion.
    pub fn with_tier(mut self, key: TierKey, text: impl Into<String>) -> Self {
        self.tiers.insert(key, text.into());
        self
    }

    pub fn tier(&self, key: &TierKey) -> Option<&str> {
        self.tiers.get(key).map(|s| s.as_str())
    }
}

/// An effect gated behind a resource cost, e.g. `3 Malice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedEffect {
    pub cost: String,
    pub effect: String,
}

/// One entry in an ability's effect list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effect {
    Text(String),
    Costed(CostedEffect),
    PowerRoll(PowerRoll),
}

impl Effect {
    pub fn text(s: impl Into<String>) -> Self {
        Effect::Text(s.into())
    }

    pub fn costed(cost: impl Into<String>, effect: impl Into<String>) -> Self {
        Effect::Costed(CostedEffect {
            cost: cost.into(),
            effect: effect.into(),
        })
    }

    pub fn as_power_roll(&self) -> Option<&PowerRoll> {
        match self {
            Effect::PowerRoll(roll) => Some(roll),
            _ => None,
        }
    }
}

/// A named sub-effect inside a trait body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEffect {
    pub name: String,
    pub effect: String,
}

/// One entry in a trait's effect list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitEffect {
    Text(String),
    Named(NamedEffect),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_mapping() {
        assert_eq!(TierKey::from_threshold("≤11"), TierKey::Low);
        assert_eq!(TierKey::from_threshold("12–16"), TierKey::Middle);
        assert_eq!(TierKey::from_threshold("12-16"), TierKey::Middle);
        assert_eq!(TierKey::from_threshold("17+"), TierKey::High);
        assert_eq!(TierKey::from_threshold("17"), TierKey::High);
    }

    #[test]
    fn test_threshold_unknown_range_is_literal() {
        assert_eq!(
            TierKey::from_threshold("10–14"),
            TierKey::Other("10-14".to_string())
        );
    }

    #[test]
    fn test_tier_order() {
        let mut keys = vec![
            TierKey::High,
            TierKey::Other("5-9".to_string()),
            TierKey::Low,
            TierKey::Middle,
        ];
        keys.sort();
        assert_eq!(keys[0], TierKey::Low);
        assert_eq!(keys[1], TierKey::Middle);
        assert_eq!(keys[2], TierKey::High);
    }

    #[test]
    fn test_power_roll_wire_shape() {
        let effect = Effect::PowerRoll(
            PowerRoll::new("2d10 + 3")
                .with_tier(TierKey::High, "9 damage")
                .with_tier(TierKey::Low, "3 damage"),
        );

        let json = serde_json::to_string(&effect).unwrap();
        assert_eq!(
            json,
            r#"{"roll":"2d10 + 3","11 or lower":"3 damage","17+":"9 damage"}"#
        );
    }

    #[test]
    fn test_effect_variants_deserialize() {
        let text: Effect = serde_json::from_str(r#""Push 2""#).unwrap();
        assert_eq!(text, Effect::text("Push 2"));

        let costed: Effect =
            serde_json::from_str(r#"{"cost":"3 Malice","effect":"Slide 3"}"#).unwrap();
        assert_eq!(costed, Effect::costed("3 Malice", "Slide 3"));

        let roll: Effect =
            serde_json::from_str(r#"{"roll":"2d10 + 2","12-16":"5 damage"}"#).unwrap();
        let roll = roll.as_power_roll().unwrap();
        assert_eq!(roll.tier(&TierKey::Middle), Some("5 damage"));
    }

    #[test]
    fn test_trait_effect_variants() {
        let named: TraitEffect =
            serde_json::from_str(r#"{"name":"Shadow Step","effect":"Teleport 3"}"#).unwrap();
        assert!(matches!(named, TraitEffect::Named(_)));

        let text: TraitEffect = serde_json::from_str(r#""Always on""#).unwrap();
        assert_eq!(text, TraitEffect::Text("Always on".to_string()));
    }
}
