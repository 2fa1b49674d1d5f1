//! Human-readable Markdown output.
//!
//! Layout: a two-column header table, a rule, the attribute row, then one
//! `##` section per ability and per trait, each closed by a rule. Markdown
//! is write-only.

use crate::error::Result;
use crate::model::{Ability, Effect, Statblock, Trait, TraitEffect};

use super::Format;

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormat;

impl MarkdownFormat {
    pub const NAME: &'static str = "Markdown";
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Readable statblock layout (output only)"
    }

    fn extension(&self) -> &str {
        "md"
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, statblock: &Statblock) -> Result<String> {
        Ok(render(statblock))
    }
}

const RULE: &str = "---";

/// Render a statblock as Markdown.
pub fn render(statblock: &Statblock) -> String {
    let mut blocks = vec![header_table(statblock), RULE.to_string()];

    let attributes: Vec<String> = statblock
        .attributes()
        .iter()
        .map(|(name, value)| format!("**{}** {}", name, signed(*value)))
        .collect();
    blocks.push(attributes.join(" &nbsp; "));
    blocks.push(RULE.to_string());

    for ability in &statblock.abilities {
        ability_blocks(ability, &mut blocks);
        blocks.push(RULE.to_string());
    }
    for t in &statblock.traits {
        trait_blocks(t, &mut blocks);
        blocks.push(RULE.to_string());
    }

    blocks.join("\n\n")
}

fn header_table(statblock: &Statblock) -> String {
    let mut rows = Vec::new();

    let roles = statblock.roles.join(" ").to_uppercase();
    rows.push(row(
        &statblock.name,
        format!("LEVEL {} {}", statblock.level, roles).trim_end(),
    ));
    rows.push("|:---|---:|".to_string());

    let ancestry = if statblock.ancestry.is_empty() {
        "Unknown".to_string()
    } else {
        statblock.ancestry.join(", ")
    };
    rows.push(row(
        &format!("**{}**", ancestry),
        &format!("**EV** {}", statblock.ev),
    ));

    let mut defenses = Vec::new();
    if !statblock.immunities.is_empty() {
        defenses.push(format!("**Immunity** {}", statblock.immunities.join(", ")));
    }
    if !statblock.weaknesses.is_empty() {
        defenses.push(format!("**Weakness** {}", statblock.weaknesses.join(", ")));
    }
    rows.push(row(
        &format!("**Stamina** {}", statblock.stamina),
        &defenses.join(" "),
    ));

    let mut movement = Vec::new();
    if !statblock.size.is_empty() {
        movement.push(format!("**Size** {}", statblock.size));
    }
    movement.push(format!("**Stability** {}", statblock.stability));
    rows.push(row(
        &format!("**Speed** {}", statblock.speed),
        &movement.join(" "),
    ));

    let captain = statblock
        .with_captain
        .as_ref()
        .map(|text| format!("**With Captain** {}", text))
        .unwrap_or_default();
    rows.push(row(
        &captain,
        &format!("**Free Strike** {}", statblock.free_strike),
    ));

    rows.join("\n")
}

fn row(left: &str, right: &str) -> String {
    format!("| {} | {} |", left, right)
}

fn ability_blocks(ability: &Ability, blocks: &mut Vec<String>) {
    blocks.push(format!("## {} ({})", ability.name, ability.kind));

    if let Some(cost) = &ability.cost {
        blocks.push(format!("**Cost** {}", cost));
    }
    if !ability.keywords.is_empty() {
        blocks.push(format!("**Keywords** {}", ability.keywords.join(", ")));
    }
    if let Some(distance) = &ability.distance {
        blocks.push(format!("**Distance** {}", distance));
    }
    if let Some(target) = &ability.target {
        blocks.push(format!("**Target** {}", target));
    }
    if let Some(trigger) = &ability.trigger {
        blocks.push(format!("**Trigger** {}", trigger));
    }

    for effect in &ability.effects {
        blocks.push(effect_block(effect));
    }
}

fn effect_block(effect: &Effect) -> String {
    match effect {
        Effect::Text(text) => text.clone(),
        Effect::Costed(costed) => format!("**{}** {}", costed.cost, costed.effect),
        Effect::PowerRoll(roll) => {
            let mut lines = vec![format!("**{}**", roll.roll)];
            for (key, text) in &roll.tiers {
                lines.push(format!(
                    "*   **{} {}** {}",
                    key.glyph(),
                    key.threshold_label(),
                    text
                ));
            }
            lines.join("\n")
        }
    }
}

fn trait_blocks(t: &Trait, blocks: &mut Vec<String>) {
    blocks.push(format!("## {}", t.name));
    for effect in t.effects() {
        blocks.push(match effect {
            TraitEffect::Text(text) => text,
            TraitEffect::Named(named) => format!("**{}** {}", named.name, named.effect),
        });
    }
}

fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}
