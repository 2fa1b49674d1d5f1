//! Ability and trait parsing.
//!
//! After the header block the remaining lines are consumed by a small state
//! machine. At any point at most one record is open: an ability started by
//! an ability header, or a trait started by a trait name line. Structural
//! lines feed the open record; continuation lines extend whichever field
//! was written last. A record is finalized exactly once, when the next
//! record starts, at a blank line that does not lead into more ability
//! fields, or at end of input.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::{
    Ability, AbilityType, Effect, NamedEffect, PowerRoll, Statblock, TierKey, Trait, TraitEffect,
};

use super::classify::{
    classify, is_article, starts_uppercase, LineKind, ABILITY_HEADER, DISTANCE, EFFECT,
    END_EFFECT, HEADER_BULLET, KEYWORDS, MALICE, OUTCOME, TRIGGER,
};

/// Body given to an `End Effect` trait that has no text of its own.
pub const DEFAULT_END_EFFECT: &str = "At the end of each of their turns, the creature can take 5 damage to end one effect on them that can be ended by a saving throw.";

/// Roll text used when outcomes appear with no roll expression to attach to.
pub const DEFAULT_ROLL: &str = "Power Roll";

static ROLL_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+[dD]\d+)\s*\+\s*(\d+)").unwrap());
static DICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+[dD]\d+").unwrap());
static DISTANCE_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Distance\s+(.+?)\s+Target\s+(.+)$").unwrap());

/// Parse the body lines (everything after the header block) into `statblock`.
pub fn parse_body(lines: &[&str], statblock: &mut Statblock) {
    let mut machine = BodyParser::new(lines);
    machine.run();
    let (abilities, traits) = machine.finish();
    statblock.abilities = abilities;
    statblock.traits = traits;
}

/// Which field of the open ability continuation lines extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    None,
    Keywords,
    Distance,
    Target,
    Trigger,
    Effect,
    Outcome,
}

#[derive(Debug)]
enum Open {
    Nothing,
    Ability(AbilityBuilder),
    Trait(TraitBuilder),
}

struct BodyParser<'a> {
    lines: &'a [&'a str],
    pos: usize,
    open: Open,
    abilities: Vec<Ability>,
    traits: Vec<Trait>,
}

impl<'a> BodyParser<'a> {
    fn new(lines: &'a [&'a str]) -> Self {
        Self {
            lines,
            pos: 0,
            open: Open::Nothing,
            abilities: Vec::new(),
            traits: Vec::new(),
        }
    }

    fn run(&mut self) {
        while let Some(line) = self.lines.get(self.pos) {
            let line = line.trim();
            self.step(classify(line), line);
            self.pos += 1;
        }
        self.flush();
    }

    fn step(&mut self, kind: LineKind, line: &str) {
        match kind {
            LineKind::Blank => {
                let keep_open = matches!(self.open, Open::Ability(_))
                    && self.next_kind().is_some_and(LineKind::is_ability_field);
                if !keep_open {
                    self.flush();
                }
            }
            LineKind::AbilityHeader => {
                self.flush();
                self.open = Open::Ability(AbilityBuilder::from_header(line));
            }
            LineKind::TraitNameCandidate => {
                self.flush();
                self.open = Open::Trait(TraitBuilder::from_name_line(line));
            }
            kind if kind.is_ability_field() => match &mut self.open {
                Open::Ability(ability) => ability.apply(kind, line),
                Open::Trait(t) => t.push_structured(kind, line),
                Open::Nothing => debug!(line, "skipping ability field outside an ability"),
            },
            _ => match &mut self.open {
                Open::Ability(ability) => ability.continue_with(line),
                Open::Trait(t) => t.push_line(line),
                Open::Nothing => debug!(line, "skipping text outside any ability or trait"),
            },
        }
    }

    /// Kind of the next non-blank line after the current position.
    fn next_kind(&self) -> Option<LineKind> {
        self.lines[self.pos + 1..]
            .iter()
            .map(|line| classify(line))
            .find(|kind| *kind != LineKind::Blank)
    }

    /// Finalize the open record, if any.
    fn flush(&mut self) {
        match std::mem::replace(&mut self.open, Open::Nothing) {
            Open::Nothing => {}
            Open::Ability(builder) => {
                let ability = builder.finish();
                debug!(name = %ability.name, kind = %ability.kind, "ability closed");
                self.abilities.push(ability);
            }
            Open::Trait(builder) => {
                let t = builder.finish();
                debug!(name = %t.name, "trait closed");
                self.traits.push(t);
            }
        }
    }

    /// Return abilities and traits with no name shared between them.
    ///
    /// A trait whose name matches an ability is folded into that ability.
    fn finish(mut self) -> (Vec<Ability>, Vec<Trait>) {
        let mut traits = Vec::with_capacity(self.traits.len());
        for t in std::mem::take(&mut self.traits) {
            let ability = self
                .abilities
                .iter_mut()
                .find(|a| a.name.eq_ignore_ascii_case(&t.name));
            match ability {
                Some(ability) => {
                    debug!(name = %t.name, "folding trait into ability of the same name");
                    ability.effects.extend(t.effects().into_iter().map(|e| match e {
                        TraitEffect::Text(text) => Effect::Text(text),
                        TraitEffect::Named(named) => {
                            Effect::Text(format!("{} {}", named.name, named.effect))
                        }
                    }));
                }
                None => traits.push(t),
            }
        }
        (self.abilities, traits)
    }
}

#[derive(Debug)]
struct AbilityBuilder {
    ability: Ability,
    /// Roll expression from the header, used by the first outcome group.
    roll: Option<String>,
    outcomes: Vec<(TierKey, String)>,
    field: Field,
}

impl AbilityBuilder {
    fn from_header(line: &str) -> Self {
        let mut ability = Ability::default();
        let mut roll = None;

        if let Some(caps) = ABILITY_HEADER.captures(line) {
            ability.name = caps[1].trim().to_string();
            ability.kind = AbilityType::from_category(&caps[2]);

            let details = caps.get(3).map_or("", |m| m.as_str());
            let remaining = match ROLL_EXPR.captures(details) {
                Some(rc) => {
                    roll = Some(format!("{} + {}", &rc[1], &rc[2]));
                    details.replacen(&rc[0], "", 1)
                }
                None => details.to_string(),
            };
            let cost = clean_annotation(&remaining);
            if !cost.is_empty() {
                ability.cost = Some(cost);
            }
        } else {
            ability.name = line.trim().to_string();
        }

        debug!(name = %ability.name, "ability opened");
        Self {
            ability,
            roll,
            outcomes: Vec::new(),
            field: Field::None,
        }
    }

    fn apply(&mut self, kind: LineKind, line: &str) {
        if kind == LineKind::Outcome {
            self.push_outcome(line);
            return;
        }
        self.flush_roll();

        match kind {
            LineKind::Keywords => {
                if let Some(caps) = KEYWORDS.captures(line) {
                    self.ability.keywords.extend(split_keywords(&caps[1]));
                }
                self.field = Field::Keywords;
            }
            LineKind::DistanceTarget => {
                if let Some(caps) = DISTANCE_TARGET.captures(line) {
                    self.ability.distance = Some(caps[1].trim().to_string());
                    self.ability.target = Some(caps[2].trim().to_string());
                    self.field = Field::Target;
                } else if let Some(caps) = DISTANCE.captures(line) {
                    self.ability.distance = Some(caps[1].trim().to_string());
                    self.field = Field::Distance;
                }
            }
            LineKind::EffectStart => {
                let text = EFFECT
                    .captures(line)
                    .map(|caps| caps[1].trim().to_string())
                    .unwrap_or_default();
                self.ability.effects.push(Effect::Text(text));
                self.field = Field::Effect;
            }
            LineKind::TriggerStart => {
                let text = TRIGGER
                    .captures(line)
                    .map(|caps| caps[1].trim().to_string())
                    .unwrap_or_default();
                self.ability.trigger = Some(match self.ability.trigger.take() {
                    Some(existing) => join(&existing, &text),
                    None => text,
                });
                self.field = Field::Trigger;
            }
            LineKind::MaliceStart => {
                if let Some(caps) = MALICE.captures(line) {
                    self.ability
                        .effects
                        .push(Effect::costed(caps[1].trim(), caps[2].trim()));
                }
                self.field = Field::Effect;
            }
            _ => self.continue_with(line),
        }
    }

    fn push_outcome(&mut self, line: &str) {
        let Some(caps) = OUTCOME.captures(line) else {
            self.continue_with(line);
            return;
        };
        let key = TierKey::from_threshold(&caps[2]);
        let text = caps.get(3).map_or("", |m| m.as_str()).trim().to_string();

        // A repeated tier starts a new roll table.
        if self.outcomes.iter().any(|(k, _)| *k == key) {
            self.flush_roll();
        }
        self.outcomes.push((key, text));
        self.field = Field::Outcome;
    }

    fn continue_with(&mut self, line: &str) {
        match self.field {
            Field::Outcome => {
                if let Some((_, text)) = self.outcomes.last_mut() {
                    *text = join(text, line);
                }
            }
            Field::Keywords => self.ability.keywords.extend(split_keywords(line)),
            Field::Distance => append(&mut self.ability.distance, line),
            Field::Target => append(&mut self.ability.target, line),
            Field::Trigger => append(&mut self.ability.trigger, line),
            Field::Effect => match self.ability.effects.last_mut() {
                Some(Effect::Text(text)) => *text = join(text, line),
                Some(Effect::Costed(costed)) => costed.effect = join(&costed.effect, line),
                _ => {
                    self.ability.effects.push(Effect::text(line));
                }
            },
            Field::None => {
                self.ability.effects.push(Effect::text(line));
                self.field = Field::Effect;
            }
        }
    }

    /// Merge pending outcome lines into a single power roll effect.
    fn flush_roll(&mut self) {
        if self.outcomes.is_empty() {
            return;
        }

        let roll = match self.roll.take() {
            Some(roll) => roll,
            None => self.take_roll_text().unwrap_or_else(|| DEFAULT_ROLL.to_string()),
        };

        let mut power_roll = PowerRoll::new(roll);
        for (key, text) in self.outcomes.drain(..) {
            power_roll.tiers.insert(key, text);
        }
        self.ability.effects.push(Effect::PowerRoll(power_roll));
        self.field = Field::None;
    }

    /// Pop a preceding plain effect that reads like a roll ("... makes a Might test").
    fn take_roll_text(&mut self) -> Option<String> {
        let is_roll = matches!(
            self.ability.effects.last(),
            Some(Effect::Text(text)) if looks_like_roll(text)
        );
        if !is_roll {
            return None;
        }
        match self.ability.effects.pop() {
            Some(Effect::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn finish(mut self) -> Ability {
        self.flush_roll();
        if let Some(roll) = &self.roll {
            debug!(name = %self.ability.name, roll = %roll, "roll expression without outcomes");
        }
        self.ability
            .effects
            .retain(|e| !matches!(e, Effect::Text(text) if text.trim().is_empty()));
        self.ability
    }
}

#[derive(Debug)]
struct TraitBuilder {
    name: String,
    effects: Vec<TraitEffect>,
    unnamed: Vec<String>,
    end_effect: bool,
}

impl TraitBuilder {
    fn from_name_line(line: &str) -> Self {
        let line = line.trim();
        let mut builder = Self {
            name: line.to_string(),
            effects: Vec::new(),
            unnamed: Vec::new(),
            end_effect: false,
        };

        if let Some(caps) = END_EFFECT.captures(line) {
            builder.name = "End Effect".to_string();
            builder.end_effect = true;
            let inline = caps[1].trim();
            if !inline.is_empty() {
                builder.unnamed.push(inline.to_string());
            }
        }

        debug!(name = %builder.name, "trait opened");
        builder
    }

    /// Add a body line, splitting off a leading title-cased effect name.
    fn push_line(&mut self, line: &str) {
        let words: Vec<&str> = line.split_whitespace().collect();
        let name_len = words
            .iter()
            .take_while(|w| starts_uppercase(w) && !is_article(w) && !is_minor_lead(w))
            .count();

        if name_len > 1 && name_len < words.len() {
            self.flush_unnamed();
            self.effects.push(TraitEffect::Named(NamedEffect {
                name: words[..name_len].join(" "),
                effect: words[name_len..].join(" "),
            }));
            return;
        }

        match self.effects.last_mut() {
            Some(TraitEffect::Named(named)) if self.unnamed.is_empty() => {
                named.effect = join(&named.effect, line);
            }
            _ => self.unnamed.push(line.to_string()),
        }
    }

    /// Ability-style lines inside a trait body are kept as trait effects.
    fn push_structured(&mut self, kind: LineKind, line: &str) {
        match kind {
            LineKind::MaliceStart => {
                if let Some(caps) = MALICE.captures(line) {
                    self.flush_unnamed();
                    self.effects.push(TraitEffect::Named(NamedEffect {
                        name: caps[1].trim().to_string(),
                        effect: caps[2].trim().to_string(),
                    }));
                }
            }
            LineKind::EffectStart => {
                self.flush_unnamed();
                if let Some(caps) = EFFECT.captures(line) {
                    let text = caps[1].trim();
                    if !text.is_empty() {
                        self.unnamed.push(text.to_string());
                    }
                }
            }
            _ => {
                self.flush_unnamed();
                self.unnamed.push(line.to_string());
            }
        }
    }

    fn flush_unnamed(&mut self) {
        if !self.unnamed.is_empty() {
            self.effects.push(TraitEffect::Text(self.unnamed.join(" ")));
            self.unnamed.clear();
        }
    }

    fn finish(mut self) -> Trait {
        self.flush_unnamed();
        if self.end_effect && self.effects.is_empty() {
            self.effects
                .push(TraitEffect::Text(DEFAULT_END_EFFECT.to_string()));
        }
        Trait::new(self.name, self.effects)
    }
}

/// Words that open a sentence rather than continue an effect name.
fn is_minor_lead(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "if" | "when")
}

fn looks_like_roll(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("test") || lower.contains("power roll") || DICE.is_match(text)
}

/// Strip bullet glyphs and separators from a header annotation.
fn clean_annotation(s: &str) -> String {
    s.replace(HEADER_BULLET, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_keywords(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty() && *k != "—" && *k != "-")
        .map(str::to_string)
}

fn join(existing: &str, more: &str) -> String {
    let more = more.trim();
    if existing.is_empty() {
        more.to_string()
    } else if more.is_empty() {
        existing.to_string()
    } else {
        format!("{} {}", existing, more)
    }
}

fn append(field: &mut Option<String>, line: &str) {
    let joined = join(field.as_deref().unwrap_or(""), line);
    *field = Some(joined);
}
