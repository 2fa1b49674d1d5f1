//! Line classification.
//!
//! Every trimmed input line maps to exactly one `LineKind`. Patterns are
//! tested in a fixed order so that overlapping shapes resolve the same way
//! every time: effect and trigger openers first, then ability headers and
//! the other ability fields, then the header block lines, then trait names,
//! and finally continuation text.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of words a trait name line may have.
pub const MAX_TRAIT_NAME_WORDS: usize = 4;

/// Lowercase words allowed inside a title-cased trait name.
const ARTICLES: &[&str] = &[
    "the", "of", "and", "a", "an", "in", "on", "at", "to", "for", "by", "with", "as", "but", "or",
    "nor", "so", "yet",
];

/// Glyphs that open a power roll outcome line (weak, average, strong).
pub const OUTCOME_GLYPHS: [char; 3] = ['✦', '★', '✸'];

/// Separator between an ability header and its roll/cost annotation.
pub const HEADER_BULLET: char = '◆';

pub(crate) static ABILITY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(.+?)\s+\((Main Action|Action|Free Maneuver|Maneuver|Free Triggered Action|Triggered Action|Villain Action\s*\d+)\)(?:\s*◆\s*(.*))?$",
    )
    .unwrap()
});

pub(crate) static OUTCOME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([✦★✸])\s*(≤\s*\d+|\d+\s*[–-]\s*\d+|\d+\+?)(?:\s+(.*))?$").unwrap()
});

pub(crate) static KEYWORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Keywords\s+(.+)$").unwrap());

pub(crate) static DISTANCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Distance\s+(.+)$").unwrap());

pub(crate) static EFFECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Effect\b:?\s*(.*)$").unwrap());

pub(crate) static TRIGGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Trigger\b:?\s*(.*)$").unwrap());

pub(crate) static MALICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\+?\s+Malice)\b:?\s*(.*)$").unwrap());

pub(crate) static END_EFFECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^End Effect\b:?\s*(.*)$").unwrap());

pub(crate) static NAME_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(.+?)\s+L\s*EVEL\s+(\d+)\b\s*(.*)$").unwrap());

pub(crate) static TYPE_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*?)\s*\bEV\s+(.+)$").unwrap());

static STATS_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Might\s*[+\-−–]?\s*\d").unwrap());

static STAMINA_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Stamina\s+\d").unwrap());

static SPEED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Speed\s+\d").unwrap());

static FREE_STRIKE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(^With Captain\b)|(\bFree Strike\s+\d)").unwrap());

/// Semantic kind of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// `<NAME> LEVEL <n> <ROLES>`
    Header,
    /// `<ancestry> EV <ev>`
    TypeLine,
    StaminaLine,
    SpeedLine,
    FreeStrikeLine,
    StatsLine,
    /// `<name> (<category>) ◆ <roll/cost>`
    AbilityHeader,
    Keywords,
    DistanceTarget,
    Outcome,
    EffectStart,
    TriggerStart,
    MaliceStart,
    TraitNameCandidate,
    Continuation,
}

impl LineKind {
    /// Lines that only make sense inside an open ability.
    pub fn is_ability_field(self) -> bool {
        matches!(
            self,
            LineKind::Keywords
                | LineKind::DistanceTarget
                | LineKind::Outcome
                | LineKind::EffectStart
                | LineKind::TriggerStart
                | LineKind::MaliceStart
        )
    }

    /// Lines belonging to the fixed header block.
    pub fn is_header_block(self) -> bool {
        matches!(
            self,
            LineKind::Header
                | LineKind::TypeLine
                | LineKind::StaminaLine
                | LineKind::SpeedLine
                | LineKind::FreeStrikeLine
                | LineKind::StatsLine
        )
    }
}

/// Classify one line of statblock text.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();

    if line.is_empty() {
        return LineKind::Blank;
    }
    // Effect text may name other abilities, so its openers win over headers.
    if END_EFFECT.is_match(line) {
        return LineKind::TraitNameCandidate;
    }
    if EFFECT.is_match(line) {
        return LineKind::EffectStart;
    }
    if TRIGGER.is_match(line) {
        return LineKind::TriggerStart;
    }
    if ABILITY_HEADER.is_match(line) {
        return LineKind::AbilityHeader;
    }
    if KEYWORDS.is_match(line) {
        return LineKind::Keywords;
    }
    if DISTANCE.is_match(line) {
        return LineKind::DistanceTarget;
    }
    if OUTCOME.is_match(line) {
        return LineKind::Outcome;
    }
    if MALICE.is_match(line) {
        return LineKind::MaliceStart;
    }
    if STATS_LINE.is_match(line) {
        return LineKind::StatsLine;
    }
    if STAMINA_LINE.is_match(line) {
        return LineKind::StaminaLine;
    }
    if SPEED_LINE.is_match(line) {
        return LineKind::SpeedLine;
    }
    if FREE_STRIKE_LINE.is_match(line) {
        return LineKind::FreeStrikeLine;
    }
    if NAME_LINE.is_match(line) {
        return LineKind::Header;
    }
    if TYPE_LINE.is_match(line) {
        return LineKind::TypeLine;
    }
    if is_trait_name(line) {
        return LineKind::TraitNameCandidate;
    }

    LineKind::Continuation
}

/// Title-cased short line: every word capitalized or a minor word.
fn is_trait_name(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() || words.len() > MAX_TRAIT_NAME_WORDS {
        return false;
    }

    let mut capitalized = 0;
    for word in &words {
        if is_article(word) {
            continue;
        }
        if starts_uppercase(word) {
            capitalized += 1;
        } else {
            return false;
        }
    }

    capitalized > 0
}

pub(crate) fn is_article(word: &str) -> bool {
    let lower = word.to_lowercase();
    ARTICLES.contains(&lower.as_str())
}

pub(crate) fn starts_uppercase(word: &str) -> bool {
    word.trim_start_matches(['(', '"', '\'', '“'])
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
}
