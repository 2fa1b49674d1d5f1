//! Header block parsing.
//!
//! The first six content lines of a statblock carry fixed fields in a fixed
//! order. Each function fills its fields on the statblock and leaves the
//! defaults in place for anything it cannot read.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Ev, Statblock};

use super::classify::{NAME_LINE, TYPE_LINE};

static STAMINA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Stamina\s+(\d+)").unwrap());
static IMMUNITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Immunit(?:y|ies)\s+([^/]+)").unwrap());
static WEAKNESS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Weakness(?:es)?\s+([^/]+)").unwrap());
static SPEED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Speed\s+(\d+)(?:\s*\(([^)]+)\))?").unwrap());
static SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bSize\s+([^/]+?)\s*(?:/|$)").unwrap());
static STABILITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bStability\s+([+\-−–]?\d+)").unwrap());
static FREE_STRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Free Strike\s+(\d+)").unwrap());

/// One slot of the header block, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    Name,
    Ancestry,
    Stamina,
    Movement,
    FreeStrike,
    Attributes,
}

impl HeaderField {
    pub const ORDER: [HeaderField; 6] = [
        HeaderField::Name,
        HeaderField::Ancestry,
        HeaderField::Stamina,
        HeaderField::Movement,
        HeaderField::FreeStrike,
        HeaderField::Attributes,
    ];

    /// Fill this slot's fields from `line`.
    pub fn apply(self, statblock: &mut Statblock, line: &str) {
        match self {
            HeaderField::Name => parse_name_line(statblock, line),
            HeaderField::Ancestry => parse_ancestry_line(statblock, line),
            HeaderField::Stamina => parse_stamina_line(statblock, line),
            HeaderField::Movement => parse_movement_line(statblock, line),
            HeaderField::FreeStrike => parse_free_strike_line(statblock, line),
            HeaderField::Attributes => parse_attributes_line(statblock, line),
        }
    }
}

/// `GOBLIN ASSASSIN LEVEL 1 MINION HARRIER`
pub fn parse_name_line(statblock: &mut Statblock, line: &str) {
    let line = line.trim();
    match NAME_LINE.captures(line) {
        Some(caps) => {
            statblock.name = caps[1].trim().to_string();
            statblock.level = caps[2].parse().unwrap_or(0);
            statblock.roles = caps[3].split_whitespace().map(str::to_string).collect();
        }
        None => {
            statblock.name = line.to_string();
            statblock.level = 0;
            statblock.roles = Vec::new();
        }
    }
}

/// `Humanoid, Goblin EV 3 for four minions`
pub fn parse_ancestry_line(statblock: &mut Statblock, line: &str) {
    let line = line.trim();
    let (ancestry, ev) = match TYPE_LINE.captures(line) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()).to_string(),
            Ev::Text(caps[2].trim().to_string()),
        ),
        None => (line.to_string(), Ev::default()),
    };

    statblock.ancestry = split_list(&ancestry);
    statblock.ev = ev;
}

/// `Stamina 15 Immunity poison 2 / Weakness fire 3`
pub fn parse_stamina_line(statblock: &mut Statblock, line: &str) {
    statblock.stamina = STAMINA
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0);

    if let Some(caps) = IMMUNITY.captures(line) {
        statblock.immunities = split_list(&caps[1]);
    }
    if let Some(caps) = WEAKNESS.captures(line) {
        statblock.weaknesses = split_list(&caps[1]);
    }
}

/// `Speed 6 (climb) Size 1S / Stability 0`
pub fn parse_movement_line(statblock: &mut Statblock, line: &str) {
    statblock.speed = match SPEED.captures(line) {
        Some(caps) => match caps.get(2) {
            Some(modes) => format!("{} ({})", &caps[1], modes.as_str().trim()),
            None => caps[1].to_string(),
        },
        None => String::new(),
    };

    statblock.size = SIZE
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    statblock.stability = STABILITY
        .captures(line)
        .and_then(|caps| parse_signed(&caps[1]))
        .unwrap_or(0);
}

/// `With Captain +2 bonus to speed Free Strike 2`
pub fn parse_free_strike_line(statblock: &mut Statblock, line: &str) {
    statblock.free_strike = FREE_STRIKE
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0);

    const CAPTAIN: &str = "With Captain";
    if let Some(start) = line.find(CAPTAIN) {
        let rest = &line[start + CAPTAIN.len()..];
        let text = match rest.find("Free Strike") {
            Some(end) => &rest[..end],
            None => rest,
        };
        let text = text.trim();
        if !text.is_empty() {
            statblock.with_captain = Some(text.to_string());
        }
    }
}

/// `Might −2 Agility +3 Reason 0 Intuition +1 Presence −1`
pub fn parse_attributes_line(statblock: &mut Statblock, line: &str) {
    statblock.might = attribute(line, "Might");
    statblock.agility = attribute(line, "Agility");
    statblock.reason = attribute(line, "Reason");
    statblock.intuition = attribute(line, "Intuition");
    statblock.presence = attribute(line, "Presence");
}

fn attribute(line: &str, name: &str) -> i32 {
    let Some(start) = line.find(name) else {
        return 0;
    };
    let rest = line[start + name.len()..].trim_start();
    let token: String = rest
        .chars()
        .enumerate()
        .take_while(|(i, c)| c.is_ascii_digit() || (*i == 0 && is_sign(*c)))
        .map(|(_, c)| c)
        .collect();
    parse_signed(&token).unwrap_or(0)
}

fn is_sign(c: char) -> bool {
    matches!(c, '+' | '-' | '−' | '–')
}

/// Parse an integer that may use a Unicode minus or en dash as its sign.
pub fn parse_signed(s: &str) -> Option<i32> {
    let s = s.trim();
    let (negative, digits) = match s.chars().next()? {
        '-' | '−' | '–' => (true, &s[s.chars().next()?.len_utf8()..]),
        '+' => (false, &s[1..]),
        _ => (false, s),
    };
    let value: i32 = digits.trim().parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Split a comma-separated list, dropping empty entries and duplicates.
pub fn split_list(s: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in s.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !items.iter().any(|existing| existing == item) {
            items.push(item.to_string());
        }
    }
    items
}
