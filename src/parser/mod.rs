//! Statblock text parser.
//!
//! Turns the plain text of a creature statblock (as copied out of a PDF)
//! into a [`Statblock`]. Parsing runs in two phases:
//!
//! - a fixed header block of six lines (name, ancestry, stamina, movement,
//!   free strike, attributes), read by position
//! - a body of abilities and traits, read by a line classifier and a small
//!   state machine
//!
//! Parsing never fails. Lines that cannot be placed are skipped and
//! unreadable header fields keep their defaults.
//!
//! # Usage
//!
//! ```ignore
//! use statblock::parser::parse_statblock;
//!
//! let source = std::fs::read_to_string("goblin.txt")?;
//! let statblock = parse_statblock(&source);
//! println!("{} (level {})", statblock.name, statblock.level);
//! ```

mod body;
mod classify;
mod extract;
mod header;

pub use body::{DEFAULT_END_EFFECT, DEFAULT_ROLL};
pub use classify::{classify, LineKind, MAX_TRAIT_NAME_WORDS, OUTCOME_GLYPHS};
pub use extract::{extract_statblocks, parse_all};
pub use header::{parse_signed, HeaderField};

use tracing::debug;

use crate::model::Statblock;

/// Parse one statblock from plain text.
pub fn parse_statblock(text: &str) -> Statblock {
    let lines: Vec<&str> = text.lines().collect();
    let mut statblock = Statblock::default();

    let body_start = parse_header(&lines, &mut statblock);
    body::parse_body(&lines[body_start..], &mut statblock);

    debug!(
        name = %statblock.name,
        traits = statblock.traits.len(),
        abilities = statblock.abilities.len(),
        "parsed statblock"
    );
    statblock
}

/// Read the header block and return the index of the first body line.
///
/// The name line is always consumed. Each later slot takes the next
/// non-blank line, unless that line already opens an ability.
fn parse_header(lines: &[&str], statblock: &mut Statblock) -> usize {
    let mut pos = 0;

    for (slot, field) in HeaderField::ORDER.iter().enumerate() {
        while lines.get(pos).is_some_and(|line| line.trim().is_empty()) {
            pos += 1;
        }
        let Some(line) = lines.get(pos).map(|line| line.trim()) else {
            break;
        };
        if slot > 0 && classify(line) == LineKind::AbilityHeader {
            debug!(?field, "header block ended early");
            break;
        }
        field.apply(statblock, line);
        pos += 1;
    }

    pos
}
