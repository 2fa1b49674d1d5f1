//! Splitting a text dump into individual statblocks.

use tracing::debug;

use crate::model::Statblock;

use super::classify::{classify, LineKind};
use super::parse_statblock;

/// Split `text` into the source text of each statblock it contains.
///
/// A statblock starts at a name/level header line that is followed (after
/// any blank lines) by an ancestry/EV line. Text before the first start is
/// dropped. If no start is found the whole text is returned as a single
/// block, unless it is blank.
pub fn extract_statblocks(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let starts: Vec<usize> = (0..lines.len())
        .filter(|&i| is_block_start(&lines, i))
        .collect();

    if starts.is_empty() {
        if text.trim().is_empty() {
            return Vec::new();
        }
        return vec![text.trim().to_string()];
    }

    if starts[0] > 0 {
        debug!(lines = starts[0], "dropping text before the first statblock");
    }

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            lines[start..end].join("\n").trim().to_string()
        })
        .collect()
}

/// Parse every statblock found in `text`.
pub fn parse_all(text: &str) -> Vec<Statblock> {
    extract_statblocks(text)
        .iter()
        .map(|block| parse_statblock(block))
        .collect()
}

fn is_block_start(lines: &[&str], i: usize) -> bool {
    if classify(lines[i]) != LineKind::Header {
        return false;
    }
    lines[i + 1..]
        .iter()
        .map(|line| classify(line))
        .find(|kind| *kind != LineKind::Blank)
        == Some(LineKind::TypeLine)
}
