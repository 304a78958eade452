//! Indentation-based outline parser.

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arena::OutlineArena;

/// Indentation assigned to the synthetic root, so a zero-indented line always
/// attaches to it.
const ROOT_INDENT: isize = -2;

/// Parse space-indented text into an outline.
///
/// Every non-blank line becomes one node named by its trimmed content. A line
/// is attached to the most recent earlier line with strictly smaller
/// indentation. Only `' '` counts towards indentation. Blank lines are skipped
/// and input without any content yields a bare root; parsing never fails.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_outline(text: &str) -> OutlineArena {
    let mut tree = OutlineArena::new();
    let mut stack: Vec<(Index, isize)> = vec![(tree.root(), ROOT_INDENT)];

    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        let indent = indentation(line);

        while stack.last().is_some_and(|&(_, level)| level >= indent) {
            stack.pop();
        }
        // The root's level is below every real line, so it is never popped.
        let parent = stack.last().map_or(tree.root(), |&(idx, _)| idx);

        let node = tree.insert_node(name, parent);
        trace!(name, indent, "attached node");
        stack.push((node, indent));
    }

    tree
}

fn indentation(line: &str) -> isize {
    line.chars().take_while(|&c| c == ' ').count() as isize
}
