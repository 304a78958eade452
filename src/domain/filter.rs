//! Drops candidates already implied by an ancestor candidate of the same kind.

use tracing::{debug, instrument};

use crate::domain::differ::Candidates;
use crate::domain::operation::Operation;

/// Keep only independent candidates, per kind, preserving order.
#[instrument(level = "debug", skip_all, fields(candidates = candidates.len()))]
pub fn filter_redundant(candidates: Candidates) -> Candidates {
    let filtered = Candidates {
        deletes: independent(candidates.deletes),
        moves: independent(candidates.moves),
        adds: independent(candidates.adds),
    };
    debug!(
        deletes = filtered.deletes.len(),
        moves = filtered.moves.len(),
        adds = filtered.adds.len(),
        "independent operations"
    );
    filtered
}

/// Remove every operation whose path lies strictly below another one's.
fn independent(ops: Vec<Operation>) -> Vec<Operation> {
    let keep: Vec<bool> = ops
        .iter()
        .map(|op| !ops.iter().any(|other| is_descendant(op.path(), other.path())))
        .collect();
    ops.into_iter()
        .zip(keep)
        .filter_map(|(op, keep)| keep.then_some(op))
        .collect()
}

fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}
