//! Structural comparison of two indexed snapshots.

use tracing::{debug, instrument, trace};

use crate::domain::index::PathIndex;
use crate::domain::matcher::MatchPolicy;
use crate::domain::operation::Operation;

/// Candidate operations grouped by kind, each in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub deletes: Vec<Operation>,
    pub moves: Vec<Operation>,
    pub adds: Vec<Operation>,
}

impl Candidates {
    pub fn is_empty(&self) -> bool {
        self.deletes.is_empty() && self.moves.is_empty() && self.adds.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deletes.len() + self.moves.len() + self.adds.len()
    }
}

/// Classify every match key as removed, added, or common and emit the raw
/// candidates.
///
/// A common key yields at most one Move, and only when the set of parent
/// paths holding that key changed (see [`first_move`]). Both indexes must have
/// been built with `policy`.
#[instrument(level = "debug", skip_all)]
pub fn diff_indexes(before: &PathIndex, after: &PathIndex, policy: &dyn MatchPolicy) -> Candidates {
    let mut candidates = Candidates::default();

    for (key, paths) in before.names() {
        if after.contains_key(key) {
            continue;
        }
        for path in paths {
            if let Some(record) = before.get(path) {
                candidates.deletes.push(Operation::Delete {
                    name: record.name.clone(),
                    at_path: path.clone(),
                });
            }
        }
    }

    for (key, paths_a) in before.names() {
        let paths_b = after.paths_for(key);
        if paths_b.is_empty() {
            continue;
        }
        if let Some(op) = first_move(before, after, paths_a, paths_b, policy) {
            trace!(key = key.as_str(), "moved");
            candidates.moves.push(op);
        }
    }

    for (key, paths) in after.names() {
        if before.contains_key(key) {
            continue;
        }
        for path in paths {
            if let Some(record) = after.get(path) {
                let parent = after.parent_name(path).map(str::to_string);
                candidates.adds.push(Operation::Add {
                    name: record.name.clone(),
                    key: key.clone(),
                    at_path: path.clone(),
                    depends_on: parent.as_deref().map(|p| policy.key(p)),
                    parent,
                });
            }
        }
    }

    debug!(
        deletes = candidates.deletes.len(),
        moves = candidates.moves.len(),
        adds = candidates.adds.len(),
        "raw candidates"
    );
    candidates
}

/// Pick the Move for one common key.
///
/// First after-path whose parent held no instance of the key before. When
/// every after-parent already held one but some before-parent lost its
/// instance, that before-path is paired with the first after-path under a
/// different parent. Unchanged parent sets yield nothing.
fn first_move(
    before: &PathIndex,
    after: &PathIndex,
    paths_a: &[String],
    paths_b: &[String],
    policy: &dyn MatchPolicy,
) -> Option<Operation> {
    let parents_a = parent_paths(before, paths_a);
    let parents_b = parent_paths(after, paths_b);

    let target = paths_b
        .iter()
        .zip(&parents_b)
        .find(|(_, parent_b)| !parents_a.contains(parent_b))
        .map(|(path_b, _)| path_b)
        .or_else(|| {
            let lost = parents_a
                .iter()
                .find(|parent_a| !parents_b.contains(parent_a))?;
            paths_b
                .iter()
                .zip(&parents_b)
                .find(|(_, parent_b)| parent_b != &lost)
                .map(|(path_b, _)| path_b)
        })?;

    let record_b = after.get(target)?;
    let parent = after.parent_name(target).map(str::to_string);
    Some(Operation::Move {
        name: record_b.name.clone(),
        to_path: target.clone(),
        depends_on: parent.as_deref().map(|p| policy.key(p)),
        parent,
    })
}

fn parent_paths<'a>(index: &'a PathIndex, paths: &[String]) -> Vec<Option<&'a str>> {
    paths
        .iter()
        .filter_map(|path| index.get(path))
        .map(|record| record.parent_path.as_deref())
        .collect()
}
