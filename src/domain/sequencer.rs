//! Orders independent operations so every parent exists before it is used.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::domain::differ::Candidates;
use crate::domain::index::PathIndex;
use crate::domain::operation::Operation;

/// Produce the final step list.
///
/// Deletions come first. Moves then additions form a pending pool that is
/// scanned from the front; the first entry whose dependency is satisfied is
/// emitted and the scan restarts. Keys known in `before` are available from the
/// start and every emitted Add makes its own key available. When a full scan
/// emits nothing the rest of the pool is flushed in order.
#[instrument(level = "debug", skip_all, fields(operations = ops.len()))]
pub fn sequence(ops: Candidates, before: &PathIndex) -> Vec<String> {
    let Candidates {
        deletes,
        moves,
        adds,
    } = ops;

    let mut steps: Vec<String> = deletes.iter().map(Operation::description).collect();

    let mut available: HashSet<String> = before.names().keys().cloned().collect();
    let mut pending: Vec<Operation> = moves.into_iter().chain(adds).collect();

    while !pending.is_empty() {
        let ready = pending
            .iter()
            .position(|op| op.depends_on().map_or(true, |dep| available.contains(dep)));

        match ready {
            Some(pos) => {
                let op = pending.remove(pos);
                steps.push(op.description());
                // Moves reuse a key that already exists
                if let Operation::Add { key, .. } = op {
                    available.insert(key);
                }
            }
            None => {
                warn!(
                    remaining = pending.len(),
                    "unresolvable dependencies, flushing remaining steps unordered"
                );
                steps.extend(pending.iter().map(Operation::description));
                break;
            }
        }
    }

    debug!(steps = steps.len(), "sequenced");
    steps
}
