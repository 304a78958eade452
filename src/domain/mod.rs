//! Domain layer: outline trees and the differencing pipeline
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading)
//! and total: every input text produces a result.

pub mod arena;
pub mod differ;
pub mod filter;
pub mod index;
pub mod matcher;
pub mod operation;
pub mod parser;
pub mod sequencer;

pub use arena::{OutlineArena, OutlineNode, ROOT_NAME};
pub use differ::{diff_indexes, Candidates};
pub use filter::filter_redundant;
pub use index::{NameIndex, PathIndex, PathMap, PathRecord};
pub use matcher::{ExactName, MatchPolicy, MatchPolicyKind, NormalizedName};
pub use operation::Operation;
pub use parser::parse_outline;
pub use sequencer::sequence;

use tracing::instrument;

/// Steps turning the `before` outline into the `after` outline, matching
/// nodes by exact name. Empty when both describe the same structure.
pub fn generate_diff(before: &str, after: &str) -> Vec<String> {
    generate_diff_with(before, after, &ExactName)
}

/// Like [`generate_diff`] with a caller-chosen [`MatchPolicy`].
#[instrument(level = "debug", skip_all)]
pub fn generate_diff_with(before: &str, after: &str, policy: &dyn MatchPolicy) -> Vec<String> {
    let before = PathIndex::build(&parse_outline(before), policy);
    let after = PathIndex::build(&parse_outline(after), policy);

    let candidates = diff_indexes(&before, &after, policy);
    let independent = filter_redundant(candidates);
    sequence(independent, &before)
}
