//! Policies deciding when two nodes in different snapshots are "the same".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maps a node name to the key used to match nodes across snapshots.
///
/// Two nodes with equal keys are considered the same entry; the differ never
/// looks at anything else. Implementations must be pure.
pub trait MatchPolicy: Send + Sync {
    fn key(&self, name: &str) -> String;
}

/// Match on the exact trimmed name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactName;

impl MatchPolicy for ExactName {
    fn key(&self, name: &str) -> String {
        name.to_string()
    }
}

/// Match ignoring case and runs of inner whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedName;

impl MatchPolicy for NormalizedName {
    fn key(&self, name: &str) -> String {
        name.split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Configurable selection of a built-in [`MatchPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicyKind {
    #[default]
    Exact,
    Normalized,
}

impl MatchPolicyKind {
    pub fn policy(self) -> Box<dyn MatchPolicy> {
        match self {
            MatchPolicyKind::Exact => Box::new(ExactName),
            MatchPolicyKind::Normalized => Box::new(NormalizedName),
        }
    }
}

impl FromStr for MatchPolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(MatchPolicyKind::Exact),
            "normalized" => Ok(MatchPolicyKind::Normalized),
            other => Err(format!(
                "unknown match policy '{other}' (expected 'exact' or 'normalized')"
            )),
        }
    }
}

impl fmt::Display for MatchPolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchPolicyKind::Exact => write!(f, "exact"),
            MatchPolicyKind::Normalized => write!(f, "normalized"),
        }
    }
}
