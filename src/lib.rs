//! outdiff: compute ordered, human-readable edit steps between two
//! indentation-based outline snapshots.
//!
//! ```
//! let steps = outdiff::generate_diff("a\n  b\n", "a\n  b\n  c\n");
//! assert_eq!(steps, vec!["Add 'c' node as a child of 'a' node"]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{generate_diff, generate_diff_with};
