//! Outline diff service
//!
//! Reads two outline snapshots, runs the differencing pipeline and writes
//! the numbered step report.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{render_report, ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{generate_diff_with, parse_outline, MatchPolicyKind, OutlineArena, PathIndex};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::display_name;

/// Inputs for one diff run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    pub before: PathBuf,
    pub after: PathBuf,
    /// Report destination, None to only return the report
    pub output: Option<PathBuf>,
    pub match_policy: MatchPolicyKind,
    /// Prefix the report with the "Steps to convert" line
    pub header: bool,
}

/// Result of one diff run.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub steps: Vec<String>,
    pub report: String,
    pub written_to: Option<PathBuf>,
}

impl DiffOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Service for comparing outline files.
pub struct DiffService {
    fs: Arc<dyn FileSystem>,
}

impl DiffService {
    /// Create a new diff service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Diff `request.before` against `request.after` and write the report if
    /// an output path is set.
    #[instrument(level = "debug", skip(self))]
    pub fn diff_files(&self, request: &DiffRequest) -> ApplicationResult<DiffOutcome> {
        let before = self.read_outline(&request.before)?;
        let after = self.read_outline(&request.after)?;

        let policy = request.match_policy.policy();
        let steps = generate_diff_with(&before, &after, policy.as_ref());
        debug!("diff_files: {} steps", steps.len());

        let report = render_report(
            &steps,
            &display_name(&request.before),
            &display_name(&request.after),
            request.header,
        );

        let written_to = match &request.output {
            Some(output) => {
                self.write_report(output, &report)?;
                info!("Diff output written to {}", output.display());
                Some(output.clone())
            }
            None => None,
        };

        Ok(DiffOutcome {
            steps,
            report,
            written_to,
        })
    }

    /// Parse one outline file.
    pub fn load_outline(&self, path: &Path) -> ApplicationResult<OutlineArena> {
        Ok(parse_outline(&self.read_outline(path)?))
    }

    /// Parse and index one outline file.
    pub fn load_index(&self, path: &Path, policy: MatchPolicyKind) -> ApplicationResult<PathIndex> {
        let tree = self.load_outline(path)?;
        Ok(PathIndex::build(&tree, policy.policy().as_ref()))
    }

    fn read_outline(&self, path: &Path) -> ApplicationResult<String> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::OperationFailed {
                context: format!("outline not found: {}", path.display()),
                source: Box::new(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "file does not exist",
                )),
            });
        }
        self.fs
            .read_to_string(path)
            .with_path_context("read outline", path)
    }

    fn write_report(&self, output: &Path, report: &str) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(output)
            .with_path_context("create report directory", output)?;
        self.fs
            .write(output, report)
            .with_path_context("write report", output)
    }
}
