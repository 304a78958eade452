//! Plain-text rendering of a step list.

use std::fmt::Write;

/// Written instead of numbered steps when both outlines match.
pub const NO_CHANGES: &str = "No changes needed - trees are identical!";

/// Render the numbered step report.
///
/// With `header` the report starts with
/// `Steps to convert {before} to {after}:` and a blank line.
pub fn render_report(steps: &[String], before: &str, after: &str, header: bool) -> String {
    let mut out = String::new();
    if header {
        let _ = writeln!(out, "Steps to convert {before} to {after}:\n");
    }
    if steps.is_empty() {
        let _ = writeln!(out, "{NO_CHANGES}");
    }
    for (i, step) in steps.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, step);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_steps_when_rendering_then_numbers_from_one() {
        let steps = vec![
            "Delete 'a' node (was at a)".to_string(),
            "Add 'x' node at root level".to_string(),
        ];
        let report = render_report(&steps, "old.txt", "new.txt", true);
        assert_eq!(
            report,
            "Steps to convert old.txt to new.txt:\n\n\
             1. Delete 'a' node (was at a)\n\
             2. Add 'x' node at root level\n"
        );
    }

    #[test]
    fn given_no_steps_when_rendering_then_writes_sentinel() {
        let report = render_report(&[], "a", "b", false);
        assert_eq!(report, format!("{NO_CHANGES}\n"));
    }
}
