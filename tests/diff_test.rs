//! Tests for the outline differencing pipeline

use std::collections::HashSet;

use rstest::rstest;

use outdiff::domain::{parse_outline, ExactName, NormalizedName, PathIndex};
use outdiff::{generate_diff, generate_diff_with};

const SITE_A: &str = "\
Home
  About
    Team
      Alice
      Bob
    History
  News
    2025
  Contact
";

const SITE_B: &str = "\
Home
  About
    History
  News
    2025
    2026
      January
  People
    Team
      Alice
      Bob
  Archive
    Contact
";

/// Parent name referenced by an Add/Move step, if any.
fn referenced_parent(step: &str) -> Option<&str> {
    if !(step.contains("as a child of") || step.contains("to be a child of")) {
        return None;
    }
    step.split('\'').nth(3)
}

fn added_name(step: &str) -> Option<&str> {
    step.strip_prefix("Add '")?.split('\'').next()
}

fn names_of(text: &str) -> HashSet<String> {
    PathIndex::build(&parse_outline(text), &ExactName)
        .names()
        .keys()
        .cloned()
        .collect()
}

// ============================================================
// Reference scenarios
// ============================================================

#[test]
fn given_new_leaf_when_diffing_then_single_add() {
    let steps = generate_diff("a\n  b\n", "a\n  b\n  c\n");
    assert_eq!(steps, vec!["Add 'c' node as a child of 'a' node"]);
}

#[test]
fn given_removed_subtree_when_diffing_then_only_topmost_delete() {
    let steps = generate_diff("root\n  child\n    grandchild\n", "root\n");
    assert_eq!(steps, vec!["Delete 'child' node (was at root/child)"]);
}

#[test]
fn given_renamed_root_when_diffing_then_delete_add_and_move() {
    // Root renames are not special-cased: the old root is deleted, the new
    // one added, and the child moved under it.
    let steps = generate_diff("a\n  b\n", "x\n  b\n");
    assert_eq!(
        steps,
        vec![
            "Delete 'a' node (was at a)",
            "Add 'x' node at root level",
            "Move 'b' node to be a child of 'x' node",
        ]
    );
}

#[test]
fn given_identical_multi_level_trees_when_diffing_then_no_steps() {
    assert!(generate_diff(SITE_A, SITE_A).is_empty());
}

// ============================================================
// Structural cases
// ============================================================

#[rstest]
#[case::empty_to_tree("", "a\n  b\n", vec!["Add 'a' node at root level"])]
#[case::tree_to_empty("a\n  b\n", "", vec!["Delete 'a' node (was at a)"])]
#[case::both_blank("  \n\n", "\n", vec![])]
#[case::new_subtree(
    "site\n  about\n",
    "site\n  about\n  news\n    2025\n    2026\n",
    vec!["Add 'news' node as a child of 'site' node"]
)]
#[case::moved_subtree(
    "site\n  about\n    team\n      alice\n  news\n",
    "site\n  about\n  news\n    team\n      alice\n",
    vec!["Move 'team' node to be a child of 'news' node"]
)]
#[case::move_under_new_parent(
    "site\n  blog\n",
    "site\n  archive\n    blog\n",
    vec![
        "Add 'archive' node as a child of 'site' node",
        "Move 'blog' node to be a child of 'archive' node",
    ]
)]
#[case::lift_to_root("a\n  b\n", "a\nb\n", vec!["Move 'b' node to root level"])]
#[case::duplicate_name_moved_once(
    "a\n  intro\nb\n  intro\n",
    "a\n  intro\nb\nc\n  intro\n",
    vec![
        "Add 'c' node at root level",
        "Move 'intro' node to be a child of 'c' node",
    ]
)]
#[case::duplicate_dropped_from_one_parent(
    "p\n  x\nq\n  x\n",
    "p\n  x\nq\n",
    vec!["Move 'x' node to be a child of 'p' node"]
)]
#[case::reordered_siblings("a\n  b\n  c\n", "a\n  c\n  b\n", vec![])]
fn given_outline_pair_when_diffing_then_expected_steps(
    #[case] before: &str,
    #[case] after: &str,
    #[case] expected: Vec<&str>,
) {
    assert_eq!(generate_diff(before, after), expected);
}

#[test]
fn given_site_snapshots_when_diffing_then_expected_steps() {
    let steps = generate_diff(SITE_A, SITE_B);
    assert_eq!(
        steps,
        vec![
            "Add '2026' node as a child of 'News' node",
            "Add 'People' node as a child of 'Home' node",
            "Move 'Team' node to be a child of 'People' node",
            "Add 'Archive' node as a child of 'Home' node",
            "Move 'Contact' node to be a child of 'Archive' node",
        ]
    );
}

// ============================================================
// Properties
// ============================================================

#[rstest]
#[case("")]
#[case("a\n")]
#[case(SITE_A)]
#[case(SITE_B)]
#[case("x\n  x\n    x\n")]
fn given_same_outline_when_diffing_then_idempotent(#[case] text: &str) {
    assert!(generate_diff(text, text).is_empty());
}

#[test]
fn given_same_inputs_when_diffing_twice_then_output_is_identical() {
    assert_eq!(generate_diff(SITE_A, SITE_B), generate_diff(SITE_A, SITE_B));
    assert_eq!(generate_diff(SITE_B, SITE_A), generate_diff(SITE_B, SITE_A));
}

#[rstest]
#[case(SITE_A, SITE_B)]
#[case(SITE_B, SITE_A)]
#[case("site\n  blog\n", "site\n  archive\n    blog\n")]
#[case("a\n  b\n", "x\n  b\n")]
fn given_outline_pair_when_diffing_then_parents_are_established_first(
    #[case] before: &str,
    #[case] after: &str,
) {
    let mut available = names_of(before);

    for step in generate_diff(before, after) {
        if let Some(parent) = referenced_parent(&step) {
            assert!(
                available.contains(parent),
                "step '{}' references '{}' before it exists",
                step,
                parent
            );
        }
        if let Some(name) = added_name(&step) {
            available.insert(name.to_string());
        }
    }
}

#[test]
fn given_flat_additions_and_removals_when_diffing_then_every_name_is_reported() {
    let before = "a\nb\nc\n";
    let after = "a\nd\ne\n";

    let steps = generate_diff(before, after);

    for removed in ["b", "c"] {
        assert!(
            steps.iter().any(|s| s.starts_with(&format!("Delete '{removed}'"))),
            "missing delete for {removed}: {steps:?}"
        );
    }
    for added in ["d", "e"] {
        assert!(
            steps.iter().any(|s| s.starts_with(&format!("Add '{added}'"))),
            "missing add for {added}: {steps:?}"
        );
    }
    // deletions first
    assert!(steps[0].starts_with("Delete") && steps[1].starts_with("Delete"));
}

// ============================================================
// Match policies
// ============================================================

#[test]
fn given_case_changes_when_diffing_with_normalized_policy_then_only_real_changes() {
    let steps = generate_diff_with(
        "About Us\n  Team\n",
        "about  us\n  team\n  Jobs\n",
        &NormalizedName,
    );
    assert_eq!(steps, vec!["Add 'Jobs' node as a child of 'about  us' node"]);
}

#[test]
fn given_case_changes_when_diffing_with_exact_policy_then_treated_as_new_nodes() {
    let steps = generate_diff("About\n", "about\n");
    assert_eq!(
        steps,
        vec!["Delete 'About' node (was at About)", "Add 'about' node at root level"]
    );
}
