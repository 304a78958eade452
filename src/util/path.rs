use std::path::Path;

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input as-is.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Display form used in report headers.
pub fn display_name(path: &Path) -> String {
    normalize_path_separator(&path.display().to_string())
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_home_var_when_expanding_then_substitutes() {
        let home = std::env::var("HOME").expect("HOME should be set");
        assert_eq!(expand_env_vars("$HOME/x"), format!("{home}/x"));
    }

    #[test]
    fn given_unknown_var_when_expanding_then_keeps_input() {
        assert_eq!(
            expand_env_vars("$OUTDIFF_SURELY_UNSET_VAR/x"),
            "$OUTDIFF_SURELY_UNSET_VAR/x"
        );
    }

    #[test]
    fn given_windows_separators_when_normalizing_then_uses_slashes() {
        assert_eq!(normalize_path_separator(r"a\b\c.txt"), "a/b/c.txt");
    }
}
