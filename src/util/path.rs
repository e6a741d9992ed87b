use std::path::{Path, PathBuf};

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Unknown variables leave the input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// [`expand_env_vars`] for a path.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(expand_path(Path::new("~/seed.json")).starts_with(&home));
    }

    #[test]
    fn test_unknown_variable_is_kept() {
        assert_eq!(
            expand_env_vars("$ALLOCTREE_SURELY_UNSET_VAR/x"),
            "$ALLOCTREE_SURELY_UNSET_VAR/x"
        );
    }
}
