//! Locating the build file.
use std::path::{Path, PathBuf};

use super::{BUILD_FILE_ENV, BUILD_FILE_NAME};
use crate::error::ConfigError;

/// Resolve the build file path.
///
/// Order: `explicit` (the `--file` flag), the `ORDO_FILE` environment
/// variable, then the first `Ordofile.toml` found walking up from `start`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if an explicitly named file does not exist and
/// [`ConfigError::NotFound`] if no build file is found above `start`.
pub fn locate(explicit: Option<&Path>, start: &Path) -> Result<PathBuf, ConfigError> {
    let named = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(BUILD_FILE_ENV).map(PathBuf::from));

    if let Some(path) = named {
        let path = start.join(path);
        return dunce::canonicalize(&path).map_err(|source| ConfigError::Io { path, source });
    }

    find_upwards(start).ok_or_else(|| ConfigError::NotFound {
        start: start.to_path_buf(),
    })
}

/// Return the first `Ordofile.toml` in `start` or any of its ancestors.
#[must_use]
pub fn find_upwards(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(BUILD_FILE_NAME))
        .find(|candidate| candidate.is_file())
        .map(|found| dunce::canonicalize(&found).unwrap_or(found))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn find_upwards_finds_file_in_start_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(BUILD_FILE_NAME), "").unwrap();
        let found = find_upwards(tmp.path()).unwrap();
        assert!(found.ends_with(BUILD_FILE_NAME));
    }

    #[test]
    fn find_upwards_walks_to_parent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(BUILD_FILE_NAME), "").unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        let found = find_upwards(&nested).unwrap();
        assert_eq!(
            found,
            dunce::canonicalize(tmp.path().join(BUILD_FILE_NAME)).unwrap()
        );
    }

    #[test]
    fn find_upwards_prefers_nearest_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(BUILD_FILE_NAME), "").unwrap();
        let nested = tmp.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join(BUILD_FILE_NAME), "").unwrap();
        let found = find_upwards(&nested).unwrap();
        assert_eq!(found, dunce::canonicalize(nested.join(BUILD_FILE_NAME)).unwrap());
    }

    #[test]
    fn locate_explicit_missing_file_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = locate(Some(Path::new("custom.toml")), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn locate_explicit_relative_to_start() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("custom.toml"), "").unwrap();
        let found = locate(Some(Path::new("custom.toml")), tmp.path()).unwrap();
        assert!(found.ends_with("custom.toml"));
    }
}
