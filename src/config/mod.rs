//! Build file discovery, loading, and linting.
pub mod build_file;
pub mod discovery;
pub mod validation;

pub use build_file::{BuildFile, TargetEntry};
pub use discovery::locate;
pub use validation::ValidationWarning;

/// Build file name searched for in the current directory and its parents.
pub const BUILD_FILE_NAME: &str = "Ordofile.toml";

/// Environment variable naming the build file explicitly.
pub const BUILD_FILE_ENV: &str = "ORDO_FILE";

impl BuildFile {
    /// Lint the build file. Warnings are never fatal.
    #[must_use]
    pub fn validate(&self) -> Vec<ValidationWarning> {
        validation::validate_all(self)
    }
}
