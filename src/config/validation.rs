//! Non-fatal lint checks over a loaded build file.
use std::collections::HashSet;
use std::path::Path;

use super::build_file::{BuildFile, TargetEntry};

/// A validation warning detected while loading the build file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The build file name (e.g., "Ordofile.toml").
    pub source: String,
    /// The target that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning about `item` in `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for build file validators.
///
/// Validators report problems that do not stop loading: the registry is
/// still built and resolution reports anything fatal.
pub trait ConfigValidator {
    /// Validate target tables and return any warnings found.
    fn validate(&self, source: &str, root: &Path) -> Vec<ValidationWarning>;
}

/// Checks target names: empty and duplicate.
#[derive(Debug)]
pub struct NameValidator<'a> {
    targets: &'a [TargetEntry],
}

impl<'a> NameValidator<'a> {
    /// Run name checks over `targets`.
    #[must_use]
    pub const fn new(targets: &'a [TargetEntry]) -> Self {
        Self { targets }
    }
}

impl ConfigValidator for NameValidator<'_> {
    fn validate(&self, source: &str, _root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (index, target) in self.targets.iter().enumerate() {
            if target.name.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    source,
                    format!("target #{}", index + 1),
                    "target name is empty",
                ));
                continue;
            }
            if !seen.insert(target.name.as_str()) {
                warnings.push(ValidationWarning::new(
                    source,
                    &target.name,
                    "duplicate target name; the later definition replaces the earlier one",
                ));
            }
        }

        warnings
    }
}

/// Checks `depends` entries: undeclared targets and self-dependencies.
#[derive(Debug)]
pub struct DependencyValidator<'a> {
    targets: &'a [TargetEntry],
}

impl<'a> DependencyValidator<'a> {
    /// Run dependency checks over `targets`.
    #[must_use]
    pub const fn new(targets: &'a [TargetEntry]) -> Self {
        Self { targets }
    }
}

impl ConfigValidator for DependencyValidator<'_> {
    fn validate(&self, source: &str, _root: &Path) -> Vec<ValidationWarning> {
        let declared: HashSet<&str> = self.targets.iter().map(|t| t.name.as_str()).collect();
        let mut warnings = Vec::new();

        for target in self.targets {
            for dep in &target.depends {
                if *dep == target.name {
                    warnings.push(ValidationWarning::new(
                        source,
                        &target.name,
                        "target depends on itself",
                    ));
                } else if !declared.contains(dep.as_str()) {
                    warnings.push(ValidationWarning::new(
                        source,
                        &target.name,
                        format!("depends on undeclared target '{dep}'"),
                    ));
                }
            }
        }

        warnings
    }
}

/// Checks `path` values: must be relative and exist under the build root.
#[derive(Debug)]
pub struct PathValidator<'a> {
    targets: &'a [TargetEntry],
}

impl<'a> PathValidator<'a> {
    /// Run path checks over `targets`.
    #[must_use]
    pub const fn new(targets: &'a [TargetEntry]) -> Self {
        Self { targets }
    }
}

impl ConfigValidator for PathValidator<'_> {
    fn validate(&self, source: &str, root: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for target in self.targets {
            let Some(path) = &target.path else {
                continue;
            };
            if path.is_absolute() {
                warnings.push(ValidationWarning::new(
                    source,
                    &target.name,
                    format!(
                        "path should be relative to the build file: {}",
                        path.display()
                    ),
                ));
            } else if !root.join(path).is_dir() {
                warnings.push(ValidationWarning::new(
                    source,
                    &target.name,
                    format!("path does not exist: {}", path.display()),
                ));
            }
        }

        warnings
    }
}

/// Run all validators against a parsed build file.
#[must_use]
pub fn validate_all(file: &BuildFile) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator>> = vec![
        Box::new(NameValidator::new(&file.targets)),
        Box::new(DependencyValidator::new(&file.targets)),
        Box::new(PathValidator::new(&file.targets)),
    ];

    let source = file.display_name();
    let mut all_warnings = Vec::new();
    for validator in validators {
        all_warnings.extend(validator.validate(&source, &file.root));
    }

    all_warnings
}
