//! `Ordofile.toml` parsing and conversion into a [`Registry`].
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::exec;
use crate::targets::{Action, ActionContext, Registry, TargetDef, TargetOptions};

const fn default_true() -> bool {
    true
}

/// One `[[target]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry {
    /// Target name.
    pub name: String,
    /// Targets that must run first.
    #[serde(default)]
    pub depends: Vec<String>,
    /// Working directory relative to the build file's directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Whether `ordo select` offers this target.
    #[serde(default = "default_true")]
    pub interactive: bool,
    /// One-line help text.
    #[serde(default)]
    pub description: Option<String>,
    /// Shell command lines, run in order.
    #[serde(default)]
    pub run: Vec<String>,
    /// Capture command output and log it at debug level instead of streaming it.
    #[serde(default)]
    pub quiet: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuildFile {
    #[serde(default, rename = "target")]
    targets: Vec<TargetEntry>,
}

/// A parsed build file.
#[derive(Debug, Clone)]
pub struct BuildFile {
    /// Where the file was read from.
    pub path: PathBuf,
    /// Directory containing the file; target paths resolve against it.
    pub root: PathBuf,
    /// Target tables in file order, duplicates included.
    pub targets: Vec<TargetEntry>,
}

impl BuildFile {
    /// Read and parse the build file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid build file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse build file `content` as if read from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML, unknown keys, or
    /// missing target names.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        let raw: RawBuildFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        let root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Ok(Self {
            path,
            root,
            targets: raw.targets,
        })
    }

    /// File name used as the source of validation warnings.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Register every target in file order. A later table with the same
    /// name replaces the earlier one.
    #[must_use]
    pub fn registry(&self) -> Registry {
        let mut registry = Registry::new();
        for entry in &self.targets {
            registry.register(entry.to_def());
        }
        registry
    }
}

impl TargetEntry {
    /// Convert this table into a target declaration.
    pub fn to_def(&self) -> TargetDef {
        let def = TargetDef::new(self.name.clone())
            .depends(self.depends.iter().cloned())
            .options(TargetOptions {
                target_path: self.path.clone(),
                interactive: self.interactive,
                description: self.description.clone(),
            });
        if self.run.is_empty() {
            def
        } else {
            def.action(shell_action(self.run.clone().into(), self.quiet))
        }
    }
}

/// An action running `commands` one after another in the target's
/// working directory.
fn shell_action(commands: Arc<[String]>, quiet: bool) -> impl Action {
    move |ctx: ActionContext| {
        let commands = Arc::clone(&commands);
        async move {
            for line in commands.iter() {
                ctx.log.info(&format!("$ {line}"));
                if quiet {
                    let result = exec::run_shell(&ctx.working_dir, line).await?;
                    for out in result.stdout.lines() {
                        ctx.log.debug(out);
                    }
                } else {
                    exec::run_shell_inherited(&ctx.working_dir, line).await?;
                }
            }
            anyhow::Ok(())
        }
    }
}
