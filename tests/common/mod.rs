// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed project with an `Ordofile.toml` and a
// fluent builder so each integration test can set up an isolated build tree
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ordo_cli::cli::GlobalOpts;
use ordo_cli::commands::CommandSetup;
use ordo_cli::logging::Logger;

/// An isolated project backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct TestProject {
    /// Temporary directory containing the build file.
    pub root: tempfile::TempDir,
    /// Logger handed to every command; no log file is written.
    pub log: Arc<Logger>,
}

impl TestProject {
    /// Create a project with an empty build file.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::write(root.path().join("Ordofile.toml"), "").expect("write Ordofile.toml");
        Self {
            root,
            log: Arc::new(Logger::new(None)),
        }
    }

    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the build file.
    pub fn build_file(&self) -> PathBuf {
        self.root.path().join("Ordofile.toml")
    }

    /// Global options pointing at this project's build file.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            file: Some(self.build_file()),
            dry_run,
        }
    }

    /// Load the build file the way every command does.
    pub fn setup(&self, dry_run: bool) -> CommandSetup {
        CommandSetup::init_from(&self.global(dry_run), &self.log, self.root_path())
            .expect("load build file")
    }

    /// Lines of `name` under the project root, or empty if it was never written.
    pub fn read_lines(&self, name: &str) -> Vec<String> {
        std::fs::read_to_string(self.root.path().join(name))
            .map(|content| content.lines().map(|l| l.trim().to_string()).collect())
            .unwrap_or_default()
    }
}

/// Fluent builder for [`TestProject`].
pub struct TestProjectBuilder {
    project: TestProject,
}

impl TestProjectBuilder {
    /// Begin building a new project with an empty build file.
    pub fn new() -> Self {
        Self {
            project: TestProject::new(),
        }
    }

    /// Replace the build file contents.
    pub fn with_build_file(self, content: &str) -> Self {
        std::fs::write(self.project.build_file(), content).expect("write Ordofile.toml");
        self
    }

    /// Create a directory (and parents) under the project root.
    pub fn with_dir(self, relative: &str) -> Self {
        std::fs::create_dir_all(self.project.root.path().join(relative)).expect("create dir");
        self
    }

    /// Finish building and return the configured project.
    pub fn build(self) -> TestProject {
        self.project
    }
}
