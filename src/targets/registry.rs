//! Target declarations and the ordered registry that stores them.
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use super::{Action, ActionContext, ActionFuture, noop};

/// Per-target options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOptions {
    /// Directory, relative to the executor's base directory, the action runs in.
    pub target_path: Option<PathBuf>,
    /// Whether interactive selection offers this target.
    pub interactive: bool,
    /// One-line help text.
    pub description: Option<String>,
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            target_path: None,
            interactive: true,
            description: None,
        }
    }
}

/// A registered target.
#[derive(Clone)]
pub struct Target {
    name: String,
    depends: Vec<String>,
    options: TargetOptions,
    action: Arc<dyn Action>,
}

impl Target {
    /// Unique name within the registry.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the targets that must run first, in declared order.
    #[must_use]
    pub fn depends(&self) -> &[String] {
        &self.depends
    }

    /// Options this target was registered with.
    #[must_use]
    pub const fn options(&self) -> &TargetOptions {
        &self.options
    }

    /// Start this target's action.
    pub fn run(&self, ctx: ActionContext) -> ActionFuture {
        self.action.run(ctx)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("depends", &self.depends)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Builder for a target declaration passed to [`Registry::register`].
///
/// Omitted fields default to no dependencies, [`TargetOptions::default`] and
/// a no-op action.
#[must_use]
pub struct TargetDef {
    name: String,
    depends: Vec<String>,
    options: TargetOptions,
    action: Option<Arc<dyn Action>>,
}

impl TargetDef {
    /// Start a declaration for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depends: Vec::new(),
            options: TargetOptions::default(),
            action: None,
        }
    }

    /// Set the dependency list. Names may refer to targets registered later.
    pub fn depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    /// Replace all options at once.
    pub fn options(mut self, options: TargetOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the action in `path`, relative to the executor's base directory.
    pub fn target_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.target_path = Some(path.into());
        self
    }

    /// Offer (or hide) this target in interactive selection.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.options.interactive = interactive;
        self
    }

    /// Attach help text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.options.description = Some(description.into());
        self
    }

    /// Set the action run when the target executes.
    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.action = Some(Arc::new(action));
        self
    }

    fn build(self) -> Target {
        Target {
            name: self.name,
            depends: self.depends,
            options: self.options,
            action: self.action.unwrap_or_else(noop),
        }
    }
}

impl fmt::Debug for TargetDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetDef")
            .field("name", &self.name)
            .field("depends", &self.depends)
            .field("options", &self.options)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// All declared targets, keyed by name, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    targets: IndexMap<String, Target>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target and return the stored record.
    ///
    /// Registering a name that already exists replaces the earlier target
    /// entirely (last write wins); dependencies and options are not merged.
    /// The replacement keeps the original declaration position. Registration
    /// never fails: unknown dependencies surface when the target is resolved.
    pub fn register(&mut self, def: TargetDef) -> &Target {
        let target = def.build();
        match self.targets.entry(target.name.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(target);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(target),
        }
    }

    /// Look up a target by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Registered names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Registered targets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.values()
    }

    /// Targets offered by interactive selection, in declaration order.
    pub fn interactive(&self) -> impl Iterator<Item = &Target> {
        self.iter().filter(|t| t.options.interactive)
    }

    /// Number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no targets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Target;
    type IntoIter = indexmap::map::Values<'a, String, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.values()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn register_applies_defaults() {
        let mut registry = Registry::new();
        let target = registry.register(TargetDef::new("a"));
        assert_eq!(target.name(), "a");
        assert!(target.depends().is_empty());
        assert_eq!(target.options(), &TargetOptions::default());
        assert!(target.options().interactive);
    }

    #[test]
    fn register_keeps_declaration_order() {
        let mut registry = Registry::new();
        registry.register(TargetDef::new("c"));
        registry.register(TargetDef::new("a"));
        registry.register(TargetDef::new("b"));
        assert_eq!(registry.names().collect::<Vec<_>>(), ["c", "a", "b"]);
    }

    #[test]
    fn register_duplicate_overwrites_without_merging() {
        let mut registry = Registry::new();
        registry.register(
            TargetDef::new("build")
                .depends(["fetch"])
                .target_path("app")
                .description("first"),
        );
        registry.register(TargetDef::new("other"));
        registry.register(TargetDef::new("build").depends(["lint"]));

        assert_eq!(registry.len(), 2);
        let build = registry.get("build").unwrap();
        assert_eq!(build.depends(), ["lint"]);
        assert_eq!(build.options().target_path, None);
        assert_eq!(build.options().description, None);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["build", "other"]);
    }

    #[test]
    fn register_accepts_unknown_dependencies_and_empty_names() {
        let mut registry = Registry::new();
        registry.register(TargetDef::new("").depends(["never-declared"]));
        assert!(registry.contains(""));
    }

    #[test]
    fn interactive_filters_hidden_targets() {
        let mut registry = Registry::new();
        registry.register(TargetDef::new("visible"));
        registry.register(TargetDef::new("hidden").interactive(false));
        let names: Vec<&str> = registry.interactive().map(Target::name).collect();
        assert_eq!(names, ["visible"]);
    }

    #[test]
    fn debug_omits_action() {
        let mut registry = Registry::new();
        let target = registry.register(TargetDef::new("a"));
        let rendered = format!("{target:?}");
        assert!(rendered.contains("\"a\""));
        assert!(rendered.ends_with(".. }"));
    }
}
