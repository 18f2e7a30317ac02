//! Dependency resolution: requested names to a dependency-ordered plan.
use std::collections::HashSet;

use super::{Registry, Target};
use crate::error::ResolveError;

/// A resolution result: every target in the dependency closure of the
/// requested roots, each exactly once, dependencies first.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    targets: Vec<&'a Target>,
}

impl<'a> Plan<'a> {
    /// Target names in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.targets.iter().map(|t| t.name()).collect()
    }

    /// Targets in execution order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Target> + '_ {
        self.targets.iter().copied()
    }

    /// Number of targets in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether the plan is empty (only possible for an empty registry).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Compute the execution order for `roots`.
///
/// An empty `roots` slice selects every registered target, in declaration
/// order. Roots are visited left to right and each target's `depends` in
/// declared order; a target reached twice is scheduled once, at the position
/// of its first visit.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownTarget`] if a root or dependency is not
/// registered and [`ResolveError::CycleDetected`] if following `depends`
/// leads back to a target that is still being resolved.
pub fn resolve<'a, S: AsRef<str>>(
    registry: &'a Registry,
    roots: &[S],
) -> Result<Plan<'a>, ResolveError> {
    let mut resolver = Resolver {
        registry,
        picked: HashSet::new(),
        order: Vec::with_capacity(registry.len()),
    };

    if roots.is_empty() {
        for name in registry.names() {
            resolver.visit(name)?;
        }
    } else {
        for root in roots {
            resolver.visit(root.as_ref())?;
        }
    }

    Ok(Plan {
        targets: resolver.order,
    })
}

/// A target whose dependencies are being walked, and the index of the next
/// dependency to look at.
type Frame<'a> = (&'a Target, usize);

/// Depth-first walk state shared across all roots of one `resolve` call.
///
/// The walk keeps its own stack of frames so chain length is bounded by
/// memory, not by the thread's stack.
struct Resolver<'a> {
    registry: &'a Registry,
    /// Targets already appended to `order`.
    picked: HashSet<&'a str>,
    order: Vec<&'a Target>,
}

impl<'a> Resolver<'a> {
    fn lookup(&self, name: &str, required_by: Option<&str>) -> Result<&'a Target, ResolveError> {
        self.registry
            .get(name)
            .ok_or_else(|| ResolveError::UnknownTarget {
                name: name.to_string(),
                required_by: required_by.map(String::from),
            })
    }

    fn visit(&mut self, root: &str) -> Result<(), ResolveError> {
        let root = self.lookup(root, None)?;
        if self.picked.contains(root.name()) {
            return Ok(());
        }

        let mut stack: Vec<Frame<'a>> = vec![(root, 0)];
        let mut on_stack: HashSet<&'a str> = HashSet::from([root.name()]);

        while let Some(&(current, next)) = stack.last() {
            let Some(dep) = current.depends().get(next) else {
                stack.pop();
                on_stack.remove(current.name());
                self.picked.insert(current.name());
                self.order.push(current);
                continue;
            };
            if let Some(frame) = stack.last_mut() {
                frame.1 += 1;
            }

            let dep = self.lookup(dep, Some(current.name()))?;
            if on_stack.contains(dep.name()) {
                return Err(cycle_through(&stack, dep));
            }
            if self.picked.contains(dep.name()) {
                continue;
            }
            on_stack.insert(dep.name());
            stack.push((dep, 0));
        }
        Ok(())
    }
}

/// Build the cycle path from `repeated`'s frame to the top of the stack,
/// closed by `repeated` again.
fn cycle_through(stack: &[Frame<'_>], repeated: &Target) -> ResolveError {
    let mut path: Vec<String> = stack
        .iter()
        .skip_while(|(target, _)| target.name() != repeated.name())
        .map(|(target, _)| target.name().to_string())
        .collect();
    path.push(repeated.name().to_string());
    ResolveError::CycleDetected { path }
}
