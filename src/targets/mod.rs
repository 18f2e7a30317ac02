//! Named, dependency-ordered build targets.
//!
//! - [`Registry`] stores targets in declaration order.
//! - [`resolve`] turns requested names into a dependency-ordered [`Plan`].
//! - [`Executor`] runs a plan one target at a time.
mod executor;
mod registry;
mod resolve;

pub use executor::{Executor, Outcome, Status};
pub use registry::{Registry, Target, TargetDef, TargetOptions};
pub use resolve::{Plan, resolve};

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;

use crate::logging::Log;

/// The future returned by an [`Action`].
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Everything an action gets to see about the run it is part of.
#[derive(Clone)]
pub struct ActionContext {
    /// Name of the target being executed.
    pub name: String,
    /// Effective working directory: the executor's base directory, joined with
    /// the target's `target_path` when one is set.
    pub working_dir: PathBuf,
    /// Logger for progress output.
    pub log: Arc<dyn Log>,
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("name", &self.name)
            .field("working_dir", &self.working_dir)
            .finish_non_exhaustive()
    }
}

/// The work a target performs when executed.
///
/// Implemented for any `Fn(ActionContext) -> impl Future<Output = Result<()>>`
/// closure, so most callers never name this trait:
///
/// ```ignore
/// TargetDef::new("hello").action(|ctx: ActionContext| async move {
///     ctx.log.info(&format!("hello from {}", ctx.working_dir.display()));
///     Ok(())
/// })
/// ```
pub trait Action: Send + Sync {
    /// Start the action. The executor awaits the returned future before
    /// moving on to the next target.
    fn run(&self, ctx: ActionContext) -> ActionFuture;
}

impl<F, Fut> Action for F
where
    F: Fn(ActionContext) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    fn run(&self, ctx: ActionContext) -> ActionFuture {
        Box::pin(self(ctx))
    }
}

/// An action that does nothing; the default for targets that only group
/// their dependencies.
#[must_use]
pub fn noop() -> Arc<dyn Action> {
    Arc::new(|_ctx: ActionContext| async { anyhow::Ok(()) })
}
