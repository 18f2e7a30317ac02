//! `ordo list`: every declared target with its description and dependencies.
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::targets::Registry;

/// Run the `list` command.
///
/// # Errors
///
/// Returns an error if the build file cannot be loaded.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;

    log.stage(&format!("{} target(s)", setup.registry.len()));
    write_list(&mut io::stdout().lock(), &setup.registry)?;
    Ok(())
}

/// Write the registry in declaration order.
///
/// Interactive targets are marked with `*`; dependencies follow the
/// description.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_list(out: &mut impl Write, registry: &Registry) -> io::Result<()> {
    let width = registry.names().map(str::len).max().unwrap_or(0);

    for target in registry {
        let marker = if target.options().interactive { '*' } else { ' ' };
        let mut line = format!("{marker} {:<width$}", target.name());
        if let Some(description) = &target.options().description {
            line.push_str("  ");
            line.push_str(description);
        }
        if !target.depends().is_empty() {
            line.push_str(&format!("  [depends: {}]", target.depends().join(", ")));
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::targets::TargetDef;

    #[test]
    fn list_marks_interactive_targets() {
        let mut registry = Registry::new();
        registry.register(TargetDef::new("fetch").interactive(false));
        registry.register(
            TargetDef::new("build")
                .depends(["fetch"])
                .description("Compile the app"),
        );
        registry.register(TargetDef::new("release").depends(["build", "fetch"]));

        let mut out = Vec::new();
        write_list(&mut out, &registry).unwrap();

        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
          fetch
        * build    Compile the app  [depends: fetch]
        * release  [depends: build, fetch]
        ");
    }
}
