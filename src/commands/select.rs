//! `ordo select`: pick interactive targets from a numbered menu and run them.
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context as _, Result, anyhow};

use super::CommandSetup;
use crate::cli::GlobalOpts;
use crate::logging::{Log, Logger};
use crate::targets::{Registry, Target};

/// Source of answers for interactive selection.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt {
    /// Show `question` and return the line the user typed.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompt on stdout, answer from stdin.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

/// Run the `select` command.
///
/// # Errors
///
/// Returns an error if the build file cannot be loaded, the answer is
/// invalid, or a selected target fails.
pub async fn run(global: &GlobalOpts, log: &Arc<Logger>, prompt: &mut dyn Prompt) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    if setup.registry.interactive().next().is_none() {
        log.warn("no interactive targets declared");
        return Ok(());
    }

    let chosen = choose(&setup.registry, prompt)?;
    if chosen.is_empty() {
        log.info("nothing selected");
        return Ok(());
    }
    log.debug(&format!("selected: {}", chosen.join(", ")));

    setup.run_to_completion(&chosen, log).await
}

/// Present the interactive targets and parse the answer.
///
/// Returns an empty list when the user cancels.
///
/// # Errors
///
/// Returns an error if the prompt fails or the answer names something that is
/// not an interactive target.
pub fn choose(registry: &Registry, prompt: &mut dyn Prompt) -> Result<Vec<String>> {
    let candidates: Vec<&Target> = registry.interactive().collect();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let mut menu = String::from("Select targets to run:\n");
    for (index, target) in candidates.iter().enumerate() {
        match &target.options().description {
            Some(description) => writeln!(menu, "  {}) {} - {description}", index + 1, target.name())?,
            None => writeln!(menu, "  {}) {}", index + 1, target.name())?,
        }
    }
    menu.push_str("Enter numbers or names (a = all, empty = cancel): ");

    let answer = prompt.ask(&menu).context("reading selection")?;
    let names: Vec<&str> = candidates.iter().map(|t| t.name()).collect();
    parse_selection(&answer, &names)
}

/// Parse a selection answer against `candidates`.
///
/// Tokens are separated by commas or whitespace and are either 1-based
/// indexes or candidate names. `a` or `all` selects every candidate; an empty
/// answer selects nothing. Repeated picks are kept once, first position wins.
///
/// # Errors
///
/// Returns an error for an out-of-range index or an unknown name.
pub fn parse_selection(input: &str, candidates: &[&str]) -> Result<Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if input.eq_ignore_ascii_case("a") || input.eq_ignore_ascii_case("all") {
        return Ok(candidates.iter().map(|c| (*c).to_string()).collect());
    }

    let mut chosen: Vec<String> = Vec::new();
    let tokens = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    for token in tokens {
        let name = if let Ok(number) = token.parse::<usize>() {
            number
                .checked_sub(1)
                .and_then(|index| candidates.get(index))
                .copied()
                .ok_or_else(|| {
                    anyhow!(
                        "selection {number} is out of range (1-{})",
                        candidates.len()
                    )
                })?
        } else {
            candidates
                .iter()
                .find(|c| **c == token)
                .copied()
                .ok_or_else(|| anyhow!("'{token}' is not an interactive target"))?
        };
        if !chosen.iter().any(|c| c == name) {
            chosen.push(name.to_string());
        }
    }
    Ok(chosen)
}
