//! Tracing subscriber setup: console format, file layer, and initialisation.
use std::fs::File;
use std::io::IsTerminal as _;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{Event, Level, Subscriber, field::Field};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, format::Writer};
use tracing_subscriber::registry::LookupSpan;

use super::file::{UtcTimer, log_file_path, open_log_file};

/// Event target for per-target stage headers.
pub(super) const STAGE: &str = "ordo::stage";

/// Event target for dry-run messages.
pub(super) const DRY_RUN: &str = "ordo::dry_run";

/// Event target for summary lines; carries a `status` field.
pub(super) const OUTCOME: &str = "ordo::outcome";

/// The `message` and `status` fields of an event.
#[derive(Default)]
struct EventFields {
    message: String,
    status: Option<String>,
}

impl tracing::field::Visit for EventFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "status" => self.status = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

/// Wrap `text` in an SGR sequence when `ansi` is set.
fn paint(ansi: bool, code: &str, text: &str) -> String {
    if ansi {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

/// Icon and colour for a summary line with the given status label.
fn outcome_icon(status: Option<&str>) -> (&'static str, &'static str) {
    match status {
        Some("done") => ("✓", "32"),
        Some("dry-run") => ("~", "36"),
        Some("failed") => ("✗", "31"),
        Some("not-run") => ("○", "33"),
        _ => ("-", "0"),
    }
}

/// Console rendering: stage headers, indented progress, prefixed warnings
/// and errors, and one icon per summary line. Colour follows the writer's
/// ANSI setting.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let ansi = writer.has_ansi_escapes();
        let metadata = event.metadata();
        let mut fields = EventFields::default();
        event.record(&mut fields);
        let msg = &fields.message;

        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => writeln!(writer, "{} {msg}", paint(ansi, "1;31", "error:")),
            (Level::WARN, _) => writeln!(writer, "{} {msg}", paint(ansi, "1;33", "warning:")),
            (Level::INFO, STAGE) => writeln!(writer, "{}", paint(ansi, "1;34", &format!("» {msg}"))),
            (Level::INFO, DRY_RUN) => {
                writeln!(writer, "  {} {msg}", paint(ansi, "36", "[dry run]"))
            }
            (Level::INFO, OUTCOME) => {
                let (icon, colour) = outcome_icon(fields.status.as_deref());
                writeln!(writer, "  {} {msg}", paint(ansi, colour, icon))
            }
            (Level::INFO, _) => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}", paint(ansi, "2", msg)),
        }
    }
}

/// Plain-text layer writing every event, with a UTC timestamp and its
/// target, to `file`.
pub(super) fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .with_timer(UtcTimer)
        .with_writer(Mutex::new(file))
}

/// Initialise the global [`tracing`] subscriber.
///
/// Info and debug go to stdout, warnings and errors to stderr; debug is only
/// shown when `verbose`. Every event, debug included, is also appended to the
/// log file for `command`. Returns that file's path, or `None` if it could
/// not be opened. Must be called once at program startup, before any
/// logging.
pub fn init_subscriber(verbose: bool, command: &str) -> Option<PathBuf> {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        filter::LevelFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormat)
        .with_ansi(std::io::stdout().is_terminal())
        .with_writer(make_writer)
        .with_filter(console_level);

    let opened = log_file_path(command)
        .and_then(|path| Some((open_log_file(&path, command).ok()?, path)));
    let (file_output, log_path) = opened.map_or((None, None), |(file, path)| {
        (
            Some(file_layer(file).with_filter(LevelFilter::DEBUG)),
            Some(path),
        )
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_output)
        .init();
    log_path
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::{Log, Logger, isolated_log_contents, isolated_logger};
    use crate::targets::{Outcome, Status};
    use std::sync::Arc;
    use std::time::Duration;
    use tracing_subscriber::layer::SubscriberExt as _;

    /// In-memory writer shared between the test and the layer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn render_console(ansi: bool, emit: impl FnOnce(&Logger)) -> String {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let layer = fmt::layer()
            .event_format(ConsoleFormat)
            .with_ansi(ansi)
            .with_writer(move || writer.clone());
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || emit(&Logger::new(None)));
        let bytes = buf.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn failed_run(log: &Logger) {
        log.record(&Outcome::new("fetch", Status::Done, Duration::from_millis(1500)));
        log.record(
            &Outcome::new("build", Status::Failed, Duration::from_millis(250)).note("exit 2"),
        );
        log.record(
            &Outcome::new("test", Status::NotRun, Duration::ZERO).note("blocked by 'build'"),
        );
    }

    #[test]
    fn console_renders_each_kind_of_event() {
        let out = render_console(false, |log| {
            log.stage("compile");
            log.info("compiling 3 files");
            log.debug("cache hit");
            log.dry_run("would run docs");
            log.warn("target 'x' is declared twice");
            log.error("build: exit 2");
        });

        insta::assert_snapshot!(out, @r"
        » compile
          compiling 3 files
          cache hit
          [dry run] would run docs
        warning: target 'x' is declared twice
        error: build: exit 2
        ");
    }

    #[test]
    fn console_summary_has_one_icon_per_outcome() {
        let out = render_console(false, |log| {
            failed_run(log);
            log.print_summary();
        });

        insta::assert_snapshot!(out, @r"
        » Summary
          ✓ fetch (1.50s)
          ✗ build (250.00ms): exit 2
          ○ test: blocked by 'build'
          3 target(s) in 1.75s: 1 done, 1 failed, 1 not run
        ");
    }

    #[test]
    fn summary_without_outcomes_prints_nothing() {
        assert_eq!(render_console(false, Logger::print_summary), "");
    }

    #[test]
    fn console_colours_only_with_ansi() {
        let coloured = render_console(true, |log| log.error("boom"));
        assert_eq!(coloured, "\x1b[1;31merror:\x1b[0m boom\n");

        let plain = render_console(false, |log| log.error("boom"));
        assert_eq!(plain, "error: boom\n");
    }

    #[test]
    fn file_receives_debug_and_stage_events() {
        let (log, tmp, _guard) = isolated_logger();
        log.stage("compile");
        log.debug("working directory: /src");

        let contents = isolated_log_contents(&tmp);
        assert!(contents.starts_with("# ordo "), "got: {contents}");
        assert!(contents.contains("INFO ordo::stage: compile"), "got: {contents}");
        assert!(
            contents.contains("DEBUG") && contents.contains("working directory: /src"),
            "got: {contents}"
        );
        assert!(!contents.contains('\x1b'));
    }

    #[test]
    fn file_summary_keeps_elapsed_time_and_status() {
        let (log, tmp, _guard) = isolated_logger();
        failed_run(&log);
        log.print_summary();

        let contents = isolated_log_contents(&tmp);
        let outcome_lines: Vec<&str> = contents
            .lines()
            .filter(|line| line.contains("ordo::outcome"))
            .collect();
        assert_eq!(outcome_lines.len(), 3, "got: {contents}");
        assert!(outcome_lines[0].contains("fetch (1.50s)"));
        assert!(outcome_lines[0].contains("status=\"done\""));
        assert!(outcome_lines[1].contains("build (250.00ms): exit 2"));
        assert!(outcome_lines[2].contains("status=\"not-run\""));
        assert!(contents.contains("3 target(s) in 1.75s: 1 done, 1 failed, 1 not run"));
        assert!(contents.contains("log: "));
    }
}
