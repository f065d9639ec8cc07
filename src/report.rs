//! The spec renderer: a stateful consumer of outcome events.
//!
//! Three mutually exclusive verbosity modes share one state machine:
//! dots (level 1) emits a status character per unit, progress (level 2)
//! one `name ... STATUS` line per unit, and spec (level 3+) grouped
//! prose with a bullet per unit under its group's humanized header.
//! Every mode ends with the error/failure appendix and the run summary.

use std::time::Duration;

use crate::case::{GroupId, TestUnit};
use crate::color::{auto_palette, Palette, Role};
use crate::describe::{describe_group, describe_unit};
use crate::error::Result;
use crate::outcome::{normalize, Fault, OutcomeEvent};
use crate::output::OutputSink;

const SEPARATOR_WIDTH: usize = 70;

/// Final counts of one run, returned by [`ResultReporter::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub tests_run: usize,
    pub failures: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl RunSummary {
    /// True when the run had no failures and no errors.
    pub fn ok(&self) -> bool {
        self.failures == 0 && self.errors == 0
    }
}

/// The execution engine's pluggable result-handler interface: one
/// outcome event at a time in test-execution order, then a finalize
/// hook with the elapsed wall time.
pub trait ResultReporter {
    fn on_event(&mut self, unit: &TestUnit, event: OutcomeEvent) -> Result<()>;

    fn finish(&mut self, elapsed: Duration) -> Result<RunSummary>;
}

/// Renders grouped, indented, colorized prose from the event stream.
///
/// One reporter serves exactly one sequential run: it tracks the
/// previously seen group by identity token to detect section breaks,
/// and accumulates failures and errors in observation order for the
/// appendix. Skips are counted; their detail is discarded.
pub struct SpecReporter<S> {
    sink: S,
    palette: Box<dyn Palette>,
    descriptions: bool,
    dots: bool,
    show_all: bool,
    show_spec: bool,
    prev_group: Option<GroupId>,
    failures: Vec<(TestUnit, String)>,
    errors: Vec<(TestUnit, String)>,
    tests_run: usize,
    skipped: usize,
}

impl<S: OutputSink> SpecReporter<S> {
    /// Spec renderer with the auto-detected palette. Verbosity 1 is
    /// dots, 2 is progress, 3 and up is spec mode.
    pub fn new(sink: S, descriptions: bool, verbosity: u8) -> Self {
        Self::build(sink, descriptions, verbosity, true, auto_palette())
    }

    /// The engine-default renderer: identical output except spec mode
    /// is never enabled, so verbosity 3 behaves like progress. This is
    /// what the registry restores on uninstall.
    pub fn plain(sink: S, descriptions: bool, verbosity: u8) -> Self {
        Self::build(sink, descriptions, verbosity, false, auto_palette())
    }

    /// Spec renderer with an explicit palette, for deterministic output.
    pub fn with_palette(
        sink: S,
        descriptions: bool,
        verbosity: u8,
        palette: Box<dyn Palette>,
    ) -> Self {
        Self::build(sink, descriptions, verbosity, true, palette)
    }

    fn build(
        sink: S,
        descriptions: bool,
        verbosity: u8,
        spec: bool,
        palette: Box<dyn Palette>,
    ) -> Self {
        Self {
            sink,
            palette,
            descriptions,
            dots: verbosity == 1,
            show_all: verbosity > 1,
            show_spec: spec && verbosity > 2,
            prev_group: None,
            failures: Vec::new(),
            errors: Vec::new(),
            tests_run: 0,
            skipped: 0,
        }
    }

    fn on_start(&mut self, unit: &TestUnit) -> Result<()> {
        self.tests_run += 1;
        let group_id = unit.group.id();
        let new_group = self.prev_group != Some(group_id);
        self.prev_group = Some(group_id);

        if self.show_spec {
            if new_group {
                let header = describe_group(&unit.group, self.descriptions);
                self.sink.writeln("")?;
                self.sink
                    .writeln(&format!("{}:", header.trim_end_matches('.')))?;
            }
            self.sink.write_str("- ")?;
        } else if self.show_all {
            self.sink
                .write_str(&describe_unit(unit, self.descriptions, false))?;
            self.sink.write_str(" ... ")?;
            self.sink.flush()?;
        }
        Ok(())
    }

    fn on_success(&mut self, unit: &TestUnit) -> Result<()> {
        self.complete(unit, Role::Affirmative, "ok", '.')
    }

    fn on_failure(&mut self, unit: &TestUnit, fault: Fault) -> Result<()> {
        self.failures.push((unit.clone(), fault.trace));
        self.complete(unit, Role::Negative, "FAIL", 'F')
    }

    fn on_error(&mut self, unit: &TestUnit, fault: Fault) -> Result<()> {
        self.errors.push((unit.clone(), fault.trace));
        self.complete(unit, Role::Negative, "ERROR", 'E')
    }

    fn on_skip(&mut self, unit: &TestUnit) -> Result<()> {
        self.skipped += 1;
        self.complete(unit, Role::Cautionary, "SKIP", 'S')
    }

    /// Terminates a unit's line in whichever mode is active: colored
    /// description (spec), status word (progress), or status char
    /// flushed eagerly (dots).
    fn complete(&mut self, unit: &TestUnit, role: Role, word: &str, dot: char) -> Result<()> {
        if self.show_spec {
            let text = describe_unit(unit, self.descriptions, true);
            self.sink.writeln(&self.palette.paint(&text, role))?;
        } else if self.show_all {
            self.sink.writeln(word)?;
        } else if self.dots {
            self.sink.write_str(&dot.to_string())?;
            self.sink.flush()?;
        }
        Ok(())
    }

    fn print_fault_list(&mut self, flavour: &str, entries: &[(TestUnit, String)]) -> Result<()> {
        let heavy = "=".repeat(SEPARATOR_WIDTH);
        let light = "-".repeat(SEPARATOR_WIDTH);
        for (unit, trace) in entries {
            self.sink.writeln(&heavy)?;
            let described = describe_unit(unit, self.descriptions, self.show_spec);
            self.sink.writeln(&format!("{}: {}", flavour, described))?;
            self.sink.writeln(&light)?;
            self.sink.writeln(trace)?;
        }
        Ok(())
    }
}

impl<S: OutputSink> ResultReporter for SpecReporter<S> {
    fn on_event(&mut self, unit: &TestUnit, event: OutcomeEvent) -> Result<()> {
        match normalize(event) {
            OutcomeEvent::Start => self.on_start(unit),
            OutcomeEvent::Success => self.on_success(unit),
            OutcomeEvent::Failure(fault) => self.on_failure(unit, fault),
            OutcomeEvent::Error(fault) => self.on_error(unit, fault),
            OutcomeEvent::Skip => self.on_skip(unit),
        }
    }

    fn finish(&mut self, elapsed: Duration) -> Result<RunSummary> {
        let errors = std::mem::take(&mut self.errors);
        let failures = std::mem::take(&mut self.failures);
        let summary = RunSummary {
            tests_run: self.tests_run,
            failures: failures.len(),
            errors: errors.len(),
            skipped: self.skipped,
        };

        if self.dots || self.show_all {
            self.sink.writeln("")?;
        }
        self.print_fault_list("ERROR", &errors)?;
        self.print_fault_list("FAIL", &failures)?;

        self.sink.writeln(&"-".repeat(SEPARATOR_WIDTH))?;
        let noun = if summary.tests_run == 1 { "test" } else { "tests" };
        self.sink.writeln(&format!(
            "Ran {} {} in {:.3}s",
            summary.tests_run,
            noun,
            elapsed.as_secs_f64()
        ))?;
        self.sink.writeln("")?;

        if summary.ok() {
            self.sink.writeln("OK")?;
        } else {
            let mut terms = Vec::new();
            if summary.failures > 0 {
                terms.push(format!("failures={}", summary.failures));
            }
            if summary.errors > 0 {
                terms.push(format!("errors={}", summary.errors));
            }
            self.sink.writeln(&format!("FAILED ({})", terms.join(", ")))?;
        }
        self.sink.flush()?;
        Ok(summary)
    }
}
