//! Shared helpers for specwriter integration tests.
#![allow(dead_code)]

use std::time::Duration;

use specwriter::color::MonoPalette;
use specwriter::outcome::{Fault, OutcomeEvent};
use specwriter::output::{OutputBuffer, OutputSink};
use specwriter::report::{ResultReporter, RunSummary, SpecReporter};
use specwriter::{ScriptedOutcome, TestSuite};

/// Spec reporter over a shared buffer with colors forced off, so tests
/// can assert exact text.
pub fn spec_reporter(
    buffer: &OutputBuffer,
    descriptions: bool,
    verbosity: u8,
) -> SpecReporter<OutputBuffer> {
    SpecReporter::with_palette(
        buffer.clone(),
        descriptions,
        verbosity,
        Box::new(MonoPalette),
    )
}

/// Replays a suite through a reporter the way the runner does, with a
/// fixed elapsed time so summaries are deterministic.
pub fn replay_suite<S: OutputSink>(
    mut reporter: SpecReporter<S>,
    suite: &TestSuite,
) -> RunSummary {
    for case in suite.cases() {
        reporter
            .on_event(&case.unit, OutcomeEvent::Start)
            .expect("start event");
        let terminal = match &case.outcome {
            ScriptedOutcome::Pass => OutcomeEvent::Success,
            ScriptedOutcome::Fail(fault) => OutcomeEvent::Failure(fault.clone()),
            ScriptedOutcome::Error(fault) => OutcomeEvent::Error(fault.clone()),
            ScriptedOutcome::Skip => {
                OutcomeEvent::Error(Fault::not_implemented("NotImplementedError: skipped"))
            }
        };
        reporter
            .on_event(&case.unit, terminal)
            .expect("terminal event");
    }
    reporter.finish(Duration::from_millis(3)).expect("finish")
}

/// Everything before the appendix and summary: the spec body a reader
/// scans, like slicing the report at the first separator.
pub fn spec_body(output: &str) -> String {
    let cut = |text: &str, marker: &str| match text.find(marker) {
        Some(position) => text[..position].to_string(),
        None => text.to_string(),
    };
    cut(&cut(output, "\n===="), "\n----")
}

/// Drops the elapsed figure from the `Ran N tests in X.XXXs` line so
/// two separately timed runs compare equal.
pub fn normalize_elapsed(output: &str) -> String {
    output
        .lines()
        .map(|line| {
            if line.starts_with("Ran ") && line.contains(" in ") {
                line.split(" in ").next().unwrap_or(line).to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
