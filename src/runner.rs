//! Minimal run invocation: replays a suite through the active renderer.
//!
//! The runner executes no test logic. Each case carries the outcome its
//! module declared; the runner's job is the event sequence (`Start`,
//! then one terminal event per unit, in suite order), the wall-time
//! measurement, and the finalize call.

use std::time::Instant;

use crate::case::{ScriptedOutcome, TestSuite};
use crate::error::Result;
use crate::outcome::{Fault, OutcomeEvent};
use crate::registry;
use crate::registry::SinkHandle;
use crate::report::RunSummary;

/// Construction parameters for the renderer, mirrored from the
/// execution engine's result-handler contract.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Prefer author-supplied descriptions over derived ones.
    pub descriptions: bool,
    /// 1 dots, 2 progress, 3+ spec.
    pub verbosity: u8,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            descriptions: true,
            verbosity: 1,
        }
    }
}

/// Drives one sequential run against whatever renderer the registry
/// currently supplies.
#[derive(Debug, Default)]
pub struct TestRunner {
    config: RunnerConfig,
}

impl TestRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Feeds every case's events to a freshly built renderer and
    /// finalizes it, returning the run totals.
    pub fn run(&self, suite: &TestSuite, sink: SinkHandle) -> Result<RunSummary> {
        let mut reporter = registry::current()(sink, self.config.descriptions, self.config.verbosity);
        let started = Instant::now();

        for case in suite.cases() {
            reporter.on_event(&case.unit, OutcomeEvent::Start)?;
            let terminal = match &case.outcome {
                ScriptedOutcome::Pass => OutcomeEvent::Success,
                ScriptedOutcome::Fail(fault) => OutcomeEvent::Failure(fault.clone()),
                ScriptedOutcome::Error(fault) => OutcomeEvent::Error(fault.clone()),
                // A declared skip travels the reserved-marker path, the
                // same shape an engine raising the marker would produce.
                ScriptedOutcome::Skip => {
                    OutcomeEvent::Error(Fault::not_implemented("NotImplementedError: skipped"))
                }
            };
            reporter.on_event(&case.unit, terminal)?;
        }

        reporter.finish(started.elapsed())
    }
}
