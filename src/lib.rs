pub use crate::case::{GroupId, ScriptedOutcome, TestCase, TestGroup, TestSuite, TestUnit};
pub use crate::error::{Result, SpecError};
pub use crate::outcome::{normalize, Fault, FaultKind, OutcomeEvent};
pub use crate::registry::{install, uninstall};
pub use crate::report::{ResultReporter, RunSummary, SpecReporter};
pub use crate::runner::{RunnerConfig, TestRunner};

pub mod case;
pub mod color;
pub mod describe;
pub mod discovery;
pub mod error;
pub mod humanize;
pub mod outcome;
pub mod output;
pub mod registry;
pub mod report;
pub mod runner;
