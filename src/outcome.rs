//! Outcome events and the reserved-marker normalization rule.

/// Classification of a fault raised while a unit ran.
///
/// `NotImplemented` is the reserved marker: it always means an
/// intentional skip, never a real error, and is reclassified before any
/// rendering decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Test logic asserted falsely; rendered as a failure.
    Assertion,
    /// The reserved not-implemented marker; rendered as a skip.
    NotImplemented,
    /// Any other raised fault; rendered as an error.
    Runtime,
}

/// A fault's kind tag plus the human-readable trace reproduced verbatim
/// in the end-of-run appendix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: FaultKind,
    pub trace: String,
}

impl Fault {
    pub fn new(kind: FaultKind, trace: impl Into<String>) -> Self {
        Self {
            kind,
            trace: trace.into(),
        }
    }

    pub fn assertion(trace: impl Into<String>) -> Self {
        Self::new(FaultKind::Assertion, trace)
    }

    pub fn not_implemented(trace: impl Into<String>) -> Self {
        Self::new(FaultKind::NotImplemented, trace)
    }

    pub fn runtime(trace: impl Into<String>) -> Self {
        Self::new(FaultKind::Runtime, trace)
    }
}

/// One lifecycle event for a unit, in the order the execution engine
/// raises them: `Start`, then exactly one terminal variant.
#[derive(Debug, Clone)]
pub enum OutcomeEvent {
    Start,
    Success,
    Failure(Fault),
    Error(Fault),
    Skip,
}

/// Rewrites an `Error` carrying the reserved not-implemented marker into
/// a `Skip`; every other event passes through unchanged. Classification
/// looks at the fault's kind only, never its message.
pub fn normalize(event: OutcomeEvent) -> OutcomeEvent {
    match event {
        OutcomeEvent::Error(fault) if fault.kind == FaultKind::NotImplemented => OutcomeEvent::Skip,
        other => other,
    }
}
