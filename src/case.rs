//! Test units, groups, and runnable suites.
//!
//! Groups compare by identity, not by name: every constructed group gets
//! an opaque [`GroupId`] token, and the renderer only ever stores that
//! token, never the group itself. Two groups that happen to humanize to
//! the same text therefore still render as separate sections.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::outcome::Fault;

static NEXT_GROUP_ID: AtomicU64 = AtomicU64::new(0);

/// Opaque identity token for a [`TestGroup`], used only for equality
/// comparison by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(u64);

/// A named collection of test units sharing context: roughly "what is
/// being specified". Rendered as one headed section in spec mode.
#[derive(Debug)]
pub struct TestGroup {
    qualified_name: String,
    description: Option<String>,
    id: GroupId,
}

impl TestGroup {
    /// Creates a group with a dotted qualified name and a fresh identity.
    pub fn new(qualified_name: impl Into<String>) -> Arc<Self> {
        Self::build(qualified_name.into(), None)
    }

    /// Creates a group carrying an author-supplied description.
    pub fn with_description(
        qualified_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Arc<Self> {
        Self::build(qualified_name.into(), Some(description.into()))
    }

    fn build(qualified_name: String, description: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            qualified_name,
            description,
            id: GroupId(NEXT_GROUP_ID.fetch_add(1, Ordering::Relaxed)),
        })
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn id(&self) -> GroupId {
        self.id
    }
}

/// One executable test case: a method qualifier, an optional authored
/// description, and the owning group. Immutable during rendering.
#[derive(Debug, Clone)]
pub struct TestUnit {
    pub method_name: String,
    pub description: Option<String>,
    pub group: Arc<TestGroup>,
}

impl TestUnit {
    pub fn new(group: &Arc<TestGroup>, method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            description: None,
            group: Arc::clone(group),
        }
    }

    pub fn with_description(
        group: &Arc<TestGroup>,
        method_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            method_name: method_name.into(),
            description: Some(description.into()),
            group: Arc::clone(group),
        }
    }

    /// The raw qualified form shown outside spec mode, mirroring the
    /// `method (group.Name)` convention of classic runners.
    pub fn qualified_name(&self) -> String {
        format!("{} ({})", self.method_name, self.group.qualified_name())
    }
}

/// The scripted result a discovered case replays through the renderer.
/// The engine renders outcomes; it never executes test logic itself.
#[derive(Debug, Clone)]
pub enum ScriptedOutcome {
    Pass,
    Fail(Fault),
    Error(Fault),
    Skip,
}

/// A unit plus the outcome its module manifest declared for it.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub unit: TestUnit,
    pub outcome: ScriptedOutcome,
}

impl TestCase {
    pub fn new(unit: TestUnit, outcome: ScriptedOutcome) -> Self {
        Self { unit, outcome }
    }
}

/// Aggregate runnable collection, fed to the runner in order.
#[derive(Debug, Default)]
pub struct TestSuite {
    cases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_case(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    pub fn add_cases(&mut self, cases: impl IntoIterator<Item = TestCase>) {
        self.cases.extend(cases);
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
