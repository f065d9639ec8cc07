//! Discovers YAML test-module manifests and builds the runnable suite.
//!
//! Given a root directory, a filename glob, and an optional top-level
//! directory, discovery recursively collects manifest files matching
//! the pattern plus directories marked as test packages, derives each
//! module's dotted qualifier from its path, and loads the declared
//! cases. Unresolvable modules are warned about and skipped, never
//! fatal.
//!
//! # Manifest shape
//!
//! ```yaml
//! group: AccountLedgerTest
//! description: optional group docstring
//! cases:
//!   - name: test_opens_with_zero_balance
//!     outcome: pass
//!   - name: test_rejects_negative_deposit
//!     outcome: error
//!     kind: ValueError
//!     message: negative amount
//! suite:            # optional suite-builder; declared order wins
//!   - test_rejects_negative_deposit
//!   - test_opens_with_zero_balance
//! ```
//!
//! Without a `suite` list, every case whose name starts with `test` is
//! loaded in name order.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::case::{ScriptedOutcome, TestCase, TestGroup, TestSuite, TestUnit};
use crate::error::{Result, SpecError};
use crate::outcome::{Fault, FaultKind};

/// Filename pattern used when the caller does not supply one.
pub const DEFAULT_PATTERN: &str = "test*.yaml";

/// A directory containing this file is itself a test package: the
/// marker is loaded as the package's own module manifest.
pub const PACKAGE_MARKER: &str = "_package.yaml";

#[derive(Debug, Deserialize)]
struct ModuleManifest {
    group: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    cases: Vec<ManifestCase>,
    #[serde(default)]
    suite: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ManifestCase {
    name: String,
    #[serde(default)]
    description: Option<String>,
    outcome: CaseOutcome,
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CaseOutcome {
    Pass,
    Fail,
    Error,
    Skip,
}

/// Recursively discovers test modules under `start_dir` and returns one
/// aggregate suite. Qualifiers are derived relative to `top_level_dir`
/// when given, else to `start_dir`.
pub fn discover(
    start_dir: &Path,
    pattern: Option<&str>,
    top_level_dir: Option<&Path>,
) -> Result<TestSuite> {
    let root = top_level_dir.unwrap_or(start_dir);
    let matcher = build_matcher(pattern.unwrap_or(DEFAULT_PATTERN))?;

    let mut suite = TestSuite::new();
    for (qualifier, manifest_path) in collect_modules(root, &matcher) {
        match load_manifest(&qualifier, &manifest_path) {
            Ok(cases) => suite.add_cases(cases),
            Err(err) => {
                // Tolerated: a broken module contributes no cases.
                eprintln!("specwriter: skipping module {}: {}", qualifier, err);
            }
        }
    }
    Ok(suite)
}

/// Loads a single module manifest strictly, surfacing parse faults.
pub fn load_manifest(qualifier: &str, path: &Path) -> Result<Vec<TestCase>> {
    let content = fs::read_to_string(path)?;
    let manifest: ModuleManifest =
        serde_yaml::from_str(&content).map_err(|source| SpecError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(build_cases(qualifier, manifest))
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| SpecError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

/// Walks the tree collecting `(dotted qualifier, manifest path)` pairs:
/// files matching the pattern, plus marker files of package directories.
/// The walk order is sorted, so module order is deterministic.
fn collect_modules(root: &Path, matcher: &GlobMatcher) -> Vec<(String, PathBuf)> {
    let mut modules = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                eprintln!("specwriter: failed to walk directory: {}", err);
                continue;
            }
        };
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        if entry.file_type().is_dir() {
            let marker = path.join(PACKAGE_MARKER);
            if marker.is_file() {
                modules.push((dotted_qualifier(relative, false), marker));
            }
        } else if entry.file_type().is_file() {
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if file_name != PACKAGE_MARKER && matcher.is_match(file_name) {
                modules.push((dotted_qualifier(relative, true), path.to_path_buf()));
            }
        }
    }
    modules
}

/// `billing/test_invoices.yaml` becomes `billing.test_invoices`.
fn dotted_qualifier(relative: &Path, strip_extension: bool) -> String {
    let trimmed: PathBuf = if strip_extension {
        relative.with_extension("")
    } else {
        relative.to_path_buf()
    };
    trimmed
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(".")
}

fn build_cases(qualifier: &str, manifest: ModuleManifest) -> Vec<TestCase> {
    let qualified_name = if qualifier.is_empty() {
        manifest.group.clone()
    } else {
        format!("{}.{}", qualifier, manifest.group)
    };
    let group = match &manifest.description {
        Some(description) => TestGroup::with_description(qualified_name, description),
        None => TestGroup::new(qualified_name),
    };

    let picked: Vec<ManifestCase> = match &manifest.suite {
        // The module's suite-builder names its cases in run order.
        Some(names) => names
            .iter()
            .filter_map(|name| {
                let found = manifest.cases.iter().find(|case| &case.name == name);
                if found.is_none() {
                    eprintln!(
                        "specwriter: module {} has no case named {:?}, dropping suite entry",
                        qualifier, name
                    );
                }
                found.cloned()
            })
            .collect(),
        // Fallback: every `test*` case, in name order.
        None => {
            let mut cases: Vec<ManifestCase> = manifest
                .cases
                .iter()
                .filter(|case| case.name.starts_with("test"))
                .cloned()
                .collect();
            cases.sort_by(|a, b| a.name.cmp(&b.name));
            cases
        }
    };

    picked
        .into_iter()
        .map(|case| scripted_case(&group, case))
        .collect()
}

fn scripted_case(group: &Arc<TestGroup>, case: ManifestCase) -> TestCase {
    let unit = match case.description {
        Some(ref description) => TestUnit::with_description(group, &case.name, description),
        None => TestUnit::new(group, &case.name),
    };
    let outcome = match case.outcome {
        CaseOutcome::Pass => ScriptedOutcome::Pass,
        CaseOutcome::Skip => ScriptedOutcome::Skip,
        CaseOutcome::Fail => {
            let trace = fault_trace("AssertionError", case.message.as_deref());
            ScriptedOutcome::Fail(Fault::assertion(trace))
        }
        CaseOutcome::Error => {
            let kind_name = case.kind.as_deref().unwrap_or("RuntimeError");
            let trace = fault_trace(kind_name, case.message.as_deref());
            ScriptedOutcome::Error(Fault::new(fault_kind(kind_name), trace))
        }
    };
    TestCase::new(unit, outcome)
}

/// Maps a declared exception-kind name onto the fault taxonomy. Only
/// the reserved marker and assertion names are special; everything
/// else is a runtime fault.
fn fault_kind(kind_name: &str) -> FaultKind {
    match kind_name {
        "NotImplementedError" => FaultKind::NotImplemented,
        "AssertionError" => FaultKind::Assertion,
        _ => FaultKind::Runtime,
    }
}

fn fault_trace(kind_name: &str, message: Option<&str>) -> String {
    match message {
        Some(message) => format!("{}: {}", kind_name, message),
        None => kind_name.to_string(),
    }
}
