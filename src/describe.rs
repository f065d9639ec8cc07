//! Resolves the text shown for a unit or group.
//!
//! Precedence is always the same: an author-supplied description wins
//! verbatim; otherwise the name is humanized. A derived fragment gets a
//! trailing period appended, an authored one is never repunctuated.

use crate::case::{TestGroup, TestUnit};
use crate::humanize;

/// The text rendered for a unit.
///
/// With the descriptions flag set and an explicit description present,
/// that description is returned untouched. Otherwise spec mode derives a
/// sentence fragment from the method name (plus a period), and the other
/// modes fall back to the raw qualified name.
pub fn describe_unit(unit: &TestUnit, descriptions: bool, spec_mode: bool) -> String {
    if descriptions {
        if let Some(text) = explicit(unit.description.as_deref()) {
            return text;
        }
    }
    if spec_mode {
        return format!("{}.", humanize::humanize_method_name(&unit.method_name));
    }
    unit.qualified_name()
}

/// The text rendered for a group header: the first line of an explicit
/// group description, else the humanized qualified name.
pub fn describe_group(group: &TestGroup, descriptions: bool) -> String {
    if descriptions {
        if let Some(text) = explicit(group.description()) {
            return text;
        }
    }
    humanize::humanize_group_name(group.qualified_name())
}

/// First line, trimmed; blank descriptions count as absent.
fn explicit(description: Option<&str>) -> Option<String> {
    let line = description?.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
