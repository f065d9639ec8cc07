//! Turns programmatic test identifiers into natural-language prose.
//!
//! All functions here are pure string transforms. A method name like
//! `test_should_accept_empty_input` becomes `should accept empty input`,
//! and a qualified group name like `billing.test_invoices.InvoiceTest`
//! becomes `Billing. invoices. Invoice`.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Trailing `Test` or `TestCase` marker on a group name, case-insensitive.
static GROUP_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)test(?:case)?$").unwrap());

/// The root term used when a qualified group name has no module path.
const ROOT_TERM: &str = "Main";

/// Removes a leading `test` marker (with or without a following
/// underscore) from a method identifier, turns the remaining underscores
/// into spaces, and trims the result.
///
/// # Examples
///
/// ```rust
/// use specwriter::humanize::strip_test_prefix;
/// assert_eq!(strip_test_prefix("test_should_be_ok"), "should be ok");
/// assert_eq!(strip_test_prefix("already_prose"), "already prose");
/// assert_eq!(strip_test_prefix(""), "");
/// ```
pub fn strip_test_prefix(name: &str) -> String {
    let rest = name.strip_prefix("test").unwrap_or(name);
    rest.replace('_', " ").trim().to_string()
}

/// Derives the sentence fragment for a test method. Alias over
/// [`strip_test_prefix`]; the call site appends the trailing period when
/// the fragment was derived rather than authored.
pub fn humanize_method_name(name: &str) -> String {
    strip_test_prefix(name)
}

/// Inserts a space at each lowercase-to-uppercase transition, keeping
/// 2+-letter all-caps acronyms as single uppercase tokens. Every other
/// token is lowercased. Applying the function to its own output is a
/// no-op.
///
/// # Examples
///
/// ```rust
/// use specwriter::humanize::split_camel_case;
/// assert_eq!(split_camel_case("AccountLedger"), "account ledger");
/// assert_eq!(split_camel_case("HTTPServer"), "HTTP server");
/// ```
pub fn split_camel_case(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut upper_run = 0usize;

    for ch in name.chars() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            upper_run = 0;
            continue;
        }
        if ch.is_uppercase() {
            if upper_run == 0 && current.chars().last().is_some_and(|c| c.is_lowercase()) {
                words.push(std::mem::take(&mut current));
            }
            upper_run += 1;
        } else {
            if upper_run >= 2 {
                // The run's last capital starts the next word: HTTPServer
                // splits into HTTP + Server, not HTTPS + erver.
                let head = current.pop();
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                current.extend(head);
            }
            upper_run = 0;
        }
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .into_iter()
        .map(|word| {
            if is_acronym(&word) {
                word
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A token counts as an acronym when it opens with two capitals.
fn is_acronym(word: &str) -> bool {
    word.chars().take(2).filter(|c| c.is_uppercase()).count() == 2
}

/// Removes a trailing `Test` or `TestCase` marker, case-insensitive.
pub fn strip_group_suffix(name: &str) -> String {
    GROUP_SUFFIX.replace(name, "").into_owned()
}

/// Humanizes a dotted group qualifier into a sentence-like header.
///
/// Module segments each lose their `test` prefix and are joined with
/// `". "`, capitalized as a whole; with no module path the prefix falls
/// back to `"Main"`. The final segment loses its `Test`/`TestCase`
/// suffix, is camel-split, and gets its first letter capitalized.
///
/// # Examples
///
/// ```rust
/// use specwriter::humanize::humanize_group_name;
/// assert_eq!(humanize_group_name("AccountLedgerTest"), "Main. Account ledger");
/// assert_eq!(
///     humanize_group_name("billing.test_invoices.InvoiceTest"),
///     "Billing. invoices. Invoice"
/// );
/// ```
pub fn humanize_group_name(qualified: &str) -> String {
    let mut segments: Vec<&str> = qualified.split('.').collect();
    let subject_segment = segments.pop().unwrap_or_default();

    let prefix = if segments.is_empty() {
        ROOT_TERM.to_string()
    } else {
        let joined = segments
            .iter()
            .map(|segment| strip_test_prefix(segment))
            .collect::<Vec<_>>()
            .join(". ");
        capitalize(&joined)
    };

    let subject = ucfirst(split_camel_case(&strip_group_suffix(subject_segment)).trim());
    format!("{}. {}", prefix, subject)
}

/// Uppercases the first grapheme without touching the rest of the string.
pub fn ucfirst(s: &str) -> String {
    let mut graphemes = s.graphemes(true);
    match graphemes.next() {
        Some(first) => first.to_uppercase() + graphemes.as_str(),
        None => String::new(),
    }
}

/// Python-style capitalization: first grapheme up, remainder lowered.
/// Used for the joined module path, where the original reporter lowered
/// everything after the leading letter.
fn capitalize(s: &str) -> String {
    let mut graphemes = s.graphemes(true);
    match graphemes.next() {
        Some(first) => first.to_uppercase() + &graphemes.as_str().to_lowercase(),
        None => String::new(),
    }
}
