//! Renderer state-machine scenarios: grouped spec output, the
//! error/failure appendix, and the dots/progress modes.

mod common;

use predicates::prelude::*;
use specwriter::case::{TestGroup, TestUnit};
use specwriter::color::AnsiPalette;
use specwriter::outcome::{Fault, OutcomeEvent};
use specwriter::output::OutputBuffer;
use specwriter::report::{ResultReporter, SpecReporter};

use std::time::Duration;

fn run_unit(
    reporter: &mut impl ResultReporter,
    unit: &TestUnit,
    terminal: OutcomeEvent,
) {
    reporter.on_event(unit, OutcomeEvent::Start).expect("start");
    reporter.on_event(unit, terminal).expect("terminal");
}

#[test]
fn renders_all_outcome_kinds_under_one_header() {
    let group = TestGroup::new("AllResultsTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    // Method-name sort order, the order a loader would yield them in.
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_error"),
        OutcomeEvent::Error(Fault::runtime("ValueError: error")),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_failed"),
        OutcomeEvent::Failure(Fault::assertion("AssertionError: false is not true")),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_ok"),
        OutcomeEvent::Success,
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_skip"),
        OutcomeEvent::Error(Fault::not_implemented("NotImplementedError: skipped")),
    );
    let summary = reporter.finish(Duration::from_millis(3)).expect("finish");

    let output = buffer.contents();
    assert_eq!(
        common::spec_body(&output),
        "\nMain. All results:\n- error.\n- failed.\n- ok.\n- skip.\n"
    );

    // The reserved marker is fully suppressed; the real fault is not.
    assert!(predicate::str::contains("ValueError: error").eval(&output));
    assert!(!output.contains("NotImplementedError"));
    assert!(predicate::str::contains("Ran 4 tests in 0.003s").eval(&output));
    assert!(predicate::str::contains("FAILED (failures=1, errors=1)").eval(&output));

    assert_eq!(summary.tests_run, 4);
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn explicit_descriptions_render_verbatim() {
    let group = TestGroup::with_description("TestWithDescriptionsTest", "Simple description test.");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    run_unit(
        &mut reporter,
        &TestUnit::with_description(&group, "test_method_with_description", "should be ok."),
        OutcomeEvent::Success,
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    // Header loses its trailing period before the colon; the authored
    // unit description keeps its own punctuation untouched.
    assert_eq!(
        common::spec_body(&buffer.contents()),
        "\nSimple description test:\n- should be ok.\n"
    );
}

#[test]
fn derived_fragments_get_a_period_and_authored_text_does_not() {
    let group = TestGroup::new("SomethingTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_should_be_ok"),
        OutcomeEvent::Success,
    );
    run_unit(
        &mut reporter,
        &TestUnit::with_description(&group, "test_looks_good", "it seems to be good!"),
        OutcomeEvent::Success,
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    assert_eq!(
        common::spec_body(&buffer.contents()),
        "\nMain. Something:\n- should be ok.\n- it seems to be good!\n"
    );
}

#[test]
fn distinct_groups_get_separate_headed_blocks() {
    let first = TestGroup::new("SomethingTest");
    let second = TestGroup::new("Something2Test");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    run_unit(
        &mut reporter,
        &TestUnit::new(&first, "test_should_be_ok"),
        OutcomeEvent::Success,
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&second, "test_should_be_ok"),
        OutcomeEvent::Success,
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    assert_eq!(
        common::spec_body(&buffer.contents()),
        "\nMain. Something:\n- should be ok.\n\nMain. Something2:\n- should be ok.\n"
    );
}

#[test]
fn same_name_groups_with_distinct_identity_render_separately() {
    let first = TestGroup::new("TwinTest");
    let second = TestGroup::new("TwinTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    run_unit(
        &mut reporter,
        &TestUnit::new(&first, "test_one"),
        OutcomeEvent::Success,
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&second, "test_two"),
        OutcomeEvent::Success,
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    assert_eq!(
        common::spec_body(&buffer.contents()),
        "\nMain. Twin:\n- one.\n\nMain. Twin:\n- two.\n"
    );
}

#[test]
fn dots_mode_emits_one_status_character_per_unit() {
    let group = TestGroup::new("AllResultsTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 1);

    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_error"),
        OutcomeEvent::Error(Fault::runtime("ValueError: error")),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_failed"),
        OutcomeEvent::Failure(Fault::assertion("AssertionError: nope")),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_ok"),
        OutcomeEvent::Success,
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_skip"),
        OutcomeEvent::Error(Fault::not_implemented("NotImplementedError: skipped")),
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    let output = buffer.contents();
    assert!(output.starts_with("EF.S\n"), "unexpected output: {output:?}");
    assert!(!output.contains("Main."));
}

#[test]
fn progress_mode_prints_one_status_word_per_line() {
    let group = TestGroup::new("SomethingTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 2);

    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_ok"),
        OutcomeEvent::Success,
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_broken"),
        OutcomeEvent::Error(Fault::runtime("ValueError: bad")),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_wrong"),
        OutcomeEvent::Failure(Fault::assertion("AssertionError: nope")),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_later"),
        OutcomeEvent::Error(Fault::not_implemented("NotImplementedError: later")),
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    let output = buffer.contents();
    assert!(output.starts_with(
        "test_ok (SomethingTest) ... ok\n\
         test_broken (SomethingTest) ... ERROR\n\
         test_wrong (SomethingTest) ... FAIL\n\
         test_later (SomethingTest) ... SKIP\n"
    ));
}

#[test]
fn appendix_reproduces_traces_verbatim_in_observation_order() {
    let group = TestGroup::new("OrderTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    let first_trace = "ValueError: first\n  at step one\n  at step two";
    let second_trace = "AssertionError: second";
    let third_trace = "KeyError: third";

    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_a"),
        OutcomeEvent::Error(Fault::runtime(first_trace)),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_b"),
        OutcomeEvent::Failure(Fault::assertion(second_trace)),
    );
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_c"),
        OutcomeEvent::Error(Fault::runtime(third_trace)),
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    let output = buffer.contents();
    assert!(predicate::str::contains(first_trace).eval(&output));
    assert!(predicate::str::contains(second_trace).eval(&output));
    assert!(predicate::str::contains(third_trace).eval(&output));

    // Errors are listed before failures, each list in observed order.
    let first_at = output.find("ERROR: a.").expect("first error block");
    let third_at = output.find("ERROR: c.").expect("second error block");
    let fail_at = output.find("FAIL: b.").expect("failure block");
    assert!(first_at < third_at);
    assert!(third_at < fail_at);
}

#[test]
fn failed_line_omits_zero_valued_terms() {
    let group = TestGroup::new("CountsTest");

    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_wrong"),
        OutcomeEvent::Failure(Fault::assertion("AssertionError: nope")),
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");
    assert!(predicate::str::contains("FAILED (failures=1)").eval(&buffer.contents()));
    assert!(!buffer.contents().contains("errors="));

    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);
    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_broken"),
        OutcomeEvent::Error(Fault::runtime("ValueError: bad")),
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");
    assert!(predicate::str::contains("FAILED (errors=1)").eval(&buffer.contents()));
    assert!(!buffer.contents().contains("failures="));
}

#[test]
fn skips_never_fail_a_run() {
    let group = TestGroup::new("SkippyTest");
    let buffer = OutputBuffer::new();
    let mut reporter = common::spec_reporter(&buffer, true, 3);

    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_later"),
        OutcomeEvent::Error(Fault::not_implemented("NotImplementedError: later")),
    );
    let summary = reporter.finish(Duration::from_millis(3)).expect("finish");

    let output = buffer.contents();
    assert!(summary.ok());
    assert_eq!(summary.skipped, 1);
    assert!(predicate::str::contains("Ran 1 test in 0.003s").eval(&output));
    assert!(predicate::str::contains("\nOK\n").eval(&output));
    assert!(!output.contains("===="));
}

#[test]
fn spec_mode_colors_the_description_but_not_the_bullet() {
    let group = TestGroup::new("PaintedTest");
    let buffer = OutputBuffer::new();
    let mut reporter =
        SpecReporter::with_palette(buffer.clone(), true, 3, Box::new(AnsiPalette));

    run_unit(
        &mut reporter,
        &TestUnit::new(&group, "test_shines"),
        OutcomeEvent::Success,
    );
    reporter.finish(Duration::from_millis(3)).expect("finish");

    let output = buffer.contents();
    // Structural punctuation stays plain; only the description is painted.
    assert!(predicate::str::contains("Main. Painted:\n- \x1b[").eval(&output));
    assert!(predicate::str::contains("\x1b[0m\n").eval(&output));
}
