//! Process-wide renderer registry: the run installer.
//!
//! The execution engine asks the registry for its result-renderer
//! factory at run start. [`install`] swaps the spec renderer in,
//! [`uninstall`] restores the factory captured when the registry was
//! first touched. The restore target is permanent: nested installs are
//! not supported, and a second `install` before an `uninstall` does not
//! change what `uninstall` restores.
//!
//! The registry mutates process-wide state; callers must serialize
//! install/run/uninstall and never call `install` concurrently with an
//! in-flight run.

use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};

use crate::output::OutputSink;
use crate::report::{ResultReporter, SpecReporter};

/// A boxed sink handed to a freshly constructed renderer.
pub type SinkHandle = Box<dyn OutputSink>;

/// Constructs a result renderer from `(sink, descriptions, verbosity)`,
/// the execution engine's result-handler construction contract.
pub type ReporterFactory = fn(SinkHandle, bool, u8) -> Box<dyn ResultReporter>;

struct RegistryState {
    original: ReporterFactory,
    current: ReporterFactory,
}

static REGISTRY: Lazy<Mutex<RegistryState>> = Lazy::new(|| {
    Mutex::new(RegistryState {
        original: plain_factory,
        current: plain_factory,
    })
});

fn plain_factory(sink: SinkHandle, descriptions: bool, verbosity: u8) -> Box<dyn ResultReporter> {
    Box::new(SpecReporter::plain(sink, descriptions, verbosity))
}

fn spec_factory(sink: SinkHandle, descriptions: bool, verbosity: u8) -> Box<dyn ResultReporter> {
    Box::new(SpecReporter::new(sink, descriptions, verbosity))
}

fn with_state<T>(f: impl FnOnce(&mut RegistryState) -> T) -> T {
    let mut state = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut state)
}

/// The factory the execution engine should use for its next run.
pub fn current() -> ReporterFactory {
    with_state(|state| state.current)
}

/// Replaces the active factory. The original factory stays the restore
/// target no matter how many times this is called.
pub fn install_factory(factory: ReporterFactory) {
    with_state(|state| state.current = factory);
}

/// Puts the factory captured at first registry use back in place.
/// Idempotent: restoring twice is the same as restoring once.
pub fn restore() {
    with_state(|state| state.current = state.original);
}

/// Installs the spec renderer as the engine's result handler.
pub fn install() {
    install_factory(spec_factory);
}

/// Restores the engine-default renderer.
pub fn uninstall() {
    restore();
}
