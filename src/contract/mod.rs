//! Precondition reporting for pipeline operations and views.
//!
//! Static misuse (mutating through a shared reference, borrowing into a temporary) is rejected by
//! the type system. Everything else is a precondition the caller must uphold: non-empty operands
//! for element access, in-range offsets, erasing a sub-range only at its front, never growing a
//! sub-range, not stepping a filter cursor past its end. This module decides what happens when one
//! is broken.
//!
//! - Every violation is classified as *recoverable* (the operation has a documented fallback, such
//!   as a no-op or a clamp) or *fatal* (the operation must hand out a reference that does not
//!   exist).
//! - [`Enforcement`] selects the policy for recoverable violations: panic, report and continue, or
//!   continue silently. Fatal violations are always reported and then panic.
//! - Reports go to the configured [`ContractObserver`], or to the `log` facade when none is set.
//!
//! Options are per thread, matching the single-threaded model of the pipeline layer.
//!
//! ```
//! use std::sync::Arc;
//!
//! use collection_pipes::contract::{self, ContractOptions, Enforcement, StdErrObserver};
//! use collection_pipes::ops::{sub_range, to_vec};
//!
//! let data = vec![1, 2, 3];
//! let opts = ContractOptions {
//!     enforcement: Enforcement::Report,
//!     observer: Some(Arc::new(StdErrObserver)),
//! };
//!
//! // Offset 9 is out of range: reported, then clamped to an empty window.
//! let out = contract::with_options(opts, || &data | sub_range(9) | to_vec());
//! assert!(out.is_empty());
//! ```

mod observer;

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::ContractViolation;

pub use observer::{CompositeObserver, ContractObserver, FileObserver, LogObserver, StdErrObserver};

/// Policy applied to recoverable violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Enforcement {
    /// Report, then panic with the violation message.
    Panic,
    /// Report, then continue with the operation's fallback.
    Report,
    /// Continue with the fallback without reporting.
    Ignore,
}

impl Default for Enforcement {
    /// `Panic` in debug builds or with the `strict_contracts` feature, `Report` otherwise.
    fn default() -> Self {
        if cfg!(any(debug_assertions, feature = "strict_contracts")) {
            Self::Panic
        } else {
            Self::Report
        }
    }
}

/// Whether the violated operation has a fallback.
///
/// The severity describes the violation, not the policy: under [`Enforcement::Panic`] a
/// recoverable violation is still reported as `Recoverable` before the thread panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// The operation can continue with its fallback.
    Recoverable,
    /// The current thread panics right after the report.
    Fatal,
}

/// What observers receive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolationReport {
    pub violation: ContractViolation,
    pub severity: ViolationSeverity,
}

/// Per-thread contract configuration.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Default)]
pub struct ContractOptions {
    /// Policy for recoverable violations.
    pub enforcement: Enforcement,
    /// Optional observer; reports go to the `log` facade when unset.
    pub observer: Option<Arc<dyn ContractObserver>>,
}

impl fmt::Debug for ContractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractOptions")
            .field("enforcement", &self.enforcement)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

thread_local! {
    static OPTIONS: RefCell<ContractOptions> = RefCell::new(ContractOptions::default());
}

/// Replace this thread's options, returning the previous ones.
pub fn install(options: ContractOptions) -> ContractOptions {
    OPTIONS.with(|cell| cell.replace(options))
}

/// A copy of this thread's current options.
pub fn options() -> ContractOptions {
    OPTIONS.with(|cell| cell.borrow().clone())
}

/// Run `f` with `options` installed, restoring the previous options afterwards (also on unwind).
pub fn with_options<R>(options: ContractOptions, f: impl FnOnce() -> R) -> R {
    struct Restore(Option<ContractOptions>);

    impl Drop for Restore {
        fn drop(&mut self) {
            if let Some(previous) = self.0.take() {
                install(previous);
            }
        }
    }

    let _restore = Restore(Some(install(options)));
    f()
}

/// Check a recoverable precondition.
///
/// Returns `true` when it holds. Otherwise applies the current [`Enforcement`] and returns
/// `false`, in which case the caller must take its documented fallback.
#[track_caller]
pub(crate) fn check(holds: bool, violation: impl FnOnce() -> ContractViolation) -> bool {
    if holds {
        return true;
    }

    let opts = options();
    match opts.enforcement {
        Enforcement::Ignore => {}
        Enforcement::Report => dispatch(
            &opts,
            &ViolationReport {
                violation: violation(),
                severity: ViolationSeverity::Recoverable,
            },
        ),
        Enforcement::Panic => raise(&opts, violation(), ViolationSeverity::Recoverable),
    }
    false
}

/// Report a violation that has no fallback, then panic.
#[track_caller]
pub(crate) fn fail(violation: ContractViolation) -> ! {
    raise(&options(), violation, ViolationSeverity::Fatal)
}

#[track_caller]
fn raise(opts: &ContractOptions, violation: ContractViolation, severity: ViolationSeverity) -> ! {
    let message = violation.to_string();
    dispatch(opts, &ViolationReport { violation, severity });
    panic!("contract violation: {message}");
}

fn dispatch(opts: &ContractOptions, report: &ViolationReport) {
    let observer: &dyn ContractObserver = match opts.observer.as_deref() {
        Some(observer) => observer,
        None => &LogObserver,
    };
    match report.severity {
        ViolationSeverity::Recoverable => observer.on_violation(report),
        ViolationSeverity::Fatal => observer.on_fatal(report),
    }
}
