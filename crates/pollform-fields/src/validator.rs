//! Validator plumbing: invocation reasons, advisory status, freshness
//! probes, and the sync/async validator representation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;

use pollform_model::ValidatorOutput;

/// Why a validation pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationReason {
    Change,
    Blur,
    Submit,
}

impl ValidationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::Change => "change",
            ValidationReason::Blur => "blur",
            ValidationReason::Submit => "submit",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory progress reported by an in-flight validator. Never affects
/// committed diagnostics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationStatus {
    pub message: Option<String>,
    pub progress: Option<f32>,
}

impl ValidationStatus {
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            progress: None,
        }
    }
}

/// Identity of one validation run against one value: bumping either
/// component makes results issued under the old stamp stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Stamp {
    pub epoch: u64,
    pub run: u64,
}

/// Handed to every validator invocation: a freshness probe and an
/// advisory progress channel.
#[derive(Clone)]
pub struct ValidatorControls {
    current: Rc<Cell<Stamp>>,
    issued: Stamp,
    status: Rc<RefCell<Option<ValidationStatus>>>,
}

impl ValidatorControls {
    pub(crate) fn new(
        current: Rc<Cell<Stamp>>,
        issued: Stamp,
        status: Rc<RefCell<Option<ValidationStatus>>>,
    ) -> Self {
        Self {
            current,
            issued,
            status,
        }
    }

    /// True while the value this validator was issued against is still the
    /// field's current value and no newer run has superseded this one.
    pub fn is_still_fresh(&self) -> bool {
        self.current.get() == self.issued
    }

    /// Report progress. Ignored once the run is stale.
    pub fn update_status(&self, status: ValidationStatus) {
        if self.is_still_fresh() {
            *self.status.borrow_mut() = Some(status);
        }
    }
}

impl fmt::Debug for ValidatorControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorControls")
            .field("issued", &self.issued)
            .field("fresh", &self.is_still_fresh())
            .finish()
    }
}

type SyncFn<T> = dyn Fn(&T, bool, &ValidatorControls, ValidationReason) -> ValidatorOutput;
type AsyncFn<T> =
    dyn Fn(T, bool, ValidatorControls, ValidationReason) -> LocalBoxFuture<'static, ValidatorOutput>;

/// A configured validator: either synchronous (problems available
/// immediately) or asynchronous (a cooperative task that may suspend on
/// external calls).
pub enum Validator<T> {
    Sync(Rc<SyncFn<T>>),
    Async(Rc<AsyncFn<T>>),
}

impl<T> Validator<T> {
    pub fn sync(
        run: impl Fn(&T, bool, &ValidatorControls, ValidationReason) -> ValidatorOutput + 'static,
    ) -> Self {
        Validator::Sync(Rc::new(run))
    }

    /// Most validators only look at the value.
    pub fn simple(run: impl Fn(&T) -> ValidatorOutput + 'static) -> Self {
        Validator::Sync(Rc::new(move |value, _changed, _controls, _reason| run(value)))
    }

    pub fn future<F, Fut>(start: F) -> Self
    where
        F: Fn(T, bool, ValidatorControls, ValidationReason) -> Fut + 'static,
        Fut: Future<Output = ValidatorOutput> + 'static,
    {
        Validator::Async(Rc::new(move |value, changed, controls, reason| {
            Box::pin(start(value, changed, controls, reason))
        }))
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        match self {
            Validator::Sync(run) => Validator::Sync(Rc::clone(run)),
            Validator::Async(start) => Validator::Async(Rc::clone(start)),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Sync(_) => f.write_str("Validator::Sync(..)"),
            Validator::Async(_) => f.write_str("Validator::Async(..)"),
        }
    }
}
