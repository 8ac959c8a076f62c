//! The generic field controls core: one field's value, dirtiness,
//! validators, and per-location diagnostics.
//!
//! A field is a cheaply cloneable handle over interior state; the owning
//! component is the single writer. Asynchronous validators are cooperative
//! tasks whose results are committed only while still fresh: any write to
//! the value (or a newer validation run) makes older in-flight results
//! stale, and stale results are discarded rather than applied.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use futures_util::future::join_all;
use tracing::{debug, trace};

use pollform_model::{
    CoupledData, Decision, Problem, ProblemChecks, ProblemLevel, ProblemReport, ROOT_LOCATION,
    ValidatorOutput, allow, check_problems, expand_coupled, wrap_problem,
};

use crate::kind::FieldKind;
use crate::validator::{Stamp, ValidationReason, ValidationStatus, Validator, ValidatorControls};

/// Value types a field can hold.
pub trait FieldValue: Clone + PartialEq + 'static {
    fn is_empty(&self) -> bool;

    /// Equality used for dirtiness tracking.
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

impl FieldValue for String {
    fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl FieldValue for bool {
    fn is_empty(&self) -> bool {
        !*self
    }
}

impl FieldValue for Vec<String> {
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn same_as(&self, other: &Self) -> bool {
        self.join("-") == other.join("-")
    }
}

/// Construction input for the generic core.
pub struct FieldSetup<T> {
    pub name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub compact: bool,
    pub initial_value: T,
    pub validators: Vec<Validator<T>>,
    /// Normalization applied at the start of every validation run
    /// (the array field trims its items here).
    pub cleanup: Option<Rc<dyn Fn(&T) -> T>>,
    pub enabled: Option<Decision>,
    pub visible: Option<Decision>,
    pub required: Option<CoupledData<bool, String>>,
}

impl<T> FieldSetup<T> {
    pub fn new(name: impl Into<String>, initial_value: T) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: None,
            placeholder: None,
            compact: false,
            initial_value,
            validators: Vec::new(),
            cleanup: None,
            enabled: None,
            visible: None,
            required: None,
        }
    }
}

struct FieldState<T> {
    value: T,
    previous_value: Option<T>,
    problems: BTreeMap<String, Vec<Problem>>,
    last_validated_epoch: Option<u64>,
}

/// Generic per-field state container.
///
/// Cloning shares the underlying state: clones are handles to the same
/// field instance.
pub struct InputField<T: FieldValue> {
    kind: FieldKind,
    name: String,
    label: Option<String>,
    description: Option<String>,
    placeholder: Option<String>,
    compact: bool,
    initial_value: T,
    validators: Vec<Validator<T>>,
    cleanup: Option<Rc<dyn Fn(&T) -> T>>,
    enabled: Decision,
    visible: Decision,
    required: bool,
    required_message: String,
    state: Rc<RefCell<FieldState<T>>>,
    stamp: Rc<Cell<Stamp>>,
    status: Rc<RefCell<Option<ValidationStatus>>>,
}

impl<T: FieldValue> Clone for InputField<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            name: self.name.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            placeholder: self.placeholder.clone(),
            compact: self.compact,
            initial_value: self.initial_value.clone(),
            validators: self.validators.clone(),
            cleanup: self.cleanup.clone(),
            enabled: self.enabled.clone(),
            visible: self.visible.clone(),
            required: self.required,
            required_message: self.required_message.clone(),
            state: Rc::clone(&self.state),
            stamp: Rc::clone(&self.stamp),
            status: Rc::clone(&self.status),
        }
    }
}

impl<T: FieldValue> InputField<T> {
    pub fn new(kind: FieldKind, setup: FieldSetup<T>) -> Self {
        let (required, required_message) = expand_coupled(
            setup.required,
            (false, "This field is required.".to_string()),
        );
        let state = FieldState {
            value: setup.initial_value.clone(),
            previous_value: None,
            problems: BTreeMap::new(),
            last_validated_epoch: None,
        };
        Self {
            kind,
            name: setup.name,
            label: setup.label,
            description: setup.description,
            placeholder: setup.placeholder,
            compact: setup.compact,
            initial_value: setup.initial_value,
            validators: setup.validators,
            cleanup: setup.cleanup,
            enabled: setup.enabled.unwrap_or_else(allow),
            visible: setup.visible.unwrap_or_else(allow),
            required,
            required_message,
            state: Rc::new(RefCell::new(state)),
            stamp: Rc::new(Cell::new(Stamp::default())),
            status: Rc::new(RefCell::new(None)),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn value(&self) -> T {
        self.state.borrow().value.clone()
    }

    pub fn previous_value(&self) -> Option<T> {
        self.state.borrow().previous_value.clone()
    }

    pub fn initial_value(&self) -> &T {
        &self.initial_value
    }

    /// Replace the value immediately. No validation runs and no
    /// diagnostics are cleared at this level; specializations decide.
    /// In-flight validation results become stale.
    pub fn set_value(&self, next: T) {
        {
            let mut state = self.state.borrow_mut();
            let old = std::mem::replace(&mut state.value, next);
            state.previous_value = Some(old);
        }
        let mut stamp = self.stamp.get();
        stamp.epoch += 1;
        self.stamp.set(stamp);
    }

    pub fn dirty(&self) -> bool {
        !self.state.borrow().value.same_as(&self.initial_value)
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().value.is_empty()
    }

    pub fn enabled(&self) -> &Decision {
        &self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.verdict()
    }

    pub fn visible(&self) -> &Decision {
        &self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible.verdict()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn required_message(&self) -> &str {
        &self.required_message
    }

    /// All diagnostics, keyed by location. Locations with empty lists are
    /// omitted: they are equivalent to absence.
    pub fn all_problems(&self) -> BTreeMap<String, Vec<Problem>> {
        self.state
            .borrow()
            .problems
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(location, list)| (location.clone(), list.clone()))
            .collect()
    }

    pub fn problems_at(&self, location: &str) -> Vec<Problem> {
        self.state
            .borrow()
            .problems
            .get(location)
            .cloned()
            .unwrap_or_default()
    }

    /// True iff any location holds an error-level entry. Warnings alone
    /// never block.
    pub fn has_problems(&self) -> bool {
        self.state
            .borrow()
            .problems
            .values()
            .flatten()
            .any(Problem::is_error)
    }

    /// Boolean-or over the levels of all committed problems.
    pub fn problem_checks(&self) -> ProblemChecks {
        let state = self.state.borrow();
        let all: Vec<Problem> = state.problems.values().flatten().cloned().collect();
        check_problems(&all)
    }

    pub fn clear_problems_at(&self, location: &str) {
        self.state.borrow_mut().problems.remove(location);
    }

    pub fn clear_all_problems(&self) {
        self.state.borrow_mut().problems.clear();
    }

    /// Latest advisory status reported by an in-flight validator.
    pub fn validation_status(&self) -> Option<ValidationStatus> {
        self.status.borrow().clone()
    }

    /// Run all configured validators, in declared order, against the
    /// current value.
    ///
    /// Synchronous validators run and commit immediately; asynchronous
    /// validators are issued in order and awaited concurrently. A result
    /// is committed only while its freshness stamp is still current;
    /// results of superseded runs are discarded, so a slow validator can
    /// never resurrect cleared diagnostics. Returns true when the field
    /// settled with no error-level problems.
    ///
    /// A validator that panics is a programming error and propagates; it
    /// is never converted into a field problem.
    pub async fn validate(&self, reason: ValidationReason) -> bool {
        if let Some(cleanup) = self.cleanup.clone() {
            let current = self.value();
            let cleaned = cleanup(&current);
            if !cleaned.same_as(&current) {
                self.set_value(cleaned);
            }
        }

        let issued = self.begin_run();
        let changed = {
            let state = self.state.borrow();
            state.last_validated_epoch != Some(issued.epoch)
        };
        let value = self.value();
        debug!(field = %self.name, reason = %reason, changed, "validation run started");

        if self.required && value.is_empty() {
            self.commit_output(
                ValidatorOutput::report(ProblemReport::new(self.required_message.clone())),
                issued,
            );
        }

        let mut pending = Vec::new();
        for validator in &self.validators {
            match validator {
                Validator::Sync(run) => {
                    let controls = self.controls(issued);
                    let output = run(&value, changed, &controls, reason);
                    self.commit_output(output, issued);
                }
                Validator::Async(start) => {
                    let controls = self.controls(issued);
                    pending.push(start(value.clone(), changed, controls, reason));
                }
            }
        }
        for output in join_all(pending).await {
            self.commit_output(output, issued);
        }

        self.finish_run(issued);
        !self.has_problems()
    }

    fn controls(&self, issued: Stamp) -> ValidatorControls {
        ValidatorControls::new(Rc::clone(&self.stamp), issued, Rc::clone(&self.status))
    }

    fn begin_run(&self) -> Stamp {
        let mut stamp = self.stamp.get();
        stamp.run += 1;
        self.stamp.set(stamp);
        self.state.borrow_mut().problems.clear();
        *self.status.borrow_mut() = None;
        stamp
    }

    fn commit_output(&self, output: ValidatorOutput, issued: Stamp) {
        if self.stamp.get() != issued {
            trace!(field = %self.name, "discarding stale validation result");
            return;
        }
        let mut state = self.state.borrow_mut();
        for seed in output.into_seeds() {
            if let Some(problem) = wrap_problem(seed, ROOT_LOCATION, ProblemLevel::Error) {
                state
                    .problems
                    .entry(problem.location.clone())
                    .or_default()
                    .push(problem);
            }
        }
    }

    fn finish_run(&self, issued: Stamp) {
        if self.stamp.get() == issued {
            {
                let mut state = self.state.borrow_mut();
                state.last_validated_epoch = Some(issued.epoch);
                let committed: usize = state.problems.values().map(Vec::len).sum();
                debug!(field = %self.name, problems = committed, "validation run settled");
            }
            *self.status.borrow_mut() = None;
        } else {
            debug!(field = %self.name, "validation run superseded before settling");
        }
    }
}
