//! Scalar text field: the generic core plus length-bound validators.

use std::ops::Deref;

use pollform_model::{
    CoupledData, Decision, NumberTemplate, ValidatorOutput, expand_coupled,
};

use crate::field::{FieldSetup, InputField};
use crate::kind::FieldKind;
use crate::validator::Validator;

/// A single-line (or multi-line) text input.
///
/// Derefs to the generic [`InputField`] for the shared surface;
/// `set_value` is overridden to eagerly clear prior diagnostics, so the
/// user never stares at stale errors while typing. The caller re-validates
/// on its own schedule (blur/submit).
#[derive(Clone)]
pub struct TextField {
    inner: InputField<String>,
}

impl TextField {
    pub fn named(name: impl Into<String>) -> TextFieldBuilder {
        TextFieldBuilder {
            name: name.into(),
            label: None,
            description: None,
            placeholder: None,
            compact: false,
            initial_value: None,
            required: None,
            min_length: None,
            max_length: None,
            validators: Vec::new(),
            enabled: None,
            visible: None,
        }
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.inner.clear_all_problems();
        self.inner.set_value(value.into());
    }

    pub fn controls(&self) -> &InputField<String> {
        &self.inner
    }
}

impl Deref for TextField {
    type Target = InputField<String>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct TextFieldBuilder {
    name: String,
    label: Option<String>,
    description: Option<String>,
    placeholder: Option<String>,
    compact: bool,
    initial_value: Option<String>,
    required: Option<CoupledData<bool, String>>,
    min_length: Option<CoupledData<usize, NumberTemplate>>,
    max_length: Option<CoupledData<usize, NumberTemplate>>,
    validators: Vec<Validator<String>>,
    enabled: Option<Decision>,
    visible: Option<Decision>,
}

impl TextFieldBuilder {
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    #[must_use]
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    #[must_use]
    pub fn initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    #[must_use]
    pub fn required(mut self, required: impl Into<CoupledData<bool, String>>) -> Self {
        self.required = Some(required.into());
        self
    }

    /// Minimum length, as a bare bound or `(bound, message)`. A zero bound
    /// disables the check.
    #[must_use]
    pub fn min_length(mut self, bound: impl Into<CoupledData<usize, NumberTemplate>>) -> Self {
        self.min_length = Some(bound.into());
        self
    }

    /// Maximum length, as a bare bound or `(bound, message)`. A zero bound
    /// disables the check.
    #[must_use]
    pub fn max_length(mut self, bound: impl Into<CoupledData<usize, NumberTemplate>>) -> Self {
        self.max_length = Some(bound.into());
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator<String>) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn enabled(mut self, decision: Decision) -> Self {
        self.enabled = Some(decision);
        self
    }

    #[must_use]
    pub fn visible(mut self, decision: Decision) -> Self {
        self.visible = Some(decision);
        self
    }

    /// # Panics
    ///
    /// Panics when the configured minimum length exceeds the maximum:
    /// that is a defect in the calling code.
    pub fn build(self) -> TextField {
        let (min_length, too_short) = expand_coupled(
            self.min_length,
            (
                1,
                NumberTemplate::render(|n| format!("Please specify at least {n} characters!")),
            ),
        );
        let (max_length, too_long) = expand_coupled(
            self.max_length,
            (
                1000,
                NumberTemplate::render(|n| format!("Please specify at most {n} characters!")),
            ),
        );
        assert!(
            min_length == 0 || max_length == 0 || min_length <= max_length,
            "text field {:?}: min length {} exceeds max length {}",
            self.name,
            min_length,
            max_length
        );

        let mut validators = Vec::new();
        if min_length > 0 {
            validators.push(Validator::simple(move |value: &String| {
                let length = value.chars().count();
                if !value.is_empty() && length < min_length {
                    ValidatorOutput::text(format!(
                        "{} (Currently: {length})",
                        too_short.resolve(min_length)
                    ))
                } else {
                    ValidatorOutput::None
                }
            }));
        }
        if max_length > 0 {
            validators.push(Validator::simple(move |value: &String| {
                let length = value.chars().count();
                if !value.is_empty() && length > max_length {
                    ValidatorOutput::text(format!(
                        "{} (Currently: {length})",
                        too_long.resolve(max_length)
                    ))
                } else {
                    ValidatorOutput::None
                }
            }));
        }
        validators.extend(self.validators);

        let setup = FieldSetup {
            name: self.name,
            label: self.label,
            description: self.description,
            placeholder: self.placeholder,
            compact: self.compact,
            initial_value: self.initial_value.unwrap_or_default(),
            validators,
            cleanup: None,
            enabled: self.enabled,
            visible: self.visible,
            required: self.required,
        };
        TextField {
            inner: InputField::new(FieldKind::Text, setup),
        }
    }
}
