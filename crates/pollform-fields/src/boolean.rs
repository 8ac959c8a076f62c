//! Boolean field: the simplest specialization of the generic core.

use std::ops::Deref;

use pollform_model::{CoupledData, Decision};

use crate::field::{FieldSetup, InputField};
use crate::kind::FieldKind;
use crate::validator::Validator;

/// A checkbox/switch-style input. "Required" means it must be switched on.
#[derive(Clone)]
pub struct BooleanField {
    inner: InputField<bool>,
}

impl BooleanField {
    pub fn named(name: impl Into<String>) -> BooleanFieldBuilder {
        BooleanFieldBuilder {
            name: name.into(),
            label: None,
            description: None,
            initial_value: false,
            required: None,
            validators: Vec::new(),
            enabled: None,
            visible: None,
        }
    }

    pub fn set_value(&self, value: bool) {
        self.inner.clear_all_problems();
        self.inner.set_value(value);
    }

    pub fn toggle(&self) {
        let value = self.inner.value();
        self.set_value(!value);
    }

    pub fn controls(&self) -> &InputField<bool> {
        &self.inner
    }
}

impl Deref for BooleanField {
    type Target = InputField<bool>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct BooleanFieldBuilder {
    name: String,
    label: Option<String>,
    description: Option<String>,
    initial_value: bool,
    required: Option<CoupledData<bool, String>>,
    validators: Vec<Validator<bool>>,
    enabled: Option<Decision>,
    visible: Option<Decision>,
}

impl BooleanFieldBuilder {
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
    pub fn initial_value(mut self, value: bool) -> Self {
        self.initial_value = value;
        self
    }

    #[must_use]
    pub fn required(mut self, required: impl Into<CoupledData<bool, String>>) -> Self {
        self.required = Some(required.into());
        self
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator<bool>) -> Self {
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

    pub fn build(self) -> BooleanField {
        let setup = FieldSetup {
            name: self.name,
            label: self.label,
            description: self.description,
            placeholder: None,
            compact: false,
            initial_value: self.initial_value,
            validators: self.validators,
            cleanup: None,
            enabled: self.enabled,
            visible: self.visible,
            required: self.required,
        };
        BooleanField {
            inner: InputField::new(FieldKind::Boolean, setup),
        }
    }
}
