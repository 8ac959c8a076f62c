//! Form-level helpers: a uniform view over heterogeneous fields, plus the
//! tagged-variant control type presentation dispatches on.

use std::collections::BTreeMap;

use futures_util::future::LocalBoxFuture;

use pollform_model::Problem;

use crate::boolean::BooleanField;
use crate::kind::FieldKind;
use crate::text::TextField;
use crate::text_array::TextArrayField;
use crate::validator::ValidationReason;

/// Object-safe surface shared by every field specialization.
pub trait FormField {
    fn name(&self) -> &str;
    fn kind(&self) -> FieldKind;
    fn label(&self) -> Option<&str>;
    fn is_visible(&self) -> bool;
    fn is_enabled(&self) -> bool;
    fn has_problems(&self) -> bool;
    fn all_problems(&self) -> BTreeMap<String, Vec<Problem>>;
    fn clear_all_problems(&self);
    fn validate(&self, reason: ValidationReason) -> LocalBoxFuture<'_, bool>;
}

macro_rules! delegate_form_field {
    ($type:ty) => {
        impl FormField for $type {
            fn name(&self) -> &str {
                self.controls().name()
            }

            fn kind(&self) -> FieldKind {
                self.controls().kind()
            }

            fn label(&self) -> Option<&str> {
                self.controls().label()
            }

            fn is_visible(&self) -> bool {
                self.controls().is_visible()
            }

            fn is_enabled(&self) -> bool {
                self.controls().is_enabled()
            }

            fn has_problems(&self) -> bool {
                self.controls().has_problems()
            }

            fn all_problems(&self) -> BTreeMap<String, Vec<Problem>> {
                self.controls().all_problems()
            }

            fn clear_all_problems(&self) {
                self.controls().clear_all_problems();
            }

            fn validate(&self, reason: ValidationReason) -> LocalBoxFuture<'_, bool> {
                Box::pin(self.controls().validate(reason))
            }
        }
    };
}

delegate_form_field!(TextField);
delegate_form_field!(TextArrayField);
delegate_form_field!(BooleanField);

/// Validate every visible field; hidden fields are skipped entirely.
/// Returns true when all validated fields settled clean.
pub async fn validate_form(fields: &[&dyn FormField], reason: ValidationReason) -> bool {
    let mut all_clean = true;
    for field in fields {
        if !field.is_visible() {
            continue;
        }
        if !field.validate(reason).await {
            all_clean = false;
        }
    }
    all_clean
}

/// True when any visible field currently holds an error-level problem.
pub fn fields_have_errors(fields: &[&dyn FormField]) -> bool {
    fields
        .iter()
        .any(|field| field.is_visible() && field.has_problems())
}

/// A field together with its kind tag, for presentation dispatch.
///
/// Non-exhaustive: dispatch over this type keeps a fallback arm, and new
/// kinds degrade to an "unsupported field" placeholder instead of
/// crashing.
#[non_exhaustive]
#[derive(Clone)]
pub enum FormControl {
    Text(TextField),
    TextArray(TextArrayField),
    Boolean(BooleanField),
}

impl FormControl {
    pub fn kind(&self) -> FieldKind {
        self.as_form_field().kind()
    }

    pub fn name(&self) -> &str {
        self.as_form_field().name()
    }

    pub fn as_form_field(&self) -> &dyn FormField {
        match self {
            FormControl::Text(field) => field,
            FormControl::TextArray(field) => field,
            FormControl::Boolean(field) => field,
        }
    }
}

impl From<TextField> for FormControl {
    fn from(field: TextField) -> Self {
        FormControl::Text(field)
    }
}

impl From<TextArrayField> for FormControl {
    fn from(field: TextArrayField) -> Self {
        FormControl::TextArray(field)
    }
}

impl From<BooleanField> for FormControl {
    fn from(field: BooleanField) -> Self {
        FormControl::Boolean(field)
    }
}
