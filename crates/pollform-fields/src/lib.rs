//! Reactive field state and validation engine.
//!
//! Each field owns its value, its dirtiness, and a map of diagnostic
//! locations to problem lists; validators (synchronous or asynchronous)
//! populate that map, and freshness stamps guarantee that a slow
//! asynchronous result can never clobber a newer value's diagnostics.

pub mod boolean;
pub mod field;
pub mod form;
pub mod kind;
pub mod text;
pub mod text_array;
pub mod validator;

pub use boolean::{BooleanField, BooleanFieldBuilder};
pub use field::{FieldSetup, FieldValue, InputField};
pub use form::{FormControl, FormField, fields_have_errors, validate_form};
pub use kind::FieldKind;
pub use text::{TextField, TextFieldBuilder};
pub use text_array::{
    RemoveItemRule, TextArrayField, TextArrayFieldBuilder, item_location,
};
pub use validator::{ValidationReason, ValidationStatus, Validator, ValidatorControls};
