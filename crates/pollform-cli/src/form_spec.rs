//! JSON form definitions: a developer-tool convenience for declaring
//! fields, not a persistence format for the engine.

use std::path::Path;

use serde::Deserialize;

use pollform_fields::{
    BooleanField, FieldKind, FormControl, TextArrayField, TextField,
};
use pollform_model::{CoupledData, FormError, NumberTemplate};

/// A numeric tunable: a bare bound or `[bound, message]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BoundSpec {
    Bare(usize),
    Tagged(usize, String),
}

impl BoundSpec {
    fn into_coupled(self) -> CoupledData<usize, NumberTemplate> {
        match self {
            BoundSpec::Bare(bound) => CoupledData::Bare(bound),
            BoundSpec::Tagged(bound, message) => {
                CoupledData::Tagged(bound, NumberTemplate::Text(message))
            }
        }
    }
}

/// A boolean tunable: a bare flag or `[flag, message]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlagSpec {
    Bare(bool),
    Tagged(bool, String),
}

impl FlagSpec {
    fn into_coupled(self) -> CoupledData<bool, String> {
        match self {
            FlagSpec::Bare(flag) => CoupledData::Bare(flag),
            FlagSpec::Tagged(flag, message) => CoupledData::Tagged(flag, message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FormSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Deserialize)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: Option<FlagSpec>,

    /// Scalar field value.
    #[serde(default)]
    pub value: Option<String>,
    /// Array field values.
    #[serde(default)]
    pub values: Option<Vec<String>>,
    /// Boolean field value.
    #[serde(default)]
    pub checked: Option<bool>,

    #[serde(default)]
    pub min_length: Option<BoundSpec>,
    #[serde(default)]
    pub max_length: Option<BoundSpec>,

    #[serde(default)]
    pub min_items: Option<BoundSpec>,
    #[serde(default)]
    pub max_items: Option<BoundSpec>,
    #[serde(default)]
    pub min_item_length: Option<BoundSpec>,
    #[serde(default)]
    pub max_item_length: Option<BoundSpec>,
    #[serde(default)]
    pub allow_empty_items: Option<FlagSpec>,
    #[serde(default)]
    pub allow_duplicates: Option<FlagSpec>,
    #[serde(default)]
    pub initial_item_count: Option<usize>,
    #[serde(default)]
    pub placeholders: Option<Vec<String>>,
}

/// A declared field after construction: either a live control, or a kind
/// this tool has no engine for (reported, never fatal).
pub enum BuiltField {
    Control(FormControl),
    Unsupported { name: String, kind: FieldKind },
}

pub fn load_form(path: &Path) -> Result<FormSpec, FormError> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|error| FormError::Message(format!("invalid form definition: {error}")))
}

pub fn build_fields(spec: FormSpec) -> Vec<BuiltField> {
    spec.fields.into_iter().map(build_field).collect()
}

fn build_field(spec: FieldSpec) -> BuiltField {
    match spec.kind {
        FieldKind::Text => BuiltField::Control(build_text(spec).into()),
        FieldKind::TextArray => BuiltField::Control(build_text_array(spec).into()),
        FieldKind::Boolean => BuiltField::Control(build_boolean(spec).into()),
        kind => BuiltField::Unsupported {
            name: spec.name,
            kind,
        },
    }
}

fn build_text(spec: FieldSpec) -> TextField {
    let mut builder = TextField::named(spec.name);
    if let Some(label) = spec.label {
        builder = builder.label(label);
    }
    if let Some(placeholder) = spec.placeholder {
        builder = builder.placeholder(placeholder);
    }
    if let Some(value) = spec.value {
        builder = builder.initial_value(value);
    }
    if let Some(required) = spec.required {
        builder = builder.required(required.into_coupled());
    }
    if let Some(bound) = spec.min_length {
        builder = builder.min_length(bound.into_coupled());
    }
    if let Some(bound) = spec.max_length {
        builder = builder.max_length(bound.into_coupled());
    }
    builder.build()
}

fn build_text_array(spec: FieldSpec) -> TextArrayField {
    let mut builder = TextArrayField::named(spec.name);
    if let Some(label) = spec.label {
        builder = builder.label(label);
    }
    if let Some(values) = spec.values {
        builder = builder.initial_value(values);
    }
    if let Some(count) = spec.initial_item_count {
        builder = builder.initial_item_count(count);
    }
    if let Some(placeholders) = spec.placeholders {
        builder = builder.placeholders(placeholders);
    }
    if let Some(required) = spec.required {
        builder = builder.required(required.into_coupled());
    }
    if let Some(allow) = spec.allow_empty_items {
        builder = builder.allow_empty_items(allow.into_coupled());
    }
    if let Some(allow) = spec.allow_duplicates {
        builder = builder.allow_duplicates(allow.into_coupled());
    }
    if let Some(bound) = spec.min_items {
        builder = builder.min_items(bound.into_coupled());
    }
    if let Some(bound) = spec.max_items {
        builder = builder.max_items(bound.into_coupled());
    }
    if let Some(bound) = spec.min_item_length {
        builder = builder.min_item_length(bound.into_coupled());
    }
    if let Some(bound) = spec.max_item_length {
        builder = builder.max_item_length(bound.into_coupled());
    }
    builder.build()
}

fn build_boolean(spec: FieldSpec) -> BooleanField {
    let mut builder = BooleanField::named(spec.name);
    if let Some(label) = spec.label {
        builder = builder.label(label);
    }
    if let Some(checked) = spec.checked {
        builder = builder.initial_value(checked);
    }
    if let Some(required) = spec.required {
        builder = builder.required(required.into_coupled());
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_definitions_parse_bare_and_tagged_tunables() {
        let json = r#"{
            "title": "New poll",
            "fields": [
                {
                    "kind": "text",
                    "name": "question",
                    "label": "Question",
                    "required": [true, "Please specify the question for your poll!"],
                    "min_length": [10, "Please describe the question using at least 10 characters!"],
                    "max_length": 80
                },
                {
                    "kind": "text-array",
                    "name": "answers",
                    "min_items": 2,
                    "max_items": [8, "Please don't offer more than 8 answers."],
                    "values": ["yes", "no"]
                },
                { "kind": "date", "name": "closes" }
            ]
        }"#;
        let spec: FormSpec = serde_json::from_str(json).expect("form definition");
        assert_eq!(spec.fields.len(), 3);

        let built = build_fields(spec);
        assert!(matches!(built[0], BuiltField::Control(FormControl::Text(_))));
        assert!(matches!(
            built[1],
            BuiltField::Control(FormControl::TextArray(_))
        ));
        assert!(matches!(
            built[2],
            BuiltField::Unsupported {
                kind: FieldKind::Date,
                ..
            }
        ));
    }

    #[test]
    fn built_text_field_carries_its_configuration() {
        let spec = FieldSpec {
            kind: FieldKind::Text,
            name: "question".to_string(),
            label: Some("Question".to_string()),
            placeholder: None,
            required: Some(FlagSpec::Bare(true)),
            value: Some("Why?".to_string()),
            values: None,
            checked: None,
            min_length: None,
            max_length: None,
            min_items: None,
            max_items: None,
            min_item_length: None,
            max_item_length: None,
            allow_empty_items: None,
            allow_duplicates: None,
            initial_item_count: None,
            placeholders: None,
        };
        let field = build_text(spec);
        assert_eq!(field.name(), "question");
        assert_eq!(field.label(), Some("Question"));
        assert_eq!(field.value(), "Why?");
        assert!(field.is_required());
    }
}
