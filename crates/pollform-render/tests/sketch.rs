//! Snapshot tests for the plain-text reference renderer.

use futures_util::FutureExt;
use insta::assert_snapshot;

use pollform_fields::{
    BooleanField, FieldKind, FormControl, TextArrayField, TextField, ValidationReason,
};
use pollform_render::{FieldRenderer, TextSketch, render_field};

fn validated<F: Into<FormControl>>(field: F) -> FormControl {
    let control: FormControl = field.into();
    control
        .as_form_field()
        .validate(ValidationReason::Submit)
        .now_or_never()
        .expect("no async validators");
    control
}

#[test]
fn text_fields_render_value_and_banners() {
    let question = TextField::named("question")
        .label("Question")
        .placeholder("Your question")
        .min_length(10)
        .initial_value("Why?")
        .build();
    let output = render_field(&TextSketch, &validated(question));
    assert_snapshot!(output, @r"
    Question: Why?
      [error] Please specify at least 10 characters! (Currently: 4)
    ");
}

#[test]
fn empty_text_fields_render_their_placeholder() {
    let question = TextField::named("question")
        .label("Question")
        .placeholder("Your question")
        .build();
    let output = render_field(&TextSketch, &validated(question));
    assert_snapshot!(output, @"Question: <Your question>");
}

#[test]
fn array_fields_render_per_item_banners_in_place() {
    let answers = TextArrayField::named("answers")
        .label("Answers")
        .min_items(2)
        .placeholder_template(|index| format!("Answer {}", index + 1))
        .initial_value(vec!["yes".to_string(), String::new(), "yes".to_string()])
        .build();
    let output = render_field(&TextSketch, &validated(answers));
    assert_snapshot!(output, @r"
    Answers:
      1. yes
      2. <Answer 2>
         [error] Please either fill this in, or remove this option.
      3. yes
         [error] The same data is given multiple times.
    ");
}

#[test]
fn boolean_fields_render_as_switches() {
    let terms = BooleanField::named("terms")
        .label("I accept the terms")
        .required((true, "You must accept the terms to continue."))
        .build();
    let output = render_field(&TextSketch, &validated(terms));
    assert_snapshot!(output, @r"
    [ ] I accept the terms
      [error] You must accept the terms to continue.
    ");
}

#[test]
fn unknown_kinds_degrade_to_a_visible_placeholder() {
    let output = TextSketch.unsupported("closes", FieldKind::Date);
    assert_snapshot!(output, @"(closes: no renderer for 'date' fields)");
}
