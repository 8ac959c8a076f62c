//! Whole-form validation helpers.

use futures_util::FutureExt;

use pollform_fields::{
    BooleanField, FormField, TextArrayField, TextField, ValidationReason, fields_have_errors,
    validate_form,
};
use pollform_model::deny;

#[test]
fn hidden_fields_are_skipped_entirely() {
    let question = TextField::named("question")
        .required((true, "Please specify the question for your poll!"))
        .build();
    let theme = TextField::named("theme")
        .visible(deny("custom themes are disabled"))
        .required(true)
        .build();

    let fields: [&dyn FormField; 2] = [&question, &theme];
    let clean = validate_form(&fields, ValidationReason::Submit)
        .now_or_never()
        .expect("no async validators");

    // the visible required field fails; the hidden one never runs
    assert!(!clean);
    assert!(question.has_problems());
    assert!(!theme.has_problems());
    assert!(fields_have_errors(&fields));
}

#[test]
fn a_form_of_valid_fields_settles_clean() {
    let question = TextField::named("question")
        .min_length(3)
        .initial_value("Why though?")
        .build();
    let answers = TextArrayField::named("answers")
        .min_items(2)
        .initial_value(vec!["yes".to_string(), "no".to_string()])
        .build();
    let hidden_poll = BooleanField::named("hidden").build();

    let fields: [&dyn FormField; 3] = [&question, &answers, &hidden_poll];
    let clean = validate_form(&fields, ValidationReason::Submit)
        .now_or_never()
        .expect("no async validators");

    assert!(clean);
    assert!(!fields_have_errors(&fields));
}

#[test]
fn required_boolean_must_be_switched_on() {
    let terms = BooleanField::named("terms")
        .label("I accept the terms")
        .required((true, "You must accept the terms to continue."))
        .build();
    let clean = terms
        .validate(ValidationReason::Submit)
        .now_or_never()
        .expect("no async validators");
    assert!(!clean);

    terms.toggle();
    assert!(terms.value());
    assert!(terms.all_problems().is_empty());
    let clean = terms
        .validate(ValidationReason::Submit)
        .now_or_never()
        .expect("no async validators");
    assert!(clean);
}
