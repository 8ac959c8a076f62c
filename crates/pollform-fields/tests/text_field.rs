//! Unit tests for the scalar text field.

use futures_util::FutureExt;

use pollform_fields::{TextField, ValidationReason, Validator};
use pollform_model::{ProblemLevel, ProblemReport, ROOT_LOCATION, ValidatorOutput, deny};

fn validate_now(field: &TextField) -> bool {
    field
        .validate(ValidationReason::Submit)
        .now_or_never()
        .expect("fields without async validators settle immediately")
}

#[test]
fn in_bounds_text_produces_no_problems() {
    let field = TextField::named("question")
        .min_length(2)
        .max_length(10)
        .initial_value("hello")
        .build();
    assert!(validate_now(&field));
    assert!(field.all_problems().is_empty());
}

#[test]
fn too_short_text_reports_bound_and_live_length() {
    let field = TextField::named("question")
        .min_length(10)
        .initial_value("short")
        .build();
    assert!(!validate_now(&field));
    let problems = field.problems_at(ROOT_LOCATION);
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0].message,
        "Please specify at least 10 characters! (Currently: 5)"
    );
}

#[test]
fn too_long_text_uses_the_custom_message() {
    let field = TextField::named("question")
        .max_length((3, "This is too long"))
        .initial_value("overflow")
        .build();
    assert!(!validate_now(&field));
    let problems = field.problems_at(ROOT_LOCATION);
    assert_eq!(problems[0].message, "This is too long (Currently: 8)");
}

#[test]
fn length_checks_skip_empty_values() {
    // Emptiness is the required decision's concern, not a length problem.
    let field = TextField::named("description").min_length(10).build();
    assert!(validate_now(&field));
    assert!(field.all_problems().is_empty());
}

#[test]
fn required_empty_field_reports_the_configured_message() {
    let field = TextField::named("question")
        .required((true, "Please specify the question for your poll!"))
        .build();
    assert!(!validate_now(&field));
    let problems = field.problems_at(ROOT_LOCATION);
    assert_eq!(problems.len(), 1);
    assert_eq!(
        problems[0].message,
        "Please specify the question for your poll!"
    );
}

#[test]
fn set_value_eagerly_clears_prior_diagnostics() {
    let field = TextField::named("question")
        .min_length(10)
        .initial_value("short")
        .build();
    assert!(!validate_now(&field));
    assert!(field.has_problems());

    field.set_value("still too short, but freshly typed");
    assert!(!field.has_problems());
    assert!(field.all_problems().is_empty());
}

#[test]
fn dirtiness_tracks_divergence_from_the_initial_value() {
    let field = TextField::named("question").initial_value("original").build();
    assert!(!field.dirty());
    field.set_value("edited");
    assert!(field.dirty());
    assert_eq!(field.previous_value().as_deref(), Some("original"));
    field.set_value("original");
    assert!(!field.dirty());
}

#[test]
fn custom_validator_strings_parse_signature_prefixes() {
    let field = TextField::named("amount")
        .initial_value("101")
        .validator(Validator::simple(|value: &String| {
            if value.len() > 2 {
                ValidatorOutput::text("rangeError: value is too big")
            } else {
                ValidatorOutput::None
            }
        }))
        .build();
    assert!(!validate_now(&field));
    let problems = field.problems_at(ROOT_LOCATION);
    assert_eq!(problems[0].signature.as_deref(), Some("rangeError"));
    assert_eq!(problems[0].message, "value is too big");
}

#[test]
fn warnings_alone_never_block() {
    let field = TextField::named("question")
        .initial_value("fine")
        .validator(Validator::simple(|_value: &String| {
            ValidatorOutput::report(
                ProblemReport::new("consider a longer question").with_level(ProblemLevel::Warning),
            )
        }))
        .build();
    assert!(validate_now(&field));
    assert!(!field.has_problems());
    assert_eq!(field.problems_at(ROOT_LOCATION).len(), 1);
    let checks = field.problem_checks();
    assert!(checks.has_warning);
    assert!(!checks.has_error);
}

#[test]
fn repeated_validation_of_an_unchanged_value_is_idempotent() {
    let field = TextField::named("question")
        .min_length(10)
        .initial_value("short")
        .build();
    assert!(!validate_now(&field));
    let first = field.all_problems();
    assert!(!validate_now(&field));
    assert_eq!(field.all_problems(), first);
}

#[test]
fn gating_decisions_resolve_with_reasons() {
    let field = TextField::named("theme")
        .enabled(deny("Coming soon!"))
        .build();
    assert!(!field.is_enabled());
    assert_eq!(field.enabled().reason(), Some("Coming soon!"));
    assert!(field.is_visible());
}

#[test]
fn validators_receive_the_change_flag() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen: Rc<RefCell<Vec<bool>>> = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let field = TextField::named("question")
        .initial_value("first")
        .validator(Validator::sync(move |_value, changed, _controls, _reason| {
            log.borrow_mut().push(changed);
            ValidatorOutput::None
        }))
        .build();

    assert!(validate_now(&field));
    assert!(validate_now(&field));
    field.set_value("second");
    assert!(validate_now(&field));
    assert_eq!(*seen.borrow(), vec![true, false, true]);
}
