//! Text-array field: an ordered sequence of strings with per-index
//! diagnostics, count/length bounds, duplicate detection, and item
//! mutation operations.

use std::collections::BTreeMap;
use std::ops::Deref;
use std::rc::Rc;

use futures_util::future::join_all;

use pollform_model::{
    CoupledData, Decision, NumberTemplate, ProblemLevel, ProblemReport, ProblemSeed,
    ValidatorOutput, at_least_x_items, expand_coupled, there_is_only, wrap_problem,
};

use crate::field::{FieldSetup, InputField};
use crate::kind::FieldKind;
use crate::validator::Validator;

/// Diagnostic location for one item of a compound value.
pub fn item_location(index: usize) -> String {
    format!("value-{index}")
}

/// Cross-item removal rule: receives the candidate index and the full
/// current controls.
pub type RemoveItemRule = Rc<dyn Fn(usize, &TextArrayField) -> bool>;

/// An ordered list of text inputs (poll answers, option lists).
///
/// Index order is semantically meaningful; index `i` maps to the
/// diagnostic location `value-i`. Derefs to the generic [`InputField`].
#[derive(Clone)]
pub struct TextArrayField {
    inner: InputField<Vec<String>>,
    min_items: usize,
    max_items: usize,
    placeholders: Option<Vec<String>>,
    placeholder_template: Option<Rc<dyn Fn(usize) -> String>>,
    add_item_label: String,
    remove_item_label: String,
    can_remove: Option<RemoveItemRule>,
}

impl TextArrayField {
    pub fn named(name: impl Into<String>) -> TextArrayFieldBuilder {
        TextArrayFieldBuilder {
            name: name.into(),
            label: None,
            description: None,
            compact: false,
            initial_value: None,
            initial_item_count: None,
            placeholders: None,
            placeholder_template: None,
            allow_empty_items: None,
            min_items: None,
            max_items: None,
            min_item_length: None,
            max_item_length: None,
            allow_duplicates: None,
            item_validators: Vec::new(),
            validators: Vec::new(),
            add_item_label: None,
            remove_item_label: None,
            can_remove: None,
            required: None,
            enabled: None,
            visible: None,
        }
    }

    pub fn controls(&self) -> &InputField<Vec<String>> {
        &self.inner
    }

    pub fn number_of_items(&self) -> usize {
        self.inner.value().len()
    }

    /// Replace one item, clearing only that index's diagnostics so
    /// unrelated item errors persist.
    pub fn set_item(&self, index: usize, value: impl Into<String>) {
        let mut values = self.inner.value();
        if index >= values.len() {
            return;
        }
        self.inner.clear_problems_at(&item_location(index));
        values[index] = value.into();
        self.inner.set_value(values);
    }

    /// Append an empty item. Count-based validators may now resolve
    /// differently, so all diagnostics are cleared field-wide.
    pub fn add_item(&self) {
        self.inner.clear_all_problems();
        let mut values = self.inner.value();
        values.push(String::new());
        self.inner.set_value(values);
    }

    /// Remove the item at `index`, clearing all diagnostics field-wide.
    pub fn remove_item(&self, index: usize) {
        let mut values = self.inner.value();
        if index >= values.len() {
            return;
        }
        self.inner.clear_all_problems();
        values.remove(index);
        self.inner.set_value(values);
    }

    pub fn can_add_item(&self) -> bool {
        self.max_items == 0 || self.number_of_items() < self.max_items
    }

    /// False at or below the configured minimum regardless of any
    /// caller-supplied rule; above it, the rule has the final word.
    pub fn can_remove_item(&self, index: usize) -> bool {
        self.number_of_items() > self.min_items
            && self
                .can_remove
                .as_ref()
                .is_none_or(|rule| rule(index, self))
    }

    pub fn add_item_label(&self) -> &str {
        &self.add_item_label
    }

    pub fn remove_item_label(&self) -> &str {
        &self.remove_item_label
    }

    pub fn placeholders(&self) -> Vec<String> {
        if let Some(list) = &self.placeholders {
            return list.clone();
        }
        let template = self.placeholder_template.as_ref();
        (0..self.number_of_items())
            .map(|index| template.map_or_else(String::new, |t| t(index)))
            .collect()
    }

    pub fn min_items(&self) -> usize {
        self.min_items
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }
}

impl Deref for TextArrayField {
    type Target = InputField<Vec<String>>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct TextArrayFieldBuilder {
    name: String,
    label: Option<String>,
    description: Option<String>,
    compact: bool,
    initial_value: Option<Vec<String>>,
    initial_item_count: Option<usize>,
    placeholders: Option<Vec<String>>,
    placeholder_template: Option<Rc<dyn Fn(usize) -> String>>,
    allow_empty_items: Option<CoupledData<bool, String>>,
    min_items: Option<CoupledData<usize, NumberTemplate>>,
    max_items: Option<CoupledData<usize, NumberTemplate>>,
    min_item_length: Option<CoupledData<usize, NumberTemplate>>,
    max_item_length: Option<CoupledData<usize, NumberTemplate>>,
    allow_duplicates: Option<CoupledData<bool, String>>,
    item_validators: Vec<Validator<String>>,
    validators: Vec<Validator<Vec<String>>>,
    add_item_label: Option<String>,
    remove_item_label: Option<String>,
    can_remove: Option<RemoveItemRule>,
    required: Option<CoupledData<bool, String>>,
    enabled: Option<Decision>,
    visible: Option<Decision>,
}

impl TextArrayFieldBuilder {
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
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Initial values for all items.
    #[must_use]
    pub fn initial_value(mut self, values: Vec<String>) -> Self {
        self.initial_value = Some(values);
        self
    }

    /// Initial number of (empty) items when no initial values are given.
    #[must_use]
    pub fn initial_item_count(mut self, count: usize) -> Self {
        self.initial_item_count = Some(count);
        self
    }

    #[must_use]
    pub fn placeholders(mut self, placeholders: Vec<String>) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    #[must_use]
    pub fn placeholder_template(mut self, template: impl Fn(usize) -> String + 'static) -> Self {
        self.placeholder_template = Some(Rc::new(template));
        self
    }

    /// Do we accept blank items?
    #[must_use]
    pub fn allow_empty_items(mut self, allow: impl Into<CoupledData<bool, String>>) -> Self {
        self.allow_empty_items = Some(allow.into());
        self
    }

    /// Minimum number of populated items; a zero bound disables the check.
    #[must_use]
    pub fn min_items(mut self, bound: impl Into<CoupledData<usize, NumberTemplate>>) -> Self {
        self.min_items = Some(bound.into());
        self
    }

    /// Maximum number of populated items; a zero bound disables the check.
    #[must_use]
    pub fn max_items(mut self, bound: impl Into<CoupledData<usize, NumberTemplate>>) -> Self {
        self.max_items = Some(bound.into());
        self
    }

    /// Minimum length of each item; a zero bound disables the check.
    #[must_use]
    pub fn min_item_length(mut self, bound: impl Into<CoupledData<usize, NumberTemplate>>) -> Self {
        self.min_item_length = Some(bound.into());
        self
    }

    /// Maximum length of each item; a zero bound disables the check.
    #[must_use]
    pub fn max_item_length(mut self, bound: impl Into<CoupledData<usize, NumberTemplate>>) -> Self {
        self.max_item_length = Some(bound.into());
        self
    }

    /// Is it allowed to specify the same item more than once?
    #[must_use]
    pub fn allow_duplicates(mut self, allow: impl Into<CoupledData<bool, String>>) -> Self {
        self.allow_duplicates = Some(allow.into());
        self
    }

    /// Applied independently to every item; problems land at the item's
    /// own location.
    #[must_use]
    pub fn item_validator(mut self, validator: Validator<String>) -> Self {
        self.item_validators.push(validator);
        self
    }

    /// Applied to the whole sequence, not tagged to any specific index.
    #[must_use]
    pub fn validator(mut self, validator: Validator<Vec<String>>) -> Self {
        self.validators.push(validator);
        self
    }

    #[must_use]
    pub fn add_item_label(mut self, label: impl Into<String>) -> Self {
        self.add_item_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn remove_item_label(mut self, label: impl Into<String>) -> Self {
        self.remove_item_label = Some(label.into());
        self
    }

    /// Cross-item removal rule, consulted only above the configured
    /// minimum item count.
    #[must_use]
    pub fn can_remove_item(mut self, rule: impl Fn(usize, &TextArrayField) -> bool + 'static) -> Self {
        self.can_remove = Some(Rc::new(rule));
        self
    }

    #[must_use]
    pub fn required(mut self, required: impl Into<CoupledData<bool, String>>) -> Self {
        self.required = Some(required.into());
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
    /// Panics when a configured minimum bound exceeds its maximum: a
    /// defect in the calling code, not bad user input.
    pub fn build(self) -> TextArrayField {
        let (allow_empty_items, empty_item_message) = expand_coupled(
            self.allow_empty_items,
            (
                false,
                "Please either fill this in, or remove this option.".to_string(),
            ),
        );
        let (min_items, too_few_message) = expand_coupled(
            self.min_items,
            (
                3,
                NumberTemplate::render(|n| format!("Please specify {}!", at_least_x_items(n))),
            ),
        );
        let (max_items, too_many_message) = expand_coupled(
            self.max_items,
            (
                1000,
                NumberTemplate::render(|n| format!("Please specify at most {n} items.")),
            ),
        );
        let (min_item_length, too_short_message) = expand_coupled(
            self.min_item_length,
            (
                1,
                NumberTemplate::render(|n| format!("Please specify at least {n} characters.")),
            ),
        );
        let (max_item_length, too_long_message) = expand_coupled(
            self.max_item_length,
            (
                1000,
                NumberTemplate::render(|n| format!("Please don't use more than {n} characters.")),
            ),
        );
        let (allow_duplicates, duplicates_message) = expand_coupled(
            self.allow_duplicates,
            (false, "The same data is given multiple times.".to_string()),
        );
        assert!(
            min_items == 0 || max_items == 0 || min_items <= max_items,
            "text array field {:?}: min item count {} exceeds max item count {}",
            self.name,
            min_items,
            max_items
        );
        assert!(
            min_item_length == 0 || max_item_length == 0 || min_item_length <= max_item_length,
            "text array field {:?}: min item length {} exceeds max item length {}",
            self.name,
            min_item_length,
            max_item_length
        );

        let initial_value = self
            .initial_value
            .unwrap_or_else(|| vec![String::new(); self.initial_item_count.unwrap_or(min_items)]);

        // Validators apply in this fixed order, each operating on the
        // current full sequence.
        let mut validators: Vec<Validator<Vec<String>>> = Vec::new();

        if !allow_empty_items {
            validators.push(Validator::simple(move |values: &Vec<String>| {
                let seeds = values
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| value.is_empty())
                    .map(|(index, _)| {
                        ProblemSeed::Report(
                            ProblemReport::new(empty_item_message.clone()).at(item_location(index)),
                        )
                    })
                    .collect();
                ValidatorOutput::many(seeds)
            }));
        }

        if min_items > 0 {
            let message = too_few_message;
            validators.push(Validator::simple(move |values: &Vec<String>| {
                let populated = values.iter().filter(|value| !value.is_empty()).count();
                if populated < min_items {
                    ValidatorOutput::text(format!(
                        "{} (Currently, {}.)",
                        message.resolve(min_items),
                        there_is_only(populated)
                    ))
                } else {
                    ValidatorOutput::None
                }
            }));
        }

        if max_items > 0 {
            let message = too_many_message;
            validators.push(Validator::simple(move |values: &Vec<String>| {
                let populated = values.iter().filter(|value| !value.is_empty()).count();
                if populated > max_items {
                    ValidatorOutput::text(format!(
                        "{} (Currently, there are {populated}.)",
                        message.resolve(max_items)
                    ))
                } else {
                    ValidatorOutput::None
                }
            }));
        }

        if min_item_length > 0 {
            let message = too_short_message;
            validators.push(Validator::simple(move |values: &Vec<String>| {
                ValidatorOutput::many(length_seeds(values, |length| length < min_item_length, || {
                    message.resolve(min_item_length)
                }))
            }));
        }

        if max_item_length > 0 {
            let message = too_long_message;
            validators.push(Validator::simple(move |values: &Vec<String>| {
                ValidatorOutput::many(length_seeds(values, |length| length > max_item_length, || {
                    message.resolve(max_item_length)
                }))
            }));
        }

        if !allow_duplicates {
            validators.push(Validator::simple(move |values: &Vec<String>| {
                ValidatorOutput::many(duplicate_seeds(values, &duplicates_message))
            }));
        }

        for item_validator in self.item_validators {
            validators.push(lift_item_validator(item_validator));
        }
        validators.extend(self.validators);

        let setup = FieldSetup {
            name: self.name,
            label: self.label,
            description: self.description,
            placeholder: None,
            compact: self.compact,
            initial_value,
            validators,
            cleanup: Some(Rc::new(|values: &Vec<String>| {
                values.iter().map(|value| value.trim().to_string()).collect()
            })),
            enabled: self.enabled,
            visible: self.visible,
            required: self.required,
        };

        TextArrayField {
            inner: InputField::new(FieldKind::TextArray, setup),
            min_items,
            max_items,
            placeholders: self.placeholders,
            placeholder_template: self.placeholder_template,
            add_item_label: self.add_item_label.unwrap_or_else(|| "Add".to_string()),
            remove_item_label: self
                .remove_item_label
                .unwrap_or_else(|| "Remove".to_string()),
            can_remove: self.can_remove,
        }
    }
}

fn length_seeds(
    values: &[String],
    out_of_bounds: impl Fn(usize) -> bool,
    message: impl Fn() -> String,
) -> Vec<ProblemSeed> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let length = value.chars().count();
            if !value.is_empty() && out_of_bounds(length) {
                Some(ProblemSeed::Report(
                    ProblemReport::new(format!("{} (Currently: {length})", message()))
                        .at(item_location(index)),
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Scan the sequence once, building a first-seen index map; flag any later
/// non-blank occurrence at its own index. The first occurrence is never
/// flagged, and blank items are never duplicates of each other.
fn duplicate_seeds(values: &[String], message: &str) -> Vec<ProblemSeed> {
    let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();
    let mut seeds = Vec::new();
    for (index, value) in values.iter().enumerate() {
        if first_seen.contains_key(value.as_str()) {
            if !value.is_empty() {
                seeds.push(ProblemSeed::Report(
                    ProblemReport::new(message.to_string()).at(item_location(index)),
                ));
            }
        } else {
            first_seen.insert(value.as_str(), index);
        }
    }
    seeds
}

/// Fan an item validator out over the whole sequence, tagging each item's
/// problems with that item's own location.
fn lift_item_validator(validator: Validator<String>) -> Validator<Vec<String>> {
    match validator {
        Validator::Sync(run) => Validator::sync(move |values: &Vec<String>, changed, controls, reason| {
            let mut seeds = Vec::new();
            for (index, item) in values.iter().enumerate() {
                let output = run(item, changed, controls, reason);
                seeds.extend(tag_item_seeds(output, index));
            }
            ValidatorOutput::many(seeds)
        }),
        Validator::Async(start) => Validator::Async(Rc::new(move |values, changed, controls, reason| {
            let futures: Vec<_> = values
                .into_iter()
                .map(|item| start(item, changed, controls.clone(), reason))
                .collect();
            Box::pin(async move {
                let mut seeds = Vec::new();
                for (index, output) in join_all(futures).await.into_iter().enumerate() {
                    seeds.extend(tag_item_seeds(output, index));
                }
                ValidatorOutput::many(seeds)
            })
        })),
    }
}

fn tag_item_seeds(output: ValidatorOutput, index: usize) -> Vec<ProblemSeed> {
    output
        .into_seeds()
        .into_iter()
        .filter_map(|seed| wrap_problem(seed, &item_location(index), ProblemLevel::Error))
        .map(|problem| ProblemSeed::Report(problem.into()))
        .collect()
}
