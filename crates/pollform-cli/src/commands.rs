//! Command implementations.

use anyhow::{Context, Result};
use tracing::{debug, info};

use pollform_fields::{FieldKind, FormControl, FormField, validate_form};
use pollform_model::ProblemLevel;
use pollform_render::{FieldRenderer, TextSketch, render_field};

use crate::cli::CheckArgs;
use crate::form_spec::{BuiltField, build_fields, load_form};
use crate::report::{FieldOutcome, print_report};

pub struct CheckOutcome {
    pub error_count: usize,
    pub warning_count: usize,
}

pub fn run_check(args: &CheckArgs) -> Result<CheckOutcome> {
    let spec = load_form(&args.form)
        .with_context(|| format!("cannot load form definition {}", args.form.display()))?;
    let title = spec.title.clone();
    let built = build_fields(spec);
    info!(fields = built.len(), "form definition loaded");

    let reason = args.reason.into();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("cannot start async runtime")?;
    let controls: Vec<&FormControl> = built
        .iter()
        .filter_map(|field| match field {
            BuiltField::Control(control) => Some(control),
            BuiltField::Unsupported { .. } => None,
        })
        .collect();
    let all_clean = runtime.block_on(async {
        let fields: Vec<&dyn FormField> = controls
            .iter()
            .map(|control| control.as_form_field())
            .collect();
        validate_form(&fields, reason).await
    });
    debug!(all_clean, "validation settled");

    if args.sketch {
        let sketch = TextSketch;
        for field in &built {
            match field {
                BuiltField::Control(control) => print!("{}", render_field(&sketch, control)),
                BuiltField::Unsupported { name, kind } => {
                    print!("{}", sketch.unsupported(name, *kind));
                }
            }
        }
        println!();
    }

    let outcomes: Vec<FieldOutcome> = built
        .iter()
        .map(|field| match field {
            BuiltField::Control(control) => {
                let form_field = control.as_form_field();
                FieldOutcome {
                    name: form_field.name().to_string(),
                    kind: form_field.kind(),
                    problems: form_field
                        .all_problems()
                        .into_values()
                        .flatten()
                        .collect(),
                    unsupported: false,
                }
            }
            BuiltField::Unsupported { name, kind } => FieldOutcome {
                name: name.clone(),
                kind: *kind,
                problems: Vec::new(),
                unsupported: true,
            },
        })
        .collect();
    print_report(title.as_deref(), &outcomes);

    let error_count = outcomes
        .iter()
        .flat_map(|outcome| &outcome.problems)
        .filter(|problem| problem.level == ProblemLevel::Error)
        .count();
    let warning_count = outcomes
        .iter()
        .flat_map(|outcome| &outcome.problems)
        .filter(|problem| problem.level == ProblemLevel::Warning)
        .count();
    Ok(CheckOutcome {
        error_count,
        warning_count,
    })
}

pub fn run_kinds() {
    for kind in FieldKind::all() {
        println!("{kind}");
    }
}
