//! Problem report table for the `check` command.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use pollform_fields::FieldKind;
use pollform_model::{Problem, ProblemLevel};

/// One declared field's validation outcome.
pub struct FieldOutcome {
    pub name: String,
    pub kind: FieldKind,
    pub problems: Vec<Problem>,
    pub unsupported: bool,
}

pub fn print_report(title: Option<&str>, outcomes: &[FieldOutcome]) {
    if let Some(title) = title {
        println!("Form: {title}");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Kind"),
        header_cell("Location"),
        header_cell("Level"),
        header_cell("Message"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut rows = 0usize;
    for outcome in outcomes {
        if outcome.unsupported {
            table.add_row(vec![
                Cell::new(&outcome.name),
                Cell::new(outcome.kind),
                Cell::new("-"),
                Cell::new("note").fg(Color::Blue),
                Cell::new("no engine for this field kind"),
            ]);
            rows += 1;
            continue;
        }
        for problem in &outcome.problems {
            table.add_row(vec![
                Cell::new(&outcome.name),
                Cell::new(outcome.kind),
                Cell::new(&problem.location),
                level_cell(problem.level),
                Cell::new(&problem.message),
            ]);
            rows += 1;
        }
    }

    if rows == 0 {
        println!("No problems found.");
    } else {
        println!("{table}");
    }

    let errors: usize = outcomes
        .iter()
        .flat_map(|outcome| &outcome.problems)
        .filter(|problem| problem.level == ProblemLevel::Error)
        .count();
    let warnings: usize = outcomes
        .iter()
        .flat_map(|outcome| &outcome.problems)
        .filter(|problem| problem.level == ProblemLevel::Warning)
        .count();
    println!(
        "{errors} error(s), {warnings} warning(s) across {} field(s)",
        outcomes.len()
    );
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn level_cell(level: ProblemLevel) -> Cell {
    match level {
        ProblemLevel::Error => Cell::new("error").fg(Color::Red),
        ProblemLevel::Warning => Cell::new("warning").fg(Color::Yellow),
    }
}
