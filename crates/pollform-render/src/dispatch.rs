//! Dispatch from a field's declared kind to a renderer.

use std::fmt::Write as _;

use pollform_fields::{
    BooleanField, FieldKind, FormControl, TextArrayField, TextField, item_location,
};
use pollform_model::{Problem, ProblemLevel, ROOT_LOCATION};

use crate::banner::banners_for;

/// One renderer per supported field kind, plus a mandatory fallback for
/// kinds this renderer does not know: those must degrade to a visible
/// placeholder, never crash.
pub trait FieldRenderer {
    type Output;

    fn text(&self, field: &TextField) -> Self::Output;
    fn text_array(&self, field: &TextArrayField) -> Self::Output;
    fn boolean(&self, field: &BooleanField) -> Self::Output;
    fn unsupported(&self, name: &str, kind: FieldKind) -> Self::Output;
}

pub fn render_field<R: FieldRenderer>(renderer: &R, control: &FormControl) -> R::Output {
    match control {
        FormControl::Text(field) => renderer.text(field),
        FormControl::TextArray(field) => renderer.text_array(field),
        FormControl::Boolean(field) => renderer.boolean(field),
        other => renderer.unsupported(other.name(), other.kind()),
    }
}

/// Plain-text reference renderer: labels, values, and indented banner
/// lines with level markers. Exercises the dispatch contract and keeps a
/// human-readable rendition for the CLI and for tests.
pub struct TextSketch;

impl TextSketch {
    fn banner_lines(out: &mut String, problems: &[Problem], indent: &str) {
        for banner in banners_for(problems) {
            let marker = match banner.level {
                ProblemLevel::Error => "error",
                ProblemLevel::Warning => "warning",
            };
            let _ = writeln!(out, "{indent}[{marker}] {}", banner.text);
        }
    }
}

impl FieldRenderer for TextSketch {
    type Output = String;

    fn text(&self, field: &TextField) -> String {
        let mut out = String::new();
        let title = field.label().unwrap_or_else(|| field.name());
        let value = field.value();
        if value.is_empty() {
            let hint = field.placeholder().unwrap_or("");
            let _ = writeln!(out, "{title}: <{hint}>");
        } else {
            let _ = writeln!(out, "{title}: {value}");
        }
        Self::banner_lines(&mut out, &field.problems_at(ROOT_LOCATION), "  ");
        out
    }

    fn text_array(&self, field: &TextArrayField) -> String {
        let mut out = String::new();
        let title = field.label().unwrap_or_else(|| field.name());
        let _ = writeln!(out, "{title}:");
        let values = field.value();
        let placeholders = field.placeholders();
        for (index, value) in values.iter().enumerate() {
            if value.is_empty() {
                let hint = placeholders.get(index).map_or("", String::as_str);
                let _ = writeln!(out, "  {}. <{hint}>", index + 1);
            } else {
                let _ = writeln!(out, "  {}. {value}", index + 1);
            }
            Self::banner_lines(&mut out, &field.problems_at(&item_location(index)), "     ");
        }
        Self::banner_lines(&mut out, &field.problems_at(ROOT_LOCATION), "  ");
        out
    }

    fn boolean(&self, field: &BooleanField) -> String {
        let mut out = String::new();
        let title = field.label().unwrap_or_else(|| field.name());
        let mark = if field.value() { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {title}");
        Self::banner_lines(&mut out, &field.problems_at(ROOT_LOCATION), "  ");
        out
    }

    fn unsupported(&self, name: &str, kind: FieldKind) -> String {
        format!("({name}: no renderer for '{kind}' fields)\n")
    }
}
