use serde::{Deserialize, Serialize};

/// Default diagnostic location for problems that concern the whole field.
pub const ROOT_LOCATION: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemLevel {
    Warning,
    Error,
}

/// A single diagnostic, canonicalized: level and location are always set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Human-readable message describing the issue.
    pub message: String,
    /// Severity level.
    pub level: ProblemLevel,
    /// Stable identity independent of wording, used for deduplication/removal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Which sub-part of a compound value the problem applies to.
    pub location: String,
}

impl Problem {
    pub fn is_error(&self) -> bool {
        self.level == ProblemLevel::Error
    }
}

/// A diagnostic as a validator reports it, before location/level defaulting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemReport {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ProblemLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ProblemReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: ProblemLevel) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Attach the report to a specific diagnostic location.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl From<Problem> for ProblemReport {
    fn from(problem: Problem) -> Self {
        Self {
            message: problem.message,
            signature: problem.signature,
            level: Some(problem.level),
            location: Some(problem.location),
        }
    }
}

/// What a validator may hand back for one diagnostic: a terse string
/// (possibly `signature: message`-shaped) or a structured report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemSeed {
    Text(String),
    Report(ProblemReport),
}

impl From<&str> for ProblemSeed {
    fn from(text: &str) -> Self {
        ProblemSeed::Text(text.to_string())
    }
}

impl From<String> for ProblemSeed {
    fn from(text: String) -> Self {
        ProblemSeed::Text(text)
    }
}

impl From<ProblemReport> for ProblemSeed {
    fn from(report: ProblemReport) -> Self {
        ProblemSeed::Report(report)
    }
}

/// Zero, one, or many seeds produced by a single validator invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidatorOutput {
    #[default]
    None,
    Single(ProblemSeed),
    Many(Vec<ProblemSeed>),
}

impl ValidatorOutput {
    pub fn text(message: impl Into<String>) -> Self {
        ValidatorOutput::Single(ProblemSeed::Text(message.into()))
    }

    pub fn report(report: ProblemReport) -> Self {
        ValidatorOutput::Single(ProblemSeed::Report(report))
    }

    pub fn many(seeds: Vec<ProblemSeed>) -> Self {
        ValidatorOutput::Many(seeds)
    }

    pub fn into_seeds(self) -> Vec<ProblemSeed> {
        match self {
            ValidatorOutput::None => Vec::new(),
            ValidatorOutput::Single(seed) => vec![seed],
            ValidatorOutput::Many(seeds) => seeds,
        }
    }
}

impl<S: Into<ProblemSeed>> From<Option<S>> for ValidatorOutput {
    fn from(seed: Option<S>) -> Self {
        match seed {
            None => ValidatorOutput::None,
            Some(seed) => ValidatorOutput::Single(seed.into()),
        }
    }
}

/// Canonicalize one validator seed into a located problem.
///
/// An empty message means "no problem". A bare string containing a colon
/// whose prefix has no embedded space is parsed as `signature: message`;
/// otherwise the whole string becomes the message. Structured reports pass
/// through; a report without an explicit level defaults to `error`.
pub fn wrap_problem(
    seed: ProblemSeed,
    default_location: &str,
    default_level: ProblemLevel,
) -> Option<Problem> {
    match seed {
        ProblemSeed::Text(text) => {
            if text.is_empty() {
                return None;
            }
            if let Some(cut) = text.find(':') {
                let prefix = &text[..cut];
                if !prefix.contains(' ') {
                    return Some(Problem {
                        signature: Some(prefix.to_string()),
                        message: text[cut + 1..].trim().to_string(),
                        level: default_level,
                        location: default_location.to_string(),
                    });
                }
            }
            Some(Problem {
                signature: None,
                message: text,
                level: default_level,
                location: default_location.to_string(),
            })
        }
        ProblemSeed::Report(report) => Some(Problem {
            message: report.message,
            signature: report.signature,
            level: report.level.unwrap_or(ProblemLevel::Error),
            location: report
                .location
                .unwrap_or_else(|| default_location.to_string()),
        }),
    }
}

/// Boolean-or over the levels of a problem list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemChecks {
    pub has_warning: bool,
    pub has_error: bool,
}

pub fn check_problems(problems: &[Problem]) -> ProblemChecks {
    ProblemChecks {
        has_warning: problems.iter().any(|p| p.level == ProblemLevel::Warning),
        has_error: problems.iter().any(|p| p.level == ProblemLevel::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_problem_parses_signature_prefix() {
        let problem = wrap_problem(
            "rangeError: value is too big".into(),
            "value-0",
            ProblemLevel::Error,
        )
        .expect("problem");
        assert_eq!(problem.signature.as_deref(), Some("rangeError"));
        assert_eq!(problem.message, "value is too big");
        assert_eq!(problem.level, ProblemLevel::Error);
        assert_eq!(problem.location, "value-0");
    }

    #[test]
    fn wrap_problem_defaults_location_for_plain_strings() {
        let problem = wrap_problem("value is too big".into(), "value-0", ProblemLevel::Error)
            .expect("problem");
        assert_eq!(problem.signature, None);
        assert_eq!(problem.message, "value is too big");
        assert_eq!(problem.level, ProblemLevel::Error);
        assert_eq!(problem.location, "value-0");
    }

    #[test]
    fn wrap_problem_keeps_sentences_with_colons_whole() {
        let problem = wrap_problem(
            "value is too big: really".into(),
            "value-0",
            ProblemLevel::Error,
        )
        .expect("problem");
        assert_eq!(problem.signature, None);
        assert_eq!(problem.message, "value is too big: really");
        assert_eq!(problem.location, "value-0");
    }

    #[test]
    fn wrap_problem_treats_empty_text_as_no_problem() {
        assert_eq!(wrap_problem("".into(), "root", ProblemLevel::Error), None);
    }

    #[test]
    fn wrap_problem_defaults_report_level_and_location() {
        let problem = wrap_problem(
            ProblemReport::new("too short").into(),
            "value-3",
            ProblemLevel::Warning,
        )
        .expect("problem");
        assert_eq!(problem.level, ProblemLevel::Error);
        assert_eq!(problem.location, "value-3");
    }

    #[test]
    fn wrap_problem_respects_explicit_report_fields() {
        let report = ProblemReport::new("heads up")
            .with_level(ProblemLevel::Warning)
            .at("value-1");
        let problem = wrap_problem(report.into(), "root", ProblemLevel::Error).expect("problem");
        assert_eq!(problem.level, ProblemLevel::Warning);
        assert_eq!(problem.location, "value-1");
    }

    #[test]
    fn check_problems_ors_over_levels() {
        let problems = vec![
            Problem {
                message: "a".to_string(),
                level: ProblemLevel::Warning,
                signature: None,
                location: ROOT_LOCATION.to_string(),
            },
            Problem {
                message: "b".to_string(),
                level: ProblemLevel::Error,
                signature: None,
                location: ROOT_LOCATION.to_string(),
            },
        ];
        let checks = check_problems(&problems);
        assert!(checks.has_warning);
        assert!(checks.has_error);
        assert_eq!(check_problems(&[]), ProblemChecks::default());
    }
}
