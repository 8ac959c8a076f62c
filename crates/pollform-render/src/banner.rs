//! Removable, levelled message banners derived from a field's problems.
//!
//! Banners are keyed by the problem's signature when present, else by its
//! message text, so removing or animating a specific banner stays stable
//! across re-renders even when other diagnostics in the same location
//! change.

use serde::Serialize;

use pollform_model::{Problem, ProblemLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageBanner {
    /// Stable identity: the problem's signature, else its message text.
    pub key: String,
    pub text: String,
    pub level: ProblemLevel,
}

pub fn banner_key(problem: &Problem) -> &str {
    problem.signature.as_deref().unwrap_or(&problem.message)
}

pub fn banners_for(problems: &[Problem]) -> Vec<MessageBanner> {
    problems
        .iter()
        .map(|problem| MessageBanner {
            key: banner_key(problem).to_string(),
            text: problem.message.clone(),
            level: problem.level,
        })
        .collect()
}

/// Remove the banner(s) carrying `key`; other banners are untouched.
pub fn dismiss(banners: &mut Vec<MessageBanner>, key: &str) {
    banners.retain(|banner| banner.key != key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollform_model::ROOT_LOCATION;

    fn problem(message: &str, signature: Option<&str>) -> Problem {
        Problem {
            message: message.to_string(),
            level: ProblemLevel::Error,
            signature: signature.map(str::to_string),
            location: ROOT_LOCATION.to_string(),
        }
    }

    #[test]
    fn banners_prefer_signatures_over_message_text() {
        let problems = vec![
            problem("value is too big", Some("rangeError")),
            problem("please fill this in", None),
        ];
        let banners = banners_for(&problems);
        assert_eq!(banners[0].key, "rangeError");
        assert_eq!(banners[1].key, "please fill this in");
    }

    #[test]
    fn dismiss_removes_exactly_the_keyed_banner() {
        let problems = vec![
            problem("value is too big", Some("rangeError")),
            problem("please fill this in", None),
        ];
        let mut banners = banners_for(&problems);
        dismiss(&mut banners, "rangeError");
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].key, "please fill this in");
    }
}
