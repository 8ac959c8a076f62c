use serde::{Deserialize, Serialize};

/// A boolean verdict with an optional human-readable reason.
///
/// Used uniformly for "is this field enabled", "is this field visible or
/// required", and "can the user perform this action". A negative verdict's
/// reason explains the denial and is surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Decision {
    Plain(bool),
    Explained {
        verdict: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl Decision {
    pub fn verdict(&self) -> bool {
        match self {
            Decision::Plain(verdict) => *verdict,
            Decision::Explained { verdict, .. } => *verdict,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Decision::Plain(_) => None,
            Decision::Explained { reason, .. } => reason.as_deref(),
        }
    }
}

impl From<bool> for Decision {
    fn from(verdict: bool) -> Self {
        Decision::Plain(verdict)
    }
}

pub fn allow() -> Decision {
    Decision::Plain(true)
}

pub fn allow_because(reason: impl Into<String>) -> Decision {
    Decision::Explained {
        verdict: true,
        reason: Some(reason.into()),
    }
}

pub fn deny(reason: impl Into<String>) -> Decision {
    Decision::Explained {
        verdict: false,
        reason: Some(reason.into()),
    }
}

pub fn invert_decision(decision: &Decision) -> Decision {
    Decision::Explained {
        verdict: !decision.verdict(),
        reason: decision.reason().map(str::to_string),
    }
}

/// Combine two decisions: short-circuits to the first false decision
/// verbatim; concatenates reasons with `"; "` only when both are true.
pub fn and_decisions(a: Decision, b: Decision) -> Decision {
    if !a.verdict() {
        return a;
    }
    if !b.verdict() {
        return b;
    }
    let reason = match (a.reason(), b.reason()) {
        (Some(left), Some(right)) => Some(format!("{left}; {right}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    };
    Decision::Explained {
        verdict: true,
        reason,
    }
}

/// Resolve an optional decision to a verdict; absence yields the default.
pub fn verdict_or(decision: Option<&Decision>, default_verdict: bool) -> bool {
    decision.map_or(default_verdict, Decision::verdict)
}

pub fn reason_of(decision: Option<&Decision>) -> Option<&str> {
    decision.and_then(Decision::reason)
}

pub fn reason_for_denial(decision: Option<&Decision>) -> Option<&str> {
    decision.filter(|d| !d.verdict()).and_then(Decision::reason)
}

pub fn reason_for_allowing(decision: Option<&Decision>) -> Option<&str> {
    decision.filter(|d| d.verdict()).and_then(Decision::reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_of_two_allows_is_true() {
        let combined = and_decisions(allow(), allow());
        assert!(combined.verdict());
        assert_eq!(combined.reason(), None);
    }

    #[test]
    fn and_short_circuits_to_first_denial_verbatim() {
        assert_eq!(and_decisions(allow(), deny("x")), deny("x"));
        assert_eq!(and_decisions(deny("a"), deny("b")), deny("a"));
    }

    #[test]
    fn and_concatenates_reasons_of_two_true_verdicts() {
        let combined = and_decisions(allow_because("signed in"), allow_because("holds tokens"));
        assert!(combined.verdict());
        assert_eq!(combined.reason(), Some("signed in; holds tokens"));
    }

    #[test]
    fn invert_flips_verdict_and_keeps_reason() {
        let inverted = invert_decision(&deny("closed"));
        assert!(inverted.verdict());
        assert_eq!(inverted.reason(), Some("closed"));
    }

    #[test]
    fn absent_decision_resolves_to_default() {
        assert!(verdict_or(None, true));
        assert!(!verdict_or(None, false));
        assert_eq!(reason_of(None), None);
    }

    #[test]
    fn denial_and_allowance_reasons_are_disjoint() {
        let denied = deny("not yours");
        assert_eq!(reason_for_denial(Some(&denied)), Some("not yours"));
        assert_eq!(reason_for_allowing(Some(&denied)), None);

        let allowed = allow_because("owner");
        assert_eq!(reason_for_denial(Some(&allowed)), None);
        assert_eq!(reason_for_allowing(Some(&allowed)), Some("owner"));
    }

    #[test]
    fn decisions_deserialize_from_bare_booleans_and_objects() {
        let plain: Decision = serde_json::from_str("true").expect("bool");
        assert!(plain.verdict());
        let explained: Decision =
            serde_json::from_str(r#"{"verdict":false,"reason":"closed"}"#).expect("object");
        assert!(!explained.verdict());
        assert_eq!(explained.reason(), Some("closed"));
    }
}
