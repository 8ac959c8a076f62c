pub mod coupled;
pub mod decision;
pub mod error;
pub mod problem;
pub mod template;

pub use coupled::{CoupledData, expand_coupled};
pub use decision::{
    Decision, allow, allow_because, and_decisions, deny, invert_decision, reason_for_allowing,
    reason_for_denial, reason_of, verdict_or,
};
pub use error::{FormError, Result};
pub use problem::{
    Problem, ProblemChecks, ProblemLevel, ProblemReport, ProblemSeed, ROOT_LOCATION,
    ValidatorOutput, check_problems, wrap_problem,
};
pub use template::{NumberTemplate, at_least_x_items, there_is_only};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problems_serialize_with_lowercase_levels() {
        let problem = Problem {
            message: "too short".to_string(),
            level: ProblemLevel::Warning,
            signature: None,
            location: ROOT_LOCATION.to_string(),
        };
        let json = serde_json::to_string(&problem).expect("serialize problem");
        assert!(json.contains(r#""level":"warning""#));
        let round: Problem = serde_json::from_str(&json).expect("deserialize problem");
        assert_eq!(round, problem);
    }

    #[test]
    fn coupled_bounds_accept_bare_and_tagged_forms() {
        let bare: CoupledData<usize, NumberTemplate> = 5.into();
        let (bound, message) = expand_coupled(
            Some(bare),
            (1, NumberTemplate::render(|n| format!("at least {n}"))),
        );
        assert_eq!(bound, 5);
        assert_eq!(message.resolve(bound), "at least 5");

        let tagged: CoupledData<usize, NumberTemplate> = (5, "too short").into();
        let (bound, message) = expand_coupled(
            Some(tagged),
            (1, NumberTemplate::render(|n| format!("at least {n}"))),
        );
        assert_eq!(bound, 5);
        assert_eq!(message.resolve(bound), "too short");
    }
}
