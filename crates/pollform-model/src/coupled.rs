use crate::template::NumberTemplate;

/// A tunable expressible either as a bare value or as a value/message pair.
///
/// Expanded once, at configuration-resolution time, into a concrete pair:
/// supplying only the bound keeps the default message; supplying the pair
/// overrides both together.
#[derive(Debug, Clone)]
pub enum CoupledData<V, M> {
    Bare(V),
    Tagged(V, M),
}

pub fn expand_coupled<V, M>(value: Option<CoupledData<V, M>>, fallback: (V, M)) -> (V, M) {
    match value {
        None => fallback,
        Some(CoupledData::Bare(v)) => (v, fallback.1),
        Some(CoupledData::Tagged(v, m)) => (v, m),
    }
}

impl From<usize> for CoupledData<usize, NumberTemplate> {
    fn from(bound: usize) -> Self {
        CoupledData::Bare(bound)
    }
}

impl From<(usize, NumberTemplate)> for CoupledData<usize, NumberTemplate> {
    fn from((bound, message): (usize, NumberTemplate)) -> Self {
        CoupledData::Tagged(bound, message)
    }
}

impl From<(usize, &str)> for CoupledData<usize, NumberTemplate> {
    fn from((bound, message): (usize, &str)) -> Self {
        CoupledData::Tagged(bound, message.into())
    }
}

impl From<bool> for CoupledData<bool, String> {
    fn from(flag: bool) -> Self {
        CoupledData::Bare(flag)
    }
}

impl From<(bool, &str)> for CoupledData<bool, String> {
    fn from((flag, message): (bool, &str)) -> Self {
        CoupledData::Tagged(flag, message.to_string())
    }
}

impl From<(bool, String)> for CoupledData<bool, String> {
    fn from((flag, message): (bool, String)) -> Self {
        CoupledData::Tagged(flag, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_configuration_falls_back_entirely() {
        let (bound, message) =
            expand_coupled::<usize, String>(None, (3, "default".to_string()));
        assert_eq!(bound, 3);
        assert_eq!(message, "default");
    }

    #[test]
    fn bare_value_keeps_the_default_message() {
        let (bound, message) =
            expand_coupled(Some(CoupledData::Bare(5)), (3, "default".to_string()));
        assert_eq!(bound, 5);
        assert_eq!(message, "default");
    }

    #[test]
    fn pair_overrides_both_together() {
        let (bound, message) = expand_coupled(
            Some(CoupledData::Tagged(5, "custom".to_string())),
            (3, "default".to_string()),
        );
        assert_eq!(bound, 5);
        assert_eq!(message, "custom");
    }
}
