use std::fmt;
use std::rc::Rc;

/// A message that may interpolate a numeric bound or live count.
///
/// Either a fixed string, or a render function receiving the amount.
#[derive(Clone)]
pub enum NumberTemplate {
    Text(String),
    Render(Rc<dyn Fn(usize) -> String>),
}

impl NumberTemplate {
    pub fn render(f: impl Fn(usize) -> String + 'static) -> Self {
        NumberTemplate::Render(Rc::new(f))
    }

    pub fn resolve(&self, amount: usize) -> String {
        match self {
            NumberTemplate::Text(text) => text.clone(),
            NumberTemplate::Render(f) => f(amount),
        }
    }
}

impl fmt::Debug for NumberTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberTemplate::Text(text) => f.debug_tuple("Text").field(text).finish(),
            NumberTemplate::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl From<&str> for NumberTemplate {
    fn from(text: &str) -> Self {
        NumberTemplate::Text(text.to_string())
    }
}

impl From<String> for NumberTemplate {
    fn from(text: String) -> Self {
        NumberTemplate::Text(text)
    }
}

/// Phrase a live count: "there is none", "there is only one",
/// "there are only 7".
pub fn there_is_only(amount: usize) -> String {
    match amount {
        0 => "there is none".to_string(),
        1 => "there is only one".to_string(),
        n => format!("there are only {n}"),
    }
}

/// Phrase "at least N items" for configuration messages.
///
/// # Panics
///
/// Panics when `amount` is zero: requesting "at least 0 items" phrased as
/// a count message is a defect in the calling code, not bad user input.
pub fn at_least_x_items(amount: usize) -> String {
    match amount {
        0 => panic!("what do you mean by 'at least 0 items'?"),
        1 => "at least one item".to_string(),
        n => format!("at least {n} items"),
    }
}
