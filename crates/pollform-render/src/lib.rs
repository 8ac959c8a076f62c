//! Presentation boundary for the field engine: kind-based dispatch to a
//! renderer, and problem-to-banner mapping with stable keys.
//!
//! No visual rendering lives here; the contract is the point. `TextSketch`
//! is a plain-text reference implementation used by the CLI and by tests.

pub mod banner;
pub mod dispatch;

pub use banner::{MessageBanner, banner_key, banners_for, dismiss};
pub use dispatch::{FieldRenderer, TextSketch, render_field};
