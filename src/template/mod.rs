//! Placeholder extraction, metadata reconciliation and template rendering.
//!
//! A template is plain text containing `{name}` tokens. The pipeline is:
//! - `extract_placeholders` scans a template body and records every token,
//!   in order, duplicates included (stored as derived data on a notification).
//! - `reconcile` validates a caller-supplied metadata bag against the
//!   declared placeholder set and produces the substitution map.
//! - `render` applies the substitution map to the template body, yielding
//!   the final message contents.
//!
//! All three are pure functions with no storage dependency.

mod extract;
mod reconcile;
mod render;

pub use extract::extract_placeholders;
pub use reconcile::{reconcile, MetadataError};
pub use render::render;
