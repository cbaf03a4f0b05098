//! Turns request-scoped context into the text blocks that go into a prompt.

pub mod json;
pub mod metadata;
pub mod results;
pub mod templates;

pub use metadata::format_metadata;
pub use results::{format_rows, DEFAULT_MAX_ROWS};
