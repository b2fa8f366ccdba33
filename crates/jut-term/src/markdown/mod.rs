//! Markdown rendering for markdown cells.
//!
//! Parses with pulldown-cmark and produces styled lines wrapped to a width.

mod parse;
mod wrap;

pub use parse::render_markdown;
pub use wrap::{WrapOptions, wrap_styled_spans};
