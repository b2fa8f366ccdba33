//! Terminal rendering for jut.
//!
//! Blocks from `jut-core` become [`StyledLine`]s with semantic [`Style`]s;
//! [`StyledWriter`] maps those to terminal attributes on output.

pub mod highlight;
pub mod markdown;
pub mod output;
pub mod pager;
pub mod panel;
pub mod style;
pub mod text;

pub use output::{RenderOptions, StyledWriter, render_block, render_blocks, terminal_width};
pub use style::{Style, StyledLine, StyledSpan};
