//! Box-drawing panels around block content.

use crate::style::{Style, StyledLine, StyledSpan};
use crate::text::break_line;

/// Columns taken by the left and right border plus one space of padding each.
pub const PANEL_CHROME: usize = 4;

/// Frames `content` in a rounded box `width` columns wide.
///
/// Content wider than the inner area is hard-broken.
pub fn panel(content: Vec<StyledLine>, width: usize) -> Vec<StyledLine> {
    let width = width.max(PANEL_CHROME + 1);
    let inner = width - PANEL_CHROME;
    let bar = "─".repeat(width - 2);

    let mut lines = Vec::with_capacity(content.len() + 2);
    lines.push(StyledLine::plain(format!("╭{bar}╮"), Style::Border));
    for line in &content {
        for piece in break_line(line, inner) {
            let pad = inner - piece.width().min(inner);
            let mut spans = vec![StyledSpan::new("│ ", Style::Border)];
            spans.extend(piece.spans);
            spans.push(StyledSpan::new(" ".repeat(pad), Style::Plain));
            spans.push(StyledSpan::new(" │", Style::Border));
            lines.push(StyledLine { spans });
        }
    }
    lines.push(StyledLine::plain(format!("╰{bar}╯"), Style::Border));
    lines
}

/// Borderless variant of [`panel`]: content is only broken to `width`.
pub fn unframed(content: Vec<StyledLine>, width: usize) -> Vec<StyledLine> {
    content
        .iter()
        .flat_map(|line| break_line(line, width))
        .collect()
}
