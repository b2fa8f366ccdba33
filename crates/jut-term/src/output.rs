//! Turns formatted blocks into styled lines and writes them out.

use std::io::{self, Write};

use crossterm::style::StyledContent;
use jut_core::format::{Block, LabelKind};

use crate::highlight::highlight;
use crate::markdown::render_markdown;
use crate::panel::{PANEL_CHROME, panel, unframed};
use crate::style::{Style, StyledLine, StyledSpan};
use crate::text::sanitize_for_display;

/// Width used when the terminal size is unknown.
pub const FALLBACK_WIDTH: usize = 80;
/// Narrowest width rendered.
pub const MIN_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Total width in columns, borders included.
    pub width: usize,
    /// Frame content blocks in panels.
    pub border: bool,
}

impl RenderOptions {
    /// Width available to content inside a panel.
    fn content_width(self) -> usize {
        if self.border {
            self.width.saturating_sub(PANEL_CHROME).max(1)
        } else {
            self.width.max(1)
        }
    }

    fn frame(self, content: Vec<StyledLine>) -> Vec<StyledLine> {
        if self.border {
            panel(content, self.width)
        } else {
            unframed(content, self.width)
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: FALLBACK_WIDTH,
            border: true,
        }
    }
}

/// Picks the render width: an explicit override, else the terminal width,
/// capped by `max` and never below [`MIN_WIDTH`].
pub fn terminal_width(override_width: Option<usize>, max: Option<usize>) -> usize {
    let width = override_width.unwrap_or_else(|| {
        crossterm::terminal::size().map_or(FALLBACK_WIDTH, |(cols, _)| usize::from(cols))
    });
    let width = max.map_or(width, |max| width.min(max));
    width.max(MIN_WIDTH)
}

fn label_line(kind: LabelKind, index: usize) -> StyledLine {
    let (prompt, number) = match kind {
        LabelKind::In => (Style::InPrompt, Style::InIndex),
        LabelKind::Out => (Style::OutPrompt, Style::OutIndex),
    };
    StyledLine {
        spans: vec![
            StyledSpan::new(format!("{kind} "), prompt),
            StyledSpan::new(format!("[{index}]:"), number),
        ],
    }
}

/// Renders a single block.
pub fn render_block(block: &Block, options: RenderOptions) -> Vec<StyledLine> {
    match block {
        Block::Label { kind, index } => vec![label_line(*kind, *index)],
        Block::Markdown(source) => {
            let source = sanitize_for_display(source);
            options.frame(render_markdown(&source, options.content_width()))
        }
        Block::Code { language, text } => {
            let text = sanitize_for_display(text);
            options.frame(highlight(text.trim_end_matches('\n'), language))
        }
        Block::Verbatim(text) => {
            let text = sanitize_for_display(text);
            let lines = text
                .trim_end_matches('\n')
                .split('\n')
                .map(|line| StyledLine::plain(line, Style::Text))
                .collect();
            options.frame(lines)
        }
        Block::Placeholder { kind } => options.frame(vec![StyledLine::plain(
            format!("Not rendering {kind}"),
            Style::Placeholder,
        )]),
    }
}

/// Renders blocks in order.
pub fn render_blocks(blocks: &[Block], options: RenderOptions) -> Vec<StyledLine> {
    blocks
        .iter()
        .flat_map(|block| render_block(block, options))
        .collect()
}

/// Writes styled lines, with terminal attributes only when `colors` is set.
pub struct StyledWriter<W: Write> {
    inner: W,
    colors: bool,
}

impl<W: Write> StyledWriter<W> {
    pub fn new(inner: W, colors: bool) -> Self {
        Self { inner, colors }
    }

    pub fn write_line(&mut self, line: &StyledLine) -> io::Result<()> {
        for span in &line.spans {
            if self.colors && span.style != Style::Plain {
                let styled = StyledContent::new(span.style.content_style(), span.text.as_str());
                write!(self.inner, "{styled}")?;
            } else {
                self.inner.write_all(span.text.as_bytes())?;
            }
        }
        self.inner.write_all(b"\n")
    }

    pub fn write_lines(&mut self, lines: &[StyledLine]) -> io::Result<()> {
        for line in lines {
            self.write_line(line)?;
        }
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
