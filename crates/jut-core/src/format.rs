//! Cell formatting: turns one cell into an ordered list of display blocks.
//!
//! Formatting is stateless. The only input carried between cells is the
//! absolute cell index, which callers take from [`Notebook::cells_in`].
//!
//! [`Notebook::cells_in`]: crate::notebook::Notebook::cells_in

use std::fmt;

use crate::content::{CONTENT_KINDS, RendererKind, is_text_kind};
use crate::notebook::{Cell, Output};

/// Which side of a cell a label introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    In,
    Out,
}

/// A unit of display output, independent of any terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `In [n]:` / `Out [n]:` prompt.
    Label { kind: LabelKind, index: usize },
    /// Markdown source, rendered as markdown.
    Markdown(String),
    /// Text highlighted with the named language.
    Code { language: String, text: String },
    /// Text shown as-is.
    Verbatim(String),
    /// Stand-in for content the terminal cannot draw.
    Placeholder { kind: RendererKind },
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::In => f.write_str("In"),
            LabelKind::Out => f.write_str("Out"),
        }
    }
}

impl Block {
    /// Text of a label block, e.g. `In [3]:`.
    pub fn label_text(kind: LabelKind, index: usize) -> String {
        format!("{kind} [{index}]:")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormatOptions<'a> {
    /// Language of code cell sources.
    pub language: &'a str,
    /// Whether code cell outputs are rendered.
    pub include_outputs: bool,
}

impl Default for FormatOptions<'_> {
    fn default() -> Self {
        Self {
            language: "python",
            include_outputs: true,
        }
    }
}

/// Text extracted from an output together with the renderer to draw it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputText {
    pub text: String,
    pub renderer: RendererKind,
}

impl OutputText {
    fn plain(text: String) -> Self {
        Self {
            text,
            renderer: RendererKind::TEXT,
        }
    }
}

/// Formats the cell at absolute 1-based position `index`.
pub fn format_cell(index: usize, cell: &Cell, options: FormatOptions<'_>) -> Vec<Block> {
    let input_label = Block::Label {
        kind: LabelKind::In,
        index,
    };

    let input = match cell {
        Cell::Markdown { .. } => Block::Markdown(cell.source().to_string()),
        Cell::Raw { .. } => Block::Verbatim(cell.source().to_string()),
        Cell::Code { .. } => Block::Code {
            language: options.language.to_string(),
            text: cell.source().to_string(),
        },
    };

    let mut blocks = vec![input_label, input];
    if options.include_outputs {
        for output in cell.outputs() {
            blocks.push(Block::Label {
                kind: LabelKind::Out,
                index,
            });
            blocks.push(output_block(output));
        }
    }
    blocks
}

/// Chooses the payload of an output and the renderer for it.
///
/// - `stream`: its text.
/// - `execute_result`: the `text/plain` payload.
/// - `display_data`: the first non-text kind from [`CONTENT_KINDS`] with a
///   payload, then any other non-text kind in document order.
/// - anything else: empty text.
pub fn output_text(output: &Output) -> OutputText {
    match output {
        Output::Stream { text, .. } => OutputText::plain(text.clone()),
        Output::ExecuteResult { data, .. } => {
            OutputText::plain(data.text("text/plain").unwrap_or_default())
        }
        Output::DisplayData { data } => {
            let declared = CONTENT_KINDS
                .iter()
                .filter(|(kind, _)| !is_text_kind(kind))
                .find_map(|(kind, renderer)| {
                    data.text(kind)
                        .filter(|text| !text.is_empty())
                        .map(|text| OutputText {
                            text,
                            renderer: *renderer,
                        })
                });

            declared
                .or_else(|| {
                    data.kinds()
                        .filter(|kind| !is_text_kind(kind))
                        .find_map(|kind| data.text(kind).filter(|text| !text.is_empty()))
                        .map(OutputText::plain)
                })
                .unwrap_or_else(|| OutputText::plain(String::new()))
        }
        Output::Error { .. } | Output::Unknown => OutputText::plain(String::new()),
    }
}

fn output_block(output: &Output) -> Block {
    let OutputText { text, renderer } = output_text(output);
    if renderer.is_terminal_renderable() {
        Block::Code {
            language: renderer.name().to_string(),
            text,
        }
    } else {
        Block::Placeholder { kind: renderer }
    }
}
