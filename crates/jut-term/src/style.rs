//! Styled text primitives and their terminal styles.

use crossterm::style::{ContentStyle, Stylize};
use unicode_width::UnicodeWidthStr;

/// A styled span of text.
///
/// Styles are semantic; [`Style::content_style`] maps them to terminal
/// attributes only when a line is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A line of styled spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn empty() -> Self {
        StyledLine { spans: vec![] }
    }

    /// A line made of one span.
    pub fn plain(text: impl Into<String>, style: Style) -> Self {
        StyledLine {
            spans: vec![StyledSpan::new(text, style)],
        }
    }

    /// Display width in terminal columns.
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    /// Text without styles.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Semantic style identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// No styling.
    Plain,
    /// Body text of markdown cells.
    Text,
    /// "In " prompt word.
    InPrompt,
    /// "[n]:" after the In prompt.
    InIndex,
    /// "Out " prompt word.
    OutPrompt,
    /// "[n]:" after the Out prompt.
    OutIndex,
    /// Panel border characters.
    Border,
    /// "Not rendering ..." placeholder.
    Placeholder,

    // Code highlighting
    /// Code without a more specific token style.
    Code,
    Keyword,
    Builtin,
    StringLiteral,
    Number,
    Comment,
    /// HTML/XML tag.
    Tag,

    // Markdown styles
    /// Inline code (`code`).
    CodeInline,
    /// Code fence markers.
    CodeFence,
    /// *italic*
    Emphasis,
    /// **bold**
    Strong,
    /// ~~struck~~
    Strikethrough,
    H1,
    H2,
    /// Heading level 3 and below.
    H3,
    Link,
    BlockQuote,
    ListBullet,
    ListNumber,
    /// Horizontal rule.
    Rule,
}

impl Style {
    /// Terminal attributes for this style.
    pub fn content_style(self) -> ContentStyle {
        let base = ContentStyle::new();
        match self {
            Style::Plain | Style::Text | Style::Code => base,
            Style::InPrompt => base.green(),
            Style::InIndex => base.green().bold(),
            Style::OutPrompt => base.red(),
            Style::OutIndex => base.red().bold(),
            Style::Border => base.dark_grey(),
            Style::Placeholder => base.red().bold(),

            Style::Keyword => base.magenta().bold(),
            Style::Builtin => base.cyan(),
            Style::StringLiteral => base.green(),
            Style::Number => base.yellow(),
            Style::Comment => base.dark_grey().italic(),
            Style::Tag => base.blue(),

            Style::CodeInline => base.cyan(),
            Style::CodeFence | Style::Rule => base.dark_grey(),
            Style::Emphasis => base.italic(),
            Style::Strong => base.bold(),
            Style::Strikethrough => base.crossed_out(),
            Style::H1 => base.bold().underlined(),
            Style::H2 => base.bold(),
            Style::H3 => base.italic().white(),
            Style::Link => base.cyan().underlined(),
            Style::BlockQuote => base.green().italic(),
            Style::ListBullet | Style::ListNumber => base.yellow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width_counts_wide_chars() {
        let line = StyledLine {
            spans: vec![
                StyledSpan::new("ab", Style::Plain),
                StyledSpan::new("日本", Style::Strong),
            ],
        };
        assert_eq!(line.width(), 6);
        assert_eq!(line.text(), "ab日本");
    }

    #[test]
    fn test_plain_styles_have_no_attributes() {
        assert_eq!(Style::Plain.content_style(), ContentStyle::new());
        assert_ne!(Style::InIndex.content_style(), ContentStyle::new());
    }
}
