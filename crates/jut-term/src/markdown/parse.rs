//! Markdown to styled lines.
//!
//! Inline spans are collected per paragraph, heading or list item and then
//! wrapped; code blocks are highlighted and tables are drawn by comfy-table.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use unicode_width::UnicodeWidthStr;

use super::wrap::{WrapOptions, wrap_styled_spans};
use crate::highlight::highlight;
use crate::style::{Style, StyledLine, StyledSpan};
use crate::text::break_line;

/// Renders markdown text into styled lines no wider than `width`.
///
/// Raw HTML and footnote references are dropped; images show their alt text.
pub fn render_markdown(text: &str, width: usize) -> Vec<StyledLine> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = MarkdownRenderer::new(width);
    for event in Parser::new_ext(text, options) {
        renderer.process_event(event);
    }
    renderer.finish()
}

/// Cell text of a markdown table, rendered with comfy-table once complete.
#[derive(Debug, Default)]
struct TableBuffer {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    in_head: bool,
}

impl TableBuffer {
    fn end_cell(&mut self) {
        let cell = std::mem::take(&mut self.cell);
        self.row.push(cell.trim().to_string());
    }

    fn end_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        if self.in_head {
            self.header = row;
        } else {
            self.rows.push(row);
        }
    }

    fn render(&self, width: usize) -> Vec<String> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(width.min(usize::from(u16::MAX)) as u16);
        if !self.header.is_empty() {
            table.set_header(self.header.clone());
        }
        for row in &self.rows {
            table.add_row(row.clone());
        }
        table.lines().collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct ListLevel {
    /// Next item number for ordered lists.
    next: Option<u64>,
}

struct MarkdownRenderer {
    width: usize,
    lines: Vec<StyledLine>,
    /// Inline spans of the paragraph/heading/item being collected.
    spans: Vec<StyledSpan>,
    styles: Vec<Style>,
    lists: Vec<ListLevel>,
    /// Marker of the list item whose first paragraph is still pending.
    item_marker: Option<StyledSpan>,
    quote_depth: usize,
    /// `Some(lang)` while inside a code block.
    code_block: Option<String>,
    code_text: String,
    table: Option<TableBuffer>,
}

impl MarkdownRenderer {
    fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            lines: Vec::new(),
            spans: Vec::new(),
            styles: vec![Style::Text],
            lists: Vec::new(),
            item_marker: None,
            quote_depth: 0,
            code_block: None,
            code_text: String::new(),
            table: None,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or(Style::Text)
    }

    fn pop_style(&mut self) {
        if self.styles.len() > 1 {
            self.styles.pop();
        }
    }

    fn process_event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.add_text(&text),
            Event::Code(code) => self.add_inline_code(&code),
            Event::SoftBreak => self.add_text(" "),
            Event::HardBreak => self.add_text("\n"),
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.spans.push(StyledSpan::new(marker, Style::ListBullet));
            }
            Event::Rule => {
                self.flush_block();
                let rule = "─".repeat(self.width.min(40));
                self.lines.push(StyledLine::plain(rule, Style::Rule));
                self.blank_line();
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.add_inline_code(&math);
            }
            Event::Html(_) | Event::InlineHtml(_) | Event::FootnoteReference(_) => {}
        }
    }

    fn start_tag(&mut self, tag: Tag) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_block();
                self.styles.push(match level {
                    HeadingLevel::H1 => Style::H1,
                    HeadingLevel::H2 => Style::H2,
                    _ => Style::H3,
                });
            }
            Tag::CodeBlock(kind) => {
                self.flush_block();
                self.code_block = Some(match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                });
            }
            Tag::List(start) => {
                self.flush_block();
                self.lists.push(ListLevel { next: start });
            }
            Tag::Item => {
                self.flush_block();
                let marker = match self.lists.last_mut() {
                    Some(ListLevel { next: Some(n) }) => {
                        let marker = StyledSpan::new(format!("{n}. "), Style::ListNumber);
                        *n += 1;
                        marker
                    }
                    _ => StyledSpan::new("• ", Style::ListBullet),
                };
                self.item_marker = Some(marker);
            }
            Tag::BlockQuote(_) => {
                self.flush_block();
                self.quote_depth += 1;
                self.styles.push(Style::BlockQuote);
            }
            Tag::Emphasis => self.styles.push(Style::Emphasis),
            Tag::Strong => self.styles.push(Style::Strong),
            Tag::Strikethrough => self.styles.push(Style::Strikethrough),
            Tag::Link { .. } | Tag::Image { .. } => self.styles.push(Style::Link),
            Tag::Table(_) => {
                self.flush_block();
                self.table = Some(TableBuffer::default());
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                }
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_block();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::Heading(_) => {
                self.flush_block();
                self.pop_style();
                self.blank_line();
            }
            TagEnd::CodeBlock => {
                self.flush_code_block();
                self.blank_line();
            }
            TagEnd::Item => self.flush_block(),
            TagEnd::List(_) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank_line();
                }
            }
            TagEnd::BlockQuote(_) => {
                self.flush_block();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.pop_style();
            }
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::Image => self.pop_style(),
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.end_cell();
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                    table.in_head = false;
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.end_row();
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    let width = self.width;
                    self.lines.extend(
                        table
                            .render(width)
                            .into_iter()
                            .map(|line| StyledLine::plain(line, Style::Plain)),
                    );
                }
                self.blank_line();
            }
            _ => {}
        }
    }

    fn add_text(&mut self, text: &str) {
        if self.code_block.is_some() {
            self.code_text.push_str(text);
        } else if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&text.replace('\n', " "));
        } else if !text.is_empty() {
            self.spans.push(StyledSpan::new(text, self.style()));
        }
    }

    fn add_inline_code(&mut self, code: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(&format!("`{code}`"));
        } else {
            self.spans.push(StyledSpan::new(code, Style::CodeInline));
        }
    }

    /// Appends a blank separator line, never two in a row.
    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| !l.spans.is_empty()) {
            self.lines.push(StyledLine::empty());
        }
    }

    /// Prefix for lines inside block quotes.
    fn quote_prefix(&self) -> Vec<StyledSpan> {
        if self.quote_depth == 0 {
            return Vec::new();
        }
        vec![StyledSpan::new("│ ".repeat(self.quote_depth), Style::BlockQuote)]
    }

    /// Wraps the collected inline spans as a paragraph, heading or list item.
    fn flush_block(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let quote = self.quote_prefix();

        let opts = if let Some(marker) = self.item_marker.take() {
            let indent = "  ".repeat(self.lists.len().saturating_sub(1));
            let hang = " ".repeat(marker.text.width());
            let mut first = quote.clone();
            first.push(StyledSpan::new(indent.clone(), Style::Plain));
            first.push(marker);
            let mut rest = quote;
            rest.push(StyledSpan::new(format!("{indent}{hang}"), Style::Plain));
            WrapOptions {
                width: self.width,
                first_prefix: first,
                rest_prefix: rest,
            }
        } else if !self.lists.is_empty() {
            // Continuation paragraph of a list item.
            let indent = "  ".repeat(self.lists.len());
            let mut prefix = quote;
            prefix.push(StyledSpan::new(indent, Style::Plain));
            WrapOptions::with_prefix(self.width, prefix)
        } else {
            WrapOptions::with_prefix(self.width, quote)
        };

        self.lines.extend(wrap_styled_spans(&spans, &opts));
    }

    fn flush_code_block(&mut self) {
        let lang = self.code_block.take().unwrap_or_default();
        let code = std::mem::take(&mut self.code_text);

        let fence = format!("```{lang}");
        self.lines.push(StyledLine::plain(fence, Style::CodeFence));
        let inner = self.width.saturating_sub(2).max(1);
        for line in highlight(code.trim_end_matches('\n'), &lang) {
            for piece in break_line(&line, inner) {
                let mut spans = vec![StyledSpan::new("  ", Style::Plain)];
                spans.extend(piece.spans);
                self.lines.push(StyledLine { spans });
            }
        }
        self.lines.push(StyledLine::plain("```", Style::CodeFence));
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if self.code_block.is_some() {
            self.flush_code_block();
        }
        self.flush_block();

        while self.lines.last().is_some_and(|l| l.spans.is_empty()) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(StyledLine::empty());
        }
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_style(lines: &[StyledLine], style: Style) -> bool {
        lines.iter().any(|l| l.spans.iter().any(|s| s.style == style))
    }

    fn joined(lines: &[StyledLine]) -> String {
        lines
            .iter()
            .map(StyledLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_inline_styles() {
        let lines = render_markdown("**bold**, *italic* and `code`", 80);

        assert!(has_style(&lines, Style::Strong));
        assert!(has_style(&lines, Style::Emphasis));
        assert!(has_style(&lines, Style::CodeInline));
        assert_eq!(joined(&lines), "bold, italic and code");
    }

    #[test]
    fn test_heading_styles() {
        let lines = render_markdown("# H1\n\n## H2\n\n### H3", 80);

        assert!(has_style(&lines, Style::H1));
        assert!(has_style(&lines, Style::H2));
        assert!(has_style(&lines, Style::H3));
        assert_eq!(joined(&lines), "H1\n\nH2\n\nH3");
    }

    #[test]
    fn test_lists() {
        let lines = render_markdown("- one\n- two\n\n1. first\n2. second", 80);
        let text = joined(&lines);

        assert!(text.contains("• one"));
        assert!(text.contains("• two"));
        assert!(text.contains("1. first"));
        assert!(text.contains("2. second"));
    }

    #[test]
    fn test_nested_list_indents() {
        let lines = render_markdown("- outer\n  - inner", 80);

        assert!(joined(&lines).contains("  • inner"));
    }

    #[test]
    fn test_code_block_is_fenced_and_highlighted() {
        let md = "```python\ndef f():\n    return 1\n```";
        let lines = render_markdown(md, 40);

        assert_eq!(lines.first().unwrap().text(), "```python");
        assert_eq!(lines.last().unwrap().text(), "```");
        assert!(has_style(&lines, Style::Keyword));
        assert!(joined(&lines).contains("      return 1"));
    }

    #[test]
    fn test_block_quote_prefix() {
        let lines = render_markdown("> quoted text", 80);

        assert_eq!(lines[0].text(), "│ quoted text");
        assert!(has_style(&lines, Style::BlockQuote));
    }

    #[test]
    fn test_paragraph_wraps_to_width() {
        let lines = render_markdown("one two three four five six seven", 10);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.width() <= 10));
    }

    #[test]
    fn test_table_renders() {
        let lines = render_markdown("| A | B |\n|---|---|\n| 1 | 2 |", 40);
        let text = joined(&lines);

        assert!(lines.len() >= 3);
        for needle in ["A", "B", "1", "2"] {
            assert!(text.contains(needle), "missing {needle} in {text}");
        }
    }

    #[test]
    fn test_html_is_dropped() {
        let lines = render_markdown("<div>hidden</div>\n\nshown", 80);

        assert_eq!(joined(&lines), "shown");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown("", 80), vec![StyledLine::empty()]);
    }
}
