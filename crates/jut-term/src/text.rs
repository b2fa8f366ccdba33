//! Text utilities shared by the block renderers.

use std::borrow::Cow;

use unicode_width::UnicodeWidthChar;

use crate::style::{StyledLine, StyledSpan};

/// Strips terminal escape sequences and control characters, normalizes
/// carriage returns and expands tabs to four spaces.
///
/// Notebook outputs frequently carry colored tracebacks, hyperlinks or
/// progress bars; passing their escapes through would corrupt panel borders.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c.is_control() && c != '\n') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => match chars.next() {
                // CSI: ESC [ params final-byte
                Some('[') => {
                    for c in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&c) {
                            break;
                        }
                    }
                }
                // OSC: ESC ] payload, terminated by BEL or ESC \
                Some(']') => {
                    while let Some(c) = chars.next() {
                        if c == '\x07' {
                            break;
                        }
                        if c == '\x1b' {
                            chars.next_if_eq(&'\\');
                            break;
                        }
                    }
                }
                // Two-byte escapes (ESC 7, ESC =, ...) and a trailing ESC.
                _ => {}
            },
            '\t' => out.push_str("    "),
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push('\n');
            }
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Splits a line into lines of at most `max_width` columns, keeping styles.
///
/// Used for code and verbatim text, where whitespace is significant and no
/// word wrapping is attempted.
pub fn break_line(line: &StyledLine, max_width: usize) -> Vec<StyledLine> {
    let max_width = max_width.max(1);
    if line.width() <= max_width {
        return vec![line.clone()];
    }

    let mut lines = Vec::new();
    let mut current = StyledLine::empty();
    let mut used = 0;

    for span in &line.spans {
        let mut piece = String::new();
        for ch in span.text.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w > max_width && used > 0 {
                if !piece.is_empty() {
                    current
                        .spans
                        .push(StyledSpan::new(std::mem::take(&mut piece), span.style));
                }
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            piece.push(ch);
            used += w;
        }
        if !piece.is_empty() {
            current.spans.push(StyledSpan::new(piece, span.style));
        }
    }

    if !current.spans.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;

    #[test]
    fn test_sanitize_borrows_clean_text() {
        assert!(matches!(sanitize_for_display("clean"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_sanitize_strips_escapes_and_tabs() {
        let out = sanitize_for_display("\x1b[31mred\x1b[0m\tx\r\ny");
        assert_eq!(out, "red    x\ny");
    }

    #[test]
    fn test_sanitize_strips_hyperlinks_and_controls() {
        let link = sanitize_for_display("\x1b]8;;http://x\x1b\\link\x1b]8;;\x1b\\ done");
        assert_eq!(link, "link done");

        let bel_terminated = sanitize_for_display("\x1b]0;title\x07body");
        assert_eq!(bel_terminated, "body");

        let controls = sanitize_for_display("\x1b[1mok\x07\x08!\x1b=");
        assert_eq!(controls, "ok!");
    }

    #[test]
    fn test_break_line_short_line_untouched() {
        let line = StyledLine::plain("short", Style::Code);
        assert_eq!(break_line(&line, 10), vec![line]);
    }

    #[test]
    fn test_break_line_keeps_styles_across_breaks() {
        let line = StyledLine {
            spans: vec![
                StyledSpan::new("abcd", Style::Keyword),
                StyledSpan::new("efgh", Style::StringLiteral),
            ],
        };

        let lines = break_line(&line, 3);

        let texts: Vec<String> = lines.iter().map(StyledLine::text).collect();
        assert_eq!(texts, ["abc", "def", "gh"]);
        assert_eq!(lines[1].spans[0].style, Style::Keyword);
        assert_eq!(lines[1].spans[1].style, Style::StringLiteral);
    }
}
