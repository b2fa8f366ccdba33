use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::style::{Style, StyledLine, StyledSpan};

/// Options for wrapping styled spans with hanging indents.
#[derive(Debug, Clone, Default)]
pub struct WrapOptions {
    /// Maximum display width for lines, prefixes included.
    pub width: usize,
    /// Prefix spans for the first line (e.g. "• " for a list bullet).
    pub first_prefix: Vec<StyledSpan>,
    /// Prefix spans for continuation lines.
    pub rest_prefix: Vec<StyledSpan>,
}

impl WrapOptions {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Same prefix on every line (block quotes).
    pub fn with_prefix(width: usize, prefix: Vec<StyledSpan>) -> Self {
        Self {
            width,
            first_prefix: prefix.clone(),
            rest_prefix: prefix,
        }
    }
}

/// Accumulates spans into lines no wider than the configured width.
struct LineBuilder<'a> {
    opts: &'a WrapOptions,
    lines: Vec<StyledLine>,
    current: Vec<StyledSpan>,
    used: usize,
    /// A collapsed whitespace run waiting to be emitted before the next word.
    pending_space: Option<Style>,
}

impl<'a> LineBuilder<'a> {
    fn new(opts: &'a WrapOptions) -> Self {
        Self {
            opts,
            lines: Vec::new(),
            current: Vec::new(),
            used: 0,
            pending_space: None,
        }
    }

    fn prefix(&self) -> &'a [StyledSpan] {
        if self.lines.is_empty() {
            &self.opts.first_prefix
        } else {
            &self.opts.rest_prefix
        }
    }

    /// Content columns available on the line being built.
    fn avail(&self) -> usize {
        let prefix_width: usize = self.prefix().iter().map(|s| s.text.width()).sum();
        self.opts.width.saturating_sub(prefix_width).max(1)
    }

    fn newline(&mut self) {
        let mut spans = self.prefix().to_vec();
        spans.append(&mut self.current);
        self.lines.push(StyledLine { spans });
        self.used = 0;
        self.pending_space = None;
    }

    fn push_raw(&mut self, text: &str, style: Style) {
        match self.current.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.current.push(StyledSpan::new(text, style)),
        }
        self.used += text.width();
    }

    /// Places an unbreakable token, moving to a new line or splitting it by
    /// characters when it does not fit.
    fn push_token(&mut self, token: &str, style: Style) {
        let width = token.width();
        let space = usize::from(self.pending_space.is_some() && self.used > 0);

        if self.used > 0 && self.used + space + width > self.avail() {
            self.newline();
        } else if space == 1 {
            let space_style = self.pending_space.unwrap_or(style);
            self.push_raw(" ", space_style);
        }
        self.pending_space = None;

        if width <= self.avail() {
            self.push_raw(token, style);
            return;
        }

        let mut buf = [0u8; 4];
        for ch in token.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if self.used > 0 && self.used + ch_width > self.avail() {
                self.newline();
            }
            self.push_raw(ch.encode_utf8(&mut buf), style);
        }
    }

    /// Word-wraps prose: whitespace runs collapse to single spaces.
    fn push_words(&mut self, text: &str, style: Style) {
        let mut words = text.split_whitespace().peekable();
        if words.peek().is_none() {
            if !text.is_empty() && self.used > 0 {
                self.pending_space = Some(style);
            }
            return;
        }

        if text.starts_with(char::is_whitespace) && self.used > 0 {
            self.pending_space = Some(style);
        }
        while let Some(word) = words.next() {
            self.push_token(word, style);
            if words.peek().is_some() {
                self.pending_space = Some(style);
            }
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = Some(style);
        }
    }

    fn finish(mut self) -> Vec<StyledLine> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.newline();
        }
        self.lines
    }
}

/// Wraps styled spans to `opts.width`, keeping styles across line breaks.
///
/// - prose wraps at word boundaries, collapsing whitespace
/// - inline code keeps its whitespace and is split by characters if needed
/// - `\n` inside a span forces a line break
pub fn wrap_styled_spans(spans: &[StyledSpan], opts: &WrapOptions) -> Vec<StyledLine> {
    let mut builder = LineBuilder::new(opts);

    for span in spans {
        for (i, part) in span.text.split('\n').enumerate() {
            if i > 0 {
                builder.newline();
            }
            if part.is_empty() {
                continue;
            }
            if span.style == Style::CodeInline {
                builder.push_token(part, span.style);
            } else {
                builder.push_words(part, span.style);
            }
        }
    }

    builder.finish()
}
