//! Content-kind (MIME type) to renderer table.
//!
//! The table order is observable: `display_data` outputs are scanned in this
//! order and the first populated kind wins.

use std::fmt;

/// How a payload is drawn in the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Python,
    Html,
    Json,
    Png,
    Jpg,
    Jpeg,
    Gif,
    Svg,
    Pdf,
    Latex,
}

impl RendererKind {
    /// Renderer used for plain text and anything without a table entry.
    pub const TEXT: RendererKind = RendererKind::Python;

    pub fn name(self) -> &'static str {
        match self {
            RendererKind::Python => "python",
            RendererKind::Html => "html",
            RendererKind::Json => "json",
            RendererKind::Png => "png",
            RendererKind::Jpg => "jpg",
            RendererKind::Jpeg => "jpeg",
            RendererKind::Gif => "gif",
            RendererKind::Svg => "svg",
            RendererKind::Pdf => "pdf",
            RendererKind::Latex => "latex",
        }
    }

    /// Binary, image and typeset content cannot be drawn as terminal text.
    pub fn is_terminal_renderable(self) -> bool {
        !matches!(
            self,
            RendererKind::Png
                | RendererKind::Jpg
                | RendererKind::Jpeg
                | RendererKind::Gif
                | RendererKind::Svg
                | RendererKind::Pdf
                | RendererKind::Latex
        )
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Known content kinds, in scan order.
pub const CONTENT_KINDS: &[(&str, RendererKind)] = &[
    ("text", RendererKind::Python),
    ("text/plain", RendererKind::Python),
    ("text/html", RendererKind::Html),
    ("application/vnd.jupyter.widget-view+json", RendererKind::Json),
    ("application/x-ipynb+json", RendererKind::Json),
    ("application/vnd.geo+json", RendererKind::Json),
    ("application/geo+json", RendererKind::Json),
    ("application/vnd.plotly.v1+json", RendererKind::Json),
    ("application/vdom.v1+json", RendererKind::Json),
    ("image/png", RendererKind::Png),
    ("image/jpg", RendererKind::Jpg),
    ("text/latex", RendererKind::Latex),
    ("image/svg+xml", RendererKind::Svg),
    ("image/jpeg", RendererKind::Jpeg),
    ("image/gif", RendererKind::Gif),
    ("application/pdf", RendererKind::Pdf),
];

/// Kinds carried by `stream`/`execute_result`; skipped when scanning `display_data`.
pub fn is_text_kind(kind: &str) -> bool {
    matches!(kind, "text" | "text/plain")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrenderable_set() {
        let blocked: Vec<&str> = CONTENT_KINDS
            .iter()
            .map(|(_, r)| *r)
            .filter(|r| !r.is_terminal_renderable())
            .map(RendererKind::name)
            .collect();

        assert_eq!(
            blocked,
            ["png", "jpg", "latex", "svg", "jpeg", "gif", "pdf"]
        );
    }

    #[test]
    fn test_text_renderers_are_renderable() {
        assert!(RendererKind::Python.is_terminal_renderable());
        assert!(RendererKind::Html.is_terminal_renderable());
        assert!(RendererKind::Json.is_terminal_renderable());
    }

    #[test]
    fn test_text_kinds() {
        assert!(is_text_kind("text"));
        assert!(is_text_kind("text/plain"));
        assert!(!is_text_kind("text/html"));
    }
}
