//! Keyword-based syntax highlighting for code cells and fenced code blocks.
//!
//! Lines are tokenized independently against fixed keyword and builtin
//! lists. Unknown languages come back as plain code lines.

use crate::style::{Style, StyledLine, StyledSpan};

/// Token tables for one language.
struct Language {
    keywords: &'static [&'static str],
    builtins: &'static [&'static str],
    comment: &'static str,
    /// Backticks delimit strings too.
    backtick_strings: bool,
}

const PYTHON: Language = Language {
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield", "True", "False", "None",
    ],
    builtins: &[
        "print", "len", "range", "int", "str", "float", "list", "dict", "set", "tuple", "bool",
        "type", "isinstance", "enumerate", "zip", "map", "filter", "open", "sum", "min", "max",
        "abs", "sorted", "super", "self",
    ],
    comment: "#",
    backtick_strings: false,
};

const JULIA: Language = Language {
    keywords: &[
        "function", "end", "if", "elseif", "else", "for", "while", "return", "begin", "let",
        "local", "global", "const", "module", "using", "import", "export", "struct", "mutable",
        "abstract", "macro", "quote", "do", "try", "catch", "finally", "break", "continue", "in",
        "true", "false", "nothing",
    ],
    builtins: &[
        "println", "print", "length", "push!", "map", "filter", "collect", "typeof", "zeros",
        "ones", "sum", "Int", "Float64", "String", "Vector", "Array", "Dict",
    ],
    comment: "#",
    backtick_strings: false,
};

const R: Language = Language {
    keywords: &[
        "function", "if", "else", "for", "while", "repeat", "return", "break", "next", "in",
        "library", "require", "TRUE", "FALSE", "NULL", "NA", "Inf", "NaN",
    ],
    builtins: &[
        "c", "print", "paste", "paste0", "length", "list", "data.frame", "vector", "matrix",
        "sum", "mean", "summary", "head", "tail", "cat", "seq",
    ],
    comment: "#",
    backtick_strings: false,
};

const JAVASCRIPT: Language = Language {
    keywords: &[
        "function", "const", "let", "var", "if", "else", "for", "while", "return", "class", "new",
        "this", "import", "export", "from", "default", "try", "catch", "finally", "throw",
        "async", "await", "yield", "switch", "case", "break", "continue", "typeof", "instanceof",
        "true", "false", "null", "undefined",
    ],
    builtins: &[
        "console", "Promise", "Array", "Object", "Map", "Set", "JSON", "Math", "String", "Number",
        "Boolean", "Error",
    ],
    comment: "//",
    backtick_strings: true,
};

const JSON: Language = Language {
    keywords: &["true", "false", "null"],
    builtins: &[],
    comment: "",
    backtick_strings: false,
};

const SHELL: Language = Language {
    keywords: &[
        "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac",
        "function", "return", "exit", "export", "local", "in", "until",
    ],
    builtins: &[
        "echo", "cd", "ls", "cat", "grep", "sed", "awk", "find", "mkdir", "rm", "cp", "mv",
        "curl", "wget", "pip", "conda",
    ],
    comment: "#",
    backtick_strings: false,
};

fn language(name: &str) -> Option<&'static Language> {
    match name.to_ascii_lowercase().as_str() {
        "python" | "python3" | "py" | "ipython" | "ipython3" => Some(&PYTHON),
        "julia" | "jl" => Some(&JULIA),
        "r" => Some(&R),
        "javascript" | "js" | "typescript" | "ts" | "node" => Some(&JAVASCRIPT),
        "json" => Some(&JSON),
        "shell" | "sh" | "bash" | "zsh" => Some(&SHELL),
        _ => None,
    }
}

fn is_markup(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "html" | "xml" | "svg" | "htm"
    )
}

/// Highlights `text` as `language`, one styled line per source line.
pub fn highlight(text: &str, language_name: &str) -> Vec<StyledLine> {
    let lang = language(language_name);
    let markup = lang.is_none() && is_markup(language_name);

    text.split('\n')
        .map(|line| {
            if let Some(lang) = lang {
                highlight_line(line, lang)
            } else if markup {
                highlight_markup_line(line)
            } else {
                StyledLine::plain(line, Style::Code)
            }
        })
        .collect()
}

/// Pushes `text` onto `spans`, merging with the previous span of equal style.
fn push(spans: &mut Vec<StyledSpan>, text: &str, style: Style) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => spans.push(StyledSpan::new(text, style)),
    }
}

/// Byte offset where a quoted literal starting at `start` ends.
fn string_end(line: &str, start: usize, quote: char) -> usize {
    let mut escaped = false;
    for (i, c) in line[start + quote.len_utf8()..].char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return start + quote.len_utf8() + i + c.len_utf8();
        }
    }
    line.len()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '!' || c == '.'
}

fn highlight_line(line: &str, lang: &Language) -> StyledLine {
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(ch) = line[pos..].chars().next() {
        let rest = &line[pos..];

        if !lang.comment.is_empty() && rest.starts_with(lang.comment) {
            push(&mut spans, rest, Style::Comment);
            break;
        }

        if ch == '"' || ch == '\'' || (ch == '`' && lang.backtick_strings) {
            let end = string_end(line, pos, ch);
            push(&mut spans, &line[pos..end], Style::StringLiteral);
            pos = end;
            continue;
        }

        if ch.is_ascii_digit() {
            let len = rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '.' || c == '_'))
                .unwrap_or(rest.len());
            push(&mut spans, &rest[..len], Style::Number);
            pos += len;
            continue;
        }

        if ch.is_alphabetic() || ch == '_' {
            let len = rest
                .find(|c: char| !is_word_char(c))
                .unwrap_or(rest.len());
            let word = &rest[..len];
            // Dotted and `!` names stay whole only when listed (`push!`, `data.frame`).
            let word = if lang.builtins.contains(&word) || lang.keywords.contains(&word) {
                word
            } else {
                word.split(['.', '!']).next().unwrap_or(word)
            };
            let style = if lang.keywords.contains(&word) {
                Style::Keyword
            } else if lang.builtins.contains(&word) {
                Style::Builtin
            } else {
                Style::Code
            };
            push(&mut spans, word, style);
            pos += word.len();
            continue;
        }

        let len = ch.len_utf8();
        push(&mut spans, &rest[..len], Style::Code);
        pos += len;
    }

    StyledLine { spans }
}

/// Tags (and their attributes) are styled; text between tags is plain.
fn highlight_markup_line(line: &str) -> StyledLine {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];
        if rest.starts_with("<!--") {
            let len = rest.find("-->").map_or(rest.len(), |i| i + 3);
            push(&mut spans, &rest[..len], Style::Comment);
            pos += len;
        } else if rest.starts_with('<') {
            let len = rest.find('>').map_or(rest.len(), |i| i + 1);
            let tag = &rest[..len];
            // Attribute values inside the tag.
            let mut tpos = 0;
            while tpos < tag.len() {
                let trest = &tag[tpos..];
                match trest.find('"') {
                    Some(q) => {
                        push(&mut spans, &trest[..q], Style::Tag);
                        let end = string_end(tag, tpos + q, '"');
                        push(&mut spans, &tag[tpos + q..end], Style::StringLiteral);
                        tpos = end;
                    }
                    None => {
                        push(&mut spans, trest, Style::Tag);
                        tpos = tag.len();
                    }
                }
            }
            pos += len;
        } else {
            let len = rest.find('<').unwrap_or(rest.len());
            push(&mut spans, &rest[..len], Style::Code);
            pos += len;
        }
    }

    StyledLine { spans }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(line: &StyledLine, style: Style) -> Vec<&str> {
        line.spans
            .iter()
            .filter(|s| s.style == style)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_python_tokens() {
        let lines = highlight("def f(x):  # doc\n    return len('a') + 42", "python");

        assert_eq!(lines.len(), 2);
        assert_eq!(styled(&lines[0], Style::Keyword), ["def"]);
        assert_eq!(styled(&lines[0], Style::Comment), ["# doc"]);
        assert_eq!(styled(&lines[1], Style::Keyword), ["return"]);
        assert_eq!(styled(&lines[1], Style::Builtin), ["len"]);
        assert_eq!(styled(&lines[1], Style::StringLiteral), ["'a'"]);
        assert_eq!(styled(&lines[1], Style::Number), ["42"]);
    }

    #[test]
    fn test_text_is_preserved() {
        let src = "x = {\"a\": [1, 2.5]}  \n\tprint(x)";
        let lines = highlight(src, "python");

        let round: Vec<String> = lines.iter().map(StyledLine::text).collect();
        assert_eq!(round.join("\n"), src);
    }

    #[test]
    fn test_escaped_quote_stays_in_string() {
        let lines = highlight(r#"s = "a\"b" + c"#, "python");

        assert_eq!(styled(&lines[0], Style::StringLiteral), [r#""a\"b""#]);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let lines = highlight("s = 'open", "python");

        assert_eq!(styled(&lines[0], Style::StringLiteral), ["'open"]);
    }

    #[test]
    fn test_attribute_access_splits_words() {
        let lines = highlight("self.value", "python");

        assert_eq!(styled(&lines[0], Style::Builtin), ["self"]);
        assert_eq!(lines[0].text(), "self.value");
    }

    #[test]
    fn test_julia_bang_builtin() {
        let lines = highlight("push!(xs, 1)", "julia");

        assert_eq!(styled(&lines[0], Style::Builtin), ["push!"]);
    }

    #[test]
    fn test_language_name_is_case_insensitive() {
        let lines = highlight("function f() end", "Julia");

        assert_eq!(styled(&lines[0], Style::Keyword), ["function", "end"]);
    }

    #[test]
    fn test_unknown_language_is_plain_code() {
        let lines = highlight("fn main() {}", "cobol");

        assert_eq!(lines, vec![StyledLine::plain("fn main() {}", Style::Code)]);
    }

    #[test]
    fn test_markup_tags() {
        let lines = highlight("<b class=\"x\">bold</b>", "html");

        assert_eq!(styled(&lines[0], Style::Tag), ["<b class=", ">", "</b>"]);
        assert_eq!(styled(&lines[0], Style::StringLiteral), ["\"x\""]);
        assert_eq!(styled(&lines[0], Style::Code), ["bold"]);
    }

    #[test]
    fn test_markup_comment() {
        let lines = highlight("<!-- note --><p>", "html");

        assert_eq!(styled(&lines[0], Style::Comment), ["<!-- note -->"]);
    }

    #[test]
    fn test_empty_line_has_no_spans() {
        let lines = highlight("a\n\nb", "python");

        assert_eq!(lines.len(), 3);
        assert!(lines[1].spans.is_empty());
    }
}
