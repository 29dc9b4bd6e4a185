//! Minimal markdown-to-display transform for summary text.
//!
//! The completion is instructed to emit plain prose with a single
//! `**bold**` lead sentence, so the full treatment is bold-span
//! extraction plus line-break normalization. Deliberately not a markdown
//! parser.

/// One run of summary text, bold or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The text of this run.
    pub text: String,
    /// Whether this run renders emphasized.
    pub bold: bool,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Split summary text into display spans.
///
/// `**`-delimited runs become bold spans; an unpaired `**` is kept as
/// literal text. Line breaks are normalized first (CRLF to LF, runs of
/// three or more newlines collapsed to a paragraph break).
pub fn parse_spans(input: &str) -> Vec<Span> {
    let normalized = normalize_breaks(input);
    let mut spans = Vec::new();
    let mut rest = normalized.as_str();
    let mut bold = false;

    while let Some(pos) = rest.find("**") {
        let (before, after) = rest.split_at(pos);
        if !before.is_empty() {
            spans.push(if bold {
                Span::bold(before)
            } else {
                Span::plain(before)
            });
        }
        rest = &after[2..];
        bold = !bold;
    }

    if !rest.is_empty() {
        // An unclosed marker means the last "bold" toggle was literal.
        if bold {
            spans.push(Span::plain(format!("**{rest}")));
        } else {
            spans.push(Span::plain(rest));
        }
    }

    spans
}

/// Collapse the text of `spans` back into a plain string, markers gone.
pub fn spans_to_plain(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Normalize line endings and collapse excessive blank lines.
fn normalize_breaks(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut result = String::with_capacity(unified.len());
    let mut newline_count: u32 = 0;
    for ch in unified.chars() {
        if ch == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push('\n');
            }
        } else {
            newline_count = 0;
            result.push(ch);
        }
    }
    result.trim().to_owned()
}
