//! The `**bold**` convention used in report free text.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

/// A run of text, bold or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub bold: bool,
}

/// Split `text` into plain and bold spans. Unpaired `**` stays literal.
pub fn spans(text: &str) -> Vec<Span<'_>> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Span {
                text: &text[last..whole.start()],
                bold: false,
            });
        }
        out.push(Span {
            text: inner.as_str(),
            bold: true,
        });
        last = whole.end();
    }
    if last < text.len() {
        out.push(Span {
            text: &text[last..],
            bold: false,
        });
    }
    out
}

/// Remove the markers, keeping the text.
pub fn strip(text: &str) -> String {
    spans(text).into_iter().map(|s| s.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_bold_runs() {
        let parts = spans("당신은 **분석력**과 **창의성**을 갖췄다");
        assert_eq!(
            parts,
            vec![
                Span { text: "당신은 ", bold: false },
                Span { text: "분석력", bold: true },
                Span { text: "과 ", bold: false },
                Span { text: "창의성", bold: true },
                Span { text: "을 갖췄다", bold: false },
            ]
        );
    }

    #[test]
    fn unpaired_marker_is_literal() {
        let parts = spans("a **b");
        assert_eq!(parts, vec![Span { text: "a **b", bold: false }]);
    }

    #[test]
    fn plain_and_empty_text() {
        assert_eq!(spans("plain"), vec![Span { text: "plain", bold: false }]);
        assert!(spans("").is_empty());
    }

    #[test]
    fn strip_removes_markers() {
        assert_eq!(strip("**핵심** 요약"), "핵심 요약");
    }
}
