//! Emphasis markers — the `**` delimiter pair wrapped around every span the
//! transformer rewrote.
//!
//! Markers are a display hint only. Renderers split on them to style the
//! enclosed text; plain-text consumers strip them.

use regex::Regex;
use std::sync::LazyLock;

/// Opening and closing delimiter around a modified span.
pub const EMPHASIS_MARKER: &str = "**";

const HIGHLIGHT_START: &str = "\x1b[1;32m";
const HIGHLIGHT_END: &str = "\x1b[0m";

static EMPHASIZED_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*.*?\*\*").unwrap());

/// A display piece of marked-up text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Emphasized(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Plain(s) | Segment::Emphasized(s) => s,
        }
    }
}

/// Wrap `text` in emphasis markers.
pub fn emphasize(text: &str) -> String {
    format!("{EMPHASIS_MARKER}{text}{EMPHASIS_MARKER}")
}

/// Split marked-up text into alternating plain and emphasized segments.
///
/// Pairing is non-greedy and line-local: `**a** b **c**` yields two
/// emphasized spans, not one. An unpaired marker stays in plain text.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in EMPHASIZED_SPAN.find_iter(text) {
        if m.start() > cursor {
            segments.push(Segment::Plain(&text[cursor..m.start()]));
        }
        let inner = &m.as_str()[EMPHASIS_MARKER.len()..m.len() - EMPHASIS_MARKER.len()];
        segments.push(Segment::Emphasized(inner));
        cursor = m.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Plain(&text[cursor..]));
    }

    segments
}

/// Remove every emphasis marker, producing the plain-text copy.
pub fn strip_markers(text: &str) -> String {
    text.replace(EMPHASIS_MARKER, "")
}

/// Render marked-up text for a terminal: emphasized spans in bold green.
pub fn render_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in split_segments(text) {
        match segment {
            Segment::Plain(s) => out.push_str(s),
            Segment::Emphasized(s) => {
                out.push_str(HIGHLIGHT_START);
                out.push_str(s);
                out.push_str(HIGHLIGHT_END);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasize_wraps_in_markers() {
        assert_eq!(emphasize("pa-y"), "**pa-y**");
    }

    #[test]
    fn splits_alternating_segments() {
        let segments = split_segments("send **do-llar** via **Pay-Pal** today");
        assert_eq!(
            segments,
            vec![
                Segment::Plain("send "),
                Segment::Emphasized("do-llar"),
                Segment::Plain(" via "),
                Segment::Emphasized("Pay-Pal"),
                Segment::Plain(" today"),
            ]
        );
    }

    #[test]
    fn adjacent_spans_have_no_empty_plain_between() {
        let segments = split_segments("**a**(at)**b**");
        assert_eq!(
            segments,
            vec![
                Segment::Emphasized("a"),
                Segment::Plain("(at)"),
                Segment::Emphasized("b"),
            ]
        );
    }

    #[test]
    fn unpaired_marker_stays_plain() {
        let segments = split_segments("only ** one marker");
        assert_eq!(segments, vec![Segment::Plain("only ** one marker")]);
    }

    #[test]
    fn strip_is_lossless_for_content() {
        let marked = "my **em-ail** is **a(at)b(dot)com**";
        assert_eq!(strip_markers(marked), "my em-ail is a(at)b(dot)com");

        let joined: String = split_segments(marked).iter().map(|s| s.text()).collect();
        assert_eq!(joined, strip_markers(marked));
    }

    #[test]
    fn ansi_render_highlights_only_emphasized() {
        let rendered = render_ansi("hi **pa-y** me");
        assert_eq!(rendered, "hi \x1b[1;32mpa-y\x1b[0m me");
    }
}
