//! Safeguard transformer — rewrites a message so restricted terms no longer
//! match literal keyword filters, and records every edit it made.
//!
//! Passes, in order:
//! 1. `@` and `$` symbols become `(at)` and `do-llar`.
//! 2. Catalog terms (longest first, whole-word, case-insensitive) get a
//!    hyphen at their midpoint.
//! 3. Email addresses are spelled out character by character with `(at)`
//!    and `(dot)` in place of the separators.
//!
//! Every rewritten span is wrapped in emphasis markers and is final: later
//! passes never look inside it, so "PayPal" rewritten as `**Pay-Pal**` is
//! not hit again by the shorter "pay". Digits are left untouched.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use super::catalog::Catalog;
use super::markup::emphasize;

pub const AT_SYMBOL_CHANGE: &str = "@ Symbol";
pub const DOLLAR_SYMBOL_CHANGE: &str = "$ Symbol";

const AT_TOKEN: &str = "**(at)**";
const DOLLAR_TOKEN: &str = "**do-llar**";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9._-]+)@([a-zA-Z0-9._-]+)\.([a-zA-Z]{2,5})").unwrap()
});

/// Output of [`apply_safeguard`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeguardResult {
    /// Rewritten text with `**` around every modified span.
    pub safe_message: String,
    /// Human-readable change descriptors, deduplicated by literal text and
    /// kept in first-seen order.
    pub changes_made: Vec<String>,
}

impl SafeguardResult {
    pub fn has_changes(&self) -> bool {
        !self.changes_made.is_empty()
    }
}

/// Insertion-ordered set of change descriptors.
#[derive(Debug, Default)]
struct ChangeLog {
    entries: Vec<String>,
    seen: HashSet<String>,
}

impl ChangeLog {
    fn record(&mut self, change: impl Into<String>) {
        let change = change.into();
        if self.seen.insert(change.clone()) {
            self.entries.push(change);
        }
    }
}

/// Run every pass over `text` using `catalog`.
///
/// Infallible and deterministic: identical inputs always produce identical
/// output, and nothing outside the returned value is touched.
pub fn apply_safeguard(text: &str, catalog: &Catalog) -> SafeguardResult {
    if text.is_empty() {
        return SafeguardResult::default();
    }

    let mut changes = ChangeLog::default();
    if text.contains('@') {
        changes.record(AT_SYMBOL_CHANGE);
    }
    if text.contains('$') {
        changes.record(DOLLAR_SYMBOL_CHANGE);
    }

    // Addresses are located on the raw input; the symbol pass would
    // otherwise consume their `@` before the email pass ever sees them.
    let mut pieces = Vec::new();
    let mut addresses = Vec::new();
    let mut cursor = 0;

    for caps in EMAIL_PATTERN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        split_symbols(text, cursor..whole.start(), &mut pieces);
        pieces.push(Piece::Marked(render_email(&caps)));
        addresses.push(whole.as_str());
        cursor = whole.end();
    }
    split_symbols(text, cursor..text.len(), &mut pieces);

    for rule in catalog.rules() {
        let mut next = Vec::with_capacity(pieces.len());
        for piece in pieces {
            match piece {
                Piece::Plain(span) => {
                    substitute_keyword(&rule.pattern, text, span, &mut changes, &mut next)
                }
                marked => next.push(marked),
            }
        }
        pieces = next;
    }

    for address in addresses {
        changes.record(format!("Email Pattern: {}", address));
    }

    let safe_message: String = pieces
        .iter()
        .map(|piece| match piece {
            Piece::Plain(span) => &text[span.clone()],
            Piece::Marked(s) => s.as_str(),
        })
        .collect();

    let result = SafeguardResult {
        safe_message,
        changes_made: changes.entries,
    };

    if result.has_changes() {
        log::info!(
            "[SAFEGUARD] {} change(s): {}",
            result.changes_made.len(),
            result.changes_made.join(", ")
        );
    }

    result
}

/// A run of output text. `Plain` is a byte range of the input still open
/// to keyword matching; `Marked` is a finished replacement and is never
/// scanned again.
#[derive(Debug)]
enum Piece {
    Plain(Range<usize>),
    Marked(String),
}

/// Split `span` of `text` around `@` and `$`, appending to `out`.
fn split_symbols(text: &str, span: Range<usize>, out: &mut Vec<Piece>) {
    let mut run_start = span.start;

    for (offset, ch) in text[span.clone()].char_indices() {
        let token = match ch {
            '@' => AT_TOKEN,
            '$' => DOLLAR_TOKEN,
            _ => continue,
        };
        let at = span.start + offset;
        if at > run_start {
            out.push(Piece::Plain(run_start..at));
        }
        out.push(Piece::Marked(token.to_string()));
        run_start = at + ch.len_utf8();
    }

    if run_start < span.end {
        out.push(Piece::Plain(run_start..span.end));
    }
}

/// Replace every whole-word match of `pattern` inside `span`, pushing the
/// resulting pieces onto `out`.
///
/// Matching runs against the input itself, so `\b` at either edge of the
/// span sees the real neighbouring characters. A span that starts in the
/// middle of a word (the tail of `x@y.abcdepay` after the address stops at
/// `abcde`) cannot produce a match at its first character.
fn substitute_keyword(
    pattern: &Regex,
    text: &str,
    span: Range<usize>,
    changes: &mut ChangeLog,
    out: &mut Vec<Piece>,
) {
    // One character past the span is enough context for the closing `\b`.
    let window_end = text[span.end..]
        .chars()
        .next()
        .map_or(span.end, |c| span.end + c.len_utf8());
    let window = &text[..window_end];

    let mut cursor = span.start;
    let mut from = span.start;

    while from < span.end {
        let Some(m) = pattern.find_at(window, from) else {
            break;
        };
        if m.end() > span.end {
            break;
        }
        from = m.end();

        let matched = m.as_str();
        if matched.chars().count() <= 1 {
            continue;
        }
        if m.start() > cursor {
            out.push(Piece::Plain(cursor..m.start()));
        }
        changes.record(matched);
        out.push(Piece::Marked(emphasize(&hyphenate_term(matched))));
        cursor = m.end();
    }

    if cursor < span.end {
        out.push(Piece::Plain(cursor..span.end));
    }
}

/// Hyphenate a matched term. Phrases are hyphenated part by part, skipping
/// parts of two characters or fewer.
fn hyphenate_term(matched: &str) -> String {
    if matched.contains(' ') {
        matched
            .split(' ')
            .map(|part| {
                if part.chars().count() <= 2 {
                    part.to_string()
                } else {
                    split_at_midpoint(part)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        split_at_midpoint(matched)
    }
}

/// Insert a hyphen after the first `floor(len / 2)` characters.
fn split_at_midpoint(word: &str) -> String {
    let mid = word.chars().count() / 2;
    let byte_mid = word
        .char_indices()
        .nth(mid)
        .map(|(i, _)| i)
        .unwrap_or(word.len());
    format!("{}-{}", &word[..byte_mid], &word[byte_mid..])
}

fn render_email(caps: &Captures) -> String {
    emphasize(&format!(
        "{}(at){}(dot){}",
        interleave_hyphens(&caps[1]),
        interleave_hyphens(&caps[2]),
        &caps[3]
    ))
}

/// `abc` → `a-b-c`.
fn interleave_hyphens(s: &str) -> String {
    s.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(terms: &[&str]) -> Catalog {
        Catalog::new(terms.iter().copied())
    }

    #[test]
    fn empty_text_returns_empty_result() {
        let result = apply_safeguard("", Catalog::builtin());
        assert_eq!(result, SafeguardResult::default());
        assert!(!result.has_changes());
    }

    #[test]
    fn midpoint_uses_floor_of_half_length() {
        assert_eq!(split_at_midpoint("pay"), "p-ay");
        assert_eq!(split_at_midpoint("email"), "em-ail");
        assert_eq!(split_at_midpoint("zoom"), "zo-om");
        assert_eq!(split_at_midpoint("WhatsApp"), "What-sApp");
    }

    #[test]
    fn midpoint_respects_char_boundaries() {
        assert_eq!(split_at_midpoint("café"), "ca-fé");
        assert_eq!(split_at_midpoint("éé"), "é-é");
    }

    #[test]
    fn phrase_parts_of_two_chars_or_fewer_are_kept() {
        assert_eq!(hyphenate_term("5 star"), "5 st-ar");
        assert_eq!(hyphenate_term("id card"), "id ca-rd");
        assert_eq!(hyphenate_term("do my homework"), "do my home-work");
        assert_eq!(hyphenate_term("western union"), "wes-tern un-ion");
    }

    #[test]
    fn at_symbol_replaced_everywhere() {
        let result = apply_safeguard("ping @me or @you", &catalog(&[]));
        assert_eq!(result.safe_message, "ping **(at)**me or **(at)**you");
        assert_eq!(result.changes_made, vec![AT_SYMBOL_CHANGE.to_string()]);
    }

    #[test]
    fn dollar_symbol_replaced_everywhere() {
        let result = apply_safeguard("$5 or $10", &catalog(&[]));
        assert_eq!(result.safe_message, "**do-llar**5 or **do-llar**10");
        assert_eq!(result.changes_made, vec![DOLLAR_SYMBOL_CHANGE.to_string()]);
    }

    #[test]
    fn both_symbols_fire_independently() {
        let result = apply_safeguard("$ @", &catalog(&[]));
        assert!(result.changes_made.contains(&AT_SYMBOL_CHANGE.to_string()));
        assert!(result.changes_made.contains(&DOLLAR_SYMBOL_CHANGE.to_string()));
        assert!(!result.safe_message.contains('@'));
        assert!(!result.safe_message.contains('$'));
    }

    #[test]
    fn whole_word_only() {
        let result = apply_safeguard("display unpaid", &catalog(&["pay"]));
        assert_eq!(result.safe_message, "display unpaid");
        assert!(result.changes_made.is_empty());
    }

    #[test]
    fn phrase_matched_before_contained_word() {
        let result = apply_safeguard("5 star rating", &catalog(&["star", "5 star"]));
        assert_eq!(result.safe_message, "**5 st-ar** rating");
        assert_eq!(result.changes_made, vec!["5 star".to_string()]);
    }

    #[test]
    fn descriptors_keep_original_casing() {
        let result = apply_safeguard("EMAIL Email email", &catalog(&["email"]));
        assert_eq!(result.safe_message, "**EM-AIL** **Em-ail** **em-ail**");
        assert_eq!(result.changes_made, vec!["EMAIL", "Email", "email"]);
    }

    #[test]
    fn repeated_matches_collapse_to_one_descriptor() {
        let result = apply_safeguard("email me, email you", &catalog(&["email"]));
        assert_eq!(result.safe_message, "**em-ail** me, **em-ail** you");
        assert_eq!(result.changes_made, vec!["email".to_string()]);
    }

    #[test]
    fn single_character_match_is_left_alone() {
        let result = apply_safeguard("a b c", &catalog(&["b"]));
        assert_eq!(result.safe_message, "a b c");
        assert!(result.changes_made.is_empty());
    }

    #[test]
    fn digits_are_not_obfuscated() {
        let result = apply_safeguard("call 5551234", &catalog(&["call"]));
        assert_eq!(result.safe_message, "**ca-ll** 5551234");
    }

    #[test]
    fn email_is_spelled_out() {
        let result = apply_safeguard("write to jo.e@ex-1.io", &catalog(&[]));
        assert_eq!(
            result.safe_message,
            "write to **j-o-.-e(at)e-x---1(dot)io**"
        );
        assert!(result.changes_made.contains(&"Email Pattern: jo.e@ex-1.io".to_string()));
        assert!(result.changes_made.contains(&AT_SYMBOL_CHANGE.to_string()));
    }

    #[test]
    fn keyword_inside_email_is_not_double_processed() {
        let result = apply_safeguard("john@gmail.com", Catalog::builtin());
        assert_eq!(result.safe_message, "**j-o-h-n(at)g-m-a-i-l(dot)com**");
        assert!(!result.changes_made.contains(&"gmail".to_string()));
    }

    #[test]
    fn tail_of_truncated_address_is_not_a_word_start() {
        let result = apply_safeguard("x@y.abcdepay", Catalog::builtin());
        assert_eq!(result.safe_message, "**x(at)y(dot)abcde**pay");
        assert_eq!(
            result.changes_made,
            vec![AT_SYMBOL_CHANGE, "Email Pattern: x@y.abcde"]
        );
    }

    #[test]
    fn words_after_truncated_address_still_match() {
        let result = apply_safeguard("x@y.abcdepay pay", Catalog::builtin());
        assert_eq!(result.safe_message, "**x(at)y(dot)abcde**pay **p-ay**");
        assert_eq!(
            result.changes_made,
            vec![AT_SYMBOL_CHANGE, "pay", "Email Pattern: x@y.abcde"]
        );
    }

    #[test]
    fn text_glued_to_address_start_is_not_a_word_end() {
        let result = apply_safeguard("payéa@b.com", &catalog(&["payé"]));
        assert_eq!(result.safe_message, "payé**a(at)b(dot)com**");
        assert!(!result.changes_made.contains(&"payé".to_string()));
    }

    #[test]
    fn change_log_keeps_first_seen_order() {
        let mut log = ChangeLog::default();
        for change in ["b", "a", "b", "c", "a"] {
            log.record(change);
        }
        assert_eq!(log.entries, vec!["b", "a", "c"]);
    }

    #[test]
    fn many_addresses_are_each_recorded_once() {
        let text: String = (0..2000).map(|i| format!("u{i}@h.io u{i}@h.io ")).collect();
        let result = apply_safeguard(&text, &catalog(&[]));
        assert_eq!(result.changes_made.len(), 2001);
        assert_eq!(result.changes_made[1], "Email Pattern: u0@h.io");
        assert_eq!(result.changes_made[2000], "Email Pattern: u1999@h.io");
    }

    #[test]
    fn shorter_term_does_not_rematch_inside_replacement() {
        let result = apply_safeguard("Pay via PayPal", &catalog(&["pay", "paypal"]));
        assert_eq!(result.safe_message, "**P-ay** via **Pay-Pal**");
        assert_eq!(result.changes_made, vec!["PayPal", "Pay"]);
    }

    #[test]
    fn symbol_tokens_are_not_rescanned() {
        let result = apply_safeguard("$40", &catalog(&["do", "llar", "at"]));
        assert_eq!(result.safe_message, "**do-llar**40");
        assert_eq!(result.changes_made, vec![DOLLAR_SYMBOL_CHANGE.to_string()]);
    }

    #[test]
    fn metacharacter_entries_do_not_fail() {
        let result = apply_safeguard("see x.com (now)", &catalog(&["x.com", "(now", "[", "\\"]));
        assert_eq!(result.safe_message, "see **x.-com** (now)");
    }

    #[test]
    fn deterministic_output() {
        let text = "Pay via PayPal, $20, a@b.com, 5 star review";
        let first = apply_safeguard(text, Catalog::builtin());
        let second = apply_safeguard(text, Catalog::builtin());
        assert_eq!(first, second);
    }

    #[test]
    fn result_serializes_camel_case() {
        let result = apply_safeguard("pay", &catalog(&["pay"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["safeMessage"], "**p-ay**");
        assert_eq!(json["changesMade"][0], "pay");
    }
}
