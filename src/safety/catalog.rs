//! Restricted-term catalog — the static list of words and phrases that
//! marketplace filters are known to flag, compiled into whole-word matchers.
//!
//! The catalog is built once and never mutated. Matchers are kept in
//! longest-first order so phrases ("5 star") win over the shorter terms
//! they contain ("star").

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::config::ConfigError;

/// Built-in restricted terms, lowercase, grouped by category.
pub static RESTRICTED_KEYWORDS: &[&str] = &[
    // Communication
    "email", "mail", "gmail", "yahoo", "hotmail", "outlook", "phone", "number", "mobile",
    "call", "video call", "whatsapp", "skype", "zoom", "telegram", "facebook", "fb",
    "messenger", "contact", "signal", "wechat", "viber", "slack", "google meet", "teams",
    "anydesk", "discord", "linkedin", "twitter", "x.com", "snapchat", "instagram",
    // Payment & money
    "pay", "payment", "paid", "pricing", "price", "money", "dollar", "euro", "gbp", "bank",
    "transfer", "wise", "payoneer", "paypal", "commission", "fee", "tip", "cash", "wallet",
    "crypto", "bitcoin", "btc", "usdt", "eth", "binance", "coinbase", "venmo", "zelle",
    "cashapp", "revolut", "stripe", "western union", "billing", "invoice", "budget", "cost",
    "charge", "subscription", "donation",
    // Feedback & reviews
    "5 star", "five star", "review", "rating", "yelp", "trustpilot", "endorsement",
    "recommendation",
    // Academic
    "homework", "assignment", "exam", "quiz", "test", "university", "college", "school",
    "grade", "class", "course", "essay", "thesis", "dissertation", "research paper",
    "proposal", "student", "canvas", "blackboard", "moodle", "portal", "admission",
    "academic", "write my paper", "do my homework",
    // Personal info & documents
    "cv", "id card", "passport", "driving license", "kyc",
    // Prohibited services & others
    "domain", "hosting", "login", "credentials", "password", "bot", "scraping", "traffic",
    "adsense", "subscribers", "followers", "likes", "seo", "hack", "hacking", "phishing",
    "malware", "spyware", "ransomware", "ddos", "piracy", "torrent", "illegal", "banned",
    "prohibited", "restricted",
];

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| Catalog::new(RESTRICTED_KEYWORDS.iter().copied()));

/// One catalog entry and its compiled whole-word matcher.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub term: String,
    pub pattern: Regex,
}

/// Immutable, compiled restricted-term catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    rules: Vec<KeywordRule>,
}

impl Catalog {
    /// Compile a catalog from arbitrary terms.
    ///
    /// Entries are escaped, so regex metacharacters match literally. Blank
    /// entries are dropped and an entry that still fails to compile is
    /// skipped with a warning.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules: Vec<KeywordRule> = terms
            .into_iter()
            .filter_map(|term| compile_rule(term.as_ref()))
            .collect();

        // Stable: equal-length terms keep their catalog order.
        rules.sort_by(|a, b| b.term.chars().count().cmp(&a.term.chars().count()));

        Self { rules }
    }

    /// The process-wide catalog built from [`RESTRICTED_KEYWORDS`].
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Built-in terms followed by host-supplied extras.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = RESTRICTED_KEYWORDS.iter().map(|t| t.to_string()).collect();
        terms.extend(extra.into_iter().map(|t| t.as_ref().to_string()));
        Self::new(terms)
    }

    /// Compiled rules in match order (longest first).
    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Terms in match order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.term.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn compile_rule(raw: &str) -> Option<KeywordRule> {
    let term = raw.trim();
    if term.is_empty() {
        return None;
    }

    let source = format!(r"(?i)\b{}\b", regex::escape(term));
    match Regex::new(&source) {
        Ok(pattern) => Some(KeywordRule {
            term: term.to_string(),
            pattern,
        }),
        Err(e) => {
            log::warn!("[SAFEGUARD] Skipping catalog entry '{}': {}", term, e);
            None
        }
    }
}

/// Read extra restricted terms from a newline-separated file.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn load_keyword_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::KeywordFile {
        path: path.to_path_buf(),
        source,
    })?;

    let terms: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    log::info!(
        "[CONFIG] Loaded {} extra keywords from {}",
        terms.len(),
        path.display()
    );
    Ok(terms)
}
