//! Name standardization
//!
//! Canonicalizes romanized Indian-language names so that common spelling and
//! transliteration variants collapse to one stored form. The rule table is
//! applied strictly in order; each rule sees the output of the previous one.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// A single ordered rewrite step
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

impl Rule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("standardization rule pattern"),
            replacement,
        }
    }
}

/// Ordered rule table.
///
/// Word corrections are anchored on `\b` so a canonical token is never
/// rewritten again (`ramesh` must not become `rameshh`). This keeps
/// `standardize` idempotent.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // Repeated h after s
        Rule::new(r"shh+", "sh"),
        // Given names
        Rule::new(r"\bsureesh\b", "suresh"),
        Rule::new(r"\bsursh\b", "suresh"),
        Rule::new(r"\brames\b", "ramesh"),
        Rule::new(r"\bkum+ar+\b", "kumar"),
        Rule::new(r"jii+", "ji"),
        // Surnames
        Rule::new(r"\bsing\b", "singh"),
        Rule::new(r"\byadhav\b", "yadav"),
        Rule::new(r"\b(?:choudhury|chaudhary|chaudhury|chowdhury)\b", "choudhary"),
        Rule::new(r"\s+", " "),
    ]
});

/// Standardize a person name.
///
/// Empty or whitespace-only input yields an empty string. Otherwise the name
/// is NFC-normalized, lowercased and trimmed, rewritten by the rule table, and
/// every space-separated token gets its first letter capitalized.
pub fn standardize(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut text: String = trimmed.nfc().collect::<String>().to_lowercase();

    for rule in RULES.iter() {
        if rule.pattern.is_match(&text) {
            text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
        }
    }

    text.split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a token, leaving the rest untouched.
///
/// Characters whose uppercase form does not lowercase back to the same
/// character (`ß`, dotless `ı`) are left as-is so a second pass is a no-op.
fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let upper: String = first.to_uppercase().collect();
    let round_trips = upper.to_lowercase() == first.to_string();

    let mut out = String::with_capacity(token.len());
    if round_trips {
        out.push_str(&upper);
    } else {
        out.push(first);
    }
    out.push_str(chars.as_str());
    out
}
