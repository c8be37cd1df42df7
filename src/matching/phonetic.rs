//! Phonetic keys for romanized names
//!
//! Reduces a name to a consonant skeleton: aspirated digraphs fold to their
//! plain consonant, long vowels fold to short ones, vowels are dropped and
//! doubled letters collapse. Two names "sound alike" when their keys match.

use super::degrade::degrade;

/// Cluster reductions, applied in order over the whole string.
const REDUCTIONS: &[(&str, &str)] = &[
    ("sh", "s"),
    ("ee", "i"),
    ("oo", "u"),
    ("aa", "a"),
    ("ch", "c"),
    ("th", "t"),
    ("dh", "d"),
    ("bh", "b"),
    ("gh", "g"),
    ("kh", "k"),
    ("ph", "f"),
    ("zz", "z"),
    ("rr", "r"),
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Compute the phonetic key of `text`.
///
/// Total: always returns a string, which may be empty (an all-vowel input
/// has no skeleton).
pub fn phonetic_key(text: &str) -> String {
    let lowered = text.trim().to_lowercase();

    // keep basic latin letters and single spaces
    let mut key = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_ascii_lowercase() {
            key.push(c);
        } else if c.is_whitespace() && !key.ends_with(' ') {
            key.push(' ');
        }
    }

    for (cluster, replacement) in REDUCTIONS {
        if key.contains(cluster) {
            key = key.replace(cluster, replacement);
        }
    }

    key.retain(|c| !VOWELS.contains(&c));

    let mut collapsed = String::with_capacity(key.len());
    let mut last = None;
    for c in key.chars() {
        if last != Some(c) {
            collapsed.push(c);
        }
        last = Some(c);
    }

    collapsed.trim().to_string()
}

/// Whether two names share a phonetic key.
///
/// A fault while encoding degrades to `false` instead of propagating.
pub fn phonetic_equivalent(a: &str, b: &str) -> bool {
    degrade("phonetic comparison", false, || phonetic_key(a) == phonetic_key(b))
}
