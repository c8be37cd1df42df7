//! Match Engine
//!
//! Dispatches per-algorithm scoring (`fuzzy`, `phonetic`, `combined`) and
//! exposes the standalone comparisons used by diagnostics.

use super::degrade::degrade;
use super::fuzzy::{FuzzyMatch, FuzzyScorer};
use super::phonetic::phonetic_equivalent;
use super::standardize::standardize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Phonetic-mode score when keys match
pub const PHONETIC_MATCH_SCORE: f64 = 0.8;
/// Phonetic-mode score when keys differ; never zero for short name tokens
pub const PHONETIC_MISS_SCORE: f64 = 0.1;
/// Bonus added to the fuzzy score in combined mode when keys match
pub const COMBINED_PHONETIC_BONUS: f64 = 0.4;

/// Scoring algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Fuzzy,
    Phonetic,
    #[default]
    Combined,
}

impl Algorithm {
    /// Parse an algorithm identifier; anything unrecognized is `Combined`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fuzzy" => Algorithm::Fuzzy,
            "phonetic" => Algorithm::Phonetic,
            _ => Algorithm::Combined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Fuzzy => "fuzzy",
            Algorithm::Phonetic => "phonetic",
            Algorithm::Combined => "combined",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Algorithm {
    fn from(name: &str) -> Self {
        Algorithm::parse(name)
    }
}

/// Side-by-side comparison of two names under every algorithm
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub fuzzy_score: f64,
    pub phonetic_match: bool,
    pub combined_score: f64,
    pub standardized_name1: String,
    pub standardized_name2: String,
}

/// A candidate score with the evidence that produced it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scored {
    /// Score in `[0, 1]`
    pub score: f64,
    /// Fuzzy outcome, when the algorithm ran the fuzzy scorer
    pub fuzzy: Option<FuzzyMatch>,
    /// Phonetic key comparison, when the algorithm ran it
    pub phonetic_match: Option<bool>,
}

/// Engine combining fuzzy and phonetic scoring
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    fuzzy: FuzzyScorer,
}

impl MatchEngine {
    /// Create an engine with the built-in spelling variants
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `candidate` against `query` with the chosen algorithm, in `[0, 1]`
    pub fn score(&self, query: &str, candidate: &str, algorithm: Algorithm) -> f64 {
        self.evaluate(query, candidate, algorithm).score
    }

    /// Score with the deciding fuzzy rule and phonetic outcome attached
    pub fn evaluate(&self, query: &str, candidate: &str, algorithm: Algorithm) -> Scored {
        let mut scored = match algorithm {
            Algorithm::Fuzzy => {
                let fuzzy = self.fuzzy.evaluate(query, candidate);
                Scored {
                    score: fuzzy.score,
                    fuzzy: Some(fuzzy),
                    phonetic_match: None,
                }
            }
            Algorithm::Phonetic => {
                let matched = self.phonetic_match(query, candidate);
                Scored {
                    score: if matched {
                        PHONETIC_MATCH_SCORE
                    } else {
                        PHONETIC_MISS_SCORE
                    },
                    fuzzy: None,
                    phonetic_match: Some(matched),
                }
            }
            Algorithm::Combined => self.combined(query, candidate),
        };
        scored.score = scored.score.clamp(0.0, 1.0);
        scored
    }

    pub fn fuzzy_match(&self, query: &str, candidate: &str) -> f64 {
        self.fuzzy.score(query, candidate)
    }

    pub fn phonetic_match(&self, query: &str, candidate: &str) -> bool {
        phonetic_equivalent(query, candidate)
    }

    /// Fuzzy score plus a flat bonus for a phonetic match, capped at 1.0
    pub fn combined_match(&self, query: &str, candidate: &str) -> f64 {
        self.combined(query, candidate).score
    }

    fn combined(&self, query: &str, candidate: &str) -> Scored {
        degrade("combined match", Scored::default(), || {
            let fuzzy = self.fuzzy.evaluate(query, candidate);
            let matched = self.phonetic_match(query, candidate);
            let bonus = if matched { COMBINED_PHONETIC_BONUS } else { 0.0 };
            Scored {
                score: (fuzzy.score + bonus).min(1.0),
                fuzzy: Some(fuzzy),
                phonetic_match: Some(matched),
            }
        })
    }

    /// Compare two names in isolation under every algorithm
    pub fn compare(&self, name1: &str, name2: &str) -> Comparison {
        Comparison {
            fuzzy_score: self.fuzzy_match(name1, name2),
            phonetic_match: self.phonetic_match(name1, name2),
            combined_score: self.combined_match(name1, name2),
            standardized_name1: standardize(name1),
            standardized_name2: standardize(name2),
        }
    }
}
