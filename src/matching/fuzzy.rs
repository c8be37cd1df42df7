//! Fuzzy name scoring
//!
//! Scores two names in `[0, 1]` with a fixed priority of rules: exact
//! equality, containment, then bigram similarity boosted by known spelling
//! variants or a phonetic key match.

use super::degrade::degrade;
use super::phonetic::phonetic_equivalent;
use super::similarity::dice_coefficient;

/// Score for case-insensitive exact equality
pub const EXACT_SCORE: f64 = 1.0;
/// Score when one name contains the other
pub const CONTAINS_SCORE: f64 = 0.9;
/// Boost when the names use two spellings of a known variant pair
pub const VARIANT_BOOST: f64 = 0.3;
/// Boost when the names share a phonetic key
pub const PHONETIC_BOOST: f64 = 0.2;

/// Known spelling drift for common name tokens
const DEFAULT_VARIANTS: &[(&str, &str)] = &[
    ("sureesh", "suresh"),
    ("sursh", "suresh"),
    ("ramesh", "rames"),
    ("kumar", "kummar"),
    ("singh", "sing"),
    ("yadav", "yadhav"),
    ("sharma", "sharma"),
    ("verma", "verma"),
];

/// A pair of spellings treated as the same token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellingVariant {
    pub from: String,
    pub to: String,
}

impl SpellingVariant {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// True when `a` holds one spelling and `b` the other, in either direction
    fn links(&self, a: &str, b: &str) -> bool {
        (a.contains(&self.from) && b.contains(&self.to))
            || (a.contains(&self.to) && b.contains(&self.from))
    }
}

/// Which rule decided a fuzzy score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyRule {
    /// Names are equal after trimming and lowercasing
    Exact,
    /// One name is a substring of the other
    Contains,
    /// Bigram similarity plus the spelling-variant boost
    Variant,
    /// Bigram similarity plus the phonetic boost
    Phonetic,
    /// Plain bigram similarity
    Similarity,
    /// Scoring faulted and degraded to zero
    Degraded,
}

/// Fuzzy match outcome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    /// Final score in `[0, 1]`
    pub score: f64,
    /// Bigram baseline, when it was computed
    pub baseline: Option<f64>,
    /// Deciding rule
    pub rule: FuzzyRule,
}

impl FuzzyMatch {
    fn fixed(score: f64, rule: FuzzyRule) -> Self {
        Self {
            score,
            baseline: None,
            rule,
        }
    }

    fn boosted(baseline: f64, boost: f64, rule: FuzzyRule) -> Self {
        Self {
            score: (baseline + boost).min(1.0),
            baseline: Some(baseline),
            rule,
        }
    }
}

/// Fuzzy scorer with a spelling-variant dictionary
#[derive(Debug, Clone)]
pub struct FuzzyScorer {
    variants: Vec<SpellingVariant>,
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyScorer {
    /// Create a scorer with the built-in variant dictionary
    pub fn new() -> Self {
        Self::with_variants(
            DEFAULT_VARIANTS
                .iter()
                .map(|(from, to)| SpellingVariant::new(*from, *to))
                .collect(),
        )
    }

    /// Create a scorer with a custom variant dictionary
    pub fn with_variants(variants: Vec<SpellingVariant>) -> Self {
        Self { variants }
    }

    /// Score `query` against `candidate`.
    ///
    /// Never fails: a fault inside scoring is logged and yields 0.0.
    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        self.evaluate(query, candidate).score
    }

    /// Score with the deciding rule attached
    pub fn evaluate(&self, query: &str, candidate: &str) -> FuzzyMatch {
        degrade(
            "fuzzy match",
            FuzzyMatch::fixed(0.0, FuzzyRule::Degraded),
            || self.evaluate_inner(query, candidate),
        )
    }

    fn evaluate_inner(&self, query: &str, candidate: &str) -> FuzzyMatch {
        let clean_query = query.trim().to_lowercase();
        let clean_candidate = candidate.trim().to_lowercase();

        if clean_query == clean_candidate {
            return FuzzyMatch::fixed(EXACT_SCORE, FuzzyRule::Exact);
        }

        if clean_candidate.contains(&clean_query) || clean_query.contains(&clean_candidate) {
            return FuzzyMatch::fixed(CONTAINS_SCORE, FuzzyRule::Contains);
        }

        let baseline = dice_coefficient(&clean_query, &clean_candidate);

        if self
            .variants
            .iter()
            .any(|variant| variant.links(&clean_query, &clean_candidate))
        {
            return FuzzyMatch::boosted(baseline, VARIANT_BOOST, FuzzyRule::Variant);
        }

        if phonetic_equivalent(&clean_query, &clean_candidate) {
            return FuzzyMatch::boosted(baseline, PHONETIC_BOOST, FuzzyRule::Phonetic);
        }

        Self::similarity_only(baseline)
    }

    fn similarity_only(baseline: f64) -> FuzzyMatch {
        FuzzyMatch {
            score: baseline,
            baseline: Some(baseline),
            rule: FuzzyRule::Similarity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fuzzy_score(query: &str, candidate: &str) -> f64 {
        FuzzyScorer::new().score(query, candidate)
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let result = FuzzyScorer::new().evaluate("  Suresh Kumar ", "suresh KUMAR");
        assert_eq!(result.score, 1.0);
        assert_eq!(result.rule, FuzzyRule::Exact);
    }

    #[test]
    fn test_contains_either_direction() {
        assert_eq!(fuzzy_score("Suresh", "Suresh Kumar"), CONTAINS_SCORE);
        assert_eq!(fuzzy_score("Suresh Kumar", "Suresh"), CONTAINS_SCORE);
    }

    #[test]
    fn test_variant_boost() {
        let result = FuzzyScorer::new().evaluate("Sureesh Kumar", "Suresh Kumar");
        assert_eq!(result.rule, FuzzyRule::Variant);
        // baseline 20/21 plus the boost caps at 1.0
        assert_eq!(result.score, 1.0);
        let baseline = result.baseline.expect("baseline computed");
        assert!((baseline - 20.0 / 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_spacing_variant_scores_full() {
        let result = FuzzyScorer::new().evaluate("Ram Kumar", "Ramkumar");
        assert_eq!(result.rule, FuzzyRule::Similarity);
        assert_eq!(result.score, 1.0);
        assert_eq!(fuzzy_score("Ramkumar", "Ram Kumar"), 1.0);
    }

    #[test]
    fn test_variant_checked_both_ways() {
        let a = fuzzy_score("Amit Yadav", "Amit Yadhav ji");
        let b = fuzzy_score("Amit Yadhav ji", "Amit Yadav");
        assert_eq!(a, b);
    }

    #[test]
    fn test_phonetic_boost() {
        let scorer = FuzzyScorer::with_variants(Vec::new());
        let result = scorer.evaluate("Bharat", "Barat");
        assert_eq!(result.rule, FuzzyRule::Phonetic);
        let baseline = result.baseline.expect("baseline computed");
        assert!((result.score - (baseline + PHONETIC_BOOST)).abs() < 1e-9);
    }

    #[test]
    fn test_plain_similarity() {
        let result = FuzzyScorer::new().evaluate("Suresh", "Anjali Devi");
        assert_eq!(result.rule, FuzzyRule::Similarity);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_identity() {
        for name in ["a", "Suresh", "Anjali Devi", "  x y z "] {
            assert_eq!(fuzzy_score(name, name), 1.0);
        }
    }

    #[test]
    fn test_custom_variants() {
        let scorer = FuzzyScorer::with_variants(vec![SpellingVariant::new("mohd", "mohammed")]);
        let result = scorer.evaluate("Mohd Rafi", "Mohammed Rafi");
        assert_eq!(result.rule, FuzzyRule::Variant);
    }
}
