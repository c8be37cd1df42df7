use super::engine::{Algorithm, MatchEngine};
use super::fuzzy::FuzzyScorer;
use super::phonetic::{phonetic_equivalent, phonetic_key};
use super::ranking::{NameCandidate, SearchService};
use super::standardize::standardize;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Row {
    id: u64,
    name: String,
    active: bool,
}

impl NameCandidate for Row {
    fn id(&self) -> u64 {
        self.id
    }

    fn original_name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// Latin names with the misspellings the rule tables care about
fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{0,24}",
        proptest::collection::vec(
            prop_oneof![
                Just("suresh"),
                Just("sureesh"),
                Just("sursh"),
                Just("rames"),
                Just("ramesh"),
                Just("kummar"),
                Just("kumarr"),
                Just("sing"),
                Just("singh"),
                Just("yadhav"),
                Just("chaudhary"),
                Just("jii"),
                Just("shh"),
                Just("Devi"),
                Just("  "),
            ],
            1..5,
        )
        .prop_map(|parts| parts.join(" ")),
    ]
}

proptest! {
    #[test]
    fn standardize_is_idempotent(name in name_strategy()) {
        let once = standardize(&name);
        prop_assert_eq!(standardize(&once), once);
    }

    #[test]
    fn standardize_is_idempotent_with_accents(name in "[a-zA-Z éÉüÜñÑßı'.-]{0,30}") {
        let once = standardize(&name);
        prop_assert_eq!(standardize(&once), once);
    }

    #[test]
    fn fuzzy_identity(name in "[a-zA-Z][a-zA-Z ]{0,20}") {
        prop_assert_eq!(FuzzyScorer::new().score(&name, &name), 1.0);
    }

    #[test]
    fn fuzzy_is_symmetric(a in name_strategy(), b in name_strategy()) {
        let scorer = FuzzyScorer::new();
        prop_assert_eq!(scorer.score(&a, &b), scorer.score(&b, &a));
    }

    #[test]
    fn phonetic_is_symmetric(a in name_strategy(), b in name_strategy()) {
        prop_assert_eq!(phonetic_equivalent(&a, &b), phonetic_equivalent(&b, &a));
    }

    #[test]
    fn phonetic_key_is_total(text in any::<String>()) {
        let key = phonetic_key(&text);
        prop_assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == ' '));
    }

    #[test]
    fn scores_are_bounded(a in any::<String>(), b in name_strategy()) {
        let engine = MatchEngine::new();
        for algorithm in [Algorithm::Fuzzy, Algorithm::Phonetic, Algorithm::Combined] {
            let score = engine.score(&a, &b, algorithm);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }

    #[test]
    fn inactive_records_never_returned(
        query in "[a-zA-Z]{1,10}",
        names in proptest::collection::vec(name_strategy(), 0..8),
        threshold in -1.0f64..1.0,
    ) {
        let rows: Vec<Row> = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Row { id: i as u64 + 1, name, active: i % 2 == 0 })
            .collect();

        let results = SearchService::new()
            .search(&query, &rows, Algorithm::Combined, threshold)
            .unwrap();

        for result in &results {
            prop_assert!(result.record.active);
            prop_assert!(result.match_score > threshold);
            prop_assert!((0.0..=1.0).contains(&result.match_score));
        }
    }
}
