//! Ranked name search
//!
//! Linear scan over a snapshot of records: score every active record, boost
//! records whose standardized name equals the standardized query, keep those
//! strictly above the threshold and sort by score descending, ties by
//! ascending record id.

use super::degrade::degrade;
use super::engine::{Algorithm, MatchEngine, Scored};
use super::standardize::standardize;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

/// Boost applied when standardized names are identical
pub const STANDARDIZED_MATCH_BOOST: f64 = 0.2;

/// Default minimum (exclusive) score
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// A record the search can rank
pub trait NameCandidate {
    fn id(&self) -> u64;
    fn original_name(&self) -> &str;
    fn is_active(&self) -> bool;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search query is required")]
    EmptyQuery,
}

/// A record that qualified for a query
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<R> {
    #[serde(flatten)]
    pub record: R,
    /// Final score in `[0, 1]`
    pub match_score: f64,
    /// Standardized query, identical across one search
    pub standardized_query: String,
    /// Live standardization of the record's original name
    pub record_standardized: String,
}

/// Search service over record snapshots
#[derive(Debug, Clone, Default)]
pub struct SearchService {
    engine: MatchEngine,
}

impl SearchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// Rank `records` against `query`.
    ///
    /// Fails only for a blank query, before any record is scored. Inactive
    /// records never appear in the output. The threshold is not clamped. A
    /// record whose scoring faults scores 0.0 and the scan moves on.
    pub fn search<R>(
        &self,
        query: &str,
        records: &[R],
        algorithm: Algorithm,
        threshold: f64,
    ) -> Result<Vec<MatchResult<R>>, SearchError>
    where
        R: NameCandidate + Clone,
    {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let standardized_query = standardize(query);
        let active: Vec<&R> = records.iter().filter(|r| r.is_active()).collect();

        debug!(
            query,
            %algorithm,
            threshold,
            total = records.len(),
            active = active.len(),
            standardized_query = %standardized_query,
            "Starting name search"
        );

        let mut matches: Vec<MatchResult<R>> = Vec::new();
        for record in active {
            let (scored, record_standardized) = degrade(
                "record scoring",
                (Scored::default(), String::new()),
                || {
                    let name = record.original_name();
                    (
                        self.engine.evaluate(query, name, algorithm),
                        standardize(name),
                    )
                },
            );

            let base = scored.score;
            let boosted = record_standardized == standardized_query;
            let final_score = if boosted {
                (base + STANDARDIZED_MATCH_BOOST).min(1.0)
            } else {
                base
            };
            let kept = final_score > threshold;

            debug!(
                record_id = record.id(),
                base_score = base,
                fuzzy_rule = ?scored.fuzzy.map(|f| f.rule),
                fuzzy_baseline = ?scored.fuzzy.and_then(|f| f.baseline),
                phonetic_match = ?scored.phonetic_match,
                boosted,
                final_score,
                kept,
                "Scored record"
            );

            if kept {
                matches.push(MatchResult {
                    record: record.clone(),
                    match_score: final_score,
                    standardized_query: standardized_query.clone(),
                    record_standardized,
                });
            }
        }

        matches.sort_by(compare_ranked);

        info!(
            query,
            %algorithm,
            matches = matches.len(),
            "Name search complete"
        );

        Ok(matches)
    }
}

/// Score descending, then id ascending
fn compare_ranked<R: NameCandidate>(a: &MatchResult<R>, b: &MatchResult<R>) -> Ordering {
    b.match_score
        .total_cmp(&a.match_score)
        .then_with(|| a.record.id().cmp(&b.record.id()))
}
