//! Search tool implementation
//!
//! Shared by the `search` CLI command and `POST /api/names/search`

use crate::cli::SearchArgs;
use crate::config::Settings;
use crate::error::{validate_query, AppError};
use crate::matching::{Algorithm, MatchResult, SearchService};
use crate::records::{NameRecord, RecordStore};
use serde::Serialize;
use tracing::debug;

/// A completed search over the current record snapshot
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Trimmed query
    pub query: String,
    pub algorithm: Algorithm,
    pub threshold: f64,
    pub matches: Vec<MatchResult<NameRecord>>,
}

/// Match as returned over the API: record fields plus an integer percentage
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub id: u64,
    pub original_name: String,
    pub standardized_name: String,
    pub person_type: String,
    pub case_number: Option<String>,
    pub department: Option<String>,
    /// Creator's username
    pub created_by: String,
    pub match_score: u32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&MatchResult<NameRecord>> for MatchSummary {
    fn from(m: &MatchResult<NameRecord>) -> Self {
        Self {
            id: m.record.id,
            original_name: m.record.original_name.clone(),
            standardized_name: m.record.standardized_name.clone(),
            person_type: m.record.person_type.clone(),
            case_number: m.record.case_number.clone(),
            department: m.record.department.clone(),
            created_by: m.record.created_by_name.clone(),
            match_score: score_percent(m.match_score),
            created_at: m.record.created_at,
        }
    }
}

/// Score in `[0, 1]` as a rounded percentage
pub fn score_percent(score: f64) -> u32 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Validate the query, snapshot the store and rank
pub fn run_search(
    store: &RecordStore,
    service: &SearchService,
    query: &str,
    algorithm: Algorithm,
    threshold: f64,
) -> Result<SearchOutcome, AppError> {
    let query = validate_query(query)?;
    let records = store.records()?;
    debug!("Searching {} records for {:?}", records.len(), query);

    let matches = service.search(query, &records, algorithm, threshold)?;

    Ok(SearchOutcome {
        query: query.to_string(),
        algorithm,
        threshold,
        matches,
    })
}

/// Render search results as markdown
pub fn format_search_results(outcome: &SearchOutcome, limit: Option<usize>) -> String {
    let mut md = format!(
        "# Search Results · {} matches\n\nQuery: **{}** · algorithm `{}` · threshold {}\n\n",
        outcome.matches.len(),
        outcome.query,
        outcome.algorithm,
        outcome.threshold
    );

    if outcome.matches.is_empty() {
        md.push_str("No matching records.\n");
        return md;
    }

    if let Some(first) = outcome.matches.first() {
        md.push_str(&format!("Standardized query: {}\n\n", first.standardized_query));
    }

    let shown = limit.unwrap_or(outcome.matches.len());
    for m in outcome.matches.iter().take(shown) {
        let record = &m.record;
        md.push_str(&format!(
            "## #{} {} · {}%\n\n",
            record.id,
            record.original_name,
            score_percent(m.match_score)
        ));
        md.push_str(&format!("- Standardized: {}\n", m.record_standardized));
        md.push_str(&format!("- Type: {}\n", record.person_type));
        if let Some(case) = &record.case_number {
            md.push_str(&format!("- Case: {}\n", case));
        }
        if let Some(department) = &record.department {
            md.push_str(&format!("- Department: {}\n", department));
        }
        md.push('\n');
    }

    if shown < outcome.matches.len() {
        md.push_str(&format!(
            "_{} more not shown_\n",
            outcome.matches.len() - shown
        ));
    }

    md
}

/// Execute the search command
pub fn execute_search(
    store: &RecordStore,
    settings: &Settings,
    args: SearchArgs,
) -> Result<String, AppError> {
    let algorithm = args
        .algorithm
        .as_deref()
        .map(Algorithm::parse)
        .unwrap_or(settings.default_algorithm);
    let threshold = args.threshold.unwrap_or(settings.default_threshold);

    let outcome = run_search(store, &SearchService::new(), &args.query, algorithm, threshold)?;
    Ok(format_search_results(&outcome, args.limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::NewRecord;
    use tempfile::TempDir;

    fn seeded_store(dir: &TempDir) -> RecordStore {
        let store = RecordStore::open(dir.path()).unwrap();
        for (name, person_type) in [
            ("Suresh Kumar", "suspect"),
            ("Anjali Devi", "victim"),
            ("Ramesh Yadav", "witness"),
        ] {
            store
                .add(NewRecord {
                    original_name: name.to_string(),
                    person_type: person_type.to_string(),
                    created_by: 1,
                    created_by_name: "admin".to_string(),
                    ..Default::default()
                })
                .unwrap();
        }
        store
    }

    #[test]
    fn test_score_percent() {
        assert_eq!(score_percent(1.0), 100);
        assert_eq!(score_percent(0.955), 96);
        assert_eq!(score_percent(0.0), 0);
    }

    #[test]
    fn test_run_search_trims_query() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);

        let outcome = run_search(
            &store,
            &SearchService::new(),
            "  Sureesh Kumar  ",
            Algorithm::Combined,
            0.3,
        )
        .unwrap();

        assert_eq!(outcome.query, "Sureesh Kumar");
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].record.id, 1);
    }

    #[test]
    fn test_run_search_blank_query() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let result = run_search(&store, &SearchService::new(), "  ", Algorithm::Combined, 0.3);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_deleted_records_not_found() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        store.soft_delete(1).unwrap();

        let outcome = run_search(&store, &SearchService::new(), "Suresh Kumar", Algorithm::Fuzzy, -1.0)
            .unwrap();
        assert!(outcome.matches.iter().all(|m| m.record.id != 1));
        assert_eq!(outcome.matches.len(), 2);
    }

    #[test]
    fn test_match_summary_uses_creator_name() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let outcome =
            run_search(&store, &SearchService::new(), "Suresh Kumar", Algorithm::Combined, 0.3)
                .unwrap();

        let summary = MatchSummary::from(&outcome.matches[0]);
        assert_eq!(summary.created_by, "admin");
        assert_eq!(summary.match_score, 100);
    }

    #[test]
    fn test_format_search_results() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let outcome =
            run_search(&store, &SearchService::new(), "Sureesh", Algorithm::Combined, 0.3).unwrap();

        let md = format_search_results(&outcome, None);
        assert!(md.starts_with("# Search Results · 1 matches"));
        assert!(md.contains("## #1 Suresh Kumar"));
        assert!(md.contains("Standardized query: Suresh"));
    }

    #[test]
    fn test_format_respects_limit() {
        let dir = TempDir::new().unwrap();
        let store = seeded_store(&dir);
        let outcome =
            run_search(&store, &SearchService::new(), "Suresh", Algorithm::Fuzzy, -1.0).unwrap();

        let md = format_search_results(&outcome, Some(1));
        assert_eq!(md.matches("## #").count(), 1);
        assert!(md.contains("_2 more not shown_"));
    }

    #[test]
    fn test_format_empty() {
        let outcome = SearchOutcome {
            query: "Zed".to_string(),
            algorithm: Algorithm::Combined,
            threshold: 0.3,
            matches: Vec::new(),
        };
        assert!(format_search_results(&outcome, None).contains("No matching records."));
    }
}
