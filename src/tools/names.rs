//! Standardize and compare tools

use super::search::score_percent;
use crate::cli::{CompareArgs, StandardizeArgs};
use crate::error::{validate_name, AppError};
use crate::matching::{standardize, Algorithm, Comparison, MatchEngine};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standardized {
    pub original: String,
    pub standardized: String,
}

/// Standardize each name in order
pub fn standardize_all<S: AsRef<str>>(names: &[S]) -> Vec<Standardized> {
    names
        .iter()
        .map(|name| Standardized {
            original: name.as_ref().to_string(),
            standardized: standardize(name.as_ref()),
        })
        .collect()
}

/// Diagnostic comparison of two names
#[derive(Debug, Clone, Serialize)]
pub struct NameComparison {
    pub name1: String,
    pub name2: String,
    pub algorithm: Algorithm,
    /// Score under `algorithm`, as used by search
    pub score: f64,
    #[serde(flatten)]
    pub detail: Comparison,
}

/// Compare two names; both must be non-blank
pub fn compare_names(
    engine: &MatchEngine,
    name1: &str,
    name2: &str,
    algorithm: Algorithm,
) -> Result<NameComparison, AppError> {
    if name1.trim().is_empty() || name2.trim().is_empty() {
        return Err(AppError::InvalidInput("Both names are required".to_string()));
    }

    Ok(NameComparison {
        name1: name1.to_string(),
        name2: name2.to_string(),
        algorithm,
        score: engine.score(name1, name2, algorithm),
        detail: engine.compare(name1, name2),
    })
}

pub fn format_comparison(comparison: &NameComparison) -> String {
    let detail = &comparison.detail;
    let mut md = format!(
        "# {} ↔ {}\n\n",
        comparison.name1, comparison.name2
    );
    md.push_str(&format!(
        "Score ({}): **{}%**\n\n",
        comparison.algorithm,
        score_percent(comparison.score)
    ));
    md.push_str(&format!("- Fuzzy: {}%\n", score_percent(detail.fuzzy_score)));
    md.push_str(&format!(
        "- Phonetic match: {}\n",
        if detail.phonetic_match { "yes" } else { "no" }
    ));
    md.push_str(&format!("- Combined: {}%\n", score_percent(detail.combined_score)));
    md.push_str(&format!(
        "- Standardized: {} / {}\n",
        detail.standardized_name1, detail.standardized_name2
    ));
    md
}

/// Execute the standardize command
pub fn execute_standardize(args: StandardizeArgs) -> Result<String, AppError> {
    for name in &args.names {
        validate_name(name, "Name")?;
    }

    let lines: Vec<String> = standardize_all(&args.names)
        .into_iter()
        .map(|s| format!("{} → {}", s.original.trim(), s.standardized))
        .collect();
    Ok(lines.join("\n"))
}

/// Execute the compare command
pub fn execute_compare(args: CompareArgs) -> Result<String, AppError> {
    let algorithm = args
        .algorithm
        .as_deref()
        .map(Algorithm::parse)
        .unwrap_or_default();
    let comparison = compare_names(&MatchEngine::new(), &args.name1, &args.name2, algorithm)?;
    Ok(format_comparison(&comparison))
}
