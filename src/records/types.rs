use crate::matching::NameCandidate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A recorded person name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameRecord {
    pub id: u64,
    pub original_name: String,
    /// Standardized form computed when the record was created
    pub standardized_name: String,
    /// Open tag: suspect, witness, victim, ...
    pub person_type: String,
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    pub created_by: u64,
    #[serde(default)]
    pub created_by_name: String,
    pub created_at: DateTime<Utc>,
    /// Soft-delete flag; once false it stays false
    pub is_active: bool,
}

impl NameCandidate for NameRecord {
    fn id(&self) -> u64 {
        self.id
    }

    fn original_name(&self) -> &str {
        &self.original_name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Input for creating a record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRecord {
    pub original_name: String,
    pub person_type: String,
    #[serde(default)]
    pub case_number: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub created_by: u64,
    #[serde(default)]
    pub created_by_name: String,
}

/// Aggregate counts over active records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordStats {
    pub total_records: usize,
    pub unique_names: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_department: BTreeMap<String, usize>,
}

impl RecordStats {
    pub fn from_records(records: &[NameRecord]) -> Self {
        let mut stats = RecordStats::default();
        let mut names = std::collections::HashSet::new();

        for record in records.iter().filter(|r| r.is_active) {
            stats.total_records += 1;
            names.insert(record.standardized_name.as_str());
            *stats.by_type.entry(record.person_type.clone()).or_insert(0) += 1;
            let department = record
                .department
                .clone()
                .unwrap_or_else(|| "Unassigned".to_string());
            *stats.by_department.entry(department).or_insert(0) += 1;
        }

        stats.unique_names = names.len();
        stats
    }
}
