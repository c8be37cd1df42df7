//! JSON-file record store
//!
//! Records live in `{data_dir}/records.json` as a pretty-printed array.
//! Mutations take an exclusive lock on `{data_dir}/records.lock`, write a
//! `.tmp` sibling and rename it over the original, so readers always see a
//! complete snapshot.

use super::error::StoreError;
use super::types::{NameRecord, NewRecord, RecordStats};
use crate::matching::standardize;
use chrono::Utc;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const RECORDS_FILE: &str = "records.json";
const LOCK_FILE: &str = "records.lock";

/// Record persistence backed by a single JSON file
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
}

impl RecordStore {
    /// Open the store in `data_dir`, creating the directory if needed
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| StoreError::io(&data_dir, e))?;
            info!("Created data directory: {}", data_dir.display());
        }
        Ok(Self { data_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.data_dir.join(RECORDS_FILE)
    }

    /// Snapshot of every record, active and inactive
    pub fn records(&self) -> Result<Vec<NameRecord>, StoreError> {
        read_records(&self.path())
    }

    /// Active records only
    pub fn active_records(&self) -> Result<Vec<NameRecord>, StoreError> {
        let mut records = self.records()?;
        records.retain(|r| r.is_active);
        Ok(records)
    }

    /// Create a record; the standardized name is computed here
    pub fn add(&self, new_record: NewRecord) -> Result<NameRecord, StoreError> {
        let original_name = new_record.original_name.trim().to_string();
        if original_name.is_empty() {
            return Err(StoreError::Invalid("Original name is required".to_string()));
        }
        let person_type = new_record.person_type.trim().to_string();
        if person_type.is_empty() {
            return Err(StoreError::Invalid("Person type is required".to_string()));
        }

        self.mutate(|records| {
            // ids are never reused, inactive records still count
            let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;

            let record = NameRecord {
                id: next_id,
                standardized_name: standardize(&original_name),
                original_name,
                person_type,
                case_number: non_blank(new_record.case_number),
                department: non_blank(new_record.department),
                created_by: new_record.created_by,
                created_by_name: new_record.created_by_name,
                created_at: Utc::now(),
                is_active: true,
            };

            records.push(record.clone());
            info!("Created record {} ({})", record.id, record.standardized_name);
            Ok(record)
        })
    }

    /// Fetch an active record by id
    pub fn get(&self, id: u64) -> Result<NameRecord, StoreError> {
        self.records()?
            .into_iter()
            .find(|r| r.id == id && r.is_active)
            .ok_or(StoreError::NotFound(id))
    }

    /// Mark a record inactive. Deleting an already inactive record is a no-op.
    pub fn soft_delete(&self, id: u64) -> Result<(), StoreError> {
        self.mutate(|records| {
            let record = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or(StoreError::NotFound(id))?;

            if record.is_active {
                record.is_active = false;
                info!("Soft-deleted record {}", id);
            } else {
                debug!("Record {} already inactive", id);
            }
            Ok(())
        })
    }

    /// Recompute every stored standardized name with the current rules.
    ///
    /// Returns how many records changed.
    pub fn restandardize_all(&self) -> Result<usize, StoreError> {
        self.mutate(|records| {
            let mut changed = 0;
            for record in records.iter_mut() {
                let fresh = standardize(&record.original_name);
                if fresh != record.standardized_name {
                    debug!(
                        "Record {}: {:?} -> {:?}",
                        record.id, record.standardized_name, fresh
                    );
                    record.standardized_name = fresh;
                    changed += 1;
                }
            }
            if changed > 0 {
                info!("Re-standardized {} records", changed);
            }
            Ok(changed)
        })
    }

    pub fn stats(&self) -> Result<RecordStats, StoreError> {
        Ok(RecordStats::from_records(&self.records()?))
    }

    /// Read-modify-write under an exclusive lock
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<NameRecord>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let lock_path = self.data_dir.join(LOCK_FILE);
        let lock_file = fs::File::create(&lock_path).map_err(|e| StoreError::io(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|_| StoreError::Lock(lock_path.display().to_string()))?;

        let result = (|| -> Result<T, StoreError> {
            let path = self.path();
            let mut records = read_records(&path)?;
            let value = f(&mut records)?;
            write_records(&path, &records)?;
            Ok(value)
        })();

        if let Err(e) = FileExt::unlock(&lock_file) {
            warn!("Failed to release {}: {}", lock_path.display(), e);
        }

        result
    }
}

fn read_records(path: &Path) -> Result<Vec<NameRecord>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let data = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<NameRecord> =
        serde_json::from_str(&data).map_err(|e| StoreError::json(path, e))?;
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn write_records(path: &Path, records: &[NameRecord]) -> Result<(), StoreError> {
    let tmp_path = path.with_extension("json.tmp");
    let data = serde_json::to_string_pretty(records).map_err(|e| StoreError::json(path, e))?;

    fs::write(&tmp_path, data).map_err(|e| StoreError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
