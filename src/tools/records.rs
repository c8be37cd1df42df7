//! Record management tools

use crate::auth::UserDirectory;
use crate::cli::{AddArgs, DeleteArgs};
use crate::error::AppError;
use crate::records::{NameRecord, NewRecord, RecordStats, RecordStore};

/// Username recorded as creator for CLI-added records
const CLI_CREATOR: &str = "cli";

fn format_record(record: &NameRecord) -> String {
    let mut line = format!(
        "#{} {} ({}) · {}",
        record.id, record.original_name, record.standardized_name, record.person_type
    );
    if let Some(case) = &record.case_number {
        line.push_str(&format!(" · case {}", case));
    }
    if let Some(department) = &record.department {
        line.push_str(&format!(" · {}", department));
    }
    line
}

pub fn format_stats(stats: &RecordStats) -> String {
    let mut md = format!(
        "# Records\n\nActive: {}\nUnique names: {}\n",
        stats.total_records, stats.unique_names
    );
    if !stats.by_type.is_empty() {
        md.push_str("\n## By type\n");
        for (person_type, count) in &stats.by_type {
            md.push_str(&format!("- {}: {}\n", person_type, count));
        }
    }
    if !stats.by_department.is_empty() {
        md.push_str("\n## By department\n");
        for (department, count) in &stats.by_department {
            md.push_str(&format!("- {}: {}\n", department, count));
        }
    }
    md
}

pub fn execute_add(store: &RecordStore, args: AddArgs) -> Result<String, AppError> {
    let record = store.add(NewRecord {
        original_name: args.name,
        person_type: args.person_type,
        case_number: args.case_number,
        department: args.department,
        created_by: 0,
        created_by_name: CLI_CREATOR.to_string(),
    })?;
    Ok(format!("✓ Created {}", format_record(&record)))
}

pub fn execute_delete(store: &RecordStore, args: DeleteArgs) -> Result<String, AppError> {
    store.get(args.id)?;
    store.soft_delete(args.id)?;
    Ok(format!("✓ Deleted record #{}", args.id))
}

pub fn execute_list(store: &RecordStore) -> Result<String, AppError> {
    let records = store.active_records()?;
    if records.is_empty() {
        return Ok("No active records. Use 'namematch add' to create one.".to_string());
    }

    let mut output = format!("Active records ({}):\n", records.len());
    for record in &records {
        output.push_str(&format!("  • {}\n", format_record(record)));
    }
    Ok(output)
}

pub fn execute_stats(store: &RecordStore) -> Result<String, AppError> {
    Ok(format_stats(&store.stats()?))
}

pub fn execute_restandardize(store: &RecordStore) -> Result<String, AppError> {
    let changed = store.restandardize_all()?;
    Ok(format!("✓ Re-standardized {} records", changed))
}

pub fn execute_setup(users: &UserDirectory) -> Result<String, AppError> {
    let seeded = users.seed_demo_users()?;
    let mut output = format!("✓ Created {} demo users in {}\n", seeded.len(), users.path().display());
    output.push_str("  Admin:    admin / admin123\n");
    output.push_str("  Officer1: officer1 / officer123\n");
    output.push_str("  Officer2: officer2 / officer123");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn add_args(name: &str) -> AddArgs {
        AddArgs {
            name: name.to_string(),
            person_type: "suspect".to_string(),
            case_number: Some("FIR-7".to_string()),
            department: None,
        }
    }

    #[test]
    fn test_add_and_list() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();

        let out = execute_add(&store, add_args("sureesh kumar")).unwrap();
        assert_eq!(out, "✓ Created #1 sureesh kumar (Suresh Kumar) · suspect · case FIR-7");
        assert_eq!(store.get(1).unwrap().created_by_name, "cli");

        let list = execute_list(&store).unwrap();
        assert!(list.starts_with("Active records (1):"));
    }

    #[test]
    fn test_list_empty() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        assert!(execute_list(&store).unwrap().starts_with("No active records"));
    }

    #[test]
    fn test_delete_twice_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        execute_add(&store, add_args("Anjali Devi")).unwrap();

        execute_delete(&store, DeleteArgs { id: 1 }).unwrap();
        let again = execute_delete(&store, DeleteArgs { id: 1 });
        assert!(matches!(again, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_stats_output() {
        let dir = TempDir::new().unwrap();
        let store = RecordStore::open(dir.path()).unwrap();
        execute_add(&store, add_args("Suresh Kumar")).unwrap();
        execute_add(&store, add_args("Sureesh Kumar")).unwrap();

        let out = execute_stats(&store).unwrap();
        assert!(out.contains("Active: 2"));
        assert!(out.contains("Unique names: 1"));
        assert!(out.contains("- suspect: 2"));
        assert!(out.contains("- Unassigned: 2"));
    }

    #[test]
    fn test_setup_output() {
        let dir = TempDir::new().unwrap();
        let users = UserDirectory::new(dir.path(), 4);
        let out = execute_setup(&users).unwrap();
        assert!(out.starts_with("✓ Created 3 demo users"));
        assert_eq!(users.users().unwrap().len(), 3);
    }
}
