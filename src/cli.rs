//! CLI mode implementation
//!
//! Provides command-line access to the matching tools and the record store

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// namematch CLI
#[derive(Parser, Debug)]
#[command(name = "namematch")]
#[command(about = "Indian name standardization and fuzzy/phonetic search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding records.json and users.json
    #[arg(long, global = true, env = "NAMEMATCH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Create the demo user accounts
    Setup,
    /// Search stored records for a name
    Search(SearchArgs),
    /// Print the standardized form of each name
    Standardize(StandardizeArgs),
    /// Compare two names under every algorithm
    Compare(CompareArgs),
    /// Add a name record
    Add(AddArgs),
    /// Soft-delete a record
    Delete(DeleteArgs),
    /// List active records
    List,
    /// Show record statistics
    Stats,
    /// Recompute stored standardized names with the current rules
    Restandardize,
}

/// Serve command arguments
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen address, e.g. 127.0.0.1:5000
    #[arg(short = 'b', long)]
    pub bind: Option<String>,
}

/// Search command arguments
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Name to search for
    #[arg(short = 'q', long)]
    pub query: String,

    /// fuzzy, phonetic or combined (anything else means combined)
    #[arg(short = 'a', long)]
    pub algorithm: Option<String>,

    /// Minimum score, exclusive (default 0.3)
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub threshold: Option<f64>,

    /// Maximum number of results to print
    #[arg(short = 'l', long)]
    pub limit: Option<usize>,
}

/// Standardize command arguments
#[derive(Args, Debug, Clone)]
pub struct StandardizeArgs {
    /// Names to standardize
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Compare command arguments
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    pub name1: String,
    pub name2: String,

    /// Algorithm used for the headline score
    #[arg(short = 'a', long)]
    pub algorithm: Option<String>,
}

/// Add command arguments
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Person's name as written
    #[arg(short = 'n', long)]
    pub name: String,

    /// Person type: suspect, witness, victim, ...
    #[arg(short = 't', long = "type")]
    pub person_type: String,

    /// Case number
    #[arg(short = 'c', long = "case")]
    pub case_number: Option<String>,

    /// Department
    #[arg(short = 'd', long)]
    pub department: Option<String>,
}

/// Delete command arguments
#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// Record id
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_args() {
        let cli = Cli::parse_from([
            "namematch", "search", "-q", "Sureesh Kumar", "-a", "phonetic", "-t", "0.5", "-l", "5",
        ]);
        match cli.command {
            Some(Commands::Search(args)) => {
                assert_eq!(args.query, "Sureesh Kumar");
                assert_eq!(args.algorithm.as_deref(), Some("phonetic"));
                assert_eq!(args.threshold, Some(0.5));
                assert_eq!(args.limit, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_threshold() {
        let cli = Cli::parse_from(["namematch", "search", "-q", "Suresh", "-t", "-0.5"]);
        match cli.command {
            Some(Commands::Search(args)) => assert_eq!(args.threshold, Some(-0.5)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_add_args() {
        let cli = Cli::parse_from([
            "namematch", "add", "--name", "Anjali Devi", "--type", "victim", "--case", "FIR-1",
        ]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.name, "Anjali Devi");
                assert_eq!(args.person_type, "victim");
                assert_eq!(args.case_number.as_deref(), Some("FIR-1"));
                assert!(args.department.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["namematch", "stats", "--data-dir", "/tmp/nm", "--quiet"]);
        assert!(matches!(cli.command, Some(Commands::Stats)));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/nm")));
        assert!(cli.quiet);
    }

    #[test]
    fn test_standardize_requires_names() {
        assert!(Cli::try_parse_from(["namematch", "standardize"]).is_err());
    }
}
