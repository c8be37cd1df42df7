//! Name matching core
//!
//! Standardization, phonetic keys, fuzzy scoring and ranked search over
//! person-name records. Everything here is pure and synchronous.

pub mod degrade;
pub mod engine;
pub mod fuzzy;
pub mod phonetic;
pub mod ranking;
pub mod similarity;
pub mod standardize;

#[cfg(test)]
mod property_tests;

pub use engine::{Algorithm, Comparison, MatchEngine};
pub use ranking::{MatchResult, NameCandidate, SearchError, SearchService, DEFAULT_THRESHOLD};
pub use standardize::standardize;
