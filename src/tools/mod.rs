//! Operations shared by the CLI and the HTTP API

pub mod names;
pub mod records;
pub mod search;
