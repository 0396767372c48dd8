//! # attend
//!
//! Tracks student assignment submissions: reads a tab-delimited namelist,
//! scans one folder per assignment for files whose names embed an 8-digit
//! student ID, marks attendance, recomputes totals and rates, and writes the
//! namelist back.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The `process`, `query` and `view` actions
pub mod actions;
/// Default paths and environment overrides
pub mod config;
/// A module defining a bunch of constant values to be used throughout
pub mod constants;
/// Console tables and summaries
pub mod display;
/// For all parsers used
pub mod parsers;
/// The student record and mark bookkeeping
pub mod record;
/// Collector for non-fatal issues and run counters
pub mod report;
/// Namelist parsing and writing
pub mod roster;
/// Total and rate calculation
pub mod stats;
/// Assignment folder and submission file discovery
pub mod submissions;

pub use config::Config;
pub use record::{MarkOutcome, StudentRecord};
pub use report::{Issue, IssueKind, Report};
pub use roster::{LineFormat, Roster, RosterError};
