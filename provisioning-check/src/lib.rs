//! Reports and terminal rendering for the `provisioning-check` command.
//!
//! The checks themselves live in `provisioning-core`; this crate turns their
//! results into text and JSON reports.

pub mod report;
