//! # sleuth-analysis
//!
//! The deterministic analysis layer of Sleuth: pattern extraction over raw
//! query results, transaction/temporal/historical correlation, root-cause
//! ranking over the accumulated investigation steps, and the weighted
//! confidence scorer.
//!
//! Everything here is pure computation over `sleuth-core` types. No module
//! in this crate performs I/O or returns an error: malformed individual
//! records (unparseable timestamps, missing fields) are skipped, never
//! fatal. The engine crate drives these functions in pipeline order:
//! [`patterns`] per step, then [`correlation`], [`rca`], [`evidence`], and
//! [`confidence`] once the step loop has finished.

pub mod classify;
pub mod confidence;
pub mod correlation;
pub mod evidence;
pub mod patterns;
pub mod rca;
