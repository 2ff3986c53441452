//! Shared helpers for rps-frames integration tests: one-time logging,
//! Problem Details assertions, and unique identifiers.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
