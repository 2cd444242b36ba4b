//! Validation driver.
//!
//! Discovers documents, runs the lint pass over the whole set, then takes
//! each document through load, release rules, and run-block checks. All
//! diagnostics are collected before anything is printed.

pub mod discover;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod tests;

pub use discover::discover_documents;
pub use pipeline::{validate_all, validate_document};
pub use report::{DocumentReport, Report};
