//! Panel Shipment Audit Core
//!
//! Cross-checks the physical breaker inventory printed in per-unit panel
//! report PDFs against the expected bill of materials recorded in enterprise
//! spreadsheets. Two stages run in sequence:
//!
//! 1. **Breaker extraction** ([`extract`]) — each PDF yields aggregated
//!    breaker-count records; files are independent and extracted in parallel.
//! 2. **Reconciliation** ([`engine`]) — the full extracted set is joined
//!    against the equivalence, cross-reference, and BOM tables, and every
//!    breaker line is classified as correct, discrepant, or missing.
//!
//! [`runner::AuditRunner`] wires the stages together over an on-disk audit
//! folder; [`report`] serializes the two output tables. Upload transport,
//! archive handling, and persistence stay with the consuming collaborator.

pub mod engine;
pub mod extract;
pub mod report;
pub mod runner;

pub use engine::ReconciliationEngine;
pub use extract::{BreakerExtractor, Listing, ListingLocator, StandardLocator};
pub use report::{write_breaker_listing, write_comparison_listing};
pub use runner::{AuditOutcome, AuditRunner, DocumentFailure, FailurePolicy};
