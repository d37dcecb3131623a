//! # PanelAudit Core Domain Models
//!
//! Core domain models for the panel shipment audit system.
//!
//! ## Key Models
//!
//! - **BreakerRecord**: One breaker part counted in a single panel report PDF
//! - **EquivalenceEntry**: Alternate part number to canonical part number mapping
//! - **CrossReference**: Sales order / purchase order linkage
//! - **BomLine**: One expected-quantity line of the purchase-order bill of materials
//! - **ReconciliationLine**: The classified comparison of observed vs expected quantity
//!
//! All id and order-number fields are compared through the [`normalize`]
//! primitives: case-insensitive, whitespace-trimmed, with spreadsheet
//! decimal artifacts collapsed.

pub mod breaker;
pub mod normalize;
pub mod reconciliation;
pub mod tables;


pub use breaker::*;
pub use normalize::*;
pub use reconciliation::*;
pub use tables::*;
