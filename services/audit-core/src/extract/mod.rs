//! Breaker Extractor
//!
//! Recovers structured breaker inventory from the loosely formatted text of
//! panel report PDFs. The page-selection heuristic lives behind the
//! [`ListingLocator`] strategy so new report layouts can add detection rules
//! without touching token extraction.

pub mod breakers;
pub mod locator;
pub mod pdf;

pub use breakers::{source_order_id, BreakerExtractor};
pub use locator::{Listing, ListingLocator, StandardLocator};
