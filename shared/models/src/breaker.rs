//! Breaker inventory records extracted from panel report PDFs.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_id;

/// One distinct breaker part counted within a single panel report PDF.
///
/// Created once during extraction and immutable afterward; quantities are
/// already aggregated per part id within the file, so the reconciliation
/// engine never merges records across files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerRecord {
    /// Order identifier derived from the report file name.
    pub source_order_id: String,
    /// Vendor/alternate part number as printed on the report.
    pub alt_part_id: String,
    /// Occurrences of the part within the file, always >= 1.
    pub quantity: u32,
    /// True when the report bundles two physical panels.
    pub double_unit: bool,
}

impl BreakerRecord {
    pub fn new(
        source_order_id: impl Into<String>,
        alt_part_id: &str,
        quantity: u32,
        double_unit: bool,
    ) -> Self {
        Self {
            source_order_id: source_order_id.into(),
            alt_part_id: normalize_id(alt_part_id),
            quantity,
            double_unit,
        }
    }
}
