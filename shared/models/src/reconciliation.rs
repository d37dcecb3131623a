//! Output rows produced by the reconciliation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of one breaker line against the bill of materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Summed BOM quantity equals the observed quantity.
    Correct,
    /// A BOM entry exists but the quantities differ.
    Discrepant,
    /// No BOM entry matched the (purchase order, canonical part) pair.
    Missing,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Correct => "Correct",
            Self::Discrepant => "Discrepant",
            Self::Missing => "Missing",
        };
        f.write_str(label)
    }
}

/// One row of the full comparison listing: every extracted breaker record
/// appears exactly once, whether or not its joins resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationLine {
    pub source_order_id: String,
    /// Empty string when the cross-reference did not resolve.
    pub purchase_order: String,
    pub alt_part_id: String,
    /// None when the equivalence table has no entry for the alt id.
    pub canonical_part_id: Option<String>,
    pub observed_quantity: u32,
    /// Zero when no BOM entry matched.
    pub expected_quantity: f64,
    pub status: MatchStatus,
    pub comment: String,
}

/// One row of the filtered per-order breaker listing; only records that
/// resolved to a canonical part id appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakerListingRow {
    pub purchase_order: String,
    pub alt_part_id: String,
    pub canonical_part_id: String,
    pub source_order_id: String,
    pub quantity: u32,
}
