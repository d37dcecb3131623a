//! Reconciliation Engine
//!
//! Joins the extracted breaker set against the three reference tables and
//! classifies every breaker line. The engine's only state is the read-only
//! lookup indices built at construction; each record is classified
//! independently, so reconciliation is a pure function of its inputs.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use panelaudit_models::{
    normalize_id, normalize_order_number, BomLine, BreakerListingRow, BreakerRecord,
    CrossReference, EquivalenceEntry, MatchStatus, ReconciliationLine, PROTECTIVE_DEVICE_PREFIX,
};

/// Comment attached when no BOM entry matched the breaker line.
pub const COMMENT_NOT_IN_BOM: &str = "not found in BOM";

/// Comment stamped on every line of a double-unit report.
pub const COMMENT_DOUBLE_UNIT: &str = "double unit";

pub struct ReconciliationEngine {
    /// alternate part id -> canonical part id
    canonical_by_alt: HashMap<String, String>,
    /// "<sales order>-<item>" join key -> purchase order
    purchase_order_by_key: HashMap<String, String>,
    /// (purchase order, canonical part id) -> summed expected quantity.
    /// Key presence distinguishes "no BOM entry" from a zero-quantity entry.
    expected_by_line: HashMap<(String, String), f64>,
}

impl ReconciliationEngine {
    pub fn new(
        equivalences: &[EquivalenceEntry],
        cross_references: &[CrossReference],
        bom_lines: &[BomLine],
    ) -> Self {
        let canonical_by_alt: HashMap<String, String> = equivalences
            .iter()
            .map(|e| {
                (
                    normalize_id(&e.alt_part_id),
                    normalize_id(&e.canonical_part_id),
                )
            })
            .collect();

        let purchase_order_by_key: HashMap<String, String> = cross_references
            .iter()
            .map(|x| {
                let key = format!(
                    "{}-{}",
                    normalize_order_number(&x.sales_order),
                    normalize_order_number(&x.sales_order_item)
                );
                (key, normalize_order_number(&x.purchase_order))
            })
            .collect();

        // BOM lines outside the protective-device family that also have no
        // equivalence entry are noise and never indexed.
        let known_canonicals: HashSet<String> = canonical_by_alt.values().cloned().collect();
        let mut expected_by_line: HashMap<(String, String), f64> = HashMap::new();
        let mut discarded = 0usize;
        for line in bom_lines {
            let canonical = normalize_id(&line.canonical_part_id);
            if !canonical.starts_with(PROTECTIVE_DEVICE_PREFIX)
                && !known_canonicals.contains(&canonical)
            {
                discarded += 1;
                continue;
            }
            let key = (normalize_order_number(&line.purchase_order), canonical);
            *expected_by_line.entry(key).or_insert(0.0) += line.expected_quantity;
        }
        debug!(
            indexed = expected_by_line.len(),
            discarded, "bill of materials indexed"
        );

        Self {
            canonical_by_alt,
            purchase_order_by_key,
            expected_by_line,
        }
    }

    /// Classify every breaker record. Returns the filtered per-order listing
    /// (records that resolved to a canonical part id) and the full comparison
    /// listing (one row per record, unfiltered).
    pub fn reconcile(
        &self,
        records: &[BreakerRecord],
    ) -> (Vec<BreakerListingRow>, Vec<ReconciliationLine>) {
        let mut listing = Vec::new();
        let mut comparison = Vec::with_capacity(records.len());

        for record in records {
            let alt_part_id = normalize_id(&record.alt_part_id);
            let canonical = self.canonical_by_alt.get(&alt_part_id).cloned();
            let purchase_order = self
                .purchase_order_by_key
                .get(&normalize_order_number(&record.source_order_id))
                .cloned()
                .unwrap_or_default();

            let expected = canonical.as_ref().and_then(|canonical| {
                self.expected_by_line
                    .get(&(purchase_order.clone(), canonical.clone()))
                    .copied()
            });

            let (status, expected_quantity) = match expected {
                None => (MatchStatus::Missing, 0.0),
                Some(q) if q == f64::from(record.quantity) => (MatchStatus::Correct, q),
                Some(q) => (MatchStatus::Discrepant, q),
            };

            let mut comment = match status {
                MatchStatus::Missing => COMMENT_NOT_IN_BOM.to_string(),
                _ => String::new(),
            };
            // Faithful to the shipped behavior: the double-unit note replaces
            // any other comment, including the missing reason.
            if record.double_unit {
                comment = COMMENT_DOUBLE_UNIT.to_string();
            }

            if let Some(canonical) = &canonical {
                listing.push(BreakerListingRow {
                    purchase_order: purchase_order.clone(),
                    alt_part_id: alt_part_id.clone(),
                    canonical_part_id: canonical.clone(),
                    source_order_id: record.source_order_id.clone(),
                    quantity: record.quantity,
                });
            }

            comparison.push(ReconciliationLine {
                source_order_id: record.source_order_id.clone(),
                purchase_order,
                alt_part_id,
                canonical_part_id: canonical,
                observed_quantity: record.quantity,
                expected_quantity,
                status,
                comment,
            });
        }

        (listing, comparison)
    }
}
