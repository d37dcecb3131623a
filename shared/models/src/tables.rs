//! Reference-table rows: equivalence, cross-reference, and bill of materials.
//!
//! All three are loaded once per audit run and read-only afterward.

use serde::{Deserialize, Serialize};

/// Prefix of the protective-device part family. BOM lines outside this
/// family that also have no equivalence entry are irrelevant noise.
pub const PROTECTIVE_DEVICE_PREFIX: &str = "1SDX";

/// Marker prefix of a parent BOM item code.
pub const PARENT_ITEM_MARKER: &str = "B";

/// Maps one alternate (vendor) part number to its canonical part number.
/// An alt id maps to at most one canonical id; a canonical id may carry
/// several alt ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceEntry {
    pub canonical_part_id: String,
    pub alt_part_id: String,
}

/// Links a sales order line to the purchase order that procured it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub sales_order: String,
    pub sales_order_item: String,
    pub purchase_order: String,
}

impl CrossReference {
    /// Join key used to resolve a purchase order for a source order id:
    /// sales order and item joined by a hyphen, matching the id embedded in
    /// the report file names.
    pub fn join_key(&self) -> String {
        format!("{}-{}", self.sales_order, self.sales_order_item)
    }
}

/// One expected-quantity line of a purchase-order bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub purchase_order: String,
    pub canonical_part_id: String,
    pub expected_quantity: f64,
    pub bom_item_code: String,
    /// Derived: true unless the item code carries the parent-item marker.
    pub is_child: bool,
}

impl BomLine {
    pub fn new(
        purchase_order: impl Into<String>,
        canonical_part_id: impl Into<String>,
        expected_quantity: f64,
        bom_item_code: impl Into<String>,
    ) -> Self {
        let bom_item_code = bom_item_code.into();
        let is_child = !bom_item_code.starts_with(PARENT_ITEM_MARKER);
        Self {
            purchase_order: purchase_order.into(),
            canonical_part_id: canonical_part_id.into(),
            expected_quantity,
            bom_item_code,
            is_child,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_child_derivation() {
        assert!(!BomLine::new("500100", "1SDX123456", 1.0, "B010").is_child);
        assert!(BomLine::new("500100", "1SDX123456", 1.0, "0010").is_child);
        assert!(BomLine::new("500100", "1SDX123456", 1.0, "").is_child);
    }
}
