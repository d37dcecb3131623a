//! CSV serialization of the two output tables.
//!
//! The writers take any `io::Write`; where the bytes end up (file, archive,
//! HTTP response) is the collaborator's concern.

use std::io::Write;

use panelaudit_models::{BreakerListingRow, ReconciliationLine};
use panelaudit_utils::AuditResult;

pub const BREAKER_LISTING_HEADERS: [&str; 5] = [
    "Purchase Order",
    "Alternative Part Id",
    "Canonical Part Id",
    "Source Order Id",
    "Quantity",
];

pub const COMPARISON_HEADERS: [&str; 8] = [
    "Source Order Id",
    "Purchase Order",
    "Alternative Part Id",
    "Canonical Part Id",
    "Observed Quantity",
    "Expected Quantity",
    "Status",
    "Comment",
];

/// Write the filtered per-order breaker listing.
pub fn write_breaker_listing<W: Write>(rows: &[BreakerListingRow], writer: W) -> AuditResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(BREAKER_LISTING_HEADERS)?;
    for row in rows {
        let quantity = row.quantity.to_string();
        csv_writer.write_record([
            row.purchase_order.as_str(),
            row.alt_part_id.as_str(),
            row.canonical_part_id.as_str(),
            row.source_order_id.as_str(),
            quantity.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the full comparison listing, one row per extracted breaker record.
pub fn write_comparison_listing<W: Write>(
    rows: &[ReconciliationLine],
    writer: W,
) -> AuditResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(COMPARISON_HEADERS)?;
    for row in rows {
        let observed = row.observed_quantity.to_string();
        let expected = format_quantity(row.expected_quantity);
        let status = row.status.to_string();
        csv_writer.write_record([
            row.source_order_id.as_str(),
            row.purchase_order.as_str(),
            row.alt_part_id.as_str(),
            row.canonical_part_id.as_deref().unwrap_or(""),
            observed.as_str(),
            expected.as_str(),
            status.as_str(),
            row.comment.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Integral expected quantities render without the decimal tail.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 9e15 {
        format!("{}", quantity as i64)
    } else {
        quantity.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelaudit_models::MatchStatus;

    #[test]
    fn test_breaker_listing_headers_and_rows() {
        let rows = vec![BreakerListingRow {
            purchase_order: "500100".to_string(),
            alt_part_id: "XT1234567A".to_string(),
            canonical_part_id: "1SDX123456".to_string(),
            source_order_id: "1000-10".to_string(),
            quantity: 3,
        }];

        let mut out = Vec::new();
        write_breaker_listing(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Purchase Order,Alternative Part Id,Canonical Part Id,Source Order Id,Quantity"
        );
        assert_eq!(lines.next().unwrap(), "500100,XT1234567A,1SDX123456,1000-10,3");
    }

    #[test]
    fn test_comparison_listing_renders_missing_fields() {
        let rows = vec![ReconciliationLine {
            source_order_id: "1000-10".to_string(),
            purchase_order: String::new(),
            alt_part_id: "TEY123456789".to_string(),
            canonical_part_id: None,
            observed_quantity: 2,
            expected_quantity: 0.0,
            status: MatchStatus::Missing,
            comment: "not found in BOM".to_string(),
        }];

        let mut out = Vec::new();
        write_comparison_listing(&rows, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(
            "Source Order Id,Purchase Order,Alternative Part Id,Canonical Part Id,\
             Observed Quantity,Expected Quantity,Status,Comment"
        ));
        assert!(text.contains("1000-10,,TEY123456789,,2,0,Missing,not found in BOM"));
    }

    #[test]
    fn test_quantity_formatting() {
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(0.0), "0");
        assert_eq!(format_quantity(2.5), "2.5");
    }
}
