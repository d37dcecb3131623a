//! Key normalization
//!
//! Every join across the reference tables goes through these primitives so
//! that id comparison is case-insensitive and whitespace-trimmed everywhere.

/// Normalize a part or order identifier: trim surrounding whitespace and
/// uppercase. Idempotent.
pub fn normalize_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize an order number that may arrive as a numeric spreadsheet cell
/// rendered with a trailing decimal artifact (`"500100.0"`). Integral values
/// collapse to their integer string form; everything else is trimmed and
/// uppercased like any other id. Idempotent.
pub fn normalize_order_number(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('.') {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.fract() == 0.0 && value.abs() < 9e15 {
                return format!("{}", value as i64);
            }
        }
    }
    trimmed.to_uppercase()
}
