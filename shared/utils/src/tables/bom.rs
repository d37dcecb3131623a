//! Bill-of-materials loader.
//!
//! The upstream export carries unstable header text, so columns are read by
//! position: 0 purchase order, 1 canonical part id, 4 expected quantity,
//! 5 BOM item code. Relevance filtering (protective-device family or
//! equivalence-listed parts) happens later, when the reconciliation engine
//! builds its indices.

use std::path::Path;

use panelaudit_models::{normalize_id, normalize_order_number, BomLine};

use crate::error::{AuditError, AuditResult};

use super::sheet::{read_sheet, Sheet};

const PURCHASE_ORDER_COLUMN: usize = 0;
const PART_ID_COLUMN: usize = 1;
const QUANTITY_COLUMN: usize = 4;
const ITEM_CODE_COLUMN: usize = 5;

pub fn load_bom_lines(path: &Path) -> AuditResult<Vec<BomLine>> {
    let sheet = read_sheet(path)?;
    bom_lines_from_sheet(&sheet)
}

pub fn bom_lines_from_sheet(sheet: &Sheet) -> AuditResult<Vec<BomLine>> {
    if sheet.headers.len() <= ITEM_CODE_COLUMN {
        return Err(AuditError::schema(
            &sheet.source,
            format!(
                "bill of materials needs at least {} columns, found {}",
                ITEM_CODE_COLUMN + 1,
                sheet.headers.len()
            ),
        ));
    }

    let mut lines = Vec::with_capacity(sheet.rows.len());
    for (idx, row) in sheet.rows.iter().enumerate() {
        let canonical_part_id = normalize_id(sheet.cell(row, PART_ID_COLUMN));
        if canonical_part_id.is_empty() {
            continue;
        }

        let quantity_cell = normalize_order_number(sheet.cell(row, QUANTITY_COLUMN));
        let expected_quantity: f64 = quantity_cell.parse().map_err(|_| {
            AuditError::schema(
                &sheet.source,
                format!(
                    "row {}: unparsable expected quantity '{}'",
                    idx + 2,
                    sheet.cell(row, QUANTITY_COLUMN).trim()
                ),
            )
        })?;

        lines.push(BomLine::new(
            normalize_order_number(sheet.cell(row, PURCHASE_ORDER_COLUMN)),
            canonical_part_id,
            expected_quantity,
            sheet.cell(row, ITEM_CODE_COLUMN).trim(),
        ));
    }

    Ok(lines)
}
