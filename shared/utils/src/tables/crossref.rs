//! Sales-order cross-reference loader.
//!
//! Columns are matched by name: `Sales Order`, `Sales order item`, and
//! `Order` (the purchase order). Order numbers frequently arrive as numeric
//! cells rendered with a trailing `.0`, so every field runs through
//! [`normalize_order_number`].

use std::path::Path;

use panelaudit_models::{normalize_order_number, CrossReference};

use crate::error::{AuditError, AuditResult};

use super::sheet::{read_sheet, Sheet};

const SALES_ORDER_COLUMN: &str = "Sales Order";
const SALES_ORDER_ITEM_COLUMN: &str = "Sales order item";
const PURCHASE_ORDER_COLUMN: &str = "Order";

pub fn load_cross_references(path: &Path) -> AuditResult<Vec<CrossReference>> {
    let sheet = read_sheet(path)?;
    cross_references_from_sheet(&sheet)
}

pub fn cross_references_from_sheet(sheet: &Sheet) -> AuditResult<Vec<CrossReference>> {
    let sales_order = require_column(sheet, SALES_ORDER_COLUMN)?;
    let sales_order_item = require_column(sheet, SALES_ORDER_ITEM_COLUMN)?;
    let purchase_order = require_column(sheet, PURCHASE_ORDER_COLUMN)?;

    let entries = sheet
        .rows
        .iter()
        .map(|row| CrossReference {
            sales_order: normalize_order_number(sheet.cell(row, sales_order)),
            sales_order_item: normalize_order_number(sheet.cell(row, sales_order_item)),
            purchase_order: normalize_order_number(sheet.cell(row, purchase_order)),
        })
        .filter(|x| !x.sales_order.is_empty())
        .collect();

    Ok(entries)
}

fn require_column(sheet: &Sheet, name: &str) -> AuditResult<usize> {
    sheet
        .column(name)
        .ok_or_else(|| AuditError::schema(&sheet.source, format!("missing column '{name}'")))
}
