//! Part-number equivalence table loader.
//!
//! The table is positional: first column is the canonical part id, second
//! column the alternate (vendor) id. The header row is skipped.

use std::path::Path;

use panelaudit_models::{normalize_id, EquivalenceEntry};

use crate::error::{AuditError, AuditResult};

use super::sheet::{read_sheet, Sheet};

pub fn load_equivalences(path: &Path) -> AuditResult<Vec<EquivalenceEntry>> {
    let sheet = read_sheet(path)?;
    equivalences_from_sheet(&sheet)
}

pub fn equivalences_from_sheet(sheet: &Sheet) -> AuditResult<Vec<EquivalenceEntry>> {
    if sheet.headers.len() < 2 {
        return Err(AuditError::schema(
            &sheet.source,
            "equivalence table needs at least two columns (canonical id, alternate id)",
        ));
    }

    let entries = sheet
        .rows
        .iter()
        .map(|row| EquivalenceEntry {
            canonical_part_id: normalize_id(sheet.cell(row, 0)),
            alt_part_id: normalize_id(sheet.cell(row, 1)),
        })
        .filter(|e| !e.canonical_part_id.is_empty() && !e.alt_part_id.is_empty())
        .collect();

    Ok(entries)
}
