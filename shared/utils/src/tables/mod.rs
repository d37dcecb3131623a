//! Reference-table loaders.
//!
//! The reconciliation engine depends on three read-only tables: the
//! part-number equivalence table, the sales-order cross-reference, and the
//! purchase-order bill of materials. Each loader reads CSV or Excel input
//! through the generic [`sheet`] reader and returns plain model rows; schema
//! violations are fatal and always name the offending file.

pub mod bom;
pub mod crossref;
pub mod equivalence;
pub mod sheet;

pub use bom::load_bom_lines;
pub use crossref::load_cross_references;
pub use equivalence::load_equivalences;
pub use sheet::{read_sheet, read_sheet_bytes, Sheet, TableFormat, SPREADSHEET_EXTENSIONS};
