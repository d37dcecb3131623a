//! Per-page text extraction from PDF bytes.

use panelaudit_utils::{AuditError, AuditResult};

/// Extract the plain text of every page. Pages whose extraction yields no
/// content come back as empty strings; only an undecodable document is an
/// error.
pub fn page_texts(file: &str, data: &[u8]) -> AuditResult<Vec<String>> {
    pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| AuditError::document(file, e.to_string()))
}
