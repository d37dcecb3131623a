//! Breaker token extraction from located listing text.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use panelaudit_models::BreakerRecord;
use panelaudit_utils::{AuditError, AuditResult};

use super::locator::{ListingLocator, StandardLocator};
use super::pdf;

/// Known breaker part-number family prefixes.
const BREAKER_PREFIXES: [&str; 2] = ["XT", "TEY"];

/// Minimum length of a real part token.
const MIN_TOKEN_LEN: usize = 10;

/// Substring marking placeholder/spacer tokens that are not real parts.
const SPACER_FRAGMENT: &str = "SPACE";

/// Footnote phrase annotating an intentionally empty breaker slot.
const SPACER_NOTE_PHRASE: &str = "breaker space - breaker is not included";

/// Punctuation trimmed from the tail of a part token.
const TRAILING_PUNCTUATION: [char; 3] = ['-', '.', ','];

/// Extracts aggregated breaker-count records from one report at a time.
/// Holds no per-document state, so one extractor is safely shared across
/// concurrent extractions.
pub struct BreakerExtractor {
    locator: Arc<dyn ListingLocator>,
}

impl BreakerExtractor {
    pub fn new() -> Self {
        Self::with_locator(Arc::new(StandardLocator))
    }

    pub fn with_locator(locator: Arc<dyn ListingLocator>) -> Self {
        Self { locator }
    }

    /// Extract all breaker records from one report file. The source order id
    /// comes from the file name; quantities are aggregated per distinct part
    /// token within the file. A report with no recognizable listing yields
    /// an empty vector.
    pub fn extract_file(&self, path: &Path) -> AuditResult<Vec<BreakerRecord>> {
        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path)
            .map_err(|e| AuditError::document(&file, e.to_string()))?;

        let pages = pdf::page_texts(&file, &data)?;
        let records = self.extract_pages(&source_order_id(path), &pages);
        debug!(
            file = %file,
            pages = pages.len(),
            records = records.len(),
            "extracted breaker records"
        );
        Ok(records)
    }

    /// Extract records from already-split page texts.
    pub fn extract_pages(&self, source_order_id: &str, pages: &[String]) -> Vec<BreakerRecord> {
        let listing = self.locator.locate(pages);
        count_part_tokens(&listing.text)
            .into_iter()
            .map(|(part, quantity)| {
                BreakerRecord::new(source_order_id, &part, quantity, listing.double_unit)
            })
            .collect()
    }
}

impl Default for BreakerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Derive the source order id from the report file name: extension stripped,
/// trailing parenthesized copy index (e.g. `" (2)"`) removed.
pub fn source_order_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let copy_suffix = Regex::new(r" \(\d+\)$").unwrap();
    copy_suffix.replace(&stem, "").trim().to_string()
}

/// Find the spacer-note footnote id, if the listing carries one: the leading
/// token of the footnote line, trailing period stripped.
fn identify_spacer_note(text: &str) -> Option<String> {
    for line in text.lines() {
        if line.to_lowercase().contains(SPACER_NOTE_PHRASE) {
            if let Some(first) = line.split_whitespace().next() {
                return Some(first.trim_end_matches('.').to_string());
            }
        }
    }
    None
}

/// Count qualifying part tokens per distinct value, suppressing lines that
/// end in the spacer-note id (those denote unpopulated slots). The BTreeMap
/// keeps record order deterministic across runs.
fn count_part_tokens(text: &str) -> BTreeMap<String, u32> {
    let spacer_note = identify_spacer_note(text);
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();

    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if let Some(note) = &spacer_note {
            if tokens.len() > 1 && tokens[tokens.len() - 1] == note.as_str() {
                continue;
            }
        }
        for token in tokens {
            if is_part_token(token) {
                let part = token.trim_end_matches(TRAILING_PUNCTUATION).to_string();
                *counts.entry(part).or_insert(0) += 1;
            }
        }
    }

    counts
}

fn is_part_token(token: &str) -> bool {
    BREAKER_PREFIXES.iter().any(|p| token.starts_with(p))
        && token.len() >= MIN_TOKEN_LEN
        && !token.to_uppercase().contains(SPACER_FRAGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_source_order_id_strips_copy_suffix() {
        assert_eq!(source_order_id(Path::new("1000-10 (2).pdf")), "1000-10");
        assert_eq!(source_order_id(Path::new("reports/1000-10.pdf")), "1000-10");
        assert_eq!(source_order_id(Path::new("1000-10 (notes).pdf")), "1000-10 (notes)");
    }

    #[test]
    fn test_quantity_conservation() {
        // N qualifying tokens for one part and no spacer suppression:
        // exactly one record with quantity N.
        let listing = "1 XT1234567A 250A\n2 XT1234567A 250A\n3 XT1234567A 250A";
        let records =
            BreakerExtractor::new().extract_pages("1000-10", &pages(&["cover", listing]));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].alt_part_id, "XT1234567A");
        assert_eq!(records[0].quantity, 3);
        assert!(!records[0].double_unit);
    }

    #[test]
    fn test_token_rules() {
        let counts = count_part_tokens(
            "XT1234567A,. TEY123456789 XT-SPACE-123 XT12345 other TEYSPACE1234",
        );
        // Trailing punctuation trimmed; SPACE tokens and short tokens dropped
        assert_eq!(counts.get("XT1234567A"), Some(&1));
        assert_eq!(counts.get("TEY123456789"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_spacer_note_suppresses_whole_line() {
        let listing = "\
5 XT1234567A 250A 3
6 XT1234567A 250A
3. breaker space - breaker is not included";
        let counts = count_part_tokens(listing);
        // The line ending in the note id contributes nothing, even though it
        // carries a qualifying token.
        assert_eq!(counts.get("XT1234567A"), Some(&1));
    }

    #[test]
    fn test_spacer_note_id_trailing_period_stripped() {
        assert_eq!(
            identify_spacer_note("3. BREAKER SPACE - breaker is NOT included"),
            Some("3".to_string())
        );
        assert_eq!(identify_spacer_note("no note here"), None);
    }

    #[test]
    fn test_double_unit_flag_propagates() {
        let records = BreakerExtractor::new().extract_pages(
            "1000-10",
            &pages(&[
                "cover",
                "PANEL MARKS A",
                "x",
                "y",
                "PANEL MARKS B",
                "XT1234567A",
            ]),
        );
        assert_eq!(records.len(), 1);
        assert!(records[0].double_unit);
    }

    #[test]
    fn test_no_tokens_yields_no_records() {
        let records = BreakerExtractor::new().extract_pages("1000-10", &pages(&["cover", ""]));
        assert!(records.is_empty());
    }
}
