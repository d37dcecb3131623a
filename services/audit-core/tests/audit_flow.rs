//! End-to-end flow tests: table loaders wired into the reconciliation
//! engine, plus on-disk input discovery preconditions.

use std::fs;

use panelaudit_core::{
    write_breaker_listing, write_comparison_listing, AuditRunner, BreakerExtractor,
    FailurePolicy, ReconciliationEngine,
};
use panelaudit_models::MatchStatus;
use panelaudit_utils::tables::{
    bom::bom_lines_from_sheet, crossref::cross_references_from_sheet,
    equivalence::equivalences_from_sheet, read_sheet_bytes, TableFormat,
};
use panelaudit_utils::{AuditConfig, AuditError};

const EQUIVALENCES_CSV: &[u8] = b"NP ABB,NP Alternativo\n1SDX123456,XT1234567A";
const CRUCE_CSV: &[u8] = b"Sales Order,Sales order item,Order\n1000.0,10.0,500100.0";
const BOM_CSV: &[u8] =
    b"Purchasing Document,Material,Plant,Storage,Quantity,BOM Item\n500100,1SDX123456,P1,S1,3,0010";

fn pages(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|t| t.to_string()).collect()
}

/// The scenario from the audit handbook: one report named "1000-10 (2).pdf"
/// carrying three XT1234567A breakers reconciles as a single Correct line.
#[test]
fn loaders_extractor_and_engine_agree_end_to_end() {
    let equivalences = equivalences_from_sheet(
        &read_sheet_bytes("np_equivalences.csv", EQUIVALENCES_CSV, TableFormat::Csv).unwrap(),
    )
    .unwrap();
    let cross_references = cross_references_from_sheet(
        &read_sheet_bytes("CRUCE_w12.csv", CRUCE_CSV, TableFormat::Csv).unwrap(),
    )
    .unwrap();
    let bom_lines =
        bom_lines_from_sheet(&read_sheet_bytes("BOM_w12.csv", BOM_CSV, TableFormat::Csv).unwrap())
            .unwrap();

    let order_id = panelaudit_core::extract::source_order_id(std::path::Path::new(
        "1000-10 (2).pdf",
    ));
    assert_eq!(order_id, "1000-10");

    let listing = "1 XT1234567A 250A\n2 XT1234567A 250A\n3 XT1234567A 250A";
    let records = BreakerExtractor::new().extract_pages(&order_id, &pages(&["cover", listing]));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].quantity, 3);

    let engine = ReconciliationEngine::new(&equivalences, &cross_references, &bom_lines);
    let (breaker_listing, comparison) = engine.reconcile(&records);

    assert_eq!(breaker_listing.len(), 1);
    assert_eq!(breaker_listing[0].purchase_order, "500100");

    assert_eq!(comparison.len(), 1);
    assert_eq!(comparison[0].status, MatchStatus::Correct);
    assert_eq!(comparison[0].observed_quantity, 3);
    assert_eq!(comparison[0].expected_quantity, 3.0);

    let mut listing_csv = Vec::new();
    write_breaker_listing(&breaker_listing, &mut listing_csv).unwrap();
    let mut comparison_csv = Vec::new();
    write_comparison_listing(&comparison, &mut comparison_csv).unwrap();

    let comparison_text = String::from_utf8(comparison_csv).unwrap();
    assert!(comparison_text.contains("1000-10,500100,XT1234567A,1SDX123456,3,3,Correct,"));

    // Running the engine again yields byte-identical tables
    let (_, comparison_again) = engine.reconcile(&records);
    let mut comparison_csv_again = Vec::new();
    write_comparison_listing(&comparison_again, &mut comparison_csv_again).unwrap();
    assert_eq!(comparison_text.as_bytes(), comparison_csv_again.as_slice());
}

fn test_config(dir: &std::path::Path) -> AuditConfig {
    let mut config = AuditConfig::default();
    config.layout.equivalence_file = dir
        .join("np_equivalences.csv")
        .to_string_lossy()
        .to_string();
    config
}

#[tokio::test]
async fn missing_inputs_abort_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let runner = AuditRunner::new(test_config(dir.path()));

    // No report sub-folder
    let err = runner.run(dir.path()).await.unwrap_err();
    assert!(matches!(err, AuditError::MissingInput { ref path }
        if path.contains("panel-reports")));

    // Reports present, cross-reference spreadsheet absent
    fs::create_dir(dir.path().join("panel-reports")).unwrap();
    let err = runner.run(dir.path()).await.unwrap_err();
    assert!(matches!(err, AuditError::MissingInput { ref path } if path.contains("CRUCE_")));

    // Cross-reference present, BOM absent
    fs::write(dir.path().join("CRUCE_week12.csv"), CRUCE_CSV).unwrap();
    let err = runner.run(dir.path()).await.unwrap_err();
    assert!(matches!(err, AuditError::MissingInput { ref path } if path.contains("BOM_")));

    // BOM present, equivalence table absent
    fs::write(dir.path().join("BOM_week12.csv"), BOM_CSV).unwrap();
    let err = runner.run(dir.path()).await.unwrap_err();
    assert!(matches!(err, AuditError::MissingInput { ref path }
        if path.contains("np_equivalences.csv")));
}

#[tokio::test]
async fn run_with_no_reports_yields_empty_tables() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("panel-reports")).unwrap();
    fs::write(dir.path().join("CRUCE_week12.csv"), CRUCE_CSV).unwrap();
    fs::write(dir.path().join("BOM_week12.csv"), BOM_CSV).unwrap();
    fs::write(dir.path().join("np_equivalences.csv"), EQUIVALENCES_CSV).unwrap();

    let runner = AuditRunner::new(test_config(dir.path()));
    let outcome = runner.run(dir.path()).await.unwrap();

    assert_eq!(outcome.documents_processed, 0);
    assert!(outcome.breaker_listing.is_empty());
    assert!(outcome.comparison.is_empty());
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn unreadable_report_follows_failure_policy() {
    let dir = tempfile::tempdir().unwrap();
    let reports = dir.path().join("panel-reports");
    fs::create_dir(&reports).unwrap();
    fs::write(dir.path().join("CRUCE_week12.csv"), CRUCE_CSV).unwrap();
    fs::write(dir.path().join("BOM_week12.csv"), BOM_CSV).unwrap();
    fs::write(dir.path().join("np_equivalences.csv"), EQUIVALENCES_CSV).unwrap();
    // Not a PDF at all
    fs::write(reports.join("1000-10.pdf"), b"garbage").unwrap();

    let skip_runner = AuditRunner::new(test_config(dir.path()));
    let outcome = skip_runner.run(dir.path()).await.unwrap();
    assert_eq!(outcome.failures.len(), 1);
    assert!(outcome.failures[0].path.ends_with("1000-10.pdf"));
    assert!(outcome.comparison.is_empty());

    let fail_fast = AuditRunner::new(test_config(dir.path())).with_policy(FailurePolicy::FailFast);
    let err = fail_fast.run(dir.path()).await.unwrap_err();
    assert!(err.to_string().contains("1000-10.pdf"));
}

#[test]
fn schema_error_surfaces_offending_file() {
    let data = b"Sales Order,Order\n1000,500100";
    let sheet = read_sheet_bytes("CRUCE_bad.csv", data, TableFormat::Csv).unwrap();
    let err = cross_references_from_sheet(&sheet).unwrap_err();
    assert!(err.to_string().contains("CRUCE_bad.csv"));
}
