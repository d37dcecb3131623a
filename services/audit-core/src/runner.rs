//! Audit Runner
//!
//! Orchestrates one audit run over an on-disk folder: discovers inputs,
//! loads the reference tables, extracts every report PDF concurrently, and
//! hands the complete breaker set to the reconciliation engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use panelaudit_models::{BreakerListingRow, BreakerRecord, ReconciliationLine};
use panelaudit_utils::{tables, AuditConfig, AuditError, AuditResult};

use crate::engine::ReconciliationEngine;
use crate::extract::BreakerExtractor;

/// What to do when a single report fails extraction: abort the run, or skip
/// the document and record the failure. Batch-tolerant by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    FailFast,
    SkipAndRecord,
}

/// One report that could not be extracted under [`FailurePolicy::SkipAndRecord`].
#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one complete audit run.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    /// Reports successfully extracted (including ones yielding no records).
    pub documents_processed: usize,
    pub breaker_listing: Vec<BreakerListingRow>,
    pub comparison: Vec<ReconciliationLine>,
    pub failures: Vec<DocumentFailure>,
}

/// Resolved input paths of one audit folder.
struct AuditInputs {
    report_dir: PathBuf,
    crossref_path: PathBuf,
    bom_path: PathBuf,
    equivalence_path: PathBuf,
}

pub struct AuditRunner {
    config: AuditConfig,
    extractor: Arc<BreakerExtractor>,
    policy: FailurePolicy,
}

impl AuditRunner {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            config,
            extractor: Arc::new(BreakerExtractor::new()),
            policy: FailurePolicy::SkipAndRecord,
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Swap in a different listing extractor (e.g. one with a custom
    /// listing locator for a new report layout).
    pub fn with_extractor(mut self, extractor: BreakerExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    /// Run the full audit over one folder. Precondition and schema failures
    /// abort before any extraction; per-document failures follow the
    /// configured policy.
    pub async fn run(&self, audit_dir: &Path) -> AuditResult<AuditOutcome> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!(%run_id, folder = %audit_dir.display(), "starting panel shipment audit");

        let inputs = self.discover_inputs(audit_dir)?;
        let equivalences = tables::load_equivalences(&inputs.equivalence_path)?;
        let cross_references = tables::load_cross_references(&inputs.crossref_path)?;
        let bom_lines = tables::load_bom_lines(&inputs.bom_path)?;
        info!(
            equivalences = equivalences.len(),
            cross_references = cross_references.len(),
            bom_lines = bom_lines.len(),
            "reference tables loaded"
        );

        let reports = list_report_files(&inputs.report_dir)?;
        info!(reports = reports.len(), "extracting panel reports");
        let (mut records, failures, documents_processed) = self.extract_all(reports).await?;

        // Extraction is unordered across files; sort so the output tables
        // are stable run to run.
        records.sort_by(|a, b| {
            (a.source_order_id.as_str(), a.alt_part_id.as_str())
                .cmp(&(b.source_order_id.as_str(), b.alt_part_id.as_str()))
        });

        let engine = ReconciliationEngine::new(&equivalences, &cross_references, &bom_lines);
        let (breaker_listing, comparison) = engine.reconcile(&records);

        let completed_at = Utc::now();
        info!(
            %run_id,
            records = records.len(),
            listed = breaker_listing.len(),
            compared = comparison.len(),
            skipped = failures.len(),
            "audit complete"
        );

        Ok(AuditOutcome {
            run_id,
            started_at,
            completed_at,
            documents_processed,
            breaker_listing,
            comparison,
            failures,
        })
    }

    fn discover_inputs(&self, audit_dir: &Path) -> AuditResult<AuditInputs> {
        if !audit_dir.is_dir() {
            return Err(AuditError::missing_input(audit_dir.display().to_string()));
        }

        let layout = &self.config.layout;
        let report_dir = audit_dir.join(&layout.reports_subdir);
        if !report_dir.is_dir() {
            return Err(AuditError::missing_input(report_dir.display().to_string()));
        }

        let crossref_path = find_prefixed_spreadsheet(audit_dir, &layout.crossref_prefix)?;
        let bom_path = find_prefixed_spreadsheet(audit_dir, &layout.bom_prefix)?;

        let equivalence_path = PathBuf::from(&layout.equivalence_file);
        if !equivalence_path.is_file() {
            return Err(AuditError::missing_input(
                equivalence_path.display().to_string(),
            ));
        }

        Ok(AuditInputs {
            report_dir,
            crossref_path,
            bom_path,
            equivalence_path,
        })
    }

    async fn extract_all(
        &self,
        reports: Vec<PathBuf>,
    ) -> AuditResult<(Vec<BreakerRecord>, Vec<DocumentFailure>, usize)> {
        let permits = self
            .config
            .extraction
            .max_parallel
            .or_else(|| std::thread::available_parallelism().ok().map(|n| n.get()))
            .unwrap_or(1);
        let semaphore = Arc::new(Semaphore::new(permits));

        let mut tasks = JoinSet::new();
        for path in reports {
            let semaphore = Arc::clone(&semaphore);
            let extractor = Arc::clone(&self.extractor);
            tasks.spawn(async move {
                // The semaphore is never closed while tasks run
                let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
                let worker_path = path.clone();
                let outcome =
                    tokio::task::spawn_blocking(move || extractor.extract_file(&worker_path))
                        .await
                        .unwrap_or_else(|e| {
                            Err(AuditError::document(
                                path.display().to_string(),
                                format!("extraction task failed: {e}"),
                            ))
                        });
                (path, outcome)
            });
        }

        let mut records = Vec::new();
        let mut failures = Vec::new();
        let mut processed = 0usize;
        while let Some(joined) = tasks.join_next().await {
            let (path, outcome) =
                joined.map_err(|e| AuditError::internal(format!("extraction task panicked: {e}")))?;
            match outcome {
                Ok(mut extracted) => {
                    processed += 1;
                    records.append(&mut extracted);
                }
                Err(error) => match self.policy {
                    FailurePolicy::FailFast => return Err(error),
                    FailurePolicy::SkipAndRecord => {
                        warn!(report = %path.display(), %error, "skipping unreadable report");
                        failures.push(DocumentFailure {
                            path,
                            reason: error.to_string(),
                        });
                    }
                },
            }
        }

        Ok((records, failures, processed))
    }
}

/// All PDF documents in the report folder, sorted for stable scheduling.
fn list_report_files(report_dir: &Path) -> AuditResult<Vec<PathBuf>> {
    let mut reports = Vec::new();
    for entry in std::fs::read_dir(report_dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if path.is_file() && is_pdf {
            reports.push(path);
        }
    }
    reports.sort();
    Ok(reports)
}

/// Locate the single spreadsheet in `dir` whose name starts with `prefix`
/// (case-insensitive) and carries a spreadsheet extension.
fn find_prefixed_spreadsheet(dir: &Path, prefix: &str) -> AuditResult<PathBuf> {
    let wanted = prefix.to_uppercase();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| tables::SPREADSHEET_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if name.to_uppercase().starts_with(&wanted) && has_extension {
            return Ok(path);
        }
    }
    Err(AuditError::missing_input(
        dir.join(format!("{prefix}*.xlsx")).display().to_string(),
    ))
}
