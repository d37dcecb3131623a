use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub layout: LayoutConfig,
    pub extraction: ExtractionConfig,
    pub logging: LoggingConfig,
}

/// On-disk layout of one audit folder, as handed over by the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Sub-folder of the audit folder holding the per-unit report PDFs.
    pub reports_subdir: String,
    /// File-name prefix of the sales-order cross-reference spreadsheet.
    pub crossref_prefix: String,
    /// File-name prefix of the bill-of-materials spreadsheet.
    pub bom_prefix: String,
    /// Path to the static part-number equivalence table shipped with the
    /// core, not supplied per run.
    pub equivalence_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Cap on concurrently extracted PDFs; defaults to available parallelism.
    pub max_parallel: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AuditConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with PANEL_AUDIT prefix
            .add_source(Environment::with_prefix("PANEL_AUDIT").separator("__"));

        config.build()?.try_deserialize()
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig {
                reports_subdir: "panel-reports".to_string(),
                crossref_prefix: "CRUCE_".to_string(),
                bom_prefix: "BOM_".to_string(),
                equivalence_file: "data/np_equivalences.xlsx".to_string(),
            },
            extraction: ExtractionConfig { max_parallel: None },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "plain".to_string(),
                file_path: None,
            },
        }
    }
}
