pub mod config;
pub mod error;
pub mod logging;
pub mod tables;

pub use config::*;
pub use error::*;
pub use logging::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.layout.crossref_prefix, "CRUCE_");
        assert_eq!(config.layout.bom_prefix, "BOM_");
        assert_eq!(config.layout.reports_subdir, "panel-reports");
    }

    #[test]
    fn test_error_codes() {
        let error = AuditError::schema("BOM_week12.xlsx", "missing column");
        assert_eq!(error.error_code(), "SCHEMA_ERROR");
        assert!(error.to_string().contains("BOM_week12.xlsx"));
    }
}
