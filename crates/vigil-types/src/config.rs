//! Configuration for a Vigil deployment.
//!
//! [`VigilConfig`] is loaded from `vigil.toml` with built-in defaults and
//! `VIGIL_*` environment-variable overrides, merged in priority order
//! (later overrides earlier): defaults, file, environment.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VigilError;

/// Default configuration filename, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "vigil.toml";

/// Default per-patient alert collection path template.
pub const DEFAULT_ALERTS_COLLECTION: &str = "patients/{patientId}/alerts";

/// Default audit collection name.
pub const DEFAULT_AUDIT_COLLECTION: &str = "auditLogs";

/// Maximum config file size in bytes. Larger files are rejected rather
/// than read into memory.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Top-level Vigil configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VigilConfig {
    /// Path template for a patient's alert collection. Must contain the
    /// `{patientId}` placeholder.
    pub alerts_collection_template: String,
    /// Collection name for the append-only audit trail.
    pub audit_collection: String,
    /// Result-count limit for audit retrieval queries.
    pub audit_query_limit: usize,
    /// Default `tracing` filter directive (overridable via `RUST_LOG`).
    pub log_filter: String,
}

impl Default for VigilConfig {
    fn default() -> Self {
        Self {
            alerts_collection_template: DEFAULT_ALERTS_COLLECTION.to_string(),
            audit_collection: DEFAULT_AUDIT_COLLECTION.to_string(),
            audit_query_limit: 50,
            log_filter: "info".to_string(),
        }
    }
}

impl VigilConfig {
    /// Load configuration from the given TOML file, falling back to
    /// defaults when the file does not exist, then apply `VIGIL_*`
    /// environment-variable overrides.
    pub fn load(path: &Path) -> Result<Self, VigilError> {
        let mut config = if path.exists() {
            let metadata = std::fs::metadata(path)
                .map_err(|e| VigilError::Config(format!("failed to stat {}: {e}", path.display())))?;
            if metadata.len() > MAX_CONFIG_FILE_SIZE {
                return Err(VigilError::Config(format!(
                    "config file {} exceeds {MAX_CONFIG_FILE_SIZE} bytes",
                    path.display()
                )));
            }
            let raw = std::fs::read_to_string(path)
                .map_err(|e| VigilError::Config(format!("failed to read {}: {e}", path.display())))?;
            toml::from_str(&raw)
                .map_err(|e| VigilError::Config(format!("failed to parse {}: {e}", path.display())))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `VIGIL_*` environment-variable overrides in place.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("VIGIL_ALERTS_COLLECTION") {
            self.alerts_collection_template = v;
        }
        if let Ok(v) = std::env::var("VIGIL_AUDIT_COLLECTION") {
            self.audit_collection = v;
        }
        if let Ok(v) = std::env::var("VIGIL_AUDIT_QUERY_LIMIT") {
            if let Ok(n) = v.parse() {
                self.audit_query_limit = n;
            }
        }
        if let Ok(v) = std::env::var("VIGIL_LOG_FILTER") {
            self.log_filter = v;
        }
    }

    /// Check invariants the rest of the runtime relies on.
    pub fn validate(&self) -> Result<(), VigilError> {
        if !self.alerts_collection_template.contains("{patientId}") {
            return Err(VigilError::Config(format!(
                "alerts_collection_template {:?} is missing the {{patientId}} placeholder",
                self.alerts_collection_template
            )));
        }
        if self.audit_collection.is_empty() {
            return Err(VigilError::Config("audit_collection must not be empty".into()));
        }
        if self.audit_query_limit == 0 {
            return Err(VigilError::Config("audit_query_limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Expand the alert collection template for a patient id.
    pub fn alerts_collection_path(&self, patient_id: &str) -> String {
        self.alerts_collection_template.replace("{patientId}", patient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = VigilConfig::default();
        config.validate().unwrap();
        assert_eq!(config.alerts_collection_path("p1"), "patients/p1/alerts");
        assert_eq!(config.audit_collection, "auditLogs");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = VigilConfig::load(Path::new("/nonexistent/vigil.toml")).unwrap();
        assert_eq!(config, VigilConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "audit_query_limit = 10\nlog_filter = \"debug\"").unwrap();

        let config = VigilConfig::load(file.path()).unwrap();
        assert_eq!(config.audit_query_limit, 10);
        assert_eq!(config.log_filter, "debug");
        // Untouched fields keep their defaults.
        assert_eq!(config.audit_collection, DEFAULT_AUDIT_COLLECTION);
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let config = VigilConfig {
            alerts_collection_template: "patients/alerts".into(),
            ..VigilConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_query_limit_is_rejected() {
        let config = VigilConfig {
            audit_query_limit: 0,
            ..VigilConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
