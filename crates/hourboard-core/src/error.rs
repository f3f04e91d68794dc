//! Error types for hourboard-core
//!
//! Only genuine failures are errors. An absent quota, a company without
//! projects, a negative balance or a month outside the contract window are
//! all valid ledger outputs and never surface here.

use hourboard_types::CompanyId;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    // ===================
    // Lookup Errors
    // ===================
    #[error("Company not found: {company_id}")]
    CompanyNotFound { company_id: CompanyId },

    // ===================
    // Input Errors
    // ===================
    #[error("Invalid period selector (month: {month:?}, year: {year:?}): {reason}")]
    InvalidPeriodSelector {
        month: Option<u32>,
        year: Option<u32>,
        reason: String,
    },

    // ===================
    // Data Access Errors
    // ===================
    #[error("Data access failed during {operation}")]
    DataAccess {
        operation: &'static str,
        #[source]
        source: SourceError,
    },
}

impl LedgerError {
    pub(crate) fn data_access(operation: &'static str) -> impl FnOnce(SourceError) -> Self {
        move |source| LedgerError::DataAccess { operation, source }
    }

    pub(crate) fn selector(
        month: Option<u32>,
        year: Option<u32>,
        reason: impl Into<String>,
    ) -> Self {
        LedgerError::InvalidPeriodSelector {
            month,
            year,
            reason: reason.into(),
        }
    }

    /// Actionable hint for the operator, when one exists
    pub fn hint(&self) -> Option<String> {
        match self {
            LedgerError::CompanyNotFound { company_id } => Some(format!(
                "Check the company id '{}' exists in the dataset",
                company_id
            )),
            LedgerError::InvalidPeriodSelector { .. } => Some(
                "Pass both --month (1-12) and --year, or neither for an all-time figure"
                    .to_string(),
            ),
            LedgerError::DataAccess {
                source: SourceError::Malformed { entity, id, .. },
                ..
            } => Some(format!("Fix the {} record '{}' in the data source", entity, id)),
            LedgerError::DataAccess { .. } => None,
        }
    }
}

/// Failure reported by a [`crate::LedgerSource`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Data source unavailable: {message}")]
    Unavailable { message: String },

    #[error("Malformed {entity} record '{id}': {reason}")]
    Malformed {
        entity: &'static str,
        id: String,
        reason: String,
    },
}

impl SourceError {
    pub fn malformed(
        entity: &'static str,
        id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        SourceError::Malformed {
            entity,
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Error type for loading datasets and configuration files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported file format: {path} (expected .json or .toml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse TOML in {path}: {message}")]
    TomlParse {
        path: PathBuf,
        message: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid content in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

impl LoadError {
    pub(crate) fn read(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_data_access_keeps_source() {
        let err = LedgerError::data_access("fetch_company_projects")(SourceError::Unavailable {
            message: "connection refused".to_string(),
        });

        assert_eq!(err.to_string(), "Data access failed during fetch_company_projects");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Data source unavailable: connection refused".to_string())
        );
        assert!(err.hint().is_none());
    }

    #[test]
    fn test_hints() {
        let not_found = LedgerError::CompanyNotFound {
            company_id: CompanyId::from("ghost"),
        };
        assert!(not_found.hint().unwrap().contains("ghost"));

        let malformed = LedgerError::data_access("fetch_company_quota")(SourceError::malformed(
            "quota",
            "acme",
            "end date before start date",
        ));
        assert!(malformed.hint().unwrap().contains("quota record 'acme'"));
    }

    #[test]
    fn test_read_error_maps_not_found() {
        let err = LoadError::read(
            std::path::Path::new("/nope/data.json"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(matches!(err, LoadError::FileNotFound { .. }));

        let err = LoadError::read(
            std::path::Path::new("/nope/data.json"),
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, LoadError::FileRead { .. }));
    }
}
