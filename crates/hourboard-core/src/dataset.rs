//! Dataset loader: JSON or TOML snapshot -> [`InMemoryStore`]
//!
//! Layout (camelCase keys):
//!
//! ```json
//! {
//!   "companies": [
//!     { "id": "acme", "name": "Acme", "quota": {
//!         "contractedHours": 40, "packageType": "monthly",
//!         "startDate": "2025-01-01", "carryModel": "currentAccount" } }
//!   ],
//!   "projects": [
//!     { "projectId": "p-1", "companyId": "acme", "name": "Portal",
//!       "status": "inProgress", "estimatedHours": 12.5,
//!       "createdAt": "2025-01-03T09:00:00Z" }
//!   ]
//! }
//! ```
//!
//! In TOML, dates must be quoted strings (`startDate = "2025-01-01"`).

use crate::error::LoadError;
use crate::quota::validate_quota;
use crate::store::InMemoryStore;
use chrono::NaiveDate;
use hourboard_types::{CarryModel, CompanyId, CompanyQuota, PackageType, Project};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Raw dataset document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub companies: Vec<CompanyEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyEntry {
    pub id: CompanyId,
    #[serde(default)]
    pub name: String,
    /// Absent for companies without an explicit contract
    #[serde(default)]
    pub quota: Option<QuotaEntry>,
}

/// Quota nested under its company (no company id of its own)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaEntry {
    #[serde(default = "default_has_quota")]
    pub has_quota: bool,
    #[serde(default)]
    pub contracted_hours: Decimal,
    #[serde(default)]
    pub package_type: PackageType,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub carry_model: CarryModel,
}

fn default_has_quota() -> bool {
    true
}

impl QuotaEntry {
    fn into_quota(self, company_id: CompanyId) -> CompanyQuota {
        CompanyQuota {
            company_id,
            has_quota: self.has_quota,
            contracted_hours: self.contracted_hours,
            package_type: self.package_type,
            start_date: self.start_date,
            end_date: self.end_date,
            carry_model: self.carry_model,
        }
    }
}

/// Loader for dataset files
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parse a dataset file, format chosen by extension (`.json` / `.toml`)
    pub fn parse_file(path: &Path) -> Result<Dataset, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::read(path, e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| LoadError::JsonParse {
                path: path.to_path_buf(),
                message: e.to_string(),
                source: e,
            }),
            Some("toml") => toml::from_str(&content).map_err(|e| LoadError::TomlParse {
                path: path.to_path_buf(),
                message: e.message().to_string(),
                source: e,
            }),
            _ => Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Parse and load a dataset file into a fresh store
    pub fn load_file(path: &Path) -> Result<InMemoryStore, LoadError> {
        let dataset = Self::parse_file(path)?;
        let store = Self::into_store(dataset).map_err(|reason| LoadError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        info!(
            path = %path.display(),
            companies = store.company_count(),
            projects = store.project_count(),
            "Dataset loaded"
        );
        Ok(store)
    }

    /// Build a store from a parsed dataset.
    ///
    /// Projects must reference a known company, carry unique ids and
    /// non-negative estimates. Quota records are checked again on every read,
    /// so a bad quota only affects its own company.
    pub fn into_store(dataset: Dataset) -> Result<InMemoryStore, String> {
        let store = InMemoryStore::new();
        let mut company_ids = HashSet::new();

        for entry in dataset.companies {
            if !company_ids.insert(entry.id.clone()) {
                return Err(format!("duplicate company id '{}'", entry.id));
            }
            let quota = entry.quota.map(|q| q.into_quota(entry.id.clone()));
            if let Some(Err(e)) = quota.as_ref().map(validate_quota) {
                warn!(company_id = %entry.id, error = %e, "Company quota is malformed");
            }
            store.upsert_company(entry.id, entry.name, quota);
        }

        let mut project_ids = HashSet::new();
        for project in dataset.projects {
            if !company_ids.contains(&project.company_id) {
                return Err(format!(
                    "project '{}' references unknown company '{}'",
                    project.project_id, project.company_id
                ));
            }
            if !project_ids.insert(project.project_id.clone()) {
                return Err(format!("duplicate project id '{}'", project.project_id));
            }
            if project.estimate() < Decimal::ZERO {
                return Err(format!(
                    "project '{}' has negative estimated hours",
                    project.project_id
                ));
            }
            store.insert_project(project);
        }

        Ok(store)
    }
}
