//! In-memory data store with DashMap + parking_lot::RwLock
//!
//! Uses DashMap for per-company project lists (per-entry locking) and
//! parking_lot::RwLock for the company table (low contention, frequent reads).
//! Implements [`LedgerSource`] so the ledger can run against loaded datasets.

use crate::error::SourceError;
use crate::source::LedgerSource;
use dashmap::DashMap;
use hourboard_types::{CompanyId, CompanyQuota, Project};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

/// A registered company
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRecord {
    pub id: CompanyId,
    pub name: String,
    /// `None` when the company has no explicit hour contract
    pub quota: Option<CompanyQuota>,
}

/// Thread-safe in-memory ledger source
#[derive(Debug, Default)]
pub struct InMemoryStore {
    /// Companies keyed by id (BTreeMap keeps listings stable)
    companies: RwLock<BTreeMap<CompanyId, CompanyRecord>>,

    /// Projects grouped by owning company
    projects: DashMap<CompanyId, Vec<Project>>,

    /// Set while the store refuses reads
    unavailable: RwLock<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a company
    pub fn upsert_company(
        &self,
        id: CompanyId,
        name: impl Into<String>,
        quota: Option<CompanyQuota>,
    ) {
        let name = name.into();
        debug!(
            company_id = %id,
            has_quota = quota.as_ref().is_some_and(|q| q.has_quota),
            "Upserting company"
        );
        self.companies
            .write()
            .insert(id.clone(), CompanyRecord { id, name, quota });
    }

    /// Register a project under its owning company
    pub fn insert_project(&self, project: Project) {
        self.projects
            .entry(project.company_id.clone())
            .or_default()
            .push(project);
    }

    /// Get a company record
    pub fn company(&self, id: &CompanyId) -> Option<CompanyRecord> {
        self.companies.read().get(id).cloned()
    }

    /// All company ids, sorted
    pub fn company_ids(&self) -> Vec<CompanyId> {
        self.companies.read().keys().cloned().collect()
    }

    pub fn company_count(&self) -> usize {
        self.companies.read().len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.iter().map(|entry| entry.value().len()).sum()
    }

    /// Refuse all reads with [`SourceError::Unavailable`] until [`Self::mark_available`]
    pub fn mark_unavailable(&self, reason: impl Into<String>) {
        *self.unavailable.write() = Some(reason.into());
    }

    pub fn mark_available(&self) {
        *self.unavailable.write() = None;
    }

    fn ensure_available(&self) -> Result<(), SourceError> {
        match self.unavailable.read().as_ref() {
            Some(reason) => Err(SourceError::Unavailable {
                message: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl LedgerSource for InMemoryStore {
    fn fetch_company_quota(
        &self,
        company_id: &CompanyId,
    ) -> Result<Option<CompanyQuota>, SourceError> {
        self.ensure_available()?;
        Ok(self.companies.read().get(company_id).map(|record| {
            record
                .quota
                .clone()
                .unwrap_or_else(|| CompanyQuota::absent(record.id.clone()))
        }))
    }

    fn fetch_company_projects(&self, company_id: &CompanyId) -> Result<Vec<Project>, SourceError> {
        self.ensure_available()?;
        Ok(self
            .projects
            .get(company_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }

    fn fetch_projects_for_companies(
        &self,
        company_ids: &[CompanyId],
    ) -> Result<Vec<Project>, SourceError> {
        self.ensure_available()?;
        let mut seen = std::collections::HashSet::new();
        Ok(company_ids
            .iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.projects.get(id).map(|entry| entry.value().clone()))
            .flatten()
            .collect())
    }
}
